// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the compound tree: node identifiers, flags, node specs, and box options.

use kurbo::Rect;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Stale `NodeId`s never alias a different live node because the generation must match.
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Interaction state of a node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node is part of the selection.
        const SELECTED = 0b0000_0001;
        /// Node is currently held by the pointer.
        const GRABBED  = 0b0000_0010;
    }
}

/// Default padding around the children of a compound node.
pub const COMPOUND_PADDING: f64 = 5.0;

/// Definition of a node to insert.
#[derive(Clone, Debug)]
pub struct TreeNode {
    /// World-space box of the node body. Ignored while the node has children.
    pub bounds: Rect,
    /// World-space box of the node's label, if it has one.
    pub label: Option<Rect>,
    /// Space kept around the children when the node is a compound.
    pub padding: f64,
}

impl Default for TreeNode {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            label: None,
            padding: COMPOUND_PADDING,
        }
    }
}

impl TreeNode {
    /// A plain node covering `bounds`.
    pub fn rect(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    /// Attach a label box.
    pub fn with_label(mut self, label: Rect) -> Self {
        self.label = Some(label);
        self
    }
}

/// What to include when measuring a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxOptions {
    /// Include label boxes.
    pub include_labels: bool,
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self {
            include_labels: true,
        }
    }
}
