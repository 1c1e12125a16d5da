// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the controller: input events, notifications, phases, and markers.
//!
//! ## Overview
//!
//! [`GraphEvent`] is what the host feeds in; [`DndEvent`] is what
//! [`CompoundDnd::handle`](crate::gesture::CompoundDnd::handle) hands back.

use alloc::vec::Vec;

/// Events the host delivers to the controller.
///
/// `Grab`, `Drag` and `Free` come from the pointer/input layer for a node.
/// `Add` and `Remove` are structural changes of the graph, including the ones
/// the controller itself caused (those may be delivered after the handler that
/// caused them has returned).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GraphEvent<K> {
    /// A node was grabbed by the pointer.
    Grab(K),
    /// A grabbed node moved.
    Drag(K),
    /// A grabbed node was released.
    Free(K),
    /// A node was added to the graph.
    Add(K),
    /// A node was removed from the graph.
    Remove(K),
}

/// Notifications emitted at gesture transitions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DndEvent<K> {
    /// A gesture started for `grabbed`.
    Grabbed {
        /// Nodes being dragged.
        grabbed: Vec<K>,
    },
    /// The dragged nodes entered `target` (provisionally reparented under it).
    Entered {
        /// Nodes being dragged.
        grabbed: Vec<K>,
        /// The container the nodes were moved into.
        target: K,
        /// Nodes grouped with the dragged ones under a synthesized container; empty for existing containers.
        siblings: Vec<K>,
    },
    /// The dragged nodes left `target` and were unparented.
    Exited {
        /// Nodes being dragged.
        grabbed: Vec<K>,
        /// The former container. May no longer exist if it was synthesized and became empty.
        target: K,
        /// The former sibling group, now unparented.
        siblings: Vec<K>,
    },
    /// The gesture ended and the current parenting was committed.
    Dropped {
        /// Nodes that were dragged.
        grabbed: Vec<K>,
        /// Final container, if any.
        target: Option<K>,
        /// Final sibling group.
        siblings: Vec<K>,
    },
}

/// Coarse gesture state.
///
/// Settling after an enter is orthogonal and reported by
/// [`CompoundDnd::is_settling`](crate::gesture::CompoundDnd::is_settling).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// No gesture in progress.
    Idle,
    /// Dragging with no drop target.
    Unparented,
    /// Dragging inside a drop target.
    Parented,
}

/// Handle for one scheduled settle expiry.
///
/// Tokens are unique per controller; a token from an earlier enter or an ended
/// gesture no longer matches and is ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SettleToken(pub(crate) u64);

impl SettleToken {
    /// Raw token value, for hosts that key their timers by integer.
    pub const fn get(self) -> u64 {
        self.0
    }
}

bitflags::bitflags! {
    /// Visual state markers the controller puts on nodes.
    ///
    /// Purely cosmetic: the controller never reads them back.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Markers: u8 {
        /// Node is being dragged.
        const GRABBED      = 0b0000_0001;
        /// Node is the current drop target.
        const DROP_TARGET  = 0b0000_0010;
        /// Node is in the current sibling group.
        const DROP_SIBLING = 0b0000_0100;
        /// Drop target was synthesized by the controller.
        const NEW_PARENT   = 0b0000_1000;
    }
}

impl Markers {
    /// Class name conventionally used for a single marker, or `None` for combinations.
    pub fn class_name(self) -> Option<&'static str> {
        if self == Self::GRABBED {
            Some("cdnd-grabbed-node")
        } else if self == Self::DROP_TARGET {
            Some("cdnd-drop-target")
        } else if self == Self::DROP_SIBLING {
            Some("cdnd-drop-sibling")
        } else if self == Self::NEW_PARENT {
            Some("cdnd-new-parent")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_for_single_markers() {
        assert_eq!(Markers::GRABBED.class_name(), Some("cdnd-grabbed-node"));
        assert_eq!(Markers::DROP_TARGET.class_name(), Some("cdnd-drop-target"));
        assert_eq!(Markers::DROP_SIBLING.class_name(), Some("cdnd-drop-sibling"));
        assert_eq!(Markers::NEW_PARENT.class_name(), Some("cdnd-new-parent"));
        assert_eq!(
            (Markers::DROP_TARGET | Markers::NEW_PARENT).class_name(),
            None
        );
        assert_eq!(Markers::empty().class_name(), None);
    }

    #[test]
    fn class_names_per_flag() {
        let names: Vec<_> = (Markers::DROP_TARGET | Markers::NEW_PARENT)
            .iter()
            .filter_map(Markers::class_name)
            .collect();
        assert_eq!(names, ["cdnd-drop-target", "cdnd-new-parent"]);
    }
}
