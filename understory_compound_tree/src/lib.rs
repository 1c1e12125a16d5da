// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_compound_tree --heading-base-level=0

//! Understory Compound Tree: a Kurbo-native compound node tree.
//!
//! A small forest of rectangular nodes where a node with children is a
//! compound whose box follows its children. It implements
//! [`HostGraph`](understory_compound_dnd::HostGraph), so it can be driven by
//! [`CompoundDnd`](understory_compound_dnd::CompoundDnd) directly.
//!
//! ## API overview
//!
//! - [`Tree`]: nodes, parent/child links, selection and grab flags, markers, batches.
//! - [`TreeNode`]: definition of a node (body box, optional label, compound padding).
//! - [`NodeId`]: generational handle of a node.
//! - [`BoxOptions`]: whether labels count toward a node's box.
//! - [`dispatch`] / [`flush`]: feed events to a controller, delivering the
//!   tree's own add/remove notifications after each handler returns.
//!
//! ## Bounds
//!
//! A childless node measures its body. A compound measures the union of its
//! children grown by its padding, so it has no box of its own to keep in sync.
//! Labels are added on top when [`BoxOptions::include_labels`] is set.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::Rect;
//! use understory_compound_dnd::{CompoundDnd, DndEvent, GraphEvent, ManualScheduler, Options};
//! use understory_compound_tree::{Tree, TreeNode, dispatch};
//!
//! let mut tree = Tree::new();
//! let a = tree.insert(None, TreeNode::rect(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! let b = tree.insert(None, TreeNode::rect(Rect::new(100.0, 0.0, 110.0, 10.0)));
//!
//! let mut dnd: CompoundDnd<Tree> = CompoundDnd::new(Options::default());
//! let mut timers = ManualScheduler::new();
//! dnd.start();
//!
//! dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Grab(a));
//! tree.move_to(a, 92.0, 0.0);
//! let events = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Drag(a));
//! let Some(DndEvent::Entered { target, .. }) = events.first() else {
//!     panic!("expected to enter a new container");
//! };
//! assert_eq!(tree.parent(b), Some(*target));
//!
//! for token in timers.advance(Duration::from_millis(100)) {
//!     dnd.settle_expired(token);
//! }
//! let events = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Free(a));
//! assert!(matches!(events.as_slice(), [DndEvent::Dropped { target: Some(_), .. }]));
//! ```

#![no_std]

extern crate alloc;

mod host;
mod tree;
mod types;

pub use host::{dispatch, flush};
pub use tree::Tree;
pub use types::{BoxOptions, COMPOUND_PADDING, NodeFlags, NodeId, TreeNode};
