// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_compound_dnd --heading-base-level=0

//! Understory Compound DnD: group-aware drag-and-drop for node graphs.
//!
//! ## Overview
//!
//! While a node is dragged, this crate looks for containers (compound nodes) or
//! plain nodes under it, provisionally reparents the dragged node into them, and
//! creates a new container when two plain nodes are dropped onto each other.
//! Releasing the pointer commits whatever parenting is in place.
//!
//! It does not store the graph, draw anything, or capture input.
//! The graph is reached through [`HostGraph`](crate::host::HostGraph), input arrives as
//! [`GraphEvent`](crate::types::GraphEvent)s, and results leave as [`DndEvent`](crate::types::DndEvent)s.
//!
//! ## Hysteresis
//!
//! Entering uses the grabbed node's box padded by `over_threshold`; leaving uses it
//! padded by `out_threshold` and compares against the container bounds captured on
//! entry. With distinct thresholds a node resting on a container edge does not
//! flip between inside and outside on consecutive frames.
//!
//! ## Settling
//!
//! After an enter, drag frames are ignored until the token handed to the
//! [`Scheduler`](crate::settle::Scheduler) comes back through
//! [`CompoundDnd::settle_expired`](crate::gesture::CompoundDnd::settle_expired).
//!
//! ## Synthesized containers
//!
//! Containers created by the controller are remembered until it is stopped. When the dragged nodes
//! leave one and it has no children left, it is removed from the graph.
//!
//! ## Workflow
//!
//! 1) Implement [`HostGraph`](crate::host::HostGraph) for your graph (or use `understory_compound_tree`).
//! 2) Build [`Options`](crate::options::Options), create a [`CompoundDnd`](crate::gesture::CompoundDnd), and `start()` it.
//! 3) Feed grab/drag/free and add/remove events to `handle`; deliver structural
//!    events the graph raised during a handler after the handler returns.
//! 4) React to the returned notifications: `Grabbed`, `Entered`, `Exited`, `Dropped`.
//!
//! ## Logging
//!
//! Transitions are logged through the [`log`] facade at `debug` level; per-frame
//! scans and index rebuilds at `trace`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod gesture;
pub mod host;
pub mod options;
pub mod settle;
pub mod types;

pub use gesture::CompoundDnd;
pub use host::HostGraph;
pub use options::Options;
pub use settle::{ManualScheduler, Scheduler};
pub use types::{DndEvent, GraphEvent, Markers, Phase, SettleToken};
