// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_overlap --heading-base-level=0

//! Understory Overlap: bounding-box overlap tests for drag-and-drop.
//!
//! Understory Overlap is the spatial leaf of compound drag-and-drop.
//!
//! - [`BoundingBox`]: a plain-value axis-aligned box, generic over the scalar.
//! - [`overlaps`]: intersection test where touching boxes overlap.
//! - [`expand`]: symmetric padding, used to give "enter" and "leave" tests different thresholds.
//! - [`BoundsIndex`]: an ordered snapshot of `(node, box)` pairs scanned linearly.
//!
//! Nothing here holds references into a scene or graph.
//! Higher layers read boxes from their graph, copy them in, and decide when a snapshot is stale.
//!
//! # Example
//!
//! ```rust
//! use understory_overlap::{BoundingBox, BoundsIndex, expand};
//!
//! let mut idx: BoundsIndex<u32, f64> = BoundsIndex::new();
//! idx.push(1, BoundingBox::new(0.0, 0.0, 50.0, 50.0));
//! idx.push(2, BoundingBox::new(200.0, 0.0, 250.0, 50.0));
//!
//! // A dragged box just right of node 1, padded by an enter threshold.
//! let dragged = BoundingBox::from_xywh(55.0, 10.0, 20.0, 20.0);
//! let probe = expand(&dragged, 10.0);
//! let hits: Vec<u32> = idx.overlapping(&probe).map(|t| t.node).collect();
//! assert_eq!(hits, vec![1]);
//! ```
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.
//! Comparisons involving NaN are treated as "not ordered", which never reports a disjoint side.

#![no_std]

extern crate alloc;

pub mod index;
pub mod overlap;
pub mod types;

pub use index::{BoundsIndex, BoundsTuple};
pub use overlap::{expand, overlaps, union};
pub use types::{BoundingBox, Scalar};
