// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The graph collaborator the controller drives.
//!
//! The controller does not own nodes. Everything it knows about the graph comes
//! through [`HostGraph`], and every structural change it makes goes back through it.

use alloc::vec::Vec;
use core::fmt::Debug;

use understory_overlap::{BoundingBox, Scalar};

use crate::types::Markers;

/// A compound graph that the controller can query and mutate.
///
/// Implementations must tolerate stale node ids (ids of removed nodes) in every
/// method: queries report "absent" and mutations do nothing.
pub trait HostGraph {
    /// Node identifier.
    type NodeId: Copy + Eq + Debug;
    /// Coordinate scalar of bounding boxes.
    type Scalar: Scalar;
    /// Caller-supplied configuration for bounding-box computation (labels, overlays, ...).
    type BoxOptions: Clone + Debug;
    /// Definition of a node to add.
    type NodeSpec;

    /// Whether `node` currently exists in the graph.
    fn contains(&self, node: Self::NodeId) -> bool;

    /// All nodes, in the graph's iteration order.
    fn nodes(&self) -> Vec<Self::NodeId>;

    /// Parent of `node`, or `None` for top-level (or absent) nodes.
    fn parent(&self, node: Self::NodeId) -> Option<Self::NodeId>;

    /// Number of direct children of `node`.
    fn child_count(&self, node: Self::NodeId) -> usize;

    /// A copy of the bounding box of `node` under `options`.
    fn bounding_box(
        &self,
        node: Self::NodeId,
        options: &Self::BoxOptions,
    ) -> BoundingBox<Self::Scalar>;

    /// Nodes currently held by the pointer (the multi-selection being dragged).
    fn grabbed_nodes(&self) -> Vec<Self::NodeId>;

    /// Open a batch. Intermediate states inside a batch must not be observable.
    fn begin_batch(&mut self);

    /// Close the innermost batch.
    fn end_batch(&mut self);

    /// Set or clear the parent of `node`.
    fn set_parent(&mut self, node: Self::NodeId, parent: Option<Self::NodeId>);

    /// Add a node built from `spec` and return its id.
    fn add_node(&mut self, spec: Self::NodeSpec) -> Self::NodeId;

    /// Remove `node` from the graph.
    fn remove_node(&mut self, node: Self::NodeId);

    /// Add visual markers to `node`.
    fn add_markers(&mut self, node: Self::NodeId, markers: Markers);

    /// Remove visual markers from `node`.
    fn remove_markers(&mut self, node: Self::NodeId, markers: Markers);

    /// Whether `node` has at least one child.
    fn is_parent(&self, node: Self::NodeId) -> bool {
        self.child_count(node) > 0
    }

    /// Whether `node` has a parent.
    fn is_child(&self, node: Self::NodeId) -> bool {
        self.parent(node).is_some()
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    fn is_descendant_of(&self, node: Self::NodeId, ancestor: Self::NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }
}

/// Run `f` inside a single batch on `graph`.
pub fn batch<G, R>(graph: &mut G, f: impl FnOnce(&mut G) -> R) -> R
where
    G: HostGraph + ?Sized,
{
    graph.begin_batch();
    let out = f(graph);
    graph.end_batch();
    out
}

/// Reparent every node in `nodes` under `parent` (or to top level) in one batch.
pub fn set_parent_all<G>(graph: &mut G, nodes: &[G::NodeId], parent: Option<G::NodeId>)
where
    G: HostGraph + ?Sized,
{
    if nodes.is_empty() {
        return;
    }
    batch(graph, |g| {
        for &n in nodes {
            g.set_parent(n, parent);
        }
    });
}

/// Add `markers` to every node in `nodes`.
pub fn mark_all<G>(graph: &mut G, nodes: &[G::NodeId], markers: Markers)
where
    G: HostGraph + ?Sized,
{
    for &n in nodes {
        graph.add_markers(n, markers);
    }
}

/// Remove `markers` from every node in `nodes`.
pub fn unmark_all<G>(graph: &mut G, nodes: &[G::NodeId], markers: Markers)
where
    G: HostGraph + ?Sized,
{
    for &n in nodes {
        graph.remove_markers(n, markers);
    }
}
