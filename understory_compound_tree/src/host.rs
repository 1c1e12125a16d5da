// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`HostGraph`] for [`Tree`] and the event pump.
//!
//! ## Notes
//!
//! The tree records its own structural changes (including those the controller
//! makes through [`HostGraph::add_node`] and [`HostGraph::remove_node`]) and
//! hands them out later. [`dispatch`] and [`flush`] deliver them to the
//! controller only after the handler that caused them has returned.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_compound_dnd::{CompoundDnd, DndEvent, GraphEvent, HostGraph, Markers, Scheduler};
use understory_overlap::BoundingBox;

use crate::tree::Tree;
use crate::types::{BoxOptions, NodeFlags, NodeId, TreeNode};

fn to_box(r: Rect) -> BoundingBox<f64> {
    BoundingBox::new(r.x0, r.y0, r.x1, r.y1)
}

impl HostGraph for Tree {
    type NodeId = NodeId;
    type Scalar = f64;
    type BoxOptions = BoxOptions;
    type NodeSpec = TreeNode;

    fn contains(&self, node: NodeId) -> bool {
        self.is_alive(node)
    }

    fn nodes(&self) -> Vec<NodeId> {
        self.ids().collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    fn bounding_box(&self, node: NodeId, options: &BoxOptions) -> BoundingBox<f64> {
        to_box(self.bounds(node, *options).unwrap_or(Rect::ZERO))
    }

    fn grabbed_nodes(&self) -> Vec<NodeId> {
        self.ids()
            .filter(|&n| self.flags(n).is_some_and(|f| f.contains(NodeFlags::GRABBED)))
            .collect()
    }

    fn begin_batch(&mut self) {
        Self::begin_batch(self);
    }

    fn end_batch(&mut self) {
        Self::end_batch(self);
    }

    fn set_parent(&mut self, node: NodeId, parent: Option<NodeId>) {
        debug_assert!(self.in_batch(), "reparenting outside of a batch");
        if !self.reparent(node, parent) {
            log::trace!("refused to reparent {node:?} under {parent:?}");
        }
    }

    fn add_node(&mut self, spec: TreeNode) -> NodeId {
        self.insert(None, spec)
    }

    fn remove_node(&mut self, node: NodeId) {
        self.remove(node);
    }

    fn add_markers(&mut self, node: NodeId, markers: Markers) {
        Self::add_markers(self, node, markers);
    }

    fn remove_markers(&mut self, node: NodeId, markers: Markers) {
        Self::remove_markers(self, node, markers);
    }
}

/// Deliver every structural event the tree has recorded, until none are left.
pub fn flush<S>(
    dnd: &mut CompoundDnd<Tree>,
    tree: &mut Tree,
    timers: &mut S,
) -> Vec<DndEvent<NodeId>>
where
    S: Scheduler + ?Sized,
{
    let mut out = Vec::new();
    loop {
        let pending = tree.take_events();
        if pending.is_empty() {
            return out;
        }
        for event in pending {
            out.extend(dnd.handle(tree, timers, event));
        }
    }
}

/// Handle `event`, delivering recorded structural events before and after it.
pub fn dispatch<S>(
    dnd: &mut CompoundDnd<Tree>,
    tree: &mut Tree,
    timers: &mut S,
    event: GraphEvent<NodeId>,
) -> Vec<DndEvent<NodeId>>
where
    S: Scheduler + ?Sized,
{
    let mut out = flush(dnd, tree, timers);
    out.extend(dnd.handle(tree, timers, event));
    out.extend(flush(dnd, tree, timers));
    out
}
