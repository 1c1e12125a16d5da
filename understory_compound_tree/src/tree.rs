// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, updates, queries.

use alloc::vec::Vec;
use kurbo::{Rect, Vec2};
use understory_compound_dnd::{GraphEvent, Markers};

use crate::types::{BoxOptions, NodeFlags, NodeId, TreeNode};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// A forest of compound nodes.
///
/// Structural changes ([`Tree::insert`], [`Tree::remove`]) are recorded as
/// [`GraphEvent::Add`] / [`GraphEvent::Remove`] and handed out by
/// [`Tree::take_events`], so listeners observe them after the mutating call
/// has returned.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    events: Vec<GraphEvent<NodeId>>,
    batch_depth: u32,
    epoch: u64,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("pending_events", &self.events.len())
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: TreeNode,
    flags: NodeFlags,
    markers: Markers,
}

impl Node {
    fn new(generation: u32, local: TreeNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            flags: NodeFlags::empty(),
            markers: Markers::empty(),
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            events: Vec::new(),
            batch_depth: 0,
            epoch: 0,
        }
    }

    /// Insert a new node as a child of `parent` (or at top level if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: TreeNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent.filter(|&p| self.is_alive(p)) {
            self.link_parent(id, p);
        }
        self.events.push(GraphEvent::Add(id));
        id
    }

    /// Remove a node and its subtree.
    ///
    /// One [`GraphEvent::Remove`] is recorded per removed node, the given node first.
    pub fn remove(&mut self, id: NodeId) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        let parent = node.parent;
        if let Some(parent) = parent {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes[id.idx()].take() else {
            return;
        };
        self.free_list.push(id.idx());
        self.events.push(GraphEvent::Remove(id));
        log::trace!("removed {id:?} ({} children)", node.children.len());
        for child in node.children {
            self.remove_subtree(child);
        }
    }

    /// Reparent `id` under `new_parent` (or to top level if `None`).
    ///
    /// Returns `false` and leaves the tree unchanged if either node is stale or
    /// the move would make a node its own ancestor.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || p == id || self.is_ancestor(id, p))
        {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        true
    }

    /// Move a node, and everything under it, by `delta`.
    pub fn translate(&mut self, id: NodeId, delta: Vec2) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        node.local.bounds = node.local.bounds + delta;
        node.local.label = node.local.label.map(|l| l + delta);
        let children = node.children.clone();
        for child in children {
            self.translate(child, delta);
        }
    }

    /// Move a node so its body's top-left corner sits at `(x, y)`.
    pub fn move_to(&mut self, id: NodeId, x: f64, y: f64) {
        if let Some(n) = self.node_opt(id) {
            let b = n.local.bounds;
            self.translate(id, Vec2::new(x - b.x0, y - b.y0));
        }
    }

    /// Set or clear selection.
    pub fn set_selected(&mut self, id: NodeId, selected: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags.set(NodeFlags::SELECTED, selected);
        }
    }

    /// Set or clear the pointer-held state.
    pub fn set_grabbed(&mut self, id: NodeId, grabbed: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags.set(NodeFlags::GRABBED, grabbed);
        }
    }

    /// Mark every selected node as held by the pointer and return them.
    pub fn grab_selection(&mut self) -> Vec<NodeId> {
        let selected: Vec<NodeId> = self
            .ids()
            .filter(|&id| self.flags(id).is_some_and(|f| f.contains(NodeFlags::SELECTED)))
            .collect();
        for &id in &selected {
            self.set_grabbed(id, true);
        }
        selected
    }

    /// Clear the pointer-held state on every node.
    pub fn release_all(&mut self) {
        for n in self.nodes.iter_mut().flatten() {
            n.flags.remove(NodeFlags::GRABBED);
        }
    }

    /// Add visual markers.
    pub fn add_markers(&mut self, id: NodeId, markers: Markers) {
        if let Some(n) = self.node_opt_mut(id) {
            n.markers |= markers;
        }
    }

    /// Remove visual markers.
    pub fn remove_markers(&mut self, id: NodeId, markers: Markers) {
        if let Some(n) = self.node_opt_mut(id) {
            n.markers.remove(markers);
        }
    }

    /// Open a batch.
    pub fn begin_batch(&mut self) {
        self.batch_depth += 1;
    }

    /// Close a batch; closing the outermost one advances [`Tree::epoch`].
    pub fn end_batch(&mut self) {
        debug_assert!(self.batch_depth > 0, "end_batch without begin_batch");
        self.batch_depth = self.batch_depth.saturating_sub(1);
        if self.batch_depth == 0 {
            self.epoch += 1;
        }
    }

    /// Whether a batch is open.
    pub fn in_batch(&self) -> bool {
        self.batch_depth > 0
    }

    /// Number of completed outermost batches.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Drain recorded structural events, oldest first.
    pub fn take_events(&mut self) -> Vec<GraphEvent<NodeId>> {
        core::mem::take(&mut self.events)
    }

    // --- queries ---

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Live node ids in slot order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            n.as_ref().map(|n| NodeId::new(i as u32, n.generation))
        })
    }

    /// Parent of a live node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of a live node; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Interaction flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.flags)
    }

    /// Visual markers of a live node.
    pub fn markers(&self, id: NodeId) -> Option<Markers> {
        self.node_opt(id).map(|n| n.markers)
    }

    /// World-space bounds of a node.
    ///
    /// A childless node measures its body (and label, if requested). A compound
    /// node measures the union of its children, grown by its padding, plus its
    /// own label if requested.
    pub fn bounds(&self, id: NodeId, options: BoxOptions) -> Option<Rect> {
        let node = self.node_opt(id)?;
        let body = node
            .children
            .iter()
            .filter_map(|&c| self.bounds(c, options))
            .reduce(|a, b| a.union(b))
            .map(|r| r.inflate(node.local.padding, node.local.padding))
            .unwrap_or(node.local.bounds);
        Some(match node.local.label {
            Some(label) if options.include_labels => body.union(label),
            _ => body,
        })
    }

    /// Whether `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}
