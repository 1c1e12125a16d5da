// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drag gesture controller.
//!
//! ## States
//!
//! - [`Phase::Idle`]: no gesture. Only `Grab` does anything.
//! - [`Phase::Unparented`]: every `Drag` scans the bounds index for candidates
//!   under the grabbed nodes (padded by the enter threshold).
//! - [`Phase::Parented`]: every `Drag` checks whether any grabbed node (padded by
//!   the leave threshold) has left the cached bounds of the drop target.
//!
//! Entering a container starts a settle window during which `Drag` is ignored.
//! `Free` commits whatever parenting is in place and returns to idle; removing a
//! grabbed node from the graph aborts the gesture without a drop notification.
//!
//! ## Invariants
//!
//! - Grabbed nodes, the drop target and the sibling group are pairwise disjoint.
//! - The bounds index never holds a grabbed node, the drop target or a sibling.
//! - A drop target is set exactly while the grabbed nodes are parented under it by this gesture.

use alloc::vec::Vec;
use core::fmt::Debug;

use log::{debug, trace};
use understory_overlap::{BoundingBox, BoundsIndex, expand, overlaps};

use crate::host::{HostGraph, batch, mark_all, set_parent_all, unmark_all};
use crate::options::Options;
use crate::settle::Scheduler;
use crate::types::{DndEvent, GraphEvent, Markers, Phase, SettleToken};

#[derive(Copy, Clone, Debug)]
struct DropTarget<K, T> {
    node: K,
    // Captured when the target was chosen; the exit test never re-reads it.
    bounds: BoundingBox<T>,
}

#[derive(Clone, Debug)]
struct Gesture<K, T> {
    active: bool,
    grabbed: Vec<K>,
    target: Option<DropTarget<K, T>>,
    siblings: Vec<K>,
    index: BoundsIndex<K, T>,
    settling: Option<SettleToken>,
}

impl<K, T> Default for Gesture<K, T> {
    fn default() -> Self {
        Self {
            active: false,
            grabbed: Vec::new(),
            target: None,
            siblings: Vec::new(),
            index: BoundsIndex::default(),
            settling: None,
        }
    }
}

/// Compound drag-and-drop controller.
///
/// ## Usage
///
/// - Construct with [`CompoundDnd::new`] and call [`CompoundDnd::start`].
/// - Feed every grab/drag/free and structural add/remove event to
///   [`CompoundDnd::handle`], together with the graph and a [`Scheduler`].
/// - When a scheduled token comes due, pass it to [`CompoundDnd::settle_expired`].
/// - Act on the returned [`DndEvent`]s.
///
/// The graph may report structural events caused by the controller's own
/// mutations; deliver them after `handle` returns.
pub struct CompoundDnd<G: HostGraph> {
    options: Options<G>,
    listening: bool,
    enabled: bool,
    gesture: Gesture<G::NodeId, G::Scalar>,
    // Containers this controller created and that still exist.
    synthesized: Vec<G::NodeId>,
    next_token: u64,
}

impl<G: HostGraph> Debug for CompoundDnd<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CompoundDnd")
            .field("listening", &self.listening)
            .field("enabled", &self.enabled)
            .field("phase", &self.phase())
            .field("grabbed", &self.gesture.grabbed)
            .field("drop_target", &self.drop_target())
            .field("drop_siblings", &self.gesture.siblings)
            .field("settling", &self.gesture.settling)
            .finish_non_exhaustive()
    }
}

impl<G: HostGraph> CompoundDnd<G> {
    /// Create a stopped controller.
    pub fn new(options: Options<G>) -> Self {
        Self {
            options,
            listening: false,
            enabled: true,
            gesture: Gesture::default(),
            synthesized: Vec::new(),
            next_token: 0,
        }
    }

    /// The configuration in use.
    pub fn options(&self) -> &Options<G> {
        &self.options
    }

    /// Start listening for events.
    pub fn start(&mut self) {
        debug!("compound drag-and-drop started");
        self.listening = true;
    }

    /// Stop listening. A gesture in progress is dropped silently and its markers cleared.
    ///
    /// Synthesized containers are forgotten: removals are not observed while
    /// stopped, so their ids could later name other nodes.
    pub fn stop(&mut self, graph: &mut G) {
        if self.gesture.active {
            self.reset(graph);
        }
        self.synthesized.clear();
        self.listening = false;
        debug!("compound drag-and-drop stopped");
    }

    /// Whether [`start`](Self::start) is in effect.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Suspend or resume event handling without stopping.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether event handling is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current coarse state.
    pub fn phase(&self) -> Phase {
        if !self.gesture.active {
            Phase::Idle
        } else if self.gesture.target.is_some() {
            Phase::Parented
        } else {
            Phase::Unparented
        }
    }

    /// Whether drag frames are currently ignored after an enter.
    pub fn is_settling(&self) -> bool {
        self.gesture.settling.is_some()
    }

    /// Nodes being dragged.
    pub fn grabbed(&self) -> &[G::NodeId] {
        &self.gesture.grabbed
    }

    /// Current drop target.
    pub fn drop_target(&self) -> Option<G::NodeId> {
        self.gesture.target.map(|t| t.node)
    }

    /// Bounds of the drop target cached when it was chosen.
    pub fn drop_target_bounds(&self) -> Option<BoundingBox<G::Scalar>> {
        self.gesture.target.map(|t| t.bounds)
    }

    /// Current sibling group.
    pub fn drop_siblings(&self) -> &[G::NodeId] {
        &self.gesture.siblings
    }

    /// Candidates currently indexed for the enter scan.
    pub fn bounds_index(&self) -> &BoundsIndex<G::NodeId, G::Scalar> {
        &self.gesture.index
    }

    /// Whether `node` is a container this controller synthesized.
    pub fn is_synthesized(&self, node: G::NodeId) -> bool {
        self.synthesized.contains(&node)
    }

    /// Synthesized containers still present in the graph.
    pub fn synthesized_parents(&self) -> &[G::NodeId] {
        &self.synthesized
    }

    /// Handle one event and return the resulting notifications.
    pub fn handle<S>(
        &mut self,
        graph: &mut G,
        timers: &mut S,
        event: GraphEvent<G::NodeId>,
    ) -> Vec<DndEvent<G::NodeId>>
    where
        S: Scheduler + ?Sized,
    {
        if !self.listening {
            return Vec::new();
        }
        if let GraphEvent::Remove(node) = event {
            self.synthesized.retain(|&s| s != node);
        }
        if !self.enabled {
            return Vec::new();
        }
        match event {
            GraphEvent::Grab(node) => self.on_grab(graph, node),
            _ if !self.gesture.active => Vec::new(),
            GraphEvent::Drag(_) => self.on_drag(graph, timers),
            GraphEvent::Free(_) => self.on_free(graph),
            GraphEvent::Add(node) => {
                self.on_add(graph, node);
                Vec::new()
            }
            GraphEvent::Remove(node) => {
                self.on_remove(graph, node);
                Vec::new()
            }
        }
    }

    /// End the settle window started by `token`.
    ///
    /// Returns `false` for a token that is not the current one (stale or from an ended gesture).
    pub fn settle_expired(&mut self, token: SettleToken) -> bool {
        if self.gesture.settling == Some(token) {
            trace!("settle window {} expired", token.get());
            self.gesture.settling = None;
            true
        } else {
            false
        }
    }

    fn on_grab(&mut self, graph: &mut G, node: G::NodeId) -> Vec<DndEvent<G::NodeId>> {
        if !graph.contains(node) {
            return Vec::new();
        }
        let grabbed = self.resolve_grabbed(graph, node);
        if !grabbed
            .iter()
            .all(|&n| (self.options.grabbed_node)(&*graph, n))
        {
            trace!("grab of {node:?} rejected by predicate");
            return Vec::new();
        }
        if self.gesture.active {
            // Multi-selection grabs arrive once per node; restart from a clean state.
            self.reset(graph);
        }

        let target = common_parent(graph, &grabbed).map(|parent| DropTarget {
            node: parent,
            bounds: graph.bounding_box(parent, &self.options.bounding_box_options),
        });
        self.gesture.active = true;
        self.gesture.grabbed = grabbed.clone();
        self.gesture.target = target;
        self.rebuild_index(graph);

        mark_all(graph, &grabbed, Markers::GRABBED);
        if let Some(t) = target {
            graph.add_markers(t.node, Markers::DROP_TARGET);
        }
        debug!(
            "grabbed {grabbed:?} (parent {:?}, {} candidates)",
            target.map(|t| t.node),
            self.gesture.index.len()
        );
        alloc::vec![DndEvent::Grabbed { grabbed }]
    }

    fn resolve_grabbed(&self, graph: &G, node: G::NodeId) -> Vec<G::NodeId> {
        if self.options.allow_multiple_node_selection {
            let selection: Vec<_> = graph
                .grabbed_nodes()
                .into_iter()
                .filter(|&n| graph.contains(n))
                .collect();
            if selection.contains(&node) {
                return selection;
            }
        }
        alloc::vec![node]
    }

    fn on_add(&mut self, graph: &G, node: G::NodeId) {
        if !graph.contains(node) || !self.is_indexable(graph, node) {
            return;
        }
        let bounds = graph.bounding_box(node, &self.options.bounding_box_options);
        if self.gesture.index.push(node, bounds) {
            trace!("indexed added node {node:?}");
        }
    }

    fn on_remove(&mut self, graph: &mut G, node: G::NodeId) {
        self.gesture.index.remove(node);
        if self.gesture.grabbed.contains(&node) {
            debug!("grabbed node {node:?} removed, aborting gesture");
            self.reset(graph);
            return;
        }
        let is_target = self.drop_target() == Some(node);
        if !is_target && !self.gesture.siblings.contains(&node) {
            return;
        }
        debug!("drop participant {node:?} removed, clearing target");
        if let Some(t) = self.gesture.target.take() {
            graph.remove_markers(t.node, Markers::DROP_TARGET | Markers::NEW_PARENT);
        }
        let siblings = core::mem::take(&mut self.gesture.siblings);
        unmark_all(graph, &siblings, Markers::DROP_SIBLING);
        self.rebuild_index(graph);
    }

    fn on_drag<S>(&mut self, graph: &mut G, timers: &mut S) -> Vec<DndEvent<G::NodeId>>
    where
        S: Scheduler + ?Sized,
    {
        if self.gesture.settling.is_some() {
            trace!("drag ignored while settling");
            return Vec::new();
        }
        match self.gesture.target {
            Some(target) => self.try_exit(graph, target),
            None => self.try_enter(graph, timers),
        }
    }

    fn try_exit(
        &mut self,
        graph: &mut G,
        target: DropTarget<G::NodeId, G::Scalar>,
    ) -> Vec<DndEvent<G::NodeId>> {
        let opts = &self.options.bounding_box_options;
        let out = self.options.out_threshold;
        // Any grabbed node leaving is enough, so one straggler cannot hold a multi-selection in.
        let exits = self
            .gesture
            .grabbed
            .iter()
            .filter(|&&n| graph.contains(n))
            .any(|&n| !overlaps(&target.bounds, &expand(&graph.bounding_box(n, opts), out)));
        if !exits {
            return Vec::new();
        }

        let grabbed = self.gesture.grabbed.clone();
        let siblings = core::mem::take(&mut self.gesture.siblings);
        self.gesture.target = None;

        set_parent_all(graph, &grabbed, None);
        set_parent_all(graph, &siblings, None);
        graph.remove_markers(target.node, Markers::DROP_TARGET | Markers::NEW_PARENT);
        unmark_all(graph, &siblings, Markers::DROP_SIBLING);

        if self.is_synthesized(target.node)
            && graph.contains(target.node)
            && graph.child_count(target.node) == 0
        {
            debug!("removing emptied synthesized parent {:?}", target.node);
            batch(graph, |g| g.remove_node(target.node));
            self.synthesized.retain(|&s| s != target.node);
        }
        // The old target and the released siblings are candidates again.
        self.rebuild_index(graph);

        debug!("{grabbed:?} exited {:?}", target.node);
        alloc::vec![DndEvent::Exited {
            grabbed,
            target: target.node,
            siblings,
        }]
    }

    fn try_enter<S>(&mut self, graph: &mut G, timers: &mut S) -> Vec<DndEvent<G::NodeId>>
    where
        S: Scheduler + ?Sized,
    {
        let hits = self.scan(graph);
        if hits.is_empty() {
            return Vec::new();
        }

        let token = SettleToken(self.next_token);
        self.next_token = self.next_token.wrapping_add(1);
        self.gesture.settling = Some(token);
        timers.schedule(self.options.settle_delay, token);

        let grabbed = self.gesture.grabbed.clone();
        // Existing containers win over grouping; the first one in index order is used.
        let existing = hits.iter().copied().find(|&n| graph.is_parent(n));
        let (target, siblings, synthesized) = match existing {
            Some(parent) => (parent, Vec::new(), false),
            None => {
                let spec = (self.options.new_parent_node)(&*graph, &grabbed, &hits);
                let parent = batch(graph, |g| g.add_node(spec));
                self.synthesized.push(parent);
                (parent, hits, true)
            }
        };

        let markers = if synthesized {
            Markers::DROP_TARGET | Markers::NEW_PARENT
        } else {
            Markers::DROP_TARGET
        };
        graph.add_markers(target, markers);
        mark_all(graph, &siblings, Markers::DROP_SIBLING);

        set_parent_all(graph, &siblings, Some(target));
        // Measured before the grabbed nodes move in, so dragging them cannot stretch it.
        let bounds = graph.bounding_box(target, &self.options.bounding_box_options);
        set_parent_all(graph, &grabbed, Some(target));

        self.gesture.target = Some(DropTarget {
            node: target,
            bounds,
        });
        self.gesture.siblings = siblings.clone();
        let g = &mut self.gesture;
        g.index
            .retain(|t| t.node != target && !g.siblings.contains(&t.node));

        debug!(
            "{grabbed:?} entered {target:?} (synthesized: {synthesized}, siblings {siblings:?})"
        );
        alloc::vec![DndEvent::Entered {
            grabbed,
            target,
            siblings,
        }]
    }

    /// Indexed candidates under the padded grabbed nodes, confirmed against fresh bounds.
    fn scan(&self, graph: &G) -> Vec<G::NodeId> {
        let opts = &self.options.bounding_box_options;
        let over = self.options.over_threshold;
        let mut hits = Vec::new();
        for &n in &self.gesture.grabbed {
            if !graph.contains(n) {
                continue;
            }
            let probe = expand(&graph.bounding_box(n, opts), over);
            for t in self.gesture.index.overlapping(&probe) {
                if hits.contains(&t.node) || !graph.contains(t.node) {
                    continue;
                }
                if overlaps(&probe, &graph.bounding_box(t.node, opts)) {
                    hits.push(t.node);
                } else {
                    trace!("discarding stale candidate {:?}", t.node);
                }
            }
        }
        trace!("scan found {hits:?}");
        hits
    }

    fn on_free(&mut self, graph: &mut G) -> Vec<DndEvent<G::NodeId>> {
        let grabbed = self.gesture.grabbed.clone();
        let target = self.drop_target();
        let siblings = self.gesture.siblings.clone();
        self.reset(graph);
        debug!("dropped {grabbed:?} into {target:?}");
        alloc::vec![DndEvent::Dropped {
            grabbed,
            target,
            siblings,
        }]
    }

    fn is_indexable(&self, graph: &G, node: G::NodeId) -> bool {
        let g = &self.gesture;
        if g.grabbed.contains(&node)
            || g.target.is_some_and(|t| t.node == node)
            || g.siblings.contains(&node)
        {
            return false;
        }
        // Children of a dragged container travel with it.
        if g.grabbed.iter().any(|&gr| graph.is_descendant_of(node, gr)) {
            return false;
        }
        if graph.is_child(node) {
            (self.options.drop_sibling)(graph, node, &g.grabbed)
        } else {
            (self.options.drop_target)(graph, node, &g.grabbed)
        }
    }

    fn rebuild_index(&mut self, graph: &G) {
        let opts = &self.options.bounding_box_options;
        let entries: Vec<_> = graph
            .nodes()
            .into_iter()
            .filter(|&n| self.is_indexable(graph, n))
            .map(|n| (n, graph.bounding_box(n, opts)))
            .collect();
        self.gesture.index.rebuild(entries);
        trace!("bounds index rebuilt: {} entries", self.gesture.index.len());
    }

    fn reset(&mut self, graph: &mut G) {
        let g = core::mem::take(&mut self.gesture);
        unmark_all(graph, &g.grabbed, Markers::GRABBED);
        if let Some(t) = g.target {
            graph.remove_markers(t.node, Markers::DROP_TARGET | Markers::NEW_PARENT);
        }
        unmark_all(graph, &g.siblings, Markers::DROP_SIBLING);
    }
}

/// The parent shared by every node in `nodes`, if there is exactly one.
fn common_parent<G: HostGraph + ?Sized>(graph: &G, nodes: &[G::NodeId]) -> Option<G::NodeId> {
    let (&first, rest) = nodes.split_first()?;
    let parent = graph.parent(first)?;
    rest.iter()
        .all(|&n| graph.parent(n) == Some(parent))
        .then_some(parent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settle::ManualScheduler;
    use alloc::vec;
    use core::time::Duration;
    use understory_overlap::union;

    /// Flat-array graph with `i64` boxes; parents take the union of their children.
    #[derive(Default)]
    struct Mock {
        boxes: Vec<Option<BoundingBox<i64>>>,
        parents: Vec<Option<u32>>,
        markers: Vec<Markers>,
        batch_depth: u32,
    }

    impl Mock {
        fn node(&mut self, x: i64, y: i64) -> u32 {
            self.boxes.push(Some(BoundingBox::from_xywh(x, y, 10, 10)));
            self.parents.push(None);
            self.markers.push(Markers::empty());
            (self.boxes.len() - 1) as u32
        }

        fn move_to(&mut self, n: u32, x: i64, y: i64) {
            self.boxes[n as usize] = Some(BoundingBox::from_xywh(x, y, 10, 10));
        }

        fn children(&self, n: u32) -> Vec<u32> {
            self.nodes()
                .into_iter()
                .filter(|&c| self.parents[c as usize] == Some(n))
                .collect()
        }

        fn markers(&self, n: u32) -> Markers {
            self.markers[n as usize]
        }
    }

    impl HostGraph for Mock {
        type NodeId = u32;
        type Scalar = i64;
        type BoxOptions = ();
        type NodeSpec = ();

        fn contains(&self, node: u32) -> bool {
            self.boxes.get(node as usize).is_some_and(Option::is_some)
        }

        fn nodes(&self) -> Vec<u32> {
            (0..self.boxes.len() as u32)
                .filter(|&n| self.contains(n))
                .collect()
        }

        fn parent(&self, node: u32) -> Option<u32> {
            if !self.contains(node) {
                return None;
            }
            self.parents[node as usize]
        }

        fn child_count(&self, node: u32) -> usize {
            self.children(node).len()
        }

        fn bounding_box(&self, node: u32, _: &()) -> BoundingBox<i64> {
            let own = self.boxes[node as usize].unwrap_or(BoundingBox::new(0, 0, 0, 0));
            self.children(node)
                .into_iter()
                .map(|c| self.bounding_box(c, &()))
                .reduce(|a, b| union(&a, &b))
                .unwrap_or(own)
        }

        fn grabbed_nodes(&self) -> Vec<u32> {
            Vec::new()
        }

        fn begin_batch(&mut self) {
            self.batch_depth += 1;
        }

        fn end_batch(&mut self) {
            self.batch_depth -= 1;
        }

        fn set_parent(&mut self, node: u32, parent: Option<u32>) {
            assert!(self.batch_depth > 0, "reparenting outside a batch");
            if self.contains(node) {
                self.parents[node as usize] = parent;
            }
        }

        fn add_node(&mut self, _: ()) -> u32 {
            self.node(0, 0)
        }

        fn remove_node(&mut self, node: u32) {
            for c in self.children(node) {
                self.parents[c as usize] = None;
            }
            self.boxes[node as usize] = None;
        }

        fn add_markers(&mut self, node: u32, markers: Markers) {
            self.markers[node as usize] |= markers;
        }

        fn remove_markers(&mut self, node: u32, markers: Markers) {
            self.markers[node as usize] -= markers;
        }
    }

    fn started() -> CompoundDnd<Mock> {
        let mut dnd = CompoundDnd::new(Options::default());
        dnd.start();
        dnd
    }

    #[test]
    fn ignores_events_until_started_and_while_disabled() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = CompoundDnd::new(Options::default());

        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a)).is_empty());
        assert_eq!(dnd.phase(), Phase::Idle);

        dnd.start();
        dnd.set_enabled(false);
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a)).is_empty());
        assert_eq!(g.markers(a), Markers::empty());

        dnd.set_enabled(true);
        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));
        assert_eq!(ev, vec![DndEvent::Grabbed { grabbed: vec![a] }]);
        assert_eq!(dnd.phase(), Phase::Unparented);
    }

    #[test]
    fn drag_without_gesture_is_a_no_op() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a)).is_empty());
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Free(a)).is_empty());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn grab_predicate_rejects() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let b = g.node(100, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = CompoundDnd::new(Options::default().with_grabbed_node(move |_, n| n != a));
        dnd.start();
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a)).is_empty());
        assert_eq!(dnd.phase(), Phase::Idle);
        assert_eq!(dnd.handle(&mut g, &mut timers, GraphEvent::Grab(b)).len(), 1);
        assert_eq!(dnd.grabbed(), &[b]);
    }

    #[test]
    fn index_excludes_grabbed_and_parent() {
        let mut g = Mock::default();
        let p = g.node(0, 0);
        let a = g.node(0, 0);
        let other = g.node(200, 0);
        g.parents[a as usize] = Some(p);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();

        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));
        assert_eq!(dnd.drop_target(), Some(p));
        assert_eq!(dnd.phase(), Phase::Parented);
        assert!(!dnd.bounds_index().contains(a));
        assert!(!dnd.bounds_index().contains(p));
        assert!(dnd.bounds_index().contains(other));
        assert!(g.markers(p).contains(Markers::DROP_TARGET));
        assert!(g.markers(a).contains(Markers::GRABBED));
    }

    #[test]
    fn stale_index_entry_is_discarded() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let b = g.node(100, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));

        // b moves away without any structural event; its snapshot is now stale.
        g.move_to(b, 500, 500);
        g.move_to(a, 100, 0);
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a)).is_empty());
        assert_eq!(dnd.phase(), Phase::Unparented);
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn settle_window_blocks_exit_until_its_token_expires() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let b = g.node(100, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));

        g.move_to(a, 105, 0);
        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a));
        let Some(DndEvent::Entered {
            target, siblings, ..
        }) = ev.first().cloned()
        else {
            panic!("expected an enter, got {ev:?}");
        };
        assert_eq!(siblings, vec![b]);
        assert!(dnd.is_synthesized(target));
        assert!(dnd.is_settling());

        // Leave immediately: ignored while settling.
        g.move_to(a, 900, 900);
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a)).is_empty());

        assert!(!dnd.settle_expired(SettleToken(41)), "foreign token");
        let due = timers.advance(Duration::from_millis(100));
        assert_eq!(due.len(), 1);
        assert!(dnd.settle_expired(due[0]));
        assert!(!dnd.settle_expired(due[0]), "already expired");

        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a));
        assert!(matches!(ev.as_slice(), [DndEvent::Exited { .. }]));
        assert!(!g.contains(target));
        assert!(dnd.synthesized_parents().is_empty());
        assert_eq!(g.parent(b), None);
    }

    #[test]
    fn free_while_settling_ends_the_settle_window() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let b = g.node(100, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));
        g.move_to(a, 105, 0);
        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a));
        let Some(DndEvent::Entered { target, .. }) = ev.first().cloned() else {
            panic!("expected an enter, got {ev:?}");
        };
        assert!(dnd.is_settling());

        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Free(a));
        assert!(matches!(ev.as_slice(), [DndEvent::Dropped { .. }]));
        assert!(!dnd.is_settling());
        assert_eq!(dnd.phase(), Phase::Idle);

        // The window's token still comes due, but belongs to an ended gesture.
        let due = timers.advance(Duration::from_millis(100));
        assert_eq!(due.len(), 1);
        assert!(!dnd.settle_expired(due[0]), "token of a finished gesture");

        // A new gesture starts unsuppressed.
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));
        assert_eq!(dnd.drop_target(), Some(target));
        g.move_to(a, 900, 900);
        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a));
        assert!(matches!(ev.as_slice(), [DndEvent::Exited { .. }]), "got {ev:?}");
        assert_eq!(g.parent(b), Some(target));
    }

    #[test]
    fn stop_forgets_synthesized_parents() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let b = g.node(100, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));
        g.move_to(a, 105, 0);
        let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Drag(a));
        let Some(DndEvent::Entered { target, .. }) = ev.first().cloned() else {
            panic!("expected an enter, got {ev:?}");
        };
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Free(a));
        assert!(dnd.is_synthesized(target));

        dnd.stop(&mut g);
        assert!(dnd.synthesized_parents().is_empty());

        // Emptying it after a restart leaves it in place.
        dnd.start();
        for (n, x) in [(a, 900), (b, 700)] {
            let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(n));
            g.move_to(n, x, 900);
            let ev = dnd.handle(&mut g, &mut timers, GraphEvent::Drag(n));
            assert!(matches!(ev.as_slice(), [DndEvent::Exited { .. }]), "got {ev:?}");
            let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Free(n));
        }
        assert_eq!(g.child_count(target), 0);
        assert!(g.contains(target));
    }

    #[test]
    fn removing_target_keeps_grabbed() {
        let mut g = Mock::default();
        let p = g.node(0, 0);
        let a = g.node(0, 0);
        g.parents[a as usize] = Some(p);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));

        g.remove_node(p);
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Remove(p)).is_empty());
        assert_eq!(dnd.drop_target(), None);
        assert_eq!(dnd.grabbed(), &[a]);
        assert_eq!(dnd.phase(), Phase::Unparented);
    }

    #[test]
    fn stop_clears_markers_without_dropping() {
        let mut g = Mock::default();
        let a = g.node(0, 0);
        let mut timers = ManualScheduler::new();
        let mut dnd = started();
        let _ = dnd.handle(&mut g, &mut timers, GraphEvent::Grab(a));
        dnd.stop(&mut g);
        assert_eq!(g.markers(a), Markers::empty());
        assert_eq!(dnd.phase(), Phase::Idle);
        assert!(dnd.handle(&mut g, &mut timers, GraphEvent::Free(a)).is_empty());
    }
}
