// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller configuration.
//!
//! ## Usage
//!
//! Start from [`Options::default`] and override what you need:
//!
//! - [`Options::with_grabbed_node`]: which nodes take part in compound drag-and-drop at all.
//! - [`Options::with_drop_target`]: which top-level nodes may become containers.
//! - [`Options::with_drop_sibling`]: which child nodes may be pulled into a new container.
//! - [`Options::with_new_parent_node`]: how a synthesized container is defined.
//! - [`Options::with_thresholds`]: enter (`over`) and leave (`out`) padding.

use alloc::boxed::Box;
use core::time::Duration;

use understory_overlap::Scalar;

use crate::host::HostGraph;

/// Predicate over a single node.
pub type NodePredicate<G> = Box<dyn Fn(&G, <G as HostGraph>::NodeId) -> bool>;

/// Predicate over a candidate node and the nodes being dragged.
pub type CandidatePredicate<G> =
    Box<dyn Fn(&G, <G as HostGraph>::NodeId, &[<G as HostGraph>::NodeId]) -> bool>;

/// Factory for synthesized containers, given the dragged nodes and the sibling group.
pub type ParentFactory<G> = Box<
    dyn Fn(
        &G,
        &[<G as HostGraph>::NodeId],
        &[<G as HostGraph>::NodeId],
    ) -> <G as HostGraph>::NodeSpec,
>;

/// Default enter/leave padding.
pub const DEFAULT_THRESHOLD: u16 = 10;

/// Default settle window after entering a container.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Configuration of a [`CompoundDnd`](crate::gesture::CompoundDnd) controller.
pub struct Options<G: HostGraph> {
    /// Whether a node may be dragged with this feature. Every grabbed node must pass.
    pub grabbed_node: NodePredicate<G>,
    /// Whether a top-level node may become a drop target for the grabbed nodes.
    pub drop_target: CandidatePredicate<G>,
    /// Whether a child node may join a synthesized sibling group.
    pub drop_sibling: CandidatePredicate<G>,
    /// Definition of a synthesized container.
    pub new_parent_node: ParentFactory<G>,
    /// Passed to [`HostGraph::bounding_box`] for every box the controller reads.
    pub bounding_box_options: G::BoxOptions,
    /// Padding applied to a grabbed node's box when testing entry.
    pub over_threshold: G::Scalar,
    /// Padding applied to a grabbed node's box when testing exit.
    pub out_threshold: G::Scalar,
    /// Drag the host's whole grabbed selection instead of just the event target.
    pub allow_multiple_node_selection: bool,
    /// How long drag frames are ignored after entering a container.
    pub settle_delay: Duration,
}

impl<G: HostGraph> core::fmt::Debug for Options<G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Options")
            .field("bounding_box_options", &self.bounding_box_options)
            .field("over_threshold", &self.over_threshold)
            .field("out_threshold", &self.out_threshold)
            .field(
                "allow_multiple_node_selection",
                &self.allow_multiple_node_selection,
            )
            .field("settle_delay", &self.settle_delay)
            .finish_non_exhaustive()
    }
}

impl<G> Default for Options<G>
where
    G: HostGraph + 'static,
    G::BoxOptions: Default,
    G::NodeSpec: Default,
{
    fn default() -> Self {
        Self::new(G::BoxOptions::default(), |_, _, _| G::NodeSpec::default())
    }
}

impl<G: HostGraph> Options<G> {
    /// Options with permissive predicates, default thresholds and the given box
    /// configuration and container factory.
    pub fn new(
        bounding_box_options: G::BoxOptions,
        new_parent_node: impl Fn(&G, &[G::NodeId], &[G::NodeId]) -> G::NodeSpec + 'static,
    ) -> Self
    where
        G: 'static,
    {
        Self {
            grabbed_node: Box::new(|_: &G, _: G::NodeId| true),
            drop_target: Box::new(|_: &G, _: G::NodeId, _: &[G::NodeId]| true),
            drop_sibling: Box::new(|_: &G, _: G::NodeId, _: &[G::NodeId]| true),
            new_parent_node: Box::new(new_parent_node),
            bounding_box_options,
            over_threshold: G::Scalar::from_u16(DEFAULT_THRESHOLD),
            out_threshold: G::Scalar::from_u16(DEFAULT_THRESHOLD),
            allow_multiple_node_selection: false,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Set the grabbable-node predicate.
    pub fn with_grabbed_node(mut self, f: impl Fn(&G, G::NodeId) -> bool + 'static) -> Self {
        self.grabbed_node = Box::new(f);
        self
    }

    /// Set the drop-target predicate.
    pub fn with_drop_target(
        mut self,
        f: impl Fn(&G, G::NodeId, &[G::NodeId]) -> bool + 'static,
    ) -> Self {
        self.drop_target = Box::new(f);
        self
    }

    /// Set the drop-sibling predicate.
    pub fn with_drop_sibling(
        mut self,
        f: impl Fn(&G, G::NodeId, &[G::NodeId]) -> bool + 'static,
    ) -> Self {
        self.drop_sibling = Box::new(f);
        self
    }

    /// Set the synthesized container factory.
    pub fn with_new_parent_node(
        mut self,
        f: impl Fn(&G, &[G::NodeId], &[G::NodeId]) -> G::NodeSpec + 'static,
    ) -> Self {
        self.new_parent_node = Box::new(f);
        self
    }

    /// Set the bounding-box configuration.
    pub fn with_bounding_box_options(mut self, options: G::BoxOptions) -> Self {
        self.bounding_box_options = options;
        self
    }

    /// Set the enter (`over`) and leave (`out`) thresholds.
    pub fn with_thresholds(mut self, over: G::Scalar, out: G::Scalar) -> Self {
        self.over_threshold = over;
        self.out_threshold = out;
        self
    }

    /// Drag the host's whole grabbed selection.
    pub fn with_multiple_node_selection(mut self, allow: bool) -> Self {
        self.allow_multiple_node_selection = allow;
        self
    }

    /// Set the settle window after entering a container.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}
