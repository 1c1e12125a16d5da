// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging a node onto another to group them, then out again.
//!
//! Node `a` is dropped onto plain node `b`: a container is created around
//! both. Dragging `a` away removes the container again because `b` was its only
//! other member. A second drag moves `c` into an existing container `p`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example compound_drag`

use core::time::Duration;

use kurbo::Rect;
use understory_compound_dnd::{CompoundDnd, DndEvent, GraphEvent, ManualScheduler, Options};
use understory_compound_tree::{BoxOptions, NodeId, Tree, TreeNode, dispatch};

fn leaf(tree: &mut Tree, parent: Option<NodeId>, x: f64, y: f64) -> NodeId {
    tree.insert(
        parent,
        TreeNode::rect(Rect::new(x, y, x + 40.0, y + 20.0))
            .with_label(Rect::new(x, y + 20.0, x + 40.0, y + 28.0)),
    )
}

fn step(
    dnd: &mut CompoundDnd<Tree>,
    tree: &mut Tree,
    timers: &mut ManualScheduler,
    label: &str,
    event: GraphEvent<NodeId>,
) -> Vec<DndEvent<NodeId>> {
    let events = dispatch(dnd, tree, timers, event);
    println!("== {label} ==");
    for e in &events {
        println!("  {e:?}");
    }
    events
}

fn main() {
    env_logger::init();

    let mut tree = Tree::new();
    let a = leaf(&mut tree, None, 0.0, 0.0);
    let b = leaf(&mut tree, None, 200.0, 0.0);
    let p = tree.insert(
        None,
        TreeNode::default().with_label(Rect::new(0.0, 200.0, 60.0, 210.0)),
    );
    let _q = leaf(&mut tree, Some(p), 0.0, 220.0);
    let c = leaf(&mut tree, None, 300.0, 300.0);

    // Synthesized containers carry a label under their first members.
    let options = Options::<Tree>::default().with_new_parent_node(|tree, _grabbed, siblings| {
        let at = siblings
            .iter()
            .filter_map(|&s| tree.bounds(s, BoxOptions::default()))
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO);
        TreeNode::default().with_label(Rect::new(at.x0, at.y1 + 10.0, at.x1, at.y1 + 18.0))
    });
    let mut dnd = CompoundDnd::new(options);
    let mut timers = ManualScheduler::new();
    dnd.start();
    let (d, t, k) = (&mut dnd, &mut tree, &mut timers);

    step(d, t, k, "grab a", GraphEvent::Grab(a));

    t.move_to(a, 150.0, 0.0);
    let entered = step(d, t, k, "drag a next to b", GraphEvent::Drag(a));
    let Some(DndEvent::Entered { target: s, .. }) = entered.first() else {
        panic!("a should have joined b");
    };
    let s = *s;
    assert_eq!(t.parent(b), Some(s));

    // Frames inside the settle window are ignored.
    t.move_to(a, 0.0, 0.0);
    step(d, t, k, "drag a away while settling", GraphEvent::Drag(a));
    assert_eq!(t.parent(a), Some(s));

    for token in k.advance(Duration::from_millis(100)) {
        d.settle_expired(token);
    }
    step(d, t, k, "drag a away", GraphEvent::Drag(a));
    assert!(!t.is_alive(s), "container with a single other member is removed");
    step(d, t, k, "free a", GraphEvent::Free(a));

    step(d, t, k, "grab c", GraphEvent::Grab(c));
    t.move_to(c, 40.0, 230.0);
    step(d, t, k, "drag c onto p", GraphEvent::Drag(c));
    step(d, t, k, "free c", GraphEvent::Free(c));
    assert_eq!(t.parent(c), Some(p));
    println!("p now holds {:?}", t.children(p));
}
