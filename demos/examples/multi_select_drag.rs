// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging a multi-selection into a container.
//!
//! Two selected nodes are grabbed together. The host reports one grab per
//! selected node; each restarts the gesture with the whole selection. When
//! one of them is pulled back out, the whole selection leaves.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example multi_select_drag`

use core::time::Duration;

use kurbo::{Rect, Vec2};
use log::info;
use understory_compound_dnd::{
    CompoundDnd, GraphEvent, HostGraph, ManualScheduler, Markers, Options,
};
use understory_compound_tree::{NodeId, Tree, TreeNode, dispatch};

fn leaf(tree: &mut Tree, parent: Option<NodeId>, x: f64, y: f64) -> NodeId {
    tree.insert(parent, TreeNode::rect(Rect::new(x, y, x + 30.0, y + 30.0)))
}

fn describe(tree: &Tree, node: NodeId) -> String {
    let classes: Vec<_> = tree
        .markers(node)
        .unwrap_or(Markers::empty())
        .iter()
        .filter_map(Markers::class_name)
        .collect();
    format!("{node:?} parent={:?} classes={classes:?}", tree.parent(node))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .init();

    let mut tree = Tree::new();
    let a = leaf(&mut tree, None, 0.0, 0.0);
    let b = leaf(&mut tree, None, 0.0, 50.0);
    let p = tree.insert(None, TreeNode::default());
    let q = leaf(&mut tree, Some(p), 300.0, 0.0);

    let options = Options::<Tree>::default().with_multiple_node_selection(true);
    let mut dnd = CompoundDnd::new(options);
    let mut timers = ManualScheduler::new();
    dnd.start();

    tree.set_selected(a, true);
    tree.set_selected(b, true);
    for n in tree.grab_selection() {
        let events = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Grab(n));
        info!("grab {n:?}: {events:?}");
    }
    assert_eq!(dnd.grabbed(), &[a, b]);

    for _ in 0..10 {
        for n in tree.grabbed_nodes() {
            tree.translate(n, Vec2::new(30.0, 0.0));
        }
        let events = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Drag(a));
        if !events.is_empty() {
            info!("{events:?}");
        }
        for token in timers.advance(Duration::from_millis(16)) {
            dnd.settle_expired(token);
        }
    }
    println!("== After dragging right ==");
    for n in [a, b, p, q] {
        println!("  {}", describe(&tree, n));
    }
    assert_eq!(tree.parent(a), Some(p));
    assert_eq!(tree.parent(b), Some(p));

    // Let the settle window run out, then pull `b` back out alone.
    for token in timers.advance(Duration::from_millis(200)) {
        dnd.settle_expired(token);
    }
    tree.move_to(b, 0.0, 400.0);
    let events = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Drag(b));
    info!("{events:?}");
    assert_eq!(tree.parent(a), None, "the whole selection leaves together");

    let events = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Free(a));
    info!("{events:?}");
    tree.release_all();

    println!("== After release ==");
    for n in [a, b, p, q] {
        println!("  {}", describe(&tree, n));
    }
}
