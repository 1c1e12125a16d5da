// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use understory_compound_dnd::{CompoundDnd, GraphEvent, ManualScheduler, Options};
use understory_compound_tree::{NodeId, Tree, TreeNode, dispatch};

/// A grid of `n * n` plain nodes plus one dragged node far from all of them.
fn gen_scene(n: usize) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * 40.0;
            let y0 = y as f64 * 40.0;
            tree.insert(None, TreeNode::rect(Rect::new(x0, y0, x0 + 20.0, y0 + 20.0)));
        }
    }
    let dragged = tree.insert(
        None,
        TreeNode::rect(Rect::new(-500.0, -500.0, -490.0, -490.0)),
    );
    (tree, dragged)
}

fn started() -> CompoundDnd<Tree> {
    let mut dnd = CompoundDnd::new(Options::default());
    dnd.start();
    dnd
}

fn bench_grab(c: &mut Criterion) {
    let mut group = c.benchmark_group("grab");
    for &n in &[16usize, 32, 64] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                || (gen_scene(n), started(), ManualScheduler::new()),
                |((mut tree, a), mut dnd, mut timers)| {
                    let out = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Grab(a));
                    black_box(out);
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_idle_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("idle_drag");
    for &n in &[16usize, 32, 64] {
        let (mut tree, a) = gen_scene(n);
        let mut dnd = started();
        let mut timers = ManualScheduler::new();
        dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Grab(a));
        group.throughput(Throughput::Elements((n * n) as u64));
        // Moves back and forth in empty space: a full scan with no hits.
        group.bench_function(format!("grid_n{}", n), |b| {
            let mut step = 1.0;
            b.iter(|| {
                step = -step;
                tree.translate(a, Vec2::new(step, 0.0));
                let out = dispatch(&mut dnd, &mut tree, &mut timers, GraphEvent::Drag(a));
                black_box(out);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_grab, bench_idle_drag);
criterion_main!(benches);
