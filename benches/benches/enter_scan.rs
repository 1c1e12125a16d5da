// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_overlap::{BoundingBox, BoundsIndex, expand, overlaps};

fn gen_grid_boxes(n: usize, cell: f64) -> Vec<(u32, BoundingBox<f64>)> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            let key = (y * n + x) as u32;
            out.push((key, BoundingBox::from_xywh(x0, y0, cell * 0.5, cell * 0.5)));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_boxes(
    count: usize,
    max_w: f64,
    max_h: f64,
    size: f64,
) -> Vec<(u32, BoundingBox<f64>)> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for i in 0..count {
        let x0 = rng.next_f64() * (max_w - size).max(1.0);
        let y0 = rng.next_f64() * (max_h - size).max(1.0);
        out.push((i as u32, BoundingBox::from_xywh(x0, y0, size, size)));
    }
    out
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for &n in &[16usize, 32, 64] {
        let boxes = gen_grid_boxes(n, 20.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                BoundsIndex::<u32, f64>::new,
                |mut idx| {
                    idx.rebuild(boxes.iter().copied());
                    black_box(idx.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    for &n in &[16usize, 32, 64] {
        let mut idx = BoundsIndex::<u32, f64>::new();
        idx.rebuild(gen_grid_boxes(n, 20.0));
        let probe = expand(&BoundingBox::from_xywh(105.0, 105.0, 10.0, 10.0), 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let hits = idx.overlapping(black_box(&probe)).count();
                black_box(hits);
            })
        });
    }

    // Scan followed by the per-hit re-check against fresh bounds.
    let boxes = gen_random_boxes(4096, 2000.0, 2000.0, 12.0);
    let mut idx = BoundsIndex::<u32, f64>::new();
    idx.rebuild(boxes.iter().copied());
    let probe = expand(&BoundingBox::from_xywh(1000.0, 1000.0, 40.0, 40.0), 10.0);
    group.bench_function("random_4096_recheck", |b| {
        b.iter(|| {
            let hits = idx
                .overlapping(&probe)
                .filter(|t| overlaps(&probe, &boxes[t.node as usize].1))
                .count();
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_rebuild, bench_scan);
criterion_main!(benches);
