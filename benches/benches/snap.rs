// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Rect, Vec2};
use loupe_snap::{ResizeEdges, SnapConfig, SnapEngine};

/// A grid of `n` 80x60 objects with 20 unit gutters.
fn scene(n: usize) -> Vec<Rect> {
    let cols = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let x = (i % cols) as f64 * 100.0;
            let y = (i / cols) as f64 * 80.0;
            Rect::new(x, y, x + 80.0, y + 60.0)
        })
        .collect()
}

fn bench_calculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap/calculate");
    let engine = SnapEngine::new(SnapConfig::builder().grid_size(Some(10.0)).build().unwrap());

    for n in [16usize, 256, 4_096] {
        let others = scene(n);
        group.throughput(Throughput::Elements(n as u64));

        // Just off an alignment, so every call finds a winner.
        let near = Rect::new(203.0, 162.0, 283.0, 222.0);
        group.bench_with_input(BenchmarkId::new("aligned", n), &others, |b, others| {
            b.iter(|| black_box(engine.calculate(black_box(near), others, 1.0)));
        });

        // Far from everything, so the grid fallback runs.
        let lost = Rect::new(-5_003.0, -5_007.0, -4_950.0, -4_950.0);
        group.bench_with_input(BenchmarkId::new("grid_fallback", n), &others, |b, others| {
            b.iter(|| black_box(engine.calculate(black_box(lost), others, 1.0)));
        });
    }

    group.finish();
}

fn bench_calculate_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("snap/calculate_resize");
    let engine = SnapEngine::default();

    for n in [16usize, 256, 4_096] {
        let others = scene(n);
        group.throughput(Throughput::Elements(n as u64));
        let current = Rect::new(200.0, 160.0, 270.0, 210.0);

        group.bench_with_input(BenchmarkId::new("corner", n), &others, |b, others| {
            b.iter(|| {
                black_box(engine.calculate_resize(
                    black_box(current),
                    ResizeEdges::BOTTOM_RIGHT,
                    Vec2::new(8.0, 7.0),
                    others,
                    1.0,
                ))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_calculate, bench_calculate_resize);
criterion_main!(benches);
