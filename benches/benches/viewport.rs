// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Rect, Size, Vec2};
use loupe_gesture::event::{Modifiers, ScrollEvent, ScrollSource};
use loupe_gesture::{GestureArbiter, GestureConfig};
use loupe_view::{PhysicsConfig, ViewportController};

fn controller() -> ViewportController {
    let mut c = ViewportController::new().with_frame_scheduler(|| {});
    let physics = PhysicsConfig::default()
        .with_pan_bounds(Some(Rect::new(-10_000.0, -10_000.0, 10_000.0, 10_000.0)))
        .unwrap();
    c.attach(physics, Some(Size::new(1280.0, 800.0)), None);
    c
}

fn bench_pan_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/mutation");

    group.bench_function("pan_by", |b| {
        let mut view = controller();
        let mut sign = 1.0;
        b.iter(|| {
            sign = -sign;
            view.pan_by(black_box(Vec2::new(3.0 * sign, 2.0 * sign)));
        });
    });

    group.bench_function("zoom_by_focal", |b| {
        let mut view = controller();
        let mut factor = 1.1;
        b.iter(|| {
            factor = 1.0 / factor;
            view.zoom_by(black_box(factor), Some(Point::new(640.0, 400.0)));
        });
    });

    group.bench_function("scroll_dispatch", |b| {
        let mut view = controller();
        let mut gestures = GestureArbiter::new(GestureConfig::default(), ());
        let mut dy = 40.0;
        b.iter(|| {
            dy = -dy;
            let event = ScrollEvent {
                position: Point::new(640.0, 400.0),
                delta: Vec2::new(0.0, dy),
                source: ScrollSource::Mouse,
                modifiers: Modifiers::empty(),
                timestamp: Duration::ZERO,
            };
            black_box(gestures.scroll(&mut view, &event));
        });
    });

    group.finish();
}

fn bench_glide(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/glide");
    group.bench_function("momentum_to_rest", |b| {
        b.iter_batched(
            controller,
            |mut view| {
                view.start_momentum(Vec2::new(2_400.0, -900.0), Vec2::ZERO, true);
                let mut now = Duration::ZERO;
                while view.tick(now) {
                    now += Duration::from_millis(16);
                }
                black_box(view.pan());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_cull(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport/cull_to_visible");
    let view = controller();

    for n in [1_024usize, 16_384] {
        let cols = (n as f64).sqrt().ceil() as usize;
        let items: Vec<Rect> = (0..n)
            .map(|i| {
                let x = (i % cols) as f64 * 60.0 - 2_000.0;
                let y = (i / cols) as f64 * 60.0 - 2_000.0;
                Rect::new(x, y, x + 40.0, y + 40.0)
            })
            .collect();
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(view.cull_to_visible(items, |r| *r, None).len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pan_zoom, bench_glide, bench_cull);
criterion_main!(benches);
