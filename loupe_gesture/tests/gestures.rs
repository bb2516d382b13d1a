// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End‑to‑end gesture sequences against a real viewport controller.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use loupe_gesture::event::{
    DeviceKind, PanZoomEnd, PanZoomStart, PanZoomUpdate, PointerButton, PointerEvent, PointerId,
};
use loupe_gesture::{GestureArbiter, GestureConfig, GestureHandler, StreamState};
use loupe_view::{PhysicsConfig, Topics, ViewportChange, ViewportController};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn controller_with_frames() -> (ViewportController, Rc<RefCell<u32>>) {
    let frames = Rc::new(RefCell::new(0));
    let counter = frames.clone();
    let mut c = ViewportController::new().with_frame_scheduler(move || {
        *counter.borrow_mut() += 1;
    });
    c.attach(PhysicsConfig::default(), Some(Size::new(800.0, 600.0)), None);
    (c, frames)
}

#[test]
fn trackpad_fling_glides_and_reports_motion_flags() {
    let (mut view, frames) = controller_with_frames();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    view.subscribe(Topics::MOTION, move |change| sink.borrow_mut().push(*change));

    let mut gestures = GestureArbiter::new(GestureConfig::default(), ());
    gestures.pan_zoom_start(&mut view, &PanZoomStart {
        position: Point::new(400.0, 300.0),
        timestamp: ms(0),
    });
    for i in 1..=6 {
        gestures.pan_zoom_update(&mut view, &PanZoomUpdate {
            position: Point::new(400.0, 300.0),
            pan_delta: Vec2::new(15.0, 0.0),
            scale: 1.0,
            timestamp: ms(16 * i),
        });
    }
    let released_at = view.pan();
    assert_eq!(released_at, Vec2::new(90.0, 0.0));
    gestures.pan_zoom_end(&mut view, &PanZoomEnd { timestamp: ms(100) });
    assert!(view.is_animating());

    let mut now = ms(100);
    let mut ticks = 0;
    while view.tick(now) {
        now += ms(16);
        ticks += 1;
        assert!(ticks < 1000, "glide should come to rest");
    }
    assert!(view.pan().x > released_at.x);
    assert!(*frames.borrow() > 1);
    assert_eq!(
        *log.borrow(),
        [
            ViewportChange::Panning(true),
            ViewportChange::Panning(false),
            ViewportChange::Animating(true),
            ViewportChange::Animating(false),
        ]
    );
}

#[test]
fn bounded_canvas_stops_middle_button_pan() {
    let mut view = ViewportController::new();
    let physics = PhysicsConfig::default()
        .with_pan_bounds(Some(Rect::new(0.0, 0.0, 1000.0, 1000.0)))
        .unwrap();
    view.attach(physics, Some(Size::new(800.0, 600.0)), None);

    let mut gestures = GestureArbiter::new(GestureConfig::default(), ());
    let middle = |x: f64, t: u64| {
        PointerEvent::mouse(Point::new(x, 300.0), ms(t)).with_button(Some(PointerButton::Middle))
    };
    gestures.pointer_down(&mut view, &middle(400.0, 0));
    gestures.pointer_move(&mut view, &middle(100.0, 16));
    assert_eq!(view.pan(), Vec2::new(-200.0, 0.0));
    gestures.pointer_move(&mut view, &middle(-400.0, 32));
    assert_eq!(gestures.stream_state(), StreamState::Panning);
    assert_eq!(view.pan(), Vec2::new(-200.0, 0.0));
    gestures.pointer_up(&mut view, &middle(-400.0, 48));
    assert!(!view.is_panning());
}

#[derive(Debug, Default)]
struct Counter {
    starts: u32,
    ends: u32,
}

impl GestureHandler for Counter {
    fn handles_drag(&self) -> bool {
        true
    }
    fn on_drag_start(&mut self, _: &loupe_gesture::DragStart) {
        self.starts += 1;
    }
    fn on_drag_end(&mut self, _: &loupe_gesture::DragEnd) {
        self.ends += 1;
    }
}

#[test]
fn stylus_jitter_is_not_a_drag() {
    let mut view = ViewportController::new();
    view.attach(PhysicsConfig::default(), None, None);
    let mut gestures = GestureArbiter::new(GestureConfig::default(), Counter::default());
    let pen = |x: f64, t: u64| {
        PointerEvent::mouse(Point::new(x, 0.0), ms(t))
            .with_kind(DeviceKind::Stylus)
            .with_pointer_id(PointerId(3))
    };
    gestures.pointer_down(&mut view, &pen(0.0, 0));
    for (i, x) in [4.0, -6.0, 12.0, 15.0].into_iter().enumerate() {
        gestures.pointer_move(&mut view, &pen(x, 8 * (i as u64 + 1)));
    }
    gestures.pointer_up(&mut view, &pen(15.0, 48));
    assert_eq!(gestures.handler().starts, 0);
    assert_eq!(gestures.handler().ends, 0);
    assert_eq!(gestures.stream_state(), StreamState::Idle);
}
