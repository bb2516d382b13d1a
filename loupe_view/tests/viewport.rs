// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `loupe_view` crate.
//!
//! These exercise the public controller API end to end: notification order,
//! configuration swaps under a running animation, and configuration loading.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kurbo::{Point, Rect, Size, Vec2};
use loupe_view::{
    AnimationStatus, AnimationTarget, Easing, PhysicsConfig, Topics, ViewportChange,
    ViewportController, ZoomLevel,
};

fn recorder(view: &mut ViewportController, topics: Topics) -> Rc<RefCell<Vec<ViewportChange>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    view.subscribe(topics, move |change| sink.borrow_mut().push(*change));
    log
}

#[test]
fn notifications_arrive_in_invocation_order() {
    let mut view = ViewportController::new();
    view.attach(PhysicsConfig::default(), Some(Size::new(800.0, 600.0)), None);
    let log = recorder(&mut view, Topics::all());

    view.set_is_zooming(true);
    view.set_zoom(3.0, Some(Point::new(400.0, 300.0)));
    view.set_is_zooming(false);
    view.set_is_panning(true);
    view.pan_by(Vec2::new(5.0, 0.0));
    view.set_is_panning(false);

    let log = log.borrow();
    assert_eq!(log.len(), 7);
    assert_eq!(log[0], ViewportChange::Zooming(true));
    assert!(matches!(log[1], ViewportChange::Transform(t) if t.zoom == 3.0));
    assert_eq!(log[2], ViewportChange::Zooming(false));
    assert_eq!(log[3], ViewportChange::ZoomLevel(ZoomLevel::Detail));
    assert_eq!(log[4], ViewportChange::Panning(true));
    assert!(matches!(log[5], ViewportChange::Transform(_)));
    assert_eq!(log[6], ViewportChange::Panning(false));
}

#[test]
fn unsubscribed_observers_stop_receiving() {
    let mut view = ViewportController::new();
    let log = Rc::new(RefCell::new(0_u32));
    let sink = log.clone();
    let id = view.subscribe(Topics::TRANSFORM, move |_| *sink.borrow_mut() += 1);

    view.pan_by(Vec2::new(1.0, 0.0));
    assert!(view.unsubscribe(id));
    view.pan_by(Vec2::new(1.0, 0.0));
    assert_eq!(*log.borrow(), 1);
}

#[test]
fn shrinking_bounds_mid_animation_keeps_transform_inside() {
    let mut view = ViewportController::new().with_frame_scheduler(|| {});
    view.attach(PhysicsConfig::default(), Some(Size::new(400.0, 400.0)), None);
    let handle = view.animate_to(
        AnimationTarget::pan(Vec2::new(-2_000.0, -2_000.0)),
        Duration::from_millis(100),
        Easing::Linear,
    );
    view.tick(Duration::ZERO);

    let bounds = Rect::new(0.0, 0.0, 1_000.0, 1_000.0);
    view.set_physics(PhysicsConfig::default().with_pan_bounds(Some(bounds)).unwrap());

    let mut now = Duration::ZERO;
    while view.tick(now) {
        now += Duration::from_millis(16);
        let visible = view.visible_world_bounds(None).unwrap();
        assert!(visible.x0 >= -1e-9 && visible.x1 <= 1_000.0 + 1e-9);
    }
    assert_eq!(handle.status(), AnimationStatus::Completed);
    assert_eq!(view.pan(), Vec2::new(-600.0, -600.0));
}

#[cfg(feature = "serde")]
#[test]
fn configuration_loads_from_json_and_validates() {
    use loupe_view::{ConfigError, MomentumConfigBuilder, PhysicsConfigBuilder};

    let physics: PhysicsConfigBuilder = serde_json::from_str(
        r#"{ "min_zoom": 0.5, "pan_bounds": { "x0": 0.0, "y0": 0.0, "x1": 100.0, "y1": 50.0 } }"#,
    )
    .unwrap();
    let physics = physics.build().unwrap();
    assert_eq!(physics.min_zoom(), 0.5);
    assert_eq!(physics.max_zoom(), 10.0);
    assert_eq!(physics.pan_bounds(), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));

    let momentum: MomentumConfigBuilder = serde_json::from_str(r#"{ "friction": 2.0 }"#).unwrap();
    assert_eq!(momentum.build(), Err(ConfigError::FrictionOutOfRange(2.0)));
}
