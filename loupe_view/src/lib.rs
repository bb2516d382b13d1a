// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe View: the viewport controller of an infinite 2D canvas.
//!
//! This crate owns the camera of a design surface: a uniform zoom plus a
//! pan offset mapping world coordinates into view (pixel) coordinates. It
//! focuses on:
//! - Coordinate conversion between world and view space ([`ViewportTransform`]).
//! - Zoom range and pan bound enforcement ([`PhysicsConfig`]).
//! - Focal‑point anchored zoom, fit‑to‑rect and ensure‑visible helpers.
//! - Frame‑driven animations: eased transitions and friction glides
//!   ([`Motion`], [`FrameScheduler`]).
//! - Motion flags and level‑of‑detail buckets ([`MotionState`], [`ZoomLevel`])
//!   with selective change notification ([`Topics`]).
//!
//! It does **not** interpret raw input or own a scene. Callers are expected
//! to:
//! - Route input through a gesture layer (see `loupe_gesture`) or call the
//!   pan/zoom operations directly.
//! - Call [`ViewportController::tick`] from their frame callback while
//!   [`ViewportController::is_animating`] is set.
//! - Query [`ViewportController::visible_world_bounds`] or
//!   [`ViewportController::cull_to_visible`] to decide what to render.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use loupe_view::{Easing, PhysicsConfig, ViewportController};
//! use std::time::Duration;
//!
//! let mut view = ViewportController::new();
//! view.attach(PhysicsConfig::default(), Some(Size::new(800.0, 600.0)), None);
//!
//! // Zoom in around the cursor: the world point under it stays put.
//! let cursor = Point::new(200.0, 150.0);
//! let before = view.view_to_world(cursor);
//! view.zoom_by(2.0, Some(cursor));
//! let after = view.view_to_world(cursor);
//! assert!((before - after).hypot() < 1e-9);
//!
//! // Without a frame scheduler, animations land immediately.
//! view.animate_to_fit(
//!     Rect::new(0.0, 0.0, 400.0, 300.0),
//!     0.0,
//!     None,
//!     Duration::from_millis(250),
//!     Easing::EaseInOut,
//! );
//! assert_eq!(view.zoom(), 2.0);
//! ```
//!
//! ## Driving animations
//!
//! ```rust
//! use kurbo::{Size, Vec2};
//! use loupe_view::{PhysicsConfig, ViewportController};
//! use std::time::Duration;
//!
//! let mut view = ViewportController::new().with_frame_scheduler(|| {
//!     // Ask the windowing layer for another redraw here.
//! });
//! view.attach(PhysicsConfig::default(), Some(Size::new(800.0, 600.0)), None);
//!
//! let glide = view.start_momentum(Vec2::new(600.0, 0.0), Vec2::ZERO, true);
//! assert!(glide.is_some());
//!
//! let mut now = Duration::ZERO;
//! while view.tick(now) {
//!     now += Duration::from_millis(16);
//! }
//! assert!(view.pan().x > 0.0);
//! assert!(!view.is_animating());
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and strictly positive; there is no rotation.
//! - `pan` is the view position of the world origin, so
//!   `view = world * zoom + pan`.
//! - The controller is single‑threaded and synchronous: observers run during
//!   the call that changed the state.
//!
//! This crate is `no_std` and uses `alloc`. Enable either the `std` (default)
//! or the `libm` feature for float math.

#![no_std]

extern crate alloc;

mod animation;
mod controller;
mod error;
mod momentum;
mod observe;
mod physics;
mod transform;
mod zoom_level;

pub use animation::{
    AnimationHandle, AnimationStatus, Easing, FrameScheduler, GLIDE_STOP_SPEED, Glide, Motion,
    MotionStep, Transition,
};
pub use controller::{AnimationTarget, MotionState, ViewportController, ViewportDebugInfo};
pub use error::ConfigError;
pub use momentum::{
    DEFAULT_FRICTION, DEFAULT_MAX_VELOCITY, DEFAULT_MIN_VELOCITY, MomentumConfig,
    MomentumConfigBuilder, NEGLIGIBLE_VELOCITY,
};
pub use observe::{SubscriptionId, Topics, ViewportChange};
pub use physics::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM, PhysicsConfig, PhysicsConfigBuilder};
pub use transform::ViewportTransform;
pub use zoom_level::{ZoomLevel, ZoomThresholds};
