// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Gesture: input arbitration for an infinite 2D canvas.
//!
//! This crate sits between a host's raw input events and a
//! [`loupe_view::ViewportController`]. Every input stream gets exactly one
//! interpretation: it either moves the viewport (pan, zoom, glide) or is
//! forwarded to the application's [`GestureHandler`] (drag, tap, hover).
//!
//! - [`event`]: The input vocabulary (pointer, pan/zoom stream, scroll, tap,
//!   hover, keyboard).
//! - [`config`]: Feature switches and thresholds ([`GestureConfig`]).
//! - [`rules`]: Per‑device thresholds and scroll sign conventions.
//! - [`drag`]: Threshold classification for pointer drags.
//! - [`velocity`]: Smoothed release velocity for momentum hand‑off.
//! - [`trackpad`]: State of one continuous pan/zoom stream.
//! - [`hover`]: Hover callback throttling.
//! - [`signal`]: First‑claim‑wins resolution of scroll signals.
//!
//! ## Routing
//!
//! | input                          | result                               |
//! |--------------------------------|--------------------------------------|
//! | space held + drag              | viewport pan                         |
//! | middle button drag             | viewport pan                         |
//! | primary drag past threshold    | handler drag (if it accepts drags)   |
//! | trackpad pan/zoom              | viewport pan and zoom, then glide    |
//! | Ctrl/Cmd + scroll              | viewport zoom around the pointer     |
//! | scroll                         | viewport pan                         |
//! | tap, double tap, long press    | handler, in world coordinates        |
//! | hover                          | handler, throttled                   |
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size, Vec2};
//! use loupe_gesture::event::{Key, KeyEvent, KeyState, PointerEvent};
//! use loupe_gesture::{DragUpdate, GestureArbiter, GestureConfig, GestureHandler};
//! use loupe_view::{PhysicsConfig, ViewportController};
//!
//! #[derive(Default)]
//! struct Mover {
//!     moved: Vec2,
//! }
//!
//! impl GestureHandler for Mover {
//!     fn handles_drag(&self) -> bool {
//!         true
//!     }
//!     fn on_drag_update(&mut self, event: &DragUpdate) {
//!         self.moved += event.world_delta;
//!     }
//! }
//!
//! let mut view = ViewportController::new();
//! view.attach(PhysicsConfig::default(), Some(Size::new(800.0, 600.0)), None);
//! let mut gestures = GestureArbiter::new(GestureConfig::default(), Mover::default());
//! let ms = Duration::from_millis;
//!
//! // A plain drag moves content, not the camera.
//! gestures.pointer_down(&mut view, &PointerEvent::mouse(Point::new(10.0, 10.0), ms(0)));
//! gestures.pointer_move(&mut view, &PointerEvent::mouse(Point::new(40.0, 10.0), ms(16)));
//! gestures.pointer_up(&mut view, &PointerEvent::mouse(Point::new(40.0, 10.0), ms(32)));
//! assert_eq!(gestures.handler().moved, Vec2::new(30.0, 0.0));
//! assert_eq!(view.pan(), Vec2::ZERO);
//!
//! // With space held the same drag pans the viewport.
//! gestures.key(&KeyEvent { key: Key::Space, state: KeyState::Down, text_input_focused: false });
//! gestures.pointer_down(&mut view, &PointerEvent::mouse(Point::new(10.0, 10.0), ms(100)));
//! gestures.pointer_move(&mut view, &PointerEvent::mouse(Point::new(40.0, 10.0), ms(116)));
//! gestures.pointer_up(&mut view, &PointerEvent::mouse(Point::new(40.0, 10.0), ms(132)));
//! assert_eq!(view.pan(), Vec2::new(30.0, 0.0));
//! ```
//!
//! All methods take the controller by `&mut` per call; the arbiter never
//! stores it.
//!
//! This crate is `no_std`.

#![no_std]

#[cfg(test)]
extern crate alloc;

mod arbiter;
mod error;

pub mod config;
pub mod drag;
pub mod event;
pub mod hover;
pub mod rules;
pub mod signal;
pub mod trackpad;
pub mod velocity;

pub use arbiter::{
    DragEnd, DragStart, DragUpdate, GestureArbiter, GestureHandler, ScrollOutcome, StreamState,
};
pub use config::{GestureConfig, GestureConfigBuilder};
pub use error::ConfigError;
