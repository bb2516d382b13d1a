// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loupe Snap: alignment snapping for objects on an infinite 2D canvas.
//!
//! While the user drags or resizes an object, the host asks the
//! [`SnapEngine`] where the object should land. The engine compares the
//! object's edges and centers with those of nearby objects, picks the closest
//! alignment per axis and returns adjusted bounds plus [`SnapGuide`] lines to
//! draw.
//!
//! - [`SnapEngine::calculate`] snaps a moving rectangle, falling back to a
//!   grid when configured.
//! - [`SnapEngine::calculate_resize`] snaps only the edges being resized
//!   ([`ResizeEdges`]).
//!
//! All geometry is in world coordinates. The snap distance is configured in
//! view pixels and divided by the current zoom, so it feels the same at every
//! zoom level. The engine does not look anything up: the host passes the
//! candidate rectangles (typically the visible objects minus the selection).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Vec2};
//! use loupe_snap::{GuideAxis, ResizeEdges, SnapConfig, SnapEngine};
//!
//! let engine = SnapEngine::new(SnapConfig::default());
//! let others = [Rect::new(200.0, 0.0, 300.0, 80.0)];
//!
//! // Dragged to 3 px left of the other object's left edge: it snaps over.
//! let result = engine.calculate(Rect::new(197.0, 120.0, 247.0, 170.0), &others, 1.0);
//! assert_eq!(result.bounds.x0, 200.0);
//! assert_eq!(result.guides[0].axis, GuideAxis::Vertical);
//!
//! // Resizing the right edge towards the other object's left edge.
//! let result = engine.calculate_resize(
//!     Rect::new(0.0, 0.0, 150.0, 50.0),
//!     ResizeEdges::RIGHT,
//!     Vec2::new(46.0, 0.0),
//!     &others,
//!     1.0,
//! );
//! assert_eq!(result.bounds, Rect::new(0.0, 0.0, 200.0, 50.0));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod engine;
mod error;
mod guide;
mod types;

pub use config::{DEFAULT_GUIDE_MARGIN, DEFAULT_SNAP_THRESHOLD, SnapConfig, SnapConfigBuilder};
pub use engine::{SnapEngine, SnapResult};
pub use error::ConfigError;
pub use guide::{GuideAxis, GuideKind, SnapGuide};
pub use types::{ResizeEdges, SnapCandidate, SnapKind};
