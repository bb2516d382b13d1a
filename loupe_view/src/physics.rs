// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Physics policy: zoom range and pan bounds.
//!
//! [`PhysicsConfig`] is an immutable value object. All rules here are pure
//! functions of the config, the candidate transform and the viewport size;
//! the controller calls them on every mutation.

use kurbo::{Rect, Size, Vec2};

use crate::error::ConfigError;

/// Default minimum zoom factor.
pub const DEFAULT_MIN_ZOOM: f64 = 0.1;
/// Default maximum zoom factor.
pub const DEFAULT_MAX_ZOOM: f64 = 10.0;

/// Zoom limits and optional world‑space pan bounds.
///
/// Invariant: `0 < min_zoom <= max_zoom`, and bounds (when present) are
/// finite with non‑negative extent. Build one with [`PhysicsConfig::new`] or
/// [`PhysicsConfig::builder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsConfig {
    min_zoom: f64,
    max_zoom: f64,
    pan_bounds: Option<Rect>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            pan_bounds: None,
        }
    }
}

impl PhysicsConfig {
    /// Creates a config with the given zoom range and no pan bounds.
    pub fn new(min_zoom: f64, max_zoom: f64) -> Result<Self, ConfigError> {
        PhysicsConfigBuilder {
            min_zoom,
            max_zoom,
            pan_bounds: None,
        }
        .build()
    }

    /// Starts a builder initialized with the default values.
    #[must_use]
    pub fn builder() -> PhysicsConfigBuilder {
        PhysicsConfigBuilder::default()
    }

    /// Returns a builder holding this config's values.
    #[must_use]
    pub fn to_builder(&self) -> PhysicsConfigBuilder {
        PhysicsConfigBuilder {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            pan_bounds: self.pan_bounds,
        }
    }

    /// Returns a copy with different pan bounds.
    pub fn with_pan_bounds(self, pan_bounds: Option<Rect>) -> Result<Self, ConfigError> {
        self.to_builder().pan_bounds(pan_bounds).build()
    }

    /// Smallest allowed zoom factor.
    #[must_use]
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Largest allowed zoom factor.
    #[must_use]
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// World rectangle the visible region must stay within, if any.
    #[must_use]
    pub fn pan_bounds(&self) -> Option<Rect> {
        self.pan_bounds
    }

    /// Clamps `zoom` into `[min_zoom, max_zoom]`.
    ///
    /// Non‑finite input maps to the nearest limit (`NaN` to `min_zoom`).
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.min_zoom;
        }
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Clamps `pan` so the visible world rectangle stays inside the bounds.
    ///
    /// On each axis independently: when the viewport is larger than the
    /// bounds (at `zoom`), the bounds are centered; otherwise the pan is
    /// limited so no area outside the bounds becomes visible. Without bounds
    /// or without a known viewport size the pan is returned unchanged.
    #[must_use]
    pub fn clamp_pan(&self, pan: Vec2, zoom: f64, viewport: Option<Size>) -> Vec2 {
        let (Some(bounds), Some(viewport)) = (self.pan_bounds, viewport) else {
            return pan;
        };
        Vec2::new(
            clamp_axis(pan.x, zoom, bounds.x0, bounds.x1, viewport.width),
            clamp_axis(pan.y, zoom, bounds.y0, bounds.y1, viewport.height),
        )
    }
}

fn clamp_axis(pan: f64, zoom: f64, min: f64, max: f64, extent: f64) -> f64 {
    let content = (max - min) * zoom;
    if extent >= content {
        (extent - content) * 0.5 - min * zoom
    } else {
        // Visible span is [-pan / zoom, (extent - pan) / zoom].
        pan.clamp(extent - max * zoom, -min * zoom)
    }
}

/// Builder for [`PhysicsConfig`].
///
/// With the `serde` feature the builder can be deserialized from a
/// configuration file (missing fields take their defaults) and then validated
/// with [`PhysicsConfigBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PhysicsConfigBuilder {
    min_zoom: f64,
    max_zoom: f64,
    pan_bounds: Option<Rect>,
}

impl Default for PhysicsConfigBuilder {
    fn default() -> Self {
        PhysicsConfig::default().to_builder()
    }
}

impl PhysicsConfigBuilder {
    /// Sets the minimum zoom factor.
    #[must_use]
    pub fn min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = min_zoom;
        self
    }

    /// Sets the maximum zoom factor.
    #[must_use]
    pub fn max_zoom(mut self, max_zoom: f64) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Sets or clears the world‑space pan bounds.
    #[must_use]
    pub fn pan_bounds(mut self, pan_bounds: Option<Rect>) -> Self {
        self.pan_bounds = pan_bounds;
        self
    }

    /// Validates the values and produces a [`PhysicsConfig`].
    pub fn build(self) -> Result<PhysicsConfig, ConfigError> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ConfigError::NonPositiveMinZoom(self.min_zoom));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom >= self.min_zoom) {
            return Err(ConfigError::InvertedZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if let Some(b) = self.pan_bounds {
            let finite = b.x0.is_finite() && b.y0.is_finite() && b.x1.is_finite() && b.y1.is_finite();
            if !finite || b.x1 < b.x0 || b.y1 < b.y0 {
                return Err(ConfigError::InvalidPanBounds(b));
            }
        }
        Ok(PhysicsConfig {
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
            pan_bounds: self.pan_bounds,
        })
    }
}
