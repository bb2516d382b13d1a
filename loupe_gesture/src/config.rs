// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture configuration.
//!
//! [`GestureConfig`] is an immutable value read on every event; swap it with
//! [`crate::GestureArbiter::set_config`]. Build custom values through
//! [`GestureConfig::builder`]:
//!
//! ```
//! use loupe_gesture::config::GestureConfig;
//!
//! let config = GestureConfig::builder()
//!     .natural_scrolling(false)
//!     .drag_threshold(4.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.drag_threshold(), 4.0);
//! assert!(config.touch_drag_threshold().is_none());
//! ```

use core::time::Duration;

use crate::error::ConfigError;

/// Default drag threshold for mouse and trackpad, in view pixels.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 8.0;
/// Default minimum interval between hover callbacks, in milliseconds.
pub const DEFAULT_HOVER_THROTTLE_MS: u64 = 16;

/// Switches and thresholds of the gesture layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    enable_pan: bool,
    enable_zoom: bool,
    enable_spacebar_pan: bool,
    enable_middle_mouse_pan: bool,
    enable_scroll_pan: bool,
    natural_scrolling: bool,
    drag_threshold: f64,
    touch_drag_threshold: Option<f64>,
    hover_throttle_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            enable_pan: true,
            enable_zoom: true,
            enable_spacebar_pan: true,
            enable_middle_mouse_pan: true,
            enable_scroll_pan: true,
            natural_scrolling: true,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            touch_drag_threshold: None,
            hover_throttle_ms: DEFAULT_HOVER_THROTTLE_MS,
        }
    }
}

impl GestureConfig {
    /// Starts a builder initialized with the default values.
    #[must_use]
    pub fn builder() -> GestureConfigBuilder {
        GestureConfigBuilder::default()
    }

    /// Returns a builder holding this config's values.
    #[must_use]
    pub fn to_builder(&self) -> GestureConfigBuilder {
        GestureConfigBuilder {
            enable_pan: self.enable_pan,
            enable_zoom: self.enable_zoom,
            enable_spacebar_pan: self.enable_spacebar_pan,
            enable_middle_mouse_pan: self.enable_middle_mouse_pan,
            enable_scroll_pan: self.enable_scroll_pan,
            natural_scrolling: self.natural_scrolling,
            drag_threshold: self.drag_threshold,
            touch_drag_threshold: self.touch_drag_threshold,
            hover_throttle_ms: self.hover_throttle_ms,
        }
    }

    /// Master switch for every viewport pan.
    #[must_use]
    pub fn enable_pan(&self) -> bool {
        self.enable_pan
    }

    /// Master switch for every viewport zoom.
    #[must_use]
    pub fn enable_zoom(&self) -> bool {
        self.enable_zoom
    }

    /// Whether holding space turns pointer drags into pans.
    #[must_use]
    pub fn enable_spacebar_pan(&self) -> bool {
        self.enable_spacebar_pan
    }

    /// Whether middle‑button drags pan.
    #[must_use]
    pub fn enable_middle_mouse_pan(&self) -> bool {
        self.enable_middle_mouse_pan
    }

    /// Whether unmodified scroll events pan.
    #[must_use]
    pub fn enable_scroll_pan(&self) -> bool {
        self.enable_scroll_pan
    }

    /// Whether trackpad content follows the fingers.
    #[must_use]
    pub fn natural_scrolling(&self) -> bool {
        self.natural_scrolling
    }

    /// Drag threshold for mouse and trackpad pointers.
    #[must_use]
    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    /// Explicit touch/stylus drag threshold, if configured.
    #[must_use]
    pub fn touch_drag_threshold(&self) -> Option<f64> {
        self.touch_drag_threshold
    }

    /// Minimum interval between hover callbacks; zero disables throttling.
    #[must_use]
    pub fn hover_throttle(&self) -> Duration {
        Duration::from_millis(self.hover_throttle_ms)
    }
}

/// Builder for [`GestureConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GestureConfigBuilder {
    enable_pan: bool,
    enable_zoom: bool,
    enable_spacebar_pan: bool,
    enable_middle_mouse_pan: bool,
    enable_scroll_pan: bool,
    natural_scrolling: bool,
    drag_threshold: f64,
    touch_drag_threshold: Option<f64>,
    hover_throttle_ms: u64,
}

impl Default for GestureConfigBuilder {
    fn default() -> Self {
        GestureConfig::default().to_builder()
    }
}

impl GestureConfigBuilder {
    /// Enables or disables viewport panning.
    #[must_use]
    pub fn enable_pan(mut self, enable: bool) -> Self {
        self.enable_pan = enable;
        self
    }

    /// Enables or disables viewport zooming.
    #[must_use]
    pub fn enable_zoom(mut self, enable: bool) -> Self {
        self.enable_zoom = enable;
        self
    }

    /// Enables or disables space + drag panning.
    #[must_use]
    pub fn enable_spacebar_pan(mut self, enable: bool) -> Self {
        self.enable_spacebar_pan = enable;
        self
    }

    /// Enables or disables middle‑button panning.
    #[must_use]
    pub fn enable_middle_mouse_pan(mut self, enable: bool) -> Self {
        self.enable_middle_mouse_pan = enable;
        self
    }

    /// Enables or disables scroll‑wheel panning.
    #[must_use]
    pub fn enable_scroll_pan(mut self, enable: bool) -> Self {
        self.enable_scroll_pan = enable;
        self
    }

    /// Sets the trackpad scroll direction convention.
    #[must_use]
    pub fn natural_scrolling(mut self, natural: bool) -> Self {
        self.natural_scrolling = natural;
        self
    }

    /// Sets the mouse/trackpad drag threshold in view pixels.
    #[must_use]
    pub fn drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Sets or clears an explicit touch/stylus drag threshold.
    #[must_use]
    pub fn touch_drag_threshold(mut self, threshold: Option<f64>) -> Self {
        self.touch_drag_threshold = threshold;
        self
    }

    /// Sets the hover throttle interval in milliseconds.
    #[must_use]
    pub fn hover_throttle_ms(mut self, millis: u64) -> Self {
        self.hover_throttle_ms = millis;
        self
    }

    /// Validates the values and produces a [`GestureConfig`].
    pub fn build(self) -> Result<GestureConfig, ConfigError> {
        if !(self.drag_threshold.is_finite() && self.drag_threshold > 0.0) {
            return Err(ConfigError::NonPositiveDragThreshold(self.drag_threshold));
        }
        if let Some(touch) = self.touch_drag_threshold {
            if !(touch.is_finite() && touch > 0.0) {
                return Err(ConfigError::NonPositiveTouchDragThreshold(touch));
            }
        }
        Ok(GestureConfig {
            enable_pan: self.enable_pan,
            enable_zoom: self.enable_zoom,
            enable_spacebar_pan: self.enable_spacebar_pan,
            enable_middle_mouse_pan: self.enable_middle_mouse_pan,
            enable_scroll_pan: self.enable_scroll_pan,
            natural_scrolling: self.natural_scrolling,
            drag_threshold: self.drag_threshold,
            touch_drag_threshold: self.touch_drag_threshold,
            hover_throttle_ms: self.hover_throttle_ms,
        })
    }
}
