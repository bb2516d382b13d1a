// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device‑dependent lookup rules.
//!
//! Thresholds and scroll direction conventions differ per device and follow
//! platform defaults. They live here as small pure functions so each rule can
//! be checked on its own.

use core::time::Duration;

use crate::config::GestureConfig;
use crate::event::{DeviceKind, ScrollSource};

/// Multiplier applied to the drag threshold for touch and stylus contacts
/// when no explicit touch threshold is configured.
pub const TOUCH_DRAG_MULTIPLIER: f64 = 2.0;

/// Zoom change per pixel of vertical scroll while Ctrl/Cmd is held.
pub const SCROLL_ZOOM_RATE: f64 = 0.002;

/// If the pointer rested this long before release, the release velocity is zero.
pub const ASSUME_STOPPED: Duration = Duration::from_millis(40);

/// Drag threshold in view pixels for a device kind.
///
/// Mouse and trackpad pointers use `drag_threshold`. Touch and stylus
/// contacts are less precise: they use `touch_drag_threshold` when set, and
/// otherwise `drag_threshold * TOUCH_DRAG_MULTIPLIER`.
#[must_use]
pub fn drag_threshold_for(kind: DeviceKind, config: &GestureConfig) -> f64 {
    match kind {
        DeviceKind::Mouse | DeviceKind::Trackpad => config.drag_threshold(),
        DeviceKind::Touch | DeviceKind::Stylus => config
            .touch_drag_threshold()
            .unwrap_or(config.drag_threshold() * TOUCH_DRAG_MULTIPLIER),
    }
}

/// Sign applied to a device delta before it becomes a pan delta.
///
/// | source   | natural | sign |
/// |----------|---------|------|
/// | trackpad | yes     | `+1` |
/// | trackpad | no      | `-1` |
/// | mouse    | any     | `-1` |
///
/// Trackpads report finger movement, so natural scrolling moves content with
/// the fingers. Wheels report scroll direction, which moves content the other
/// way regardless of the trackpad setting.
#[must_use]
pub fn scroll_sign(source: ScrollSource, natural_scrolling: bool) -> f64 {
    match source {
        ScrollSource::Trackpad if natural_scrolling => 1.0,
        ScrollSource::Trackpad | ScrollSource::Mouse => -1.0,
    }
}

/// Zoom factor for a Ctrl/Cmd + scroll with vertical delta `dy`.
///
/// Returns `None` when the delta is so large the factor would not be positive.
#[must_use]
pub fn scroll_zoom_factor(dy: f64) -> Option<f64> {
    let factor = 1.0 - dy * SCROLL_ZOOM_RATE;
    (factor.is_finite() && factor > 0.0).then_some(factor)
}
