// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Low‑pass release velocity estimation.
//!
//! Input devices deliver deltas at irregular intervals and sometimes with
//! duplicate timestamps. [`VelocityFilter`] clamps each interval to a sane
//! frame range, converts the delta into an instantaneous velocity and blends
//! it into an exponentially smoothed estimate.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Vec2;
//! use loupe_gesture::velocity::VelocityFilter;
//!
//! let mut filter = VelocityFilter::new(Duration::ZERO);
//! for i in 1..=30 {
//!     filter.add(Vec2::new(10.0, 0.0), Duration::from_millis(10 * i));
//! }
//! // 10 px every 10 ms converges on 1000 px/s.
//! assert!((filter.velocity().x - 1000.0).abs() < 1.0);
//! ```

use core::time::Duration;

use kurbo::Vec2;
use loupe_view::NEGLIGIBLE_VELOCITY;

/// Shortest interval a sample is assumed to span (240 Hz).
pub const MIN_SAMPLE_INTERVAL: f64 = 1.0 / 240.0;
/// Longest interval a sample is assumed to span (30 Hz).
pub const MAX_SAMPLE_INTERVAL: f64 = 1.0 / 30.0;
/// Weight of each new sample in the smoothed estimate.
pub const SMOOTHING: f64 = 0.25;

/// Exponentially smoothed velocity in view pixels per second.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityFilter {
    filtered: Vec2,
    last_significant: Vec2,
    last_sample: Duration,
}

impl VelocityFilter {
    /// Starts an estimate whose first interval is measured from `start`.
    #[must_use]
    pub fn new(start: Duration) -> Self {
        Self {
            filtered: Vec2::ZERO,
            last_significant: Vec2::ZERO,
            last_sample: start,
        }
    }

    /// Adds a movement `delta` observed at `timestamp`.
    ///
    /// Non‑finite deltas are ignored.
    pub fn add(&mut self, delta: Vec2, timestamp: Duration) {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return;
        }
        let raw = timestamp.saturating_sub(self.last_sample).as_secs_f64();
        let dt = raw.clamp(MIN_SAMPLE_INTERVAL, MAX_SAMPLE_INTERVAL);
        self.last_sample = self.last_sample.max(timestamp);

        let instant = delta / dt;
        self.filtered += (instant - self.filtered) * SMOOTHING;
        if self.filtered.hypot() > NEGLIGIBLE_VELOCITY {
            self.last_significant = self.filtered;
        }
        log::trace!("velocity sample {delta:?} over {dt:.4}s -> {:?}", self.filtered);
    }

    /// Smoothed velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.filtered
    }

    /// Last smoothed velocity with a usable direction.
    ///
    /// Trackpads often finish with frames that cancel the smoothed velocity;
    /// this keeps the direction the gesture was actually moving in.
    #[must_use]
    pub fn fallback(&self) -> Vec2 {
        self.last_significant
    }

    /// Time of the most recent sample (or the start time).
    #[must_use]
    pub fn last_sample(&self) -> Duration {
        self.last_sample
    }

    /// Velocity to hand off at `release`: zero if the pointer rested longer
    /// than `stale_after` before releasing.
    #[must_use]
    pub fn release_velocity(&self, release: Duration, stale_after: Duration) -> Vec2 {
        if release.saturating_sub(self.last_sample) > stale_after {
            Vec2::ZERO
        } else {
            self.filtered
        }
    }
}
