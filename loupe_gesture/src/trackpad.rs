// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State of one continuous pan/zoom stream.

use core::time::Duration;

use kurbo::Vec2;

use crate::velocity::VelocityFilter;

/// Transient state between a pan/zoom start and its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackpadSession {
    distance: f64,
    last_timestamp: Duration,
    last_scale: f64,
    velocity: VelocityFilter,
}

impl TrackpadSession {
    /// Opens a session at `timestamp` with scale `1.0`.
    #[must_use]
    pub fn new(timestamp: Duration) -> Self {
        Self {
            distance: 0.0,
            last_timestamp: timestamp,
            last_scale: 1.0,
            velocity: VelocityFilter::new(timestamp),
        }
    }

    /// Records an applied pan delta (already signed and scaled).
    pub fn record_pan(&mut self, delta: Vec2, timestamp: Duration) {
        if !(delta.x.is_finite() && delta.y.is_finite()) {
            return;
        }
        self.distance += delta.hypot();
        self.velocity.add(delta, timestamp);
        self.last_timestamp = self.last_timestamp.max(timestamp);
    }

    /// Records the cumulative stream scale and returns the change since the
    /// previous update, or `None` if the scale is unusable or unchanged.
    pub fn record_scale(&mut self, scale: f64, timestamp: Duration) -> Option<f64> {
        self.last_timestamp = self.last_timestamp.max(timestamp);
        if !(scale.is_finite() && scale > 0.0) || scale == self.last_scale {
            return None;
        }
        let ratio = scale / self.last_scale;
        self.last_scale = scale;
        Some(ratio)
    }

    /// Total pan distance applied during the stream.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Returns `true` if the stream panned at all.
    #[must_use]
    pub fn had_pan(&self) -> bool {
        self.distance > 0.0
    }

    /// Time of the latest update.
    #[must_use]
    pub fn last_timestamp(&self) -> Duration {
        self.last_timestamp
    }

    /// Scale reported by the latest update.
    #[must_use]
    pub fn last_scale(&self) -> f64 {
        self.last_scale
    }

    /// Smoothed pan velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity.velocity()
    }

    /// Last pan velocity with a usable direction.
    #[must_use]
    pub fn fallback_velocity(&self) -> Vec2 {
        self.velocity.fallback()
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::Vec2;

    use super::TrackpadSession;

    #[test]
    fn scale_changes_are_relative_to_the_previous_update() {
        let mut s = TrackpadSession::new(Duration::ZERO);
        assert_eq!(s.record_scale(1.0, Duration::from_millis(8)), None);
        assert_eq!(s.record_scale(2.0, Duration::from_millis(16)), Some(2.0));
        assert_eq!(s.record_scale(3.0, Duration::from_millis(24)), Some(1.5));
        assert_eq!(s.record_scale(0.0, Duration::from_millis(32)), None);
        assert_eq!(s.last_scale(), 3.0);
    }

    #[test]
    fn pan_accumulates_distance_and_velocity() {
        let mut s = TrackpadSession::new(Duration::ZERO);
        assert!(!s.had_pan());
        s.record_pan(Vec2::new(3.0, 4.0), Duration::from_millis(16));
        s.record_pan(Vec2::new(3.0, 4.0), Duration::from_millis(32));
        assert_eq!(s.distance(), 10.0);
        assert!(s.had_pan());
        assert!(s.velocity().x > 0.0 && s.velocity().y > 0.0);
        assert_eq!(s.last_timestamp(), Duration::from_millis(32));
    }
}
