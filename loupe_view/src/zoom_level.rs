// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discrete zoom levels for level‑of‑detail decisions.

use crate::error::ConfigError;

/// Coarse zoom bucket used by renderers to pick a level of detail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ZoomLevel {
    /// Zoomed far out; render simplified content.
    Overview,
    /// Regular editing zoom.
    #[default]
    Normal,
    /// Zoomed far in; render full detail.
    Detail,
}

/// Thresholds separating [`ZoomLevel`]s, with a hysteresis band.
///
/// Moving between adjacent levels requires crossing the threshold by more
/// than `hysteresis`, which keeps the level from flickering when the zoom
/// hovers around a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomThresholds {
    overview_below: f64,
    detail_above: f64,
    hysteresis: f64,
}

impl Default for ZoomThresholds {
    fn default() -> Self {
        Self {
            overview_below: 0.3,
            detail_above: 2.0,
            hysteresis: 0.05,
        }
    }
}

impl ZoomThresholds {
    /// Creates thresholds; the two hysteresis bands must not overlap.
    pub fn new(overview_below: f64, detail_above: f64, hysteresis: f64) -> Result<Self, ConfigError> {
        let ok = overview_below.is_finite()
            && detail_above.is_finite()
            && hysteresis.is_finite()
            && overview_below > 0.0
            && hysteresis >= 0.0
            && overview_below + hysteresis < detail_above - hysteresis;
        if !ok {
            return Err(ConfigError::InvalidZoomThresholds {
                overview_below,
                detail_above,
                hysteresis,
            });
        }
        Ok(Self {
            overview_below,
            detail_above,
            hysteresis,
        })
    }

    /// Zoom below which the overview level applies.
    #[must_use]
    pub fn overview_below(&self) -> f64 {
        self.overview_below
    }

    /// Zoom above which the detail level applies.
    #[must_use]
    pub fn detail_above(&self) -> f64 {
        self.detail_above
    }

    /// Width of the dead band on each side of a threshold.
    #[must_use]
    pub fn hysteresis(&self) -> f64 {
        self.hysteresis
    }

    /// Level for `zoom` ignoring hysteresis.
    #[must_use]
    pub fn classify(&self, zoom: f64) -> ZoomLevel {
        if zoom < self.overview_below {
            ZoomLevel::Overview
        } else if zoom > self.detail_above {
            ZoomLevel::Detail
        } else {
            ZoomLevel::Normal
        }
    }

    /// Whether to move from `current` to `target` at `zoom`.
    ///
    /// Adjacent moves need the zoom to clear `threshold ± hysteresis`;
    /// skipping a level (overview ↔ detail) is always allowed.
    #[must_use]
    pub fn should_transition(&self, current: ZoomLevel, target: ZoomLevel, zoom: f64) -> bool {
        match (current, target) {
            (ZoomLevel::Normal, ZoomLevel::Overview) => {
                zoom < self.overview_below - self.hysteresis
            }
            (ZoomLevel::Overview, ZoomLevel::Normal) => {
                zoom > self.overview_below + self.hysteresis
            }
            (ZoomLevel::Normal, ZoomLevel::Detail) => zoom > self.detail_above + self.hysteresis,
            (ZoomLevel::Detail, ZoomLevel::Normal) => zoom < self.detail_above - self.hysteresis,
            (ZoomLevel::Overview, ZoomLevel::Detail) | (ZoomLevel::Detail, ZoomLevel::Overview) => {
                true
            }
            _ => false,
        }
    }

    /// Next level after observing `zoom` while at `current`.
    #[must_use]
    pub fn next_level(&self, current: ZoomLevel, zoom: f64) -> ZoomLevel {
        let target = self.classify(zoom);
        if self.should_transition(current, target, zoom) {
            target
        } else {
            current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ZoomLevel, ZoomThresholds};

    #[test]
    fn hysteresis_delays_adjacent_transitions() {
        let t = ZoomThresholds::new(0.3, 2.0, 0.05).unwrap();
        let mut level = t.next_level(ZoomLevel::Normal, 0.35);
        assert_eq!(level, ZoomLevel::Normal);

        // Walk down from 0.35 to 0.24 in small steps.
        let mut flipped_at = None;
        let mut zoom: f64 = 0.35;
        while zoom > 0.24 {
            zoom -= 0.01;
            let next = t.next_level(level, zoom);
            if next != level && flipped_at.is_none() {
                flipped_at = Some(zoom);
            }
            level = next;
            if (zoom - 0.29).abs() < 1e-9 {
                assert_eq!(level, ZoomLevel::Normal);
            }
        }
        assert_eq!(level, ZoomLevel::Overview);
        assert!(flipped_at.unwrap() < 0.25);

        // Coming back up must clear 0.35 before returning to normal.
        assert_eq!(t.next_level(ZoomLevel::Overview, 0.33), ZoomLevel::Overview);
        assert_eq!(t.next_level(ZoomLevel::Overview, 0.36), ZoomLevel::Normal);
    }

    #[test]
    fn skipping_a_level_is_always_allowed() {
        let t = ZoomThresholds::default();
        assert!(t.should_transition(ZoomLevel::Overview, ZoomLevel::Detail, 2.01));
        assert_eq!(t.next_level(ZoomLevel::Detail, 0.29), ZoomLevel::Overview);
    }

    #[test]
    fn overlapping_bands_are_rejected() {
        assert!(ZoomThresholds::new(1.0, 1.05, 0.05).is_err());
        assert!(ZoomThresholds::new(0.3, 2.0, -0.1).is_err());
        assert!(ZoomThresholds::new(0.0, 2.0, 0.0).is_err());
    }
}
