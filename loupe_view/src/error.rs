// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// Error returned when a configuration value object would violate its invariants.
///
/// Configuration is validated once, at construction time. Everything that
/// happens afterwards (per-event and per-frame operations) absorbs bad input
/// silently instead of failing.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// `min_zoom` must be finite and strictly positive.
    #[error("minimum zoom must be finite and positive, got {0}")]
    NonPositiveMinZoom(f64),
    /// `max_zoom` must be finite and not smaller than `min_zoom`.
    #[error("maximum zoom {max} must be finite and at least the minimum zoom {min}")]
    InvertedZoomRange {
        /// Requested minimum zoom.
        min: f64,
        /// Requested maximum zoom.
        max: f64,
    },
    /// Pan bounds must be finite with a non-negative extent.
    #[error("pan bounds {0:?} must be finite with non-negative width and height")]
    InvalidPanBounds(Rect),
    /// A sensitivity multiplier was not finite and positive.
    #[error("{name} must be finite and positive, got {value}")]
    NonPositiveSensitivity {
        /// Which sensitivity was rejected.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Friction is the per-second velocity retention and must lie in `(0, 1)`.
    #[error("friction must lie strictly between 0 and 1, got {0}")]
    FrictionOutOfRange(f64),
    /// `min_velocity` must be finite and `>= 0`, and `max_velocity` strictly greater.
    #[error("velocity range [{min}, {max}] is invalid: need 0 <= min < max")]
    InvalidVelocityRange {
        /// Requested minimum glide velocity.
        min: f64,
        /// Requested maximum glide velocity.
        max: f64,
    },
    /// Zoom level thresholds and their hysteresis bands overlap or are not finite.
    #[error(
        "zoom thresholds overview<{overview_below}, detail>{detail_above} with hysteresis {hysteresis} overlap"
    )]
    InvalidZoomThresholds {
        /// Zoom below which the overview level applies.
        overview_below: f64,
        /// Zoom above which the detail level applies.
        detail_above: f64,
        /// Dead band around each threshold.
        hysteresis: f64,
    },
}
