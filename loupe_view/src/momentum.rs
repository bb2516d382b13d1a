// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Momentum policy: sensitivities and glide velocity rules.

use kurbo::Vec2;

use crate::error::ConfigError;

/// Velocities at or below this magnitude carry no usable direction.
pub const NEGLIGIBLE_VELOCITY: f64 = 0.001;

/// Default per‑second velocity retention of a glide.
pub const DEFAULT_FRICTION: f64 = 0.135;
/// Default floor for the initial glide speed, in view pixels per second.
pub const DEFAULT_MIN_VELOCITY: f64 = 50.0;
/// Default ceiling for the initial glide speed, in view pixels per second.
pub const DEFAULT_MAX_VELOCITY: f64 = 8_000.0;

/// Sensitivities and post‑release glide parameters.
///
/// Invariants: both sensitivities finite and positive, `friction` in `(0, 1)`,
/// `0 <= min_velocity < max_velocity`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MomentumConfig {
    pan_sensitivity: f64,
    scroll_sensitivity: f64,
    enable_momentum: bool,
    friction: f64,
    min_velocity: f64,
    max_velocity: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            pan_sensitivity: 1.0,
            scroll_sensitivity: 1.0,
            enable_momentum: true,
            friction: DEFAULT_FRICTION,
            min_velocity: DEFAULT_MIN_VELOCITY,
            max_velocity: DEFAULT_MAX_VELOCITY,
        }
    }
}

impl MomentumConfig {
    /// Starts a builder initialized with the default values.
    #[must_use]
    pub fn builder() -> MomentumConfigBuilder {
        MomentumConfigBuilder::default()
    }

    /// Returns a builder holding this config's values.
    #[must_use]
    pub fn to_builder(&self) -> MomentumConfigBuilder {
        MomentumConfigBuilder {
            pan_sensitivity: self.pan_sensitivity,
            scroll_sensitivity: self.scroll_sensitivity,
            enable_momentum: self.enable_momentum,
            friction: self.friction,
            min_velocity: self.min_velocity,
            max_velocity: self.max_velocity,
        }
    }

    /// Multiplier applied to trackpad pan deltas.
    #[must_use]
    pub fn pan_sensitivity(&self) -> f64 {
        self.pan_sensitivity
    }

    /// Multiplier applied to discrete scroll deltas.
    #[must_use]
    pub fn scroll_sensitivity(&self) -> f64 {
        self.scroll_sensitivity
    }

    /// Whether a glide may start after a gesture is released.
    #[must_use]
    pub fn enable_momentum(&self) -> bool {
        self.enable_momentum
    }

    /// Fraction of glide velocity retained after one second.
    #[must_use]
    pub fn friction(&self) -> f64 {
        self.friction
    }

    /// Floor for the initial glide speed.
    #[must_use]
    pub fn min_velocity(&self) -> f64 {
        self.min_velocity
    }

    /// Ceiling for the initial glide speed.
    #[must_use]
    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    /// Computes the initial glide velocity from a raw release velocity.
    ///
    /// - `|v| >= min_velocity`: `v`, shortened to `max_velocity` if needed.
    /// - Otherwise, if `v` or `fallback` has a usable direction: exactly
    ///   `min_velocity` along it, preferring `v`.
    /// - Otherwise zero, meaning no glide is possible.
    #[must_use]
    pub fn apply_velocity_floor(&self, velocity: Vec2, fallback: Vec2) -> Vec2 {
        let velocity = finite_or_zero(velocity);
        let fallback = finite_or_zero(fallback);
        let speed = velocity.hypot();
        if speed >= self.min_velocity && speed > NEGLIGIBLE_VELOCITY {
            if speed > self.max_velocity {
                return velocity * (self.max_velocity / speed);
            }
            return velocity;
        }
        if speed > NEGLIGIBLE_VELOCITY {
            return velocity * (self.min_velocity / speed);
        }
        let fallback_speed = fallback.hypot();
        if fallback_speed > NEGLIGIBLE_VELOCITY {
            return fallback * (self.min_velocity / fallback_speed);
        }
        Vec2::ZERO
    }

    /// Decides whether a glide should start after a gesture ends.
    ///
    /// A gesture that moved at all (`had_pan`) qualifies even when its final
    /// velocity reads near zero: trackpads usually finish with decelerating
    /// frames that cancel the instantaneous velocity.
    #[must_use]
    pub fn should_apply_momentum(&self, velocity: Vec2, had_pan: bool) -> bool {
        if !self.enable_momentum {
            return false;
        }
        had_pan || finite_or_zero(velocity).hypot() > NEGLIGIBLE_VELOCITY
    }
}

fn finite_or_zero(v: Vec2) -> Vec2 {
    if v.x.is_finite() && v.y.is_finite() {
        v
    } else {
        Vec2::ZERO
    }
}

/// Builder for [`MomentumConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MomentumConfigBuilder {
    pan_sensitivity: f64,
    scroll_sensitivity: f64,
    enable_momentum: bool,
    friction: f64,
    min_velocity: f64,
    max_velocity: f64,
}

impl Default for MomentumConfigBuilder {
    fn default() -> Self {
        MomentumConfig::default().to_builder()
    }
}

impl MomentumConfigBuilder {
    /// Sets the trackpad pan multiplier.
    #[must_use]
    pub fn pan_sensitivity(mut self, value: f64) -> Self {
        self.pan_sensitivity = value;
        self
    }

    /// Sets the discrete scroll multiplier.
    #[must_use]
    pub fn scroll_sensitivity(mut self, value: f64) -> Self {
        self.scroll_sensitivity = value;
        self
    }

    /// Enables or disables post‑release glides.
    #[must_use]
    pub fn enable_momentum(mut self, enable: bool) -> Self {
        self.enable_momentum = enable;
        self
    }

    /// Sets the per‑second velocity retention.
    #[must_use]
    pub fn friction(mut self, friction: f64) -> Self {
        self.friction = friction;
        self
    }

    /// Sets the initial glide speed floor.
    #[must_use]
    pub fn min_velocity(mut self, value: f64) -> Self {
        self.min_velocity = value;
        self
    }

    /// Sets the initial glide speed ceiling.
    #[must_use]
    pub fn max_velocity(mut self, value: f64) -> Self {
        self.max_velocity = value;
        self
    }

    /// Validates the values and produces a [`MomentumConfig`].
    pub fn build(self) -> Result<MomentumConfig, ConfigError> {
        for (name, value) in [
            ("pan sensitivity", self.pan_sensitivity),
            ("scroll sensitivity", self.scroll_sensitivity),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositiveSensitivity { name, value });
            }
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(ConfigError::FrictionOutOfRange(self.friction));
        }
        let velocities_ok = self.min_velocity.is_finite()
            && self.max_velocity.is_finite()
            && self.min_velocity >= 0.0
            && self.max_velocity > self.min_velocity;
        if !velocities_ok {
            return Err(ConfigError::InvalidVelocityRange {
                min: self.min_velocity,
                max: self.max_velocity,
            });
        }
        Ok(MomentumConfig {
            pan_sensitivity: self.pan_sensitivity,
            scroll_sensitivity: self.scroll_sensitivity,
            enable_momentum: self.enable_momentum,
            friction: self.friction,
            min_velocity: self.min_velocity,
            max_velocity: self.max_velocity,
        })
    }
}
