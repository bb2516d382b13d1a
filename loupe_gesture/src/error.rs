// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned by [`crate::config::GestureConfigBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The mouse/trackpad drag threshold must be finite and positive.
    #[error("drag threshold must be finite and positive, got {0}")]
    NonPositiveDragThreshold(f64),
    /// An explicit touch/stylus drag threshold must be finite and positive.
    #[error("touch drag threshold must be finite and positive, got {0}")]
    NonPositiveTouchDragThreshold(f64),
}
