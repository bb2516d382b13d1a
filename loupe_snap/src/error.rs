// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Error returned by [`crate::SnapConfigBuilder::build`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The snap threshold must be finite and positive.
    #[error("snap threshold must be finite and positive, got {0}")]
    NonPositiveThreshold(f64),
    /// A grid size, when set, must be finite and positive.
    #[error("grid size must be finite and positive, got {0}")]
    NonPositiveGridSize(f64),
    /// The guide margin must be finite and not negative.
    #[error("guide margin must be finite and non-negative, got {0}")]
    NegativeGuideMargin(f64),
}
