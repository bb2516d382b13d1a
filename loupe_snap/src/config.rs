// Copyright 2025 the Loupe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping configuration.

use crate::error::ConfigError;

/// Default snap distance in view pixels.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 8.0;
/// Default extension of guide lines past the aligned rectangles, in world units.
pub const DEFAULT_GUIDE_MARGIN: f64 = 20.0;

/// What snaps, and how close it has to be.
///
/// The threshold is measured in view pixels and converted to world units at
/// the zoom passed to each call, so snapping feels the same at every zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapConfig {
    threshold: f64,
    snap_to_edges: bool,
    snap_to_centers: bool,
    grid_size: Option<f64>,
    guide_margin: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SNAP_THRESHOLD,
            snap_to_edges: true,
            snap_to_centers: true,
            grid_size: None,
            guide_margin: DEFAULT_GUIDE_MARGIN,
        }
    }
}

impl SnapConfig {
    /// Starts a builder initialized with the default values.
    #[must_use]
    pub fn builder() -> SnapConfigBuilder {
        SnapConfigBuilder::default()
    }

    /// Returns a builder holding this config's values.
    #[must_use]
    pub fn to_builder(&self) -> SnapConfigBuilder {
        SnapConfigBuilder {
            threshold: self.threshold,
            snap_to_edges: self.snap_to_edges,
            snap_to_centers: self.snap_to_centers,
            grid_size: self.grid_size,
            guide_margin: self.guide_margin,
        }
    }

    /// Snap distance in view pixels.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether edges align with edges.
    #[must_use]
    pub fn snap_to_edges(&self) -> bool {
        self.snap_to_edges
    }

    /// Whether centers align with centers.
    #[must_use]
    pub fn snap_to_centers(&self) -> bool {
        self.snap_to_centers
    }

    /// World grid spacing used when no object snap applies.
    #[must_use]
    pub fn grid_size(&self) -> Option<f64> {
        self.grid_size
    }

    /// Extension of guide lines past the aligned rectangles, in world units.
    #[must_use]
    pub fn guide_margin(&self) -> f64 {
        self.guide_margin
    }
}

/// Builder for [`SnapConfig`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct SnapConfigBuilder {
    threshold: f64,
    snap_to_edges: bool,
    snap_to_centers: bool,
    grid_size: Option<f64>,
    guide_margin: f64,
}

impl Default for SnapConfigBuilder {
    fn default() -> Self {
        SnapConfig::default().to_builder()
    }
}

impl SnapConfigBuilder {
    /// Sets the snap distance in view pixels.
    #[must_use]
    pub fn threshold(mut self, pixels: f64) -> Self {
        self.threshold = pixels;
        self
    }

    /// Enables or disables edge alignment.
    #[must_use]
    pub fn snap_to_edges(mut self, enable: bool) -> Self {
        self.snap_to_edges = enable;
        self
    }

    /// Enables or disables center alignment.
    #[must_use]
    pub fn snap_to_centers(mut self, enable: bool) -> Self {
        self.snap_to_centers = enable;
        self
    }

    /// Sets or clears the grid spacing.
    #[must_use]
    pub fn grid_size(mut self, size: Option<f64>) -> Self {
        self.grid_size = size;
        self
    }

    /// Sets the guide margin in world units.
    #[must_use]
    pub fn guide_margin(mut self, margin: f64) -> Self {
        self.guide_margin = margin;
        self
    }

    /// Validates the values and produces a [`SnapConfig`].
    pub fn build(self) -> Result<SnapConfig, ConfigError> {
        if !(self.threshold.is_finite() && self.threshold > 0.0) {
            return Err(ConfigError::NonPositiveThreshold(self.threshold));
        }
        if let Some(grid) = self.grid_size {
            if !(grid.is_finite() && grid > 0.0) {
                return Err(ConfigError::NonPositiveGridSize(grid));
            }
        }
        if !(self.guide_margin.is_finite() && self.guide_margin >= 0.0) {
            return Err(ConfigError::NegativeGuideMargin(self.guide_margin));
        }
        Ok(SnapConfig {
            threshold: self.threshold,
            snap_to_edges: self.snap_to_edges,
            snap_to_centers: self.snap_to_centers,
            grid_size: self.grid_size,
            guide_margin: self.guide_margin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::SnapConfig;
    use crate::error::ConfigError;

    #[test]
    fn defaults() {
        let c = SnapConfig::default();
        assert_eq!(c.threshold(), 8.0);
        assert!(c.snap_to_edges() && c.snap_to_centers());
        assert_eq!(c.grid_size(), None);
        assert_eq!(c.guide_margin(), 20.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            SnapConfig::builder().threshold(0.0).build(),
            Err(ConfigError::NonPositiveThreshold(0.0))
        );
        assert_eq!(
            SnapConfig::builder().grid_size(Some(-10.0)).build(),
            Err(ConfigError::NonPositiveGridSize(-10.0))
        );
        assert_eq!(
            SnapConfig::builder().guide_margin(-1.0).build(),
            Err(ConfigError::NegativeGuideMargin(-1.0))
        );
        assert!(SnapConfig::builder().guide_margin(0.0).build().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn builder_deserializes_with_defaults() {
        let builder: super::SnapConfigBuilder =
            serde_json::from_str(r#"{ "grid_size": 10.0, "snap_to_centers": false }"#).unwrap();
        let config = builder.build().unwrap();
        assert_eq!(config.grid_size(), Some(10.0));
        assert!(!config.snap_to_centers());
        assert_eq!(config.threshold(), 8.0);
    }
}
