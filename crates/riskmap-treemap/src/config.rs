//! Treemap configuration loaded from YAML.

use crate::error::ConfigError;
use crate::tile::TileStrategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level view configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreemapConfig {
    /// Chart title painted above the breadcrumb
    #[serde(default = "default_title")]
    pub title: String,
    /// Visible tiers below the current root (`None` = unbounded)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Geometry options
    #[serde(default)]
    pub layout: LayoutOptions,
}

fn default_title() -> String {
    "Vehicle Incident".to_string()
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            max_depth: None,
            layout: LayoutOptions::default(),
        }
    }
}

impl TreemapConfig {
    /// Parse and validate a config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Set the depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Check that the options describe a drawable layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.validate()
    }
}

/// Padding, rounding and viewport options for a layout pass.
///
/// Paddings are in raster units. `padding_top` is the band reserved for a
/// parent's own label; the other three sides use `padding_outer`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Left, right and bottom padding inside a parent
    pub padding_outer: f64,
    /// Top padding inside a parent (label band)
    pub padding_top: f64,
    /// Gutter between siblings
    pub padding_inner: f64,
    /// Snap edges to whole units
    pub round: bool,
    /// Height of the title/breadcrumb band above the map
    pub header_height: f64,
    /// Smallest accepted viewport extent on either axis
    pub min_viewport: f64,
    /// Tiling algorithm
    pub tile: TileStrategy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            padding_outer: 3.0,
            padding_top: 19.0,
            padding_inner: 1.0,
            round: true,
            header_height: 45.0,
            min_viewport: 100.0,
            tile: TileStrategy::Squarify,
        }
    }
}

impl LayoutOptions {
    /// Reject negative or non-finite paddings and a non-positive minimum
    /// viewport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("padding_outer", self.padding_outer),
            ("padding_top", self.padding_top),
            ("padding_inner", self.padding_inner),
            ("header_height", self.header_height),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be finite and non-negative, got {value}"),
                ));
            }
        }
        if !self.min_viewport.is_finite() || self.min_viewport <= 0.0 {
            return Err(ConfigError::invalid(
                "min_viewport",
                format!("must be positive, got {}", self.min_viewport),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreemapConfig::default();
        assert_eq!(config.title, "Vehicle Incident");
        assert_eq!(config.max_depth, None);
        assert_eq!(config.layout.padding_top, 19.0);
        assert_eq!(config.layout.padding_outer, 3.0);
        assert_eq!(config.layout.padding_inner, 1.0);
        assert!(config.layout.round);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = TreemapConfig::from_yaml("max_depth: 3\nlayout:\n  round: false\n").unwrap();
        assert_eq!(config.max_depth, Some(3));
        assert_eq!(config.title, "Vehicle Incident");
        assert!(!config.layout.round);
        assert_eq!(config.layout.header_height, 45.0);
    }

    #[test]
    fn test_from_yaml_tile_strategy() {
        let config = TreemapConfig::from_yaml("layout:\n  tile: slice-dice\n").unwrap();
        assert_eq!(config.layout.tile, TileStrategy::SliceDice);
    }

    #[test]
    fn test_rejects_zero_min_viewport() {
        let err = TreemapConfig::from_yaml("layout:\n  min_viewport: 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_viewport",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_negative_padding() {
        let err = TreemapConfig::from_yaml("layout:\n  padding_inner: -1\n").unwrap_err();
        assert!(err.to_string().contains("padding_inner"));
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(matches!(
            TreemapConfig::from_yaml("max_depth: [oops"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            TreemapConfig::from_yaml_file("/nonexistent/riskmap.yaml"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_builders() {
        let config = TreemapConfig::default().with_max_depth(2).with_title("Ops");
        assert_eq!(config.max_depth, Some(2));
        assert_eq!(config.title, "Ops");
    }
}
