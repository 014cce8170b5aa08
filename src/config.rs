//! Loader configuration.
//!
//! Controls how a whitespace-separated coordinate stream is turned into
//! points. Serializable so it can live next to the data it describes.

use crate::error::{PointSetError, Result};
use serde::{Deserialize, Serialize};

/// Settings for reading point streams.
///
/// # Example
///
/// ```rust
/// use kdtree2d::Config;
///
/// let config = Config::default();
/// assert!(config.strict_pairs);
///
/// let json = r#"{ "strict_pairs": false, "max_points": 1000 }"#;
/// let config = Config::from_json(json)?;
/// assert_eq!(config.max_points, Some(1000));
/// assert!(!config.skip_non_finite);
/// # Ok::<(), kdtree2d::PointSetError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Treat an unpaired trailing coordinate as a parse error. When false it
    /// is dropped with a warning.
    #[serde(default = "Config::default_strict_pairs")]
    pub strict_pairs: bool,

    /// Skip pairs with a NaN or infinite coordinate instead of failing.
    #[serde(default)]
    pub skip_non_finite: bool,

    /// Stop reading after this many points.
    #[serde(default)]
    pub max_points: Option<usize>,
}

impl Config {
    const fn default_strict_pairs() -> bool {
        true
    }

    pub fn with_strict_pairs(mut self, strict: bool) -> Self {
        self.strict_pairs = strict;
        self
    }

    pub fn with_skip_non_finite(mut self, skip: bool) -> Self {
        self.skip_non_finite = skip;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = Some(max_points);
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_points == Some(0) {
            return Err(PointSetError::InvalidConfig(
                "max_points must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| PointSetError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| PointSetError::InvalidConfig(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_pairs: Self::default_strict_pairs(),
            skip_non_finite: false,
            max_points: None,
        }
    }
}
