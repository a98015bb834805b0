//! Assisted tagging configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Tunables of the recommendation pipeline
///
/// Loadable from TOML; missing keys fall back to [`AssistConfig::default`].
///
/// ```toml
/// geo_suggestion_limit = 3
/// initial_geo_selection = 1
/// auto_match_threshold = 0.7
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    /// Maximum area ids kept in a recommended GEO attribute
    pub geo_suggestion_limit: usize,
    /// Area ids kept when a recommendation is folded into an entry draft
    pub initial_geo_selection: usize,
    /// Minimum label similarity (exclusive) for auto-matching tags
    pub auto_match_threshold: f64,
}

impl AssistConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With GEO suggestion limit
    #[inline]
    #[must_use]
    pub fn with_geo_suggestion_limit(mut self, limit: usize) -> Self {
        self.geo_suggestion_limit = limit;
        self
    }

    /// With initial GEO selection size
    #[inline]
    #[must_use]
    pub fn with_initial_geo_selection(mut self, count: usize) -> Self {
        self.initial_geo_selection = count;
        self
    }

    /// With auto-match threshold
    #[inline]
    #[must_use]
    pub fn with_auto_match_threshold(mut self, threshold: f64) -> Self {
        self.auto_match_threshold = threshold;
        self
    }

    /// Parse and validate configuration from TOML
    ///
    /// # Errors
    /// Returns error on malformed TOML or out-of-range values
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns the first out-of-range field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.geo_suggestion_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "geo_suggestion_limit",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.initial_geo_selection > self.geo_suggestion_limit {
            return Err(ConfigError::InvalidValue {
                field: "initial_geo_selection",
                reason: format!(
                    "{} exceeds geo_suggestion_limit {}",
                    self.initial_geo_selection, self.geo_suggestion_limit
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.auto_match_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "auto_match_threshold",
                reason: format!("{} is outside [0, 1]", self.auto_match_threshold),
            });
        }
        Ok(())
    }
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            geo_suggestion_limit: 3,
            initial_geo_selection: 1,
            auto_match_threshold: 0.7,
        }
    }
}
