//! Error types for assisted tagging
//!
//! The recommendation path itself never fails: empty input, unmatched
//! mappings and ambiguous choices are all reported as data. Errors only
//! arise while setting up a [`Recommender`](crate::Recommender) from
//! configuration or a custom builder registry.

use deep_framework::WidgetType;

/// Main assisted tagging error type
#[derive(Debug, thiserror::Error)]
pub enum AssistError {
    /// Builder registry is inconsistent
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Builder registry errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A mapping-supported widget type has no builder
    #[error("no attribute builder registered for {0}")]
    MissingBuilder(WidgetType),

    /// A builder targets a widget type that cannot be mapped
    #[error("widget type {0} does not support prediction mappings")]
    UnsupportedType(WidgetType),
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}
