//! Page layer error types

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid TOML for a page configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize the configuration
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid configuration value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Counter element configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterConfigError {
    /// The element carries no target attribute
    #[error("Counter has no `{0}` attribute")]
    Missing(String),

    /// The attribute does not start with an integer that fits in `i64`
    #[error("Counter target `{0}` is not a number")]
    NotANumber(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
