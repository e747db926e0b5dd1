//! Core error types

use thiserror::Error;

/// Visual tree errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomError {
    /// Selector text could not be parsed
    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// Property name is not animatable
    #[error("Unknown property: {0}")]
    UnknownProperty(String),
}

/// Result type for visual tree operations
pub type Result<T> = std::result::Result<T, DomError>;
