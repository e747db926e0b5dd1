//! Animation error types

use thiserror::Error;

/// Errors raised while building bindings, timelines and triggers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// Easing name not recognised
    #[error("Unknown easing: {0}")]
    UnknownEasing(String),

    /// Trigger start/end position could not be parsed
    #[error("Invalid trigger position `{input}`: {reason}")]
    InvalidPosition { input: String, reason: String },

    /// Property value could not be parsed
    #[error("Invalid value `{0}`: expected a number or a percentage")]
    InvalidValue(String),

    /// Timeline position could not be parsed
    #[error("Invalid timeline position: {0}")]
    InvalidTimelinePosition(String),

    /// Visual tree lookup failed
    #[error(transparent)]
    Dom(#[from] scrollfx_core::DomError),
}

/// Result type for animation operations
pub type Result<T> = std::result::Result<T, AnimationError>;
