//! Error types for the TutorLab application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire TutorLab application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum TutorLabError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A required argument was missing or empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error (empty or malformed static configuration)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model output contained no parseable payload
    #[error("Parse error: {0}")]
    Parse(String),

    /// Model output parsed but failed structural validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// External model call failed or timed out
    #[error("Model service error: {message}")]
    Service { message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl TutorLabError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Service error
    pub fn service(message: impl Into<String>) -> Self {
        Self::Service {
            message: message.into(),
        }
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Service error
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this error is absorbed by the scoring fallback path
    /// (any failure between the model call and a validated report).
    pub fn is_scoring_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Service { .. } | Self::Parse(_) | Self::Validation(_)
        )
    }
}

impl From<std::io::Error> for TutorLabError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, TutorLabError>`.
pub type Result<T> = std::result::Result<T, TutorLabError>;
