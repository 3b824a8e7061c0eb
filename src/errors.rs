//! Centralized error handling.
//!
//! Every failure the settings loader can report is a [`ConfigError`].
//! A missing or malformed environment file is not one of them: those
//! fall back to defaults with a log event.

use thiserror::Error;
use validator::ValidationErrors;

/// Settings error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A resolved raw value could not be coerced to the field's type
    #[error("Invalid value for {field}: {value:?} ({reason})")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The record was built but breaks one or more field constraints
    #[error("Settings constraint violation: {0}")]
    Constraints(#[from] ValidationErrors),

    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Access token expiry of {0} minutes cannot be represented")]
    ExpiryOutOfRange(i64),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    /// Get a stable error code for logs and exit reporting
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Validation { .. } => "VALIDATION_ERROR",
            ConfigError::Constraints(_) => "CONSTRAINT_VIOLATION",
            ConfigError::UnsupportedAlgorithm(_) => "UNSUPPORTED_ALGORITHM",
            ConfigError::ExpiryOutOfRange(_) => "EXPIRY_OUT_OF_RANGE",
            ConfigError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience constructors
impl ConfigError {
    pub fn validation(
        field: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::Validation {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn unsupported_algorithm(name: impl Into<String>) -> Self {
        ConfigError::UnsupportedAlgorithm(name.into())
    }
}
