//! Error types and handling for Calor
//!
//! This module defines the error types used throughout the application,
//! providing consistent error handling and reporting. Fatal errors abort
//! the current invocation; degradable sources (the cloud sensor) map their
//! failures to "no data" at the call site instead of surfacing here.

use thiserror::Error;

/// Result type alias for Calor operations
pub type Result<T> = std::result::Result<T, CalorError>;

/// Main error type for Calor
#[derive(Debug, Error)]
pub enum CalorError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Heat-pump controller communication errors
    #[error("Controller error: {message}")]
    Controller { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// File I/O errors
    #[error("I/O error: {message}")]
    Io { message: String },

    /// Network-related errors
    #[error("Network error: {message}")]
    Network { message: String },

    /// External API errors (spot prices, remote tuning, sensor cloud)
    #[error("API error: {message}")]
    Api { message: String },

    /// Authentication/authorization errors
    #[error("Authentication error: {message}")]
    Auth { message: String },

    /// Validation errors
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Cache store errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Generic errors with context
    #[error("Error: {message}")]
    Generic { message: String },
}

impl CalorError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        CalorError::Config {
            message: message.into(),
        }
    }

    /// Create a new controller error
    pub fn controller<S: Into<String>>(message: S) -> Self {
        CalorError::Controller {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        CalorError::Network {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        CalorError::Api {
            message: message.into(),
        }
    }

    /// Create a new auth error
    pub fn auth<S: Into<String>>(message: S) -> Self {
        CalorError::Auth {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        CalorError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        CalorError::Io {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        CalorError::Cache {
            message: message.into(),
        }
    }

    /// Create a new generic error
    pub fn generic<S: Into<String>>(message: S) -> Self {
        CalorError::Generic {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CalorError {
    fn from(err: std::io::Error) -> Self {
        CalorError::io(err.to_string())
    }
}

impl From<serde_yaml::Error> for CalorError {
    fn from(err: serde_yaml::Error) -> Self {
        CalorError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CalorError {
    fn from(err: serde_json::Error) -> Self {
        CalorError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for CalorError {
    fn from(err: reqwest::Error) -> Self {
        CalorError::network(err.to_string())
    }
}

impl From<chrono::ParseError> for CalorError {
    fn from(err: chrono::ParseError) -> Self {
        CalorError::validation("datetime", &err.to_string())
    }
}
