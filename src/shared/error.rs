//! Shared Error Types
//!
//! This module defines error types that are shared between the sync client
//! and the store server.
//!
//! # Error Categories
//!
//! - `Serialization` - JSON serialization/deserialization failures
//! - `Validation` - board invariant violations
//! - `Store` - replicated store failures (publication, channel closure)
//!
//! Note that most failure conditions in the sync core are deliberately not
//! errors at all: a malformed remote document degrades to "no data" and a
//! mutation referencing a missing id is a no-op. These variants cover the
//! remaining genuinely exceptional paths.
use thiserror::Error;

/// Shared error types that can occur in both client and server contexts
#[derive(Debug, Error, Clone)]
pub enum BoardError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable error message
        message: String,
    },

    /// Board invariant violation
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Replicated store failure
    #[error("Store error: {message}")]
    Store {
        /// Human-readable error message
        message: String,
    },
}

impl BoardError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}
