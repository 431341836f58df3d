//! Storage-specific error types for pure data operations.
//!
//! These errors describe persistence failures only. They carry no knowledge of
//! entitlements or filter semantics.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A row with the same key is already stored.
    #[error("Resource already exists: {key}")]
    AlreadyExists { key: String },

    /// Data cannot be stored in its current shape.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Backend is temporarily unreachable.
    #[error("Storage unavailable: {message}")]
    Unavailable { message: String },

    /// Any other backend failure.
    #[error("Internal storage error: {message}")]
    Internal { message: String },
}

impl StorageError {
    pub fn already_exists(key: impl ToString) -> Self {
        Self::AlreadyExists {
            key: key.to_string(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary backend error.
    pub fn internal(error: impl std::fmt::Display) -> Self {
        Self::Internal {
            message: error.to_string(),
        }
    }

    /// Check if retrying the operation might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Unavailable { .. })
    }
}
