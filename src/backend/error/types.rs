/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server,
 * following the mutation error taxonomy: validation failures surface
 * before any write is attempted, not-found failures surface with no
 * broadcast emitted, and state failures abort the mutation entirely.
 * Transport failures never appear here; they are isolated per connection
 * inside the realtime layer.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// Each variant maps to an HTTP response; a mutation returning any of
/// these has not committed and therefore must not have broadcast.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Missing or malformed input; the mutation was not attempted
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Entity absent at mutation time; no broadcast emitted
    #[error("{entity} not found")]
    NotFound {
        /// Kind of entity that was missing, e.g. "board" or "card"
        entity: String,
    },

    /// Caller is not a member of the board it addressed
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// State management error (e.g. an inconsistency in the store)
    #[error("State error: {message}")]
    State {
        /// Human-readable error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::State { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
