//! Structured error types for API responses.

use crate::messages::error as msg;
use thiserror::Error;

/// Failure of a single API operation.
///
/// Validation and not-found errors are raised by handlers before the store is
/// touched. Store errors carry the underlying cause for logging; only the
/// generic `message` ever reaches the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client sent something unusable (HTTP 400).
    #[error("{0}")]
    Validation(&'static str),

    /// No task matched the requested id (HTTP 404).
    #[error("{}", msg::NOT_FOUND)]
    NotFound,

    /// The store failed while serving the request (HTTP 500).
    #[error("{message}")]
    Store {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn title_required() -> Self {
        Self::Validation(msg::TITLE_REQUIRED)
    }

    pub fn invalid_description() -> Self {
        Self::Validation(msg::INVALID_DESCRIPTION)
    }

    pub fn invalid_id() -> Self {
        Self::Validation(msg::INVALID_ID)
    }

    /// Wrap a store failure behind a generic per-operation message.
    pub fn store(message: &'static str, err: impl Into<anyhow::Error>) -> Self {
        Self::Store {
            message,
            source: err.into(),
        }
    }

    /// Message safe to show to clients.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(message) => *message,
            Self::NotFound => msg::NOT_FOUND,
            Self::Store { message, .. } => *message,
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
