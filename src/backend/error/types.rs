/**
 * Backend Error Types
 *
 * Errors produced while serving a request. Each variant knows its HTTP status
 * and the message shown to the client.
 *
 * # Status Mapping
 *
 * | Variant              | Status                     |
 * |----------------------|----------------------------|
 * | `HandlerError`       | carried status             |
 * | `Unauthorized`       | 401                        |
 * | `Forbidden`          | 403                        |
 * | `NotFound`           | 404                        |
 * | `Conflict`           | 409                        |
 * | `SharedError`        | 400                        |
 * | `ReindexError`       | 404 / 409 / 500            |
 * | `DatabaseError`      | 500                        |
 *
 * Storage failures never leak driver messages to the client; they are logged
 * where they happen and reported with a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::reindex::ReindexError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// ```rust
/// use taskboard::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
///
/// let err = BackendError::not_found("Board not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request-level failure with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Authenticated but not allowed to touch the resource
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Board, list, card or user does not exist
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Request collides with existing state (duplicate email, existing member)
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Request field failed validation
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Failure while maintaining sibling positions
    #[error(transparent)]
    ReindexError(#[from] ReindexError),

    /// Query failure outside the reindexer
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl BackendError {
    /// Create a handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::ReindexError(err) => match err {
                ReindexError::NotFound { .. } => StatusCode::NOT_FOUND,
                ReindexError::Conflict { .. } => StatusCode::CONFLICT,
                ReindexError::PartialFailure { .. } | ReindexError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::Conflict { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::ReindexError(err) => match err {
                ReindexError::NotFound { entity, .. } => format!("{} not found", capitalize(entity)),
                ReindexError::Conflict { entity, .. } => {
                    format!("{} was moved by another request, please retry", capitalize(entity))
                }
                ReindexError::PartialFailure { .. } => {
                    "Reordering failed part way through; no changes were applied".to_string()
                }
                ReindexError::Storage(_) => "Database error".to_string(),
            },
            Self::DatabaseError(_) => "Database error".to_string(),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
