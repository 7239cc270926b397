//! Shared Error Types
//!
//! Request validation failures. They are raised by the checks in
//! [`crate::shared::board`] and by the server before anything is stored, and
//! always surface to the client as a 400.
use thiserror::Error;

/// A request field that failed validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Validation error in field '{field}': {message}")]
    ValidationError { field: String, message: String },
}

impl SharedError {
    /// ```rust
    /// use taskboard::shared::SharedError;
    ///
    /// let error = SharedError::validation("title", "must not be empty");
    /// assert_eq!(error.field(), "title");
    /// ```
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending request field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
