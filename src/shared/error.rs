//! Shared Error Types
//!
//! This module defines error types that are shared between the wire types and
//! the backend. These errors represent failures that can be detected without
//! touching the store.
//!
//! # Error Categories
//!
//! - `ValidationError` - Data validation failures (content, cursors, limits,
//!   malformed request bodies and parameters)
//!
//! # Usage
//!
//! ```rust
//! use xfsocial::shared::error::SharedError;
//!
//! // Create a validation error
//! let error = SharedError::validation("text", "Comment text cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both wire handling and the backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("audioRef", "Invalid URL");
        match error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "audioRef");
                assert_eq!(message, "Invalid URL");
            }
        }
    }

    #[test]
    fn test_error_display() {
        let error = SharedError::validation("text", "too long");
        let display = format!("{}", error);
        assert!(display.contains("'text'"));
        assert!(display.contains("too long"));
    }
}
