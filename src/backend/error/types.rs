/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are returned by the comment store and the HTTP handlers and
 * can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Caller Errors
 *
 * - `NotFound` - Post, parent or comment missing
 * - `SharedError` - Validation failures (empty content, bad URL, bad cursor)
 * - `AuthError` - No resolvable identity on the request
 * - `PermissionDenied` - Caller is not allowed to mutate the resource
 * - `RateLimited` - Caller exceeded the mutation budget
 * - `CapacityExceeded` - A parent already has the maximum number of children
 *
 * ## Store Errors
 *
 * - `DatabaseError` - Any sqlx failure; logged, message redacted on the wire
 * - `MigrationError` - Schema migration failure at startup
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::comments::PathError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use xfsocial::backend::error::BackendError;
///
/// let err = BackendError::not_found("comment", uuid::Uuid::nil());
/// assert_eq!(err.code(), "NOT_FOUND");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A referenced resource does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of resource, e.g. `post`
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Shared validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// No identity could be resolved for the caller
    #[error("Authentication required: {message}")]
    AuthError {
        /// Human-readable error message
        message: String,
    },

    /// The caller is authenticated but not allowed to do this
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Human-readable error message
        message: String,
    },

    /// The caller exceeded the mutation rate budget
    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited {
        /// Seconds until the current window resets
        retry_after_secs: u64,
    },

    /// A parent ran out of sibling positions
    #[error("Capacity exceeded: {message}")]
    CapacityExceeded {
        /// Human-readable error message
        message: String,
    },

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl BackendError {
    /// Create a not-found error for a resource kind and id
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    /// Create a new authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::AuthError {
            message: message.into(),
        }
    }

    /// Create a new permission error
    pub fn permission(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SharedError(SharedError::validation(field, message))
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound` - 404 Not Found
    /// - `SharedError` - 400 Bad Request
    /// - `AuthError` - 401 Unauthorized
    /// - `PermissionDenied` - 403 Forbidden
    /// - `RateLimited` - 429 Too Many Requests
    /// - `CapacityExceeded` - 409 Conflict
    /// - `DatabaseError`, `MigrationError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::AuthError { .. } => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied { .. } => StatusCode::FORBIDDEN,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::CapacityExceeded { .. } => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::MigrationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::SharedError(_) => "VALIDATION",
            Self::AuthError { .. } => "AUTH",
            Self::PermissionDenied { .. } => "PERMISSION",
            Self::RateLimited { .. } => "RATE_LIMITED",
            Self::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            Self::DatabaseError(_) | Self::MigrationError(_) => "INTERNAL",
        }
    }

    /// Get the error message shown to clients
    ///
    /// Store errors are not echoed back; they are logged by the response
    /// conversion instead.
    pub fn message(&self) -> String {
        match self {
            Self::DatabaseError(_) | Self::MigrationError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }

    /// True for transient write-lock contention that is safe to retry
    pub fn is_store_busy(&self) -> bool {
        match self {
            Self::DatabaseError(sqlx::Error::Database(db_err)) => {
                // SQLITE_BUSY, SQLITE_LOCKED and their extended codes
                let busy_code = matches!(
                    db_err.code().as_deref(),
                    Some("5") | Some("6") | Some("261") | Some("517")
                );
                busy_code || db_err.message().contains("database is locked")
            }
            Self::DatabaseError(sqlx::Error::PoolTimedOut) => true,
            _ => false,
        }
    }
}

impl From<PathError> for BackendError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::PositionOutOfRange(_) => Self::CapacityExceeded {
                message: err.to_string(),
            },
            PathError::Malformed(_) => Self::validation("cursor", err.to_string()),
        }
    }
}
