//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used by the comment store and the HTTP handlers and can
//! be converted to HTTP responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Error Kinds
//!
//! | Kind | Status |
//! |---|---|
//! | `NOT_FOUND` | 404 |
//! | `VALIDATION` | 400 |
//! | `AUTH` | 401 |
//! | `PERMISSION` | 403 |
//! | `RATE_LIMITED` | 429 |
//! | `CAPACITY_EXCEEDED` | 409 |
//! | `INTERNAL` | 500 |

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
