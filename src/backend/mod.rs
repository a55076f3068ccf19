//! Backend Module
//!
//! This module contains all server-side code for XFSocial: the Axum HTTP
//! server and the comment threading engine behind it.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`comments`** - Threading engine: allocation, counters, pagination, cascade
//! - **`posts`** - Minimal post aggregate owning comment threads
//! - **`auth`** - JWT verification
//! - **`middleware`** - `AuthUser` extractor and rate limiting
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── comments/       - Comment store and handlers
//! ├── posts/          - Post rows and handlers
//! ├── auth/           - Session tokens
//! ├── middleware/     - Request extractors and rate limiting
//! └── error/          - Error types
//! ```
//!
//! # Persistence
//!
//! SQLite through a `sqlx` pool in WAL mode. Every write that allocates a
//! position or moves a parent counter runs in a single transaction, and the
//! transaction is retried as a whole when the write lock is contended.
//!
//! # Error Handling
//!
//! Handlers return `BackendError`, which renders as
//! `{ "error", "code", "status" }` JSON with the matching HTTP status.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Comment threading engine
pub mod comments;

/// Post aggregate
pub mod posts;

/// Backend error types
pub mod error;

/// Identity resolution
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Re-export commonly used types
pub use comments::CommentStore;
pub use error::BackendError;
pub use server::create_app;
