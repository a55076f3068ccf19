//! XFSocial - Comment Threading Engine
//!
//! XFSocial is the backend for a social-content platform. This library holds
//! the subsystem with real engineering depth: threaded comments on posts,
//! stored as a materialized-path tree.
//!
//! # Overview
//!
//! This library provides:
//! - Collision-free sibling position allocation under concurrent writers
//! - Materialized path encoding (`0001.0007.0002`) for range-scan pagination
//! - Denormalized like/reply/comment counters, floored at zero
//! - Depth-bounded, cursor-stable pagination
//! - Bounded-batch cascading deletion of comment subtrees
//!
//! # Module Structure
//!
//! - **`shared`** - Types shared between clients and the backend
//!   - Comment and post wire types
//!   - Path encoding and content validation
//!   - Error and configuration types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server and routes
//!   - Comment store, sequence allocator, counter maintenance
//!   - Pagination engine and cascade deletion
//!   - JWT identity resolution and rate limiting
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - Enables the backend modules and the server binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use xfsocial::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! Handlers share an `AppState` that is cheap to clone: the SQLite pool is
//! internally reference counted and the rate limiter sits behind an `Arc`.
//! No application-level locks guard comment data; write serialization comes
//! from the store.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
