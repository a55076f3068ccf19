//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the HTTP layer, the backend store and any client. These types are used for
//! serialization over the JSON API and carry no storage dependencies.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! in both server and client code. The materialized path encoder and the
//! content validator live here because they are pure functions.

/// Comment threading types, path encoding and validation
pub mod comments;

/// Post data structure
pub mod post;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use comments::{CommentContent, CommentPath, CommentView};
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use post::{CreatePostRequest, PostView};
