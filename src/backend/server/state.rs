/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite pool
 * - The comment store (which owns a clone of the pool and the engine config)
 * - The mutation rate limiter
 * - The session keys used by the `AuthUser` extractor
 *
 * Every field is cheap to clone: the pool and limiter are reference counted.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::SessionKeys;
use crate::backend::comments::CommentStore;
use crate::backend::middleware::RateLimiter;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,

    /// Comment threading engine
    pub comments: CommentStore,

    /// Checked before every mutating request
    pub rate_limiter: Arc<dyn RateLimiter>,

    /// Bearer token verification
    pub session_keys: SessionKeys,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, comments: CommentStore, rate_limiter: Arc<dyn RateLimiter>, session_keys: SessionKeys) -> Self {
        Self {
            db_pool,
            comments,
            rate_limiter,
            session_keys,
        }
    }
}

/// Implement FromRef for SqlitePool
///
/// This allows Axum handlers to extract the database pool
/// directly from `AppState`.
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Implement FromRef for CommentStore
impl FromRef<AppState> for CommentStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.comments.clone()
    }
}

/// Implement FromRef for the rate limiter
impl FromRef<AppState> for Arc<dyn RateLimiter> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rate_limiter.clone()
    }
}
