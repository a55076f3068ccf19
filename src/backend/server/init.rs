/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Open the database pool and run migrations
 * 2. Build the comment store, rate limiter and session keys
 * 3. Create and configure the router
 * 4. Start the periodic rate limiter cleanup task
 */

use axum::Router;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

use crate::backend::auth::SessionKeys;
use crate::backend::comments::CommentStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::{FixedWindowRateLimiter, RateLimiter};
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::state::AppState;

/// How often expired rate limit windows are pruned
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing XFSocial backend server");

    let db_pool = load_database(&config.database_url).await?;
    let rate_limiter = Arc::new(FixedWindowRateLimiter::new(
        config.rate_limit_max_requests,
        config.rate_limit_window,
    ));

    let app_state = build_state(db_pool, &config, rate_limiter.clone());
    let app = create_router(app_state);

    // Start periodic cleanup task for rate limit windows
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter.cleanup();
        }
    });

    tracing::info!("Router configured with periodic cleanup task");
    Ok(app)
}

/// Assemble the application state over an open pool
///
/// Used by `create_app` and by tests that bring their own database and
/// rate limiter.
pub fn build_state(db_pool: SqlitePool, config: &ServerConfig, rate_limiter: Arc<dyn RateLimiter>) -> AppState {
    let comments = CommentStore::new(db_pool.clone(), config.engine.clone());
    let session_keys = SessionKeys::from_secret(&config.jwt_secret);
    AppState::new(db_pool, comments, rate_limiter, session_keys)
}
