/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Health check
 * 2. API routes (posts, comments)
 * 3. Fallback handler (404 in the API error format)
 */

use axum::http::Uri;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the store and services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests, with request tracing
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/health", axum::routing::get(health));

    // Add API routes
    let router = configure_api_routes(router);

    // Fallback handler for 404
    let router = router.fallback(not_found);

    // Use AppState as router state
    router.layer(TraceLayer::new_for_http()).with_state(app_state)
}

async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> BackendError {
    BackendError::not_found("route", uri.path())
}
