/**
 * API Route Handlers
 *
 * This module defines the JSON API for posts and threaded comments.
 *
 * # Routes
 *
 * ## Posts
 * - `POST /api/posts` - Create a post
 * - `GET /api/posts/{post_id}` - Get a post
 * - `GET /api/posts/{post_id}/comments/count` - Live top-level comment count
 *
 * ## Comments
 * - `POST /api/posts/{post_id}/comments` - Create a top-level comment
 * - `GET /api/posts/{post_id}/comments` - List a thread (`cursor`, `limit`, `maxDepth`)
 * - `GET /api/comments/{comment_id}` - Get one comment
 * - `DELETE /api/comments/{comment_id}` - Delete a comment (`cascade`)
 * - `POST /api/comments/{comment_id}/replies` - Reply to a comment
 * - `GET /api/comments/{comment_id}/replies` - List direct replies (`cursor`, `limit`)
 * - `POST /api/comments/{comment_id}/like` - Toggle a like
 */

use axum::routing::{get, post};
use axum::Router;

use crate::backend::comments::handlers::{
    create_comment, delete_comment, get_comment, get_comment_count, list_comments, list_replies,
    reply_to_comment, toggle_comment_like,
};
use crate::backend::posts::handlers::{create_post, get_post};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
///
/// # Authentication
///
/// Every API route requires a JWT in the `Authorization` header; handlers
/// take the `AuthUser` extractor.
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // Post endpoints
        .route("/api/posts", post(create_post))
        .route("/api/posts/{post_id}", get(get_post))
        .route("/api/posts/{post_id}/comments/count", get(get_comment_count))
        // Thread endpoints
        .route(
            "/api/posts/{post_id}/comments",
            post(create_comment).get(list_comments),
        )
        // Single comment endpoints
        .route(
            "/api/comments/{comment_id}",
            get(get_comment).delete(delete_comment),
        )
        .route(
            "/api/comments/{comment_id}/replies",
            post(reply_to_comment).get(list_replies),
        )
        .route("/api/comments/{comment_id}/like", post(toggle_comment_like))
}
