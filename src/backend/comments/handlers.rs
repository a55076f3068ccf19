//! Comment HTTP Handlers
//!
//! Thin adapters from HTTP to the [`CommentStore`]. Every handler requires an
//! authenticated caller; mutating handlers also consult the rate limiter
//! before touching the store.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::store::CommentStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser, RateLimiter};
use crate::shared::comments::{
    CommentPage, CommentView, CreateCommentRequest, DeleteCommentQuery, DeleteCommentResponse,
    ListCommentsQuery, ListRepliesQuery,
};

/// `POST /api/posts/{post_id}/comments`
pub async fn create_comment(
    State(store): State<CommentStore>,
    State(limiter): State<Arc<dyn RateLimiter>>,
    auth: AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), BackendError> {
    limiter.check(auth.user_id())?;
    let comment = store.create(post_id, auth.user_id(), request).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `POST /api/comments/{comment_id}/replies`
pub async fn reply_to_comment(
    State(store): State<CommentStore>,
    State(limiter): State<Arc<dyn RateLimiter>>,
    auth: AuthUser,
    ApiPath(parent_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentView>), BackendError> {
    limiter.check(auth.user_id())?;
    let reply = store.reply(parent_id, auth.user_id(), request).await?;
    Ok((StatusCode::CREATED, Json(reply)))
}

/// `GET /api/posts/{post_id}/comments?cursor&limit&maxDepth`
pub async fn list_comments(
    State(store): State<CommentStore>,
    auth: AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListCommentsQuery>,
) -> Result<Json<CommentPage>, BackendError> {
    let page = store.list_by_post(post_id, auth.user_id(), &query).await?;
    Ok(Json(page))
}

/// `GET /api/comments/{comment_id}/replies?cursor&limit`
pub async fn list_replies(
    State(store): State<CommentStore>,
    auth: AuthUser,
    ApiPath(parent_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListRepliesQuery>,
) -> Result<Json<CommentPage>, BackendError> {
    let page = store.list_replies(parent_id, auth.user_id(), &query).await?;
    Ok(Json(page))
}

/// `GET /api/comments/{comment_id}`
pub async fn get_comment(
    State(store): State<CommentStore>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> Result<Json<CommentView>, BackendError> {
    Ok(Json(store.get(comment_id, auth.user_id()).await?))
}

/// `POST /api/comments/{comment_id}/like`
pub async fn toggle_comment_like(
    State(store): State<CommentStore>,
    State(limiter): State<Arc<dyn RateLimiter>>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
) -> Result<Json<CommentView>, BackendError> {
    limiter.check(auth.user_id())?;
    Ok(Json(store.toggle_like(comment_id, auth.user_id()).await?))
}

/// `DELETE /api/comments/{comment_id}?cascade=true`
pub async fn delete_comment(
    State(store): State<CommentStore>,
    State(limiter): State<Arc<dyn RateLimiter>>,
    auth: AuthUser,
    ApiPath(comment_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<DeleteCommentQuery>,
) -> Result<Json<DeleteCommentResponse>, BackendError> {
    limiter.check(auth.user_id())?;
    let deleted_replies = store.remove(comment_id, auth.user_id(), query.cascade).await?;
    Ok(Json(DeleteCommentResponse {
        message: "Comment deleted".to_string(),
        deleted_replies,
    }))
}

/// `GET /api/posts/{post_id}/comments/count`
pub async fn get_comment_count(
    State(store): State<CommentStore>,
    _auth: AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> Result<Json<i64>, BackendError> {
    Ok(Json(store.comment_count(post_id).await?))
}
