//! Post HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::db;
use crate::backend::error::BackendError;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser, RateLimiter};
use crate::shared::{CreatePostRequest, PostView, SharedError};

/// Longest accepted post body, in characters
pub const MAX_POST_CHARS: usize = 10_000;

/// `POST /api/posts`
pub async fn create_post(
    State(pool): State<SqlitePool>,
    State(limiter): State<Arc<dyn RateLimiter>>,
    auth: AuthUser,
    ApiJson(request): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostView>), BackendError> {
    limiter.check(auth.user_id())?;

    let text = request.text.trim();
    if text.is_empty() {
        return Err(SharedError::validation("text", "post text is required").into());
    }
    if text.chars().count() > MAX_POST_CHARS {
        return Err(SharedError::validation("text", format!("post text exceeds {MAX_POST_CHARS} characters")).into());
    }

    let post = db::create_post(&pool, auth.user_id(), text).await?;
    tracing::info!("Created post {} by {}", post.id, post.author_id);
    Ok((StatusCode::CREATED, Json(post.into())))
}

/// `GET /api/posts/{post_id}`
pub async fn get_post(
    State(pool): State<SqlitePool>,
    _auth: AuthUser,
    ApiPath(post_id): ApiPath<Uuid>,
) -> Result<Json<PostView>, BackendError> {
    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or_else(|| BackendError::not_found("post", post_id))?;
    Ok(Json(post.into()))
}
