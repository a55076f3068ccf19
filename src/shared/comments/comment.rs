//! Comment wire types
//!
//! Request and response shapes for the comment endpoints. Field names are
//! camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::path::CommentPath;

/// A comment as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    /// Unique comment ID
    pub id: Uuid,
    /// Post that owns the thread
    pub post_id: Uuid,
    /// Author of the comment
    pub author_id: Uuid,
    /// Parent comment, `None` for top-level comments
    pub parent_id: Option<Uuid>,
    /// Materialized path, e.g. `0001.0003`
    pub path: CommentPath,
    /// Zero for top-level comments
    pub depth: u32,
    pub text: Option<String>,
    pub audio_ref: Option<String>,
    pub likes_count: i64,
    pub replies_count: i64,
    pub created_at: DateTime<Utc>,
    /// Whether the requesting user has liked this comment
    pub liked_by_me: bool,
}

/// Body for creating a top-level comment or a reply
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio_ref: Option<String>,
}

/// Query string for `GET /api/posts/{post_id}/comments`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    /// Path of the last comment from the previous page
    pub cursor: Option<String>,
    pub limit: Option<u32>,
    /// Only return comments with `depth <= max_depth`
    pub max_depth: Option<u32>,
}

/// Query string for `GET /api/comments/{comment_id}/replies`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRepliesQuery {
    /// Opaque cursor from the previous page
    pub cursor: Option<String>,
    pub limit: Option<u32>,
}

/// Query string for `DELETE /api/comments/{comment_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteCommentQuery {
    /// Also delete every descendant reply
    #[serde(default)]
    pub cascade: bool,
}

/// One page of comments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub data: Vec<CommentView>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

/// Response after deleting a comment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentResponse {
    pub message: String,
    /// Number of descendant replies removed with the comment
    pub deleted_replies: u64,
}
