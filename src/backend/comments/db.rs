//! Database operations for comments
//!
//! Row shape of the `comments` and `comment_likes` tables and the single
//! statement queries the store composes. Functions take any SQLite executor so
//! they run against the pool or inside a caller's transaction.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor};
use std::collections::HashSet;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::comments::{CommentContent, CommentPath, CommentView};

/// Column list shared by every query returning a full row
pub(crate) const COMMENT_COLUMNS: &str = "id, post_id, author_id, parent_id, path, depth, position, text, audio_ref, likes_count, replies_count, next_reply_sequence, created_at";

/// A comment row as stored
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub path: String,
    pub depth: i64,
    pub position: i64,
    pub text: Option<String>,
    pub audio_ref: Option<String>,
    pub likes_count: i64,
    pub replies_count: i64,
    pub next_reply_sequence: i64,
    pub created_at: DateTime<Utc>,
}

impl CommentRecord {
    /// Parsed materialized path
    pub fn comment_path(&self) -> Result<CommentPath, BackendError> {
        CommentPath::parse(&self.path).map_err(|e| {
            tracing::error!("Stored comment {} has a corrupt path: {}", self.id, e);
            BackendError::DatabaseError(sqlx::Error::Decode(Box::new(e)))
        })
    }

    /// Format the row for a viewer
    pub fn into_view(self, liked_by_me: bool) -> Result<CommentView, BackendError> {
        let path = self.comment_path()?;
        Ok(CommentView {
            id: self.id,
            post_id: self.post_id,
            author_id: self.author_id,
            parent_id: self.parent_id,
            depth: path.depth(),
            path,
            text: self.text,
            audio_ref: self.audio_ref,
            likes_count: self.likes_count,
            replies_count: self.replies_count,
            created_at: self.created_at,
            liked_by_me,
        })
    }
}

/// A comment about to be inserted
#[derive(Debug)]
pub struct NewComment<'a> {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub path: &'a CommentPath,
    pub content: &'a CommentContent,
}

/// Insert a comment with zeroed counters
pub async fn insert_comment<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment: NewComment<'_>,
) -> Result<CommentRecord, BackendError> {
    let sql = format!(
        r#"
        INSERT INTO comments (id, post_id, author_id, parent_id, path, depth, position, text, audio_ref,
                              likes_count, replies_count, next_reply_sequence, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, 0, ?)
        RETURNING {COMMENT_COLUMNS}
        "#
    );

    let record = sqlx::query_as::<_, CommentRecord>(&sql)
        .bind(Uuid::new_v4())
        .bind(comment.post_id)
        .bind(comment.author_id)
        .bind(comment.parent_id)
        .bind(comment.path.as_str())
        .bind(comment.path.depth() as i64)
        .bind(comment.path.position() as i64)
        .bind(comment.content.text.as_deref())
        .bind(comment.content.audio_ref.as_deref())
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;

    Ok(record)
}

/// Get a comment by ID
pub async fn get_comment<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
) -> Result<Option<CommentRecord>, BackendError> {
    let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?");
    let record = sqlx::query_as::<_, CommentRecord>(&sql)
        .bind(comment_id)
        .fetch_optional(executor)
        .await?;
    Ok(record)
}

/// Get a comment by ID or fail with `NOT_FOUND`
pub async fn require_comment<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
) -> Result<CommentRecord, BackendError> {
    get_comment(executor, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("comment", comment_id))
}

/// Delete a single comment row, returning whether it existed
pub async fn delete_comment_row<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(comment_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a like row, returning whether one existed
pub async fn delete_like<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<bool, BackendError> {
    let result = sqlx::query("DELETE FROM comment_likes WHERE comment_id = ? AND user_id = ?")
        .bind(comment_id)
        .bind(user_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Record a like
pub async fn insert_like<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
    user_id: Uuid,
) -> Result<(), BackendError> {
    sqlx::query("INSERT INTO comment_likes (comment_id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(comment_id)
        .bind(user_id)
        .bind(Utc::now())
        .execute(executor)
        .await?;
    Ok(())
}

/// Delete up to `limit` likes of a comment, returning how many were removed
pub async fn delete_likes_batch<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
    limit: u32,
) -> Result<u64, BackendError> {
    let result = sqlx::query(
        r#"
        DELETE FROM comment_likes
        WHERE rowid IN (SELECT rowid FROM comment_likes WHERE comment_id = ? LIMIT ?)
        "#,
    )
    .bind(comment_id)
    .bind(limit as i64)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Which of `comment_ids` the user has liked, in one query
pub async fn liked_comment_ids<'e, E: SqliteExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    comment_ids: &[Uuid],
) -> Result<HashSet<Uuid>, BackendError> {
    if comment_ids.is_empty() {
        return Ok(HashSet::new());
    }

    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT comment_id FROM comment_likes WHERE user_id = ");
    builder.push_bind(user_id);
    builder.push(" AND comment_id IN (");
    let mut ids = builder.separated(", ");
    for id in comment_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(")");

    let liked: Vec<Uuid> = builder.build_query_scalar().fetch_all(executor).await?;
    Ok(liked.into_iter().collect())
}

/// Number of likes recorded for a comment
pub async fn count_likes<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
) -> Result<i64, BackendError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comment_likes WHERE comment_id = ?")
        .bind(comment_id)
        .fetch_one(executor)
        .await?;
    Ok(count)
}
