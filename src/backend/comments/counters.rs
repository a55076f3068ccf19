//! Counter Maintainer
//!
//! Keeps the denormalized `comments_count`, `replies_count` and `likes_count`
//! columns in step with mutations. Counters are adjusted incrementally and
//! read in O(1); they are never recomputed on read, so an interrupted
//! mutation sequence can leave them drifted. Every decrement is clamped at
//! zero in SQL.
//!
//! Each function reports whether the target row existed.

use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// A denormalized counter column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// `posts.comments_count`: live top-level comments
    PostComments,
    /// `comments.replies_count`: live direct replies
    Replies,
    /// `comments.likes_count`
    Likes,
}

impl Counter {
    fn table_and_column(self) -> (&'static str, &'static str) {
        match self {
            Counter::PostComments => ("posts", "comments_count"),
            Counter::Replies => ("comments", "replies_count"),
            Counter::Likes => ("comments", "likes_count"),
        }
    }
}

/// Add one to a counter
pub async fn increment<'e, E: SqliteExecutor<'e>>(
    executor: E,
    counter: Counter,
    id: Uuid,
) -> Result<bool, BackendError> {
    let (table, column) = counter.table_and_column();
    let sql = format!("UPDATE {table} SET {column} = {column} + 1 WHERE id = ?");
    let result = sqlx::query(&sql).bind(id).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}

/// Subtract one from a counter, never going below zero
pub async fn decrement<'e, E: SqliteExecutor<'e>>(
    executor: E,
    counter: Counter,
    id: Uuid,
) -> Result<bool, BackendError> {
    let (table, column) = counter.table_and_column();
    let sql = format!("UPDATE {table} SET {column} = MAX({column} - 1, 0) WHERE id = ?");
    let result = sqlx::query(&sql).bind(id).execute(executor).await?;
    if result.rows_affected() == 0 {
        tracing::debug!("Skipped {}.{} decrement: {} is gone", table, column, id);
    }
    Ok(result.rows_affected() > 0)
}

/// Read a post's live top-level comment count
pub async fn post_comment_count<'e, E: SqliteExecutor<'e>>(
    executor: E,
    post_id: Uuid,
) -> Result<i64, BackendError> {
    let count: Option<i64> = sqlx::query_scalar("SELECT comments_count FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(executor)
        .await?;
    count.ok_or_else(|| BackendError::not_found("post", post_id))
}

/// Repair a comment's `replies_count` from its live direct children.
///
/// Maintenance path for counters drifted by interrupted cascades.
pub async fn recount_replies<'e, E: SqliteExecutor<'e>>(
    executor: E,
    comment_id: Uuid,
) -> Result<i64, BackendError> {
    let count: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE comments
        SET replies_count = (SELECT COUNT(*) FROM comments AS child WHERE child.parent_id = comments.id)
        WHERE id = ?
        RETURNING replies_count
        "#,
    )
    .bind(comment_id)
    .fetch_optional(executor)
    .await?;
    count.ok_or_else(|| BackendError::not_found("comment", comment_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::posts::db::create_post;
    use crate::backend::server::config::memory_database;

    #[tokio::test]
    async fn test_decrement_floors_at_zero() {
        let pool = memory_database().await.unwrap();
        let post = create_post(&pool, Uuid::new_v4(), "floor").await.unwrap();

        assert!(increment(&pool, Counter::PostComments, post.id).await.unwrap());
        for _ in 0..3 {
            assert!(decrement(&pool, Counter::PostComments, post.id).await.unwrap());
        }
        assert_eq!(post_comment_count(&pool, post.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_row_reports_false() {
        let pool = memory_database().await.unwrap();
        assert!(!increment(&pool, Counter::Replies, Uuid::new_v4()).await.unwrap());
        assert!(!decrement(&pool, Counter::Likes, Uuid::new_v4()).await.unwrap());
        assert_eq!(
            post_comment_count(&pool, Uuid::new_v4()).await.unwrap_err().code(),
            "NOT_FOUND"
        );
    }
}
