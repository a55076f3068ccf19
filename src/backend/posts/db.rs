/**
 * Post Model and Database Operations
 *
 * Posts are owned by the wider platform; this crate keeps the minimal row the
 * comment engine needs: the top-level sequence and the live comment count.
 */

use chrono::{DateTime, Utc};
use sqlx::SqliteExecutor;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::PostView;

/// Post struct representing a post in the database
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostRecord {
    /// Unique post ID (UUID)
    pub id: Uuid,
    /// Author user ID
    pub author_id: Uuid,
    /// Post body
    pub text: String,
    /// Last top-level position handed out
    pub next_comment_sequence: i64,
    /// Live top-level comments
    pub comments_count: i64,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl From<PostRecord> for PostView {
    fn from(post: PostRecord) -> Self {
        Self {
            id: post.id,
            author_id: post.author_id,
            text: post.text,
            comments_count: post.comments_count,
            created_at: post.created_at,
        }
    }
}

/// Create a new post
///
/// # Arguments
/// * `executor` - Pool or open transaction
/// * `author_id` - Author user ID
/// * `text` - Post body
///
/// # Returns
/// Created post or error
pub async fn create_post<'e, E: SqliteExecutor<'e>>(
    executor: E,
    author_id: Uuid,
    text: &str,
) -> Result<PostRecord, BackendError> {
    let post = sqlx::query_as::<_, PostRecord>(
        r#"
        INSERT INTO posts (id, author_id, text, next_comment_sequence, comments_count, created_at)
        VALUES (?, ?, ?, 0, 0, ?)
        RETURNING id, author_id, text, next_comment_sequence, comments_count, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(author_id)
    .bind(text)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(post)
}

/// Get post by ID
///
/// # Returns
/// Post or None if not found
pub async fn get_post<'e, E: SqliteExecutor<'e>>(
    executor: E,
    post_id: Uuid,
) -> Result<Option<PostRecord>, BackendError> {
    let post = sqlx::query_as::<_, PostRecord>(
        r#"
        SELECT id, author_id, text, next_comment_sequence, comments_count, created_at
        FROM posts
        WHERE id = ?
        "#,
    )
    .bind(post_id)
    .fetch_optional(executor)
    .await?;

    Ok(post)
}

/// Whether a post exists
pub async fn post_exists<'e, E: SqliteExecutor<'e>>(
    executor: E,
    post_id: Uuid,
) -> Result<bool, BackendError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM posts WHERE id = ?")
        .bind(post_id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::memory_database;

    #[tokio::test]
    async fn test_create_and_get_post() {
        let pool = memory_database().await.unwrap();
        let author = Uuid::new_v4();
        let created = create_post(&pool, author, "first post").await.unwrap();
        assert_eq!(created.comments_count, 0);
        assert_eq!(created.next_comment_sequence, 0);

        let fetched = get_post(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert!(post_exists(&pool, created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_post() {
        let pool = memory_database().await.unwrap();
        assert!(get_post(&pool, Uuid::new_v4()).await.unwrap().is_none());
        assert!(!post_exists(&pool, Uuid::new_v4()).await.unwrap());
    }
}
