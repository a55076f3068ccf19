//! Sequence Allocator
//!
//! Hands out sibling positions for new comments. A post seeds its top-level
//! comments from `next_comment_sequence`; a comment seeds its own replies from
//! `next_reply_sequence`.
//!
//! Allocation is one `UPDATE ... SET next = next + 1 ... RETURNING next`. It
//! must be the first statement of the caller's write transaction: the write
//! lock it takes is held until commit, so two writers on the same parent can
//! never observe the same counter value, and a rolled-back insert gives its
//! position back. `run_write` retries the whole unit of work when the lock
//! is contended.

use std::future::Future;
use std::time::Duration;

use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::comments::{CommentPath, MAX_POSITION};

/// Attempts before a contended write is reported as a failure
const MAX_WRITE_ATTEMPTS: u32 = 8;

/// First backoff delay; doubles per attempt
const BASE_BACKOFF: Duration = Duration::from_millis(10);

/// Where a new reply goes, read atomically with its allocation
#[derive(Debug, Clone)]
pub struct ReplySlot {
    pub position: u32,
    pub post_id: Uuid,
    pub parent_path: CommentPath,
}

/// Allocate the next top-level position of a post
pub async fn allocate_comment_position(
    conn: &mut SqliteConnection,
    post_id: Uuid,
) -> Result<u32, BackendError> {
    let next: Option<i64> = sqlx::query_scalar(
        r#"
        UPDATE posts
        SET next_comment_sequence = next_comment_sequence + 1
        WHERE id = ?
        RETURNING next_comment_sequence
        "#,
    )
    .bind(post_id)
    .fetch_optional(&mut *conn)
    .await?;

    let next = next.ok_or_else(|| BackendError::not_found("post", post_id))?;
    checked_position(next, "post", post_id)
}

/// Allocate the next reply position under a comment
pub async fn allocate_reply_position(
    conn: &mut SqliteConnection,
    parent_id: Uuid,
) -> Result<ReplySlot, BackendError> {
    let row: Option<(i64, Uuid, String)> = sqlx::query_as(
        r#"
        UPDATE comments
        SET next_reply_sequence = next_reply_sequence + 1
        WHERE id = ?
        RETURNING next_reply_sequence, post_id, path
        "#,
    )
    .bind(parent_id)
    .fetch_optional(&mut *conn)
    .await?;

    let (next, post_id, path) = row.ok_or_else(|| BackendError::not_found("comment", parent_id))?;
    let position = checked_position(next, "comment", parent_id)?;
    let parent_path = CommentPath::parse(&path).map_err(|e| {
        tracing::error!("Parent comment {} has a corrupt path: {}", parent_id, e);
        BackendError::DatabaseError(sqlx::Error::Decode(Box::new(e)))
    })?;

    Ok(ReplySlot {
        position,
        post_id,
        parent_path,
    })
}

fn checked_position(next: i64, parent_kind: &str, parent_id: Uuid) -> Result<u32, BackendError> {
    if next < 1 || next > MAX_POSITION as i64 {
        tracing::warn!("{} {} has no free child positions (next = {})", parent_kind, parent_id, next);
        return Err(BackendError::CapacityExceeded {
            message: format!("{} {} already has {} children", parent_kind, parent_id, MAX_POSITION),
        });
    }
    Ok(next as u32)
}

/// Run a write unit of work, retrying it while the store's write lock is contended.
///
/// `op` must open and commit its own transaction so every attempt starts from
/// a clean slate.
pub async fn run_write<T, F, Fut>(mut op: F) -> Result<T, BackendError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BackendError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(err) if err.is_store_busy() && attempt < MAX_WRITE_ATTEMPTS => {
                let delay = BASE_BACKOFF * 2u32.pow(attempt - 1);
                tracing::debug!("Store busy (attempt {}), retrying in {:?}", attempt, delay);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
