//! Cascade Deletion Coordinator
//!
//! Removes every descendant of a comment in bounded batches. Each round fetches
//! at most one batch of descendants, newest first, and deletes them one by
//! one: likes in inner batches, then the row itself in its own short
//! transaction. Nothing spans rounds, so an interrupted cascade leaves a
//! consistent partial state and a fresh call resumes where it stopped.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::counters::{self, Counter};
use super::db::{delete_comment_row, delete_likes_batch, CommentRecord, COMMENT_COLUMNS};
use super::sequence::run_write;
use crate::backend::error::BackendError;

/// Delete all likes of a comment, `batch_size` rows at a time
pub async fn delete_likes(
    pool: &SqlitePool,
    comment_id: Uuid,
    batch_size: u32,
) -> Result<u64, BackendError> {
    let mut total = 0;
    loop {
        let removed = delete_likes_batch(pool, comment_id, batch_size).await?;
        total += removed;
        if removed < u64::from(batch_size) {
            break;
        }
    }
    if total > 0 {
        tracing::debug!("Removed {} like(s) of comment {}", total, comment_id);
    }
    Ok(total)
}

/// Up to `limit` strict descendants of `target`, newest first
async fn fetch_descendants(
    pool: &SqlitePool,
    target: &CommentRecord,
    limit: u32,
) -> Result<Vec<CommentRecord>, BackendError> {
    let (lower, upper) = target.comment_path()?.descendant_range();
    let sql = format!(
        r#"
        SELECT {COMMENT_COLUMNS} FROM comments
        WHERE post_id = ? AND path >= ? AND path < ?
        ORDER BY created_at DESC, depth DESC
        LIMIT ?
        "#
    );
    let records = sqlx::query_as::<_, CommentRecord>(&sql)
        .bind(target.post_id)
        .bind(lower)
        .bind(upper)
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// Delete one descendant row, decrementing `target_id`'s replies if it was a
/// direct child
///
/// A row that is already gone leaves the counter untouched and reports false.
async fn remove_descendant(
    pool: &SqlitePool,
    target_id: Uuid,
    descendant: &CommentRecord,
) -> Result<bool, BackendError> {
    let descendant_id = descendant.id;
    let is_direct_child = descendant.parent_id == Some(target_id);
    run_write(|| async move {
        let mut tx = pool.begin().await?;
        if !delete_comment_row(&mut *tx, descendant_id).await? {
            tx.rollback().await?;
            return Ok::<_, BackendError>(false);
        }
        if is_direct_child {
            counters::decrement(&mut *tx, Counter::Replies, target_id).await?;
        }
        tx.commit().await?;
        Ok(true)
    })
    .await
}

/// Delete every descendant of `target`, leaving `target` itself in place
///
/// # Returns
/// Number of descendant comments removed by this call
#[tracing::instrument(skip(pool, target), fields(comment_id = %target.id))]
pub async fn cascade_delete(
    pool: &SqlitePool,
    target: &CommentRecord,
    batch_size: u32,
) -> Result<u64, BackendError> {
    let target_id = target.id;
    let mut deleted = 0u64;

    loop {
        let batch = fetch_descendants(pool, target, batch_size).await?;
        let fetched = batch.len();

        for descendant in &batch {
            delete_likes(pool, descendant.id, batch_size).await?;

            if remove_descendant(pool, target_id, descendant).await? {
                deleted += 1;
            }
        }

        tracing::debug!("Cascade round removed {} descendant(s)", fetched);
        if fetched < batch_size as usize {
            break;
        }
    }

    tracing::info!("Cascade under comment {} removed {} descendant(s)", target_id, deleted);
    Ok(deleted)
}
