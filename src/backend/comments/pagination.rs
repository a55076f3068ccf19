//! Tree Pagination Engine
//!
//! Cursor pagination over a post's thread in tree preorder (ascending
//! materialized path) and over one comment's direct replies in creation order.
//!
//! Both listings over-fetch by one row to learn whether another page exists.
//! The depth-bounded listing cannot know in advance how many raw rows it needs,
//! since replies interleave with top-level comments in path order, so it scans
//! raw batches until it has collected more than a page worth of matching rows
//! or the thread runs out.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::db::{CommentRecord, COMMENT_COLUMNS};
use crate::backend::error::BackendError;
use crate::shared::comments::CommentPath;

/// One page of raw rows, before formatting for a viewer
#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub records: Vec<CommentRecord>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl RecordPage {
    fn from_overfetch(mut records: Vec<CommentRecord>, limit: usize, cursor_of: impl Fn(&CommentRecord) -> String) -> Self {
        let has_more = records.len() > limit;
        records.truncate(limit);
        let next_cursor = records.last().map(cursor_of);
        Self {
            records,
            has_more,
            next_cursor,
        }
    }
}

/// Parse a thread cursor: the path of the last comment already seen
pub fn parse_thread_cursor(raw: &str) -> Result<CommentPath, BackendError> {
    CommentPath::parse(raw).map_err(|e| BackendError::validation("cursor", e.to_string()))
}

/// Parse a replies cursor: the position of the last reply already seen
pub fn parse_replies_cursor(raw: &str) -> Result<i64, BackendError> {
    raw.trim()
        .parse::<u32>()
        .map(i64::from)
        .map_err(|_| BackendError::validation("cursor", format!("invalid replies cursor: {raw:?}")))
}

/// Comments of a post strictly after `after`, in path order
async fn fetch_after(
    pool: &SqlitePool,
    post_id: Uuid,
    after: &str,
    limit: u32,
) -> Result<Vec<CommentRecord>, BackendError> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = ? AND path > ? ORDER BY path ASC LIMIT ?"
    );
    let records = sqlx::query_as::<_, CommentRecord>(&sql)
        .bind(post_id)
        .bind(after)
        .bind(limit as i64)
        .fetch_all(pool)
        .await?;
    Ok(records)
}

/// List a post's thread in preorder
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `post_id` - Post whose thread is listed
/// * `cursor` - Path of the last comment of the previous page
/// * `limit` - Page size, already clamped by the caller
/// * `max_depth` - Only keep comments with `depth <= max_depth`
/// * `batch_size` - Raw rows fetched per round when filtering by depth
///
/// # Returns
/// At most `limit` rows; `next_cursor` is the path of the last one
pub async fn list_by_post(
    pool: &SqlitePool,
    post_id: Uuid,
    cursor: Option<&CommentPath>,
    limit: u32,
    max_depth: Option<u32>,
    batch_size: u32,
) -> Result<RecordPage, BackendError> {
    let after = cursor.map(CommentPath::as_str).unwrap_or("");
    let page_len = limit as usize;

    let Some(max_depth) = max_depth else {
        let records = fetch_after(pool, post_id, after, limit.saturating_add(1)).await?;
        return Ok(RecordPage::from_overfetch(records, page_len, |r| r.path.clone()));
    };

    let mut kept: Vec<CommentRecord> = Vec::new();
    let mut last_seen = after.to_string();
    let mut rounds = 0u32;

    loop {
        let batch = fetch_after(pool, post_id, &last_seen, batch_size).await?;
        rounds += 1;
        let batch_was_full = batch.len() == batch_size as usize;
        if let Some(last) = batch.last() {
            last_seen = last.path.clone();
        }
        kept.extend(batch.into_iter().filter(|r| r.depth <= i64::from(max_depth)));

        if kept.len() > page_len || !batch_was_full {
            break;
        }
    }

    tracing::debug!(
        "Depth-bounded listing of post {} scanned {} batch(es), kept {} row(s)",
        post_id,
        rounds,
        kept.len()
    );
    Ok(RecordPage::from_overfetch(kept, page_len, |r| r.path.clone()))
}

/// List the direct replies of a comment in creation order
///
/// `cursor` is the position of the last reply of the previous page.
pub async fn list_replies(
    pool: &SqlitePool,
    parent_id: Uuid,
    cursor: Option<i64>,
    limit: u32,
) -> Result<RecordPage, BackendError> {
    let sql = format!(
        "SELECT {COMMENT_COLUMNS} FROM comments WHERE parent_id = ? AND position > ? ORDER BY position ASC LIMIT ?"
    );
    let records = sqlx::query_as::<_, CommentRecord>(&sql)
        .bind(parent_id)
        .bind(cursor.unwrap_or(0))
        .bind(i64::from(limit) + 1)
        .fetch_all(pool)
        .await?;

    Ok(RecordPage::from_overfetch(records, limit as usize, |r| {
        r.position.to_string()
    }))
}
