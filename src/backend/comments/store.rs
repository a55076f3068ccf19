//! Comment Store
//!
//! The operations behind the comment endpoints. Every mutation that touches a
//! parent counter runs as one write transaction whose first statement is the
//! counter update, retried as a unit by [`run_write`] while the store's write
//! lock is contended.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::cascade::{cascade_delete, delete_likes};
use super::counters::{self, Counter};
use super::db::{self, CommentRecord, NewComment};
use super::pagination::{self, RecordPage};
use super::sequence::{allocate_comment_position, allocate_reply_position, run_write};
use crate::backend::error::BackendError;
use crate::backend::posts::db::post_exists;
use crate::shared::comments::{
    encode_path, CommentContent, CommentPage, CommentView, CreateCommentRequest, ListCommentsQuery,
    ListRepliesQuery,
};
use crate::shared::AppConfig;

/// Comment store over a SQLite pool
#[derive(Debug, Clone)]
pub struct CommentStore {
    pool: SqlitePool,
    config: AppConfig,
}

impl CommentStore {
    pub fn new(pool: SqlitePool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Create a top-level comment on a post
    ///
    /// # Errors
    /// `NOT_FOUND` if the post does not exist, `VALIDATION` for bad content,
    /// `CAPACITY_EXCEEDED` once the post has 9999 top-level comments
    #[tracing::instrument(skip(self, request))]
    pub async fn create(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        request: CreateCommentRequest,
    ) -> Result<CommentView, BackendError> {
        let content = CommentContent::new(request.text, request.audio_ref)?;
        let pool = &self.pool;
        let content = &content;

        let record = run_write(|| async move {
            let mut tx = pool.begin().await?;
            let position = allocate_comment_position(&mut tx, post_id).await?;
            let path = encode_path(None, position)?;
            let record = db::insert_comment(
                &mut *tx,
                NewComment {
                    post_id,
                    author_id,
                    parent_id: None,
                    path: &path,
                    content,
                },
            )
            .await?;
            counters::increment(&mut *tx, Counter::PostComments, post_id).await?;
            tx.commit().await?;
            Ok::<_, BackendError>(record)
        })
        .await?;

        tracing::info!("Created comment {} at {} on post {}", record.id, record.path, post_id);
        record.into_view(false)
    }

    /// Reply to a comment
    ///
    /// The reply joins the parent's post and sits one level below it.
    #[tracing::instrument(skip(self, request))]
    pub async fn reply(
        &self,
        parent_id: Uuid,
        author_id: Uuid,
        request: CreateCommentRequest,
    ) -> Result<CommentView, BackendError> {
        let content = CommentContent::new(request.text, request.audio_ref)?;
        let pool = &self.pool;
        let content = &content;

        let record = run_write(|| async move {
            let mut tx = pool.begin().await?;
            let slot = allocate_reply_position(&mut tx, parent_id).await?;
            let path = encode_path(Some(&slot.parent_path), slot.position)?;
            let record = db::insert_comment(
                &mut *tx,
                NewComment {
                    post_id: slot.post_id,
                    author_id,
                    parent_id: Some(parent_id),
                    path: &path,
                    content,
                },
            )
            .await?;
            counters::increment(&mut *tx, Counter::Replies, parent_id).await?;
            tx.commit().await?;
            Ok::<_, BackendError>(record)
        })
        .await?;

        tracing::info!("Created reply {} at {} under {}", record.id, record.path, parent_id);
        record.into_view(false)
    }

    /// Like the comment if the user has not, otherwise take the like back
    #[tracing::instrument(skip(self))]
    pub async fn toggle_like(&self, comment_id: Uuid, user_id: Uuid) -> Result<CommentView, BackendError> {
        let pool = &self.pool;

        let (record, liked) = run_write(|| async move {
            let mut tx = pool.begin().await?;
            let liked = if db::delete_like(&mut *tx, comment_id, user_id).await? {
                if !counters::decrement(&mut *tx, Counter::Likes, comment_id).await? {
                    return Err(BackendError::not_found("comment", comment_id));
                }
                false
            } else {
                if !counters::increment(&mut *tx, Counter::Likes, comment_id).await? {
                    return Err(BackendError::not_found("comment", comment_id));
                }
                db::insert_like(&mut *tx, comment_id, user_id).await?;
                true
            };
            let record = db::require_comment(&mut *tx, comment_id).await?;
            tx.commit().await?;
            Ok::<_, BackendError>((record, liked))
        })
        .await?;

        tracing::debug!("User {} {} comment {}", user_id, if liked { "liked" } else { "unliked" }, comment_id);
        record.into_view(liked)
    }

    /// Delete a comment, optionally with its whole subtree
    ///
    /// Only the author may delete. Without `cascade` the comment's replies stay
    /// in place with a `parent_id` that no longer resolves.
    ///
    /// # Returns
    /// Number of descendant replies removed
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, comment_id: Uuid, caller_id: Uuid, cascade: bool) -> Result<u64, BackendError> {
        let target = db::require_comment(&self.pool, comment_id).await?;
        if target.author_id != caller_id {
            tracing::warn!("User {} tried to delete comment {} they did not write", caller_id, comment_id);
            return Err(BackendError::permission("only the author can delete this comment"));
        }

        let batch_size = self.config.delete_batch_size;
        delete_likes(&self.pool, comment_id, batch_size).await?;

        let deleted_replies = if cascade {
            cascade_delete(&self.pool, &target, batch_size).await?
        } else {
            0
        };

        let pool = &self.pool;
        let target = &target;
        run_write(|| async move {
            let mut tx = pool.begin().await?;
            match target.parent_id {
                Some(parent_id) => counters::decrement(&mut *tx, Counter::Replies, parent_id).await?,
                None => counters::decrement(&mut *tx, Counter::PostComments, target.post_id).await?,
            };
            if !db::delete_comment_row(&mut *tx, target.id).await? {
                return Err(BackendError::not_found("comment", target.id));
            }
            tx.commit().await?;
            Ok::<_, BackendError>(())
        })
        .await?;

        tracing::info!("Deleted comment {} ({} descendant(s))", comment_id, deleted_replies);
        Ok(deleted_replies)
    }

    /// Fetch one comment as seen by `viewer`
    pub async fn get(&self, comment_id: Uuid, viewer: Uuid) -> Result<CommentView, BackendError> {
        let record = db::require_comment(&self.pool, comment_id).await?;
        let liked = db::liked_comment_ids(&self.pool, viewer, &[record.id]).await?;
        let liked_by_me = liked.contains(&record.id);
        record.into_view(liked_by_me)
    }

    /// Live top-level comment count of a post
    pub async fn comment_count(&self, post_id: Uuid) -> Result<i64, BackendError> {
        counters::post_comment_count(&self.pool, post_id).await
    }

    /// Rebuild a comment's `replies_count` from its live children
    pub async fn recount_replies(&self, comment_id: Uuid) -> Result<i64, BackendError> {
        let count = counters::recount_replies(&self.pool, comment_id).await?;
        tracing::info!("Recounted replies of comment {}: {}", comment_id, count);
        Ok(count)
    }

    /// One page of a post's thread in preorder
    #[tracing::instrument(skip(self, query))]
    pub async fn list_by_post(
        &self,
        post_id: Uuid,
        viewer: Uuid,
        query: &ListCommentsQuery,
    ) -> Result<CommentPage, BackendError> {
        let cursor = query
            .cursor
            .as_deref()
            .map(pagination::parse_thread_cursor)
            .transpose()?;
        if !post_exists(&self.pool, post_id).await? {
            return Err(BackendError::not_found("post", post_id));
        }

        let page = pagination::list_by_post(
            &self.pool,
            post_id,
            cursor.as_ref(),
            self.config.page_size(query.limit),
            query.max_depth,
            self.config.scan_batch_size,
        )
        .await?;
        self.format_page(viewer, page).await
    }

    /// One page of a comment's direct replies in creation order
    #[tracing::instrument(skip(self, query))]
    pub async fn list_replies(
        &self,
        parent_id: Uuid,
        viewer: Uuid,
        query: &ListRepliesQuery,
    ) -> Result<CommentPage, BackendError> {
        let cursor = query
            .cursor
            .as_deref()
            .map(pagination::parse_replies_cursor)
            .transpose()?;
        db::require_comment(&self.pool, parent_id).await?;

        let page = pagination::list_replies(&self.pool, parent_id, cursor, self.config.page_size(query.limit)).await?;
        self.format_page(viewer, page).await
    }

    async fn format_page(&self, viewer: Uuid, page: RecordPage) -> Result<CommentPage, BackendError> {
        let ids: Vec<Uuid> = page.records.iter().map(|r| r.id).collect();
        let liked = db::liked_comment_ids(&self.pool, viewer, &ids).await?;

        let data = page
            .records
            .into_iter()
            .map(|record: CommentRecord| {
                let liked_by_me = liked.contains(&record.id);
                record.into_view(liked_by_me)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CommentPage {
            data,
            has_more: page.has_more,
            next_cursor: page.next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::posts::db::{create_post, get_post};
    use crate::backend::server::config::memory_database;
    use pretty_assertions::assert_eq;

    fn text(body: &str) -> CreateCommentRequest {
        CreateCommentRequest {
            text: Some(body.to_string()),
            audio_ref: None,
        }
    }

    async fn setup() -> (CommentStore, Uuid, Uuid) {
        let pool = memory_database().await.unwrap();
        let author = Uuid::new_v4();
        let post = create_post(&pool, author, "post").await.unwrap();
        (CommentStore::new(pool, AppConfig::default()), post.id, author)
    }

    async fn replies_count(store: &CommentStore, id: Uuid) -> i64 {
        db::require_comment(store.pool(), id).await.unwrap().replies_count
    }

    #[tokio::test]
    async fn test_first_comment_and_reply() {
        let (store, post_id, author) = setup().await;

        let first = store.create(post_id, author, text("hi")).await.unwrap();
        assert_eq!(first.path.as_str(), "0001");
        assert_eq!(first.depth, 0);
        assert_eq!(first.parent_id, None);
        assert_eq!(store.comment_count(post_id).await.unwrap(), 1);

        let reply = store.reply(first.id, author, text("hey")).await.unwrap();
        assert_eq!(reply.path.as_str(), "0001.0001");
        assert_eq!(reply.depth, 1);
        assert_eq!(reply.post_id, post_id);
        assert_eq!(reply.parent_id, Some(first.id));
        assert_eq!(replies_count(&store, first.id).await, 1);
        // Replies do not count toward the post
        assert_eq!(store.comment_count(post_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_thread_lists_in_preorder() {
        let (store, post_id, author) = setup().await;
        let first = store.create(post_id, author, text("hi")).await.unwrap();
        store.reply(first.id, author, text("hey")).await.unwrap();
        store.create(post_id, author, text("second")).await.unwrap();

        let page = store
            .list_by_post(post_id, author, &ListCommentsQuery::default())
            .await
            .unwrap();
        let paths: Vec<&str> = page.data.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["0001", "0001.0001", "0002"]);
        assert!(!page.has_more);
        assert_eq!(page.next_cursor.as_deref(), Some("0002"));
    }

    #[tokio::test]
    async fn test_cascade_delete_restores_post_count() {
        let (store, post_id, author) = setup().await;
        let first = store.create(post_id, author, text("hi")).await.unwrap();
        let reply = store.reply(first.id, author, text("hey")).await.unwrap();
        store.create(post_id, author, text("second")).await.unwrap();
        store.toggle_like(first.id, Uuid::new_v4()).await.unwrap();
        store.toggle_like(reply.id, Uuid::new_v4()).await.unwrap();

        let removed = store.remove(first.id, author, true).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.comment_count(post_id).await.unwrap(), 1);
        assert!(db::get_comment(store.pool(), first.id).await.unwrap().is_none());
        assert!(db::get_comment(store.pool(), reply.id).await.unwrap().is_none());
        assert_eq!(db::count_likes(store.pool(), first.id).await.unwrap(), 0);
        assert_eq!(db::count_likes(store.pool(), reply.id).await.unwrap(), 0);

        let post = get_post(store.pool(), post_id).await.unwrap().unwrap();
        assert_eq!(post.comments_count, 1);
    }

    #[tokio::test]
    async fn test_toggle_like_twice() {
        let (store, post_id, author) = setup().await;
        let comment = store.create(post_id, author, text("hi")).await.unwrap();
        let fan = Uuid::new_v4();

        let liked = store.toggle_like(comment.id, fan).await.unwrap();
        assert_eq!(liked.likes_count, 1);
        assert!(liked.liked_by_me);
        assert!(store.get(comment.id, fan).await.unwrap().liked_by_me);
        assert!(!store.get(comment.id, author).await.unwrap().liked_by_me);

        let unliked = store.toggle_like(comment.id, fan).await.unwrap();
        assert_eq!(unliked.likes_count, 0);
        assert!(!unliked.liked_by_me);
    }

    #[tokio::test]
    async fn test_liked_by_me_resolved_per_page() {
        let (store, post_id, author) = setup().await;
        let a = store.create(post_id, author, text("a")).await.unwrap();
        store.create(post_id, author, text("b")).await.unwrap();
        store.toggle_like(a.id, author).await.unwrap();

        let page = store
            .list_by_post(post_id, author, &ListCommentsQuery::default())
            .await
            .unwrap();
        let liked: Vec<bool> = page.data.iter().map(|c| c.liked_by_me).collect();
        assert_eq!(liked, vec![true, false]);
    }

    #[tokio::test]
    async fn test_leaf_create_then_delete_restores_replies_count() {
        let (store, post_id, author) = setup().await;
        let parent = store.create(post_id, author, text("parent")).await.unwrap();
        store.reply(parent.id, author, text("stays")).await.unwrap();
        let before = replies_count(&store, parent.id).await;

        let leaf = store.reply(parent.id, author, text("leaf")).await.unwrap();
        store.remove(leaf.id, author, false).await.unwrap();
        assert_eq!(replies_count(&store, parent.id).await, before);
    }

    #[tokio::test]
    async fn test_non_author_cannot_delete() {
        let (store, post_id, author) = setup().await;
        let comment = store.create(post_id, author, text("mine")).await.unwrap();

        let err = store.remove(comment.id, Uuid::new_v4(), true).await.unwrap_err();
        assert_eq!(err.code(), "PERMISSION");
        assert!(db::get_comment(store.pool(), comment.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_non_cascade_delete_leaves_children_dangling() {
        let (store, post_id, author) = setup().await;
        let parent = store.create(post_id, author, text("parent")).await.unwrap();
        let child = store.reply(parent.id, author, text("child")).await.unwrap();

        assert_eq!(store.remove(parent.id, author, false).await.unwrap(), 0);

        let orphan = db::require_comment(store.pool(), child.id).await.unwrap();
        assert_eq!(orphan.parent_id, Some(parent.id));
        assert_eq!(store.comment_count(post_id).await.unwrap(), 0);

        // The orphan can still be removed without touching the missing parent
        store.remove(child.id, author, false).await.unwrap();
        assert!(db::get_comment(store.pool(), child.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counters_never_go_negative() {
        let (store, post_id, author) = setup().await;
        let parent = store.create(post_id, author, text("parent")).await.unwrap();
        let child = store.reply(parent.id, author, text("child")).await.unwrap();

        // Drift the counter, as an interrupted cascade might
        sqlx::query("UPDATE comments SET replies_count = 0 WHERE id = ?")
            .bind(parent.id)
            .execute(store.pool())
            .await
            .unwrap();
        store.remove(child.id, author, false).await.unwrap();
        assert_eq!(replies_count(&store, parent.id).await, 0);
    }

    #[tokio::test]
    async fn test_recount_replies_repairs_drift() {
        let (store, post_id, author) = setup().await;
        let parent = store.create(post_id, author, text("parent")).await.unwrap();
        for _ in 0..3 {
            store.reply(parent.id, author, text("r")).await.unwrap();
        }
        sqlx::query("UPDATE comments SET replies_count = 9 WHERE id = ?")
            .bind(parent.id)
            .execute(store.pool())
            .await
            .unwrap();

        assert_eq!(store.recount_replies(parent.id).await.unwrap(), 3);
        assert_eq!(replies_count(&store, parent.id).await, 3);
    }

    #[tokio::test]
    async fn test_missing_targets_are_not_found() {
        let (store, _post_id, author) = setup().await;
        let missing = Uuid::new_v4();

        for err in [
            store.create(missing, author, text("x")).await.unwrap_err(),
            store.reply(missing, author, text("x")).await.unwrap_err(),
            store.toggle_like(missing, author).await.unwrap_err(),
            store.remove(missing, author, true).await.unwrap_err(),
            store.get(missing, author).await.unwrap_err(),
            store
                .list_by_post(missing, author, &ListCommentsQuery::default())
                .await
                .unwrap_err(),
            store
                .list_replies(missing, author, &ListRepliesQuery::default())
                .await
                .unwrap_err(),
        ] {
            assert_eq!(err.code(), "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_invalid_content_rejected_before_allocation() {
        let (store, post_id, author) = setup().await;
        let err = store.create(post_id, author, text("   ")).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION");

        let comment = store.create(post_id, author, text("ok")).await.unwrap();
        assert_eq!(comment.path.as_str(), "0001");
    }

    #[tokio::test]
    async fn test_replies_listing_and_bad_cursor() {
        let (store, post_id, author) = setup().await;
        let parent = store.create(post_id, author, text("parent")).await.unwrap();
        for i in 0..3 {
            store.reply(parent.id, author, text(&format!("r{i}"))).await.unwrap();
        }

        let query = ListRepliesQuery {
            cursor: None,
            limit: Some(2),
        };
        let page = store.list_replies(parent.id, author, &query).await.unwrap();
        assert_eq!(page.data.len(), 2);
        assert!(page.has_more);

        let query = ListRepliesQuery {
            cursor: page.next_cursor,
            limit: Some(2),
        };
        let rest = store.list_replies(parent.id, author, &query).await.unwrap();
        assert_eq!(rest.data.len(), 1);
        assert_eq!(rest.data[0].path.as_str(), "0001.0003");

        let bad = ListRepliesQuery {
            cursor: Some("later".into()),
            limit: None,
        };
        let err = store.list_replies(parent.id, author, &bad).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
    }
}
