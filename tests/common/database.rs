//! Database test fixtures

use sqlx::SqlitePool;
use tempfile::TempDir;
use uuid::Uuid;
use xfsocial::backend::comments::CommentStore;
use xfsocial::backend::posts::db::create_post;
use xfsocial::backend::server::config::{load_database, memory_database};
use xfsocial::shared::comments::CreateCommentRequest;
use xfsocial::shared::AppConfig;

/// A file-backed database that lives as long as the fixture
pub struct TestDatabase {
    pool: SqlitePool,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh WAL database in a temporary directory
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}", dir.path().join("threads.db").display());
        let pool = load_database(&url).await.expect("Failed to open test database");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn store(&self) -> CommentStore {
        CommentStore::new(self.pool.clone(), AppConfig::default())
    }
}

/// A store over a private in-memory database
pub async fn memory_store() -> CommentStore {
    let pool = memory_database().await.expect("Failed to open in-memory database");
    CommentStore::new(pool, AppConfig::default())
}

/// Insert a post and return its ID
pub async fn seed_post(pool: &SqlitePool, author_id: Uuid) -> Uuid {
    create_post(pool, author_id, "test post")
        .await
        .expect("Failed to create post")
        .id
}

/// Request body with text only
pub fn text(body: &str) -> CreateCommentRequest {
    CreateCommentRequest {
        text: Some(body.to_string()),
        audio_ref: None,
    }
}
