//! Router harness
//!
//! Builds the full application router over an in-memory database and sends
//! one request at a time through it.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;
use xfsocial::backend::middleware::{NoopRateLimiter, RateLimiter};
use xfsocial::backend::routes::create_router;
use xfsocial::backend::server::config::memory_database;
use xfsocial::backend::server::{build_state, ServerConfig};

use super::auth_helpers::bearer;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_limiter(Arc::new(NoopRateLimiter)).await
    }

    pub async fn with_limiter(rate_limiter: Arc<dyn RateLimiter>) -> Self {
        let pool = memory_database().await.expect("Failed to open in-memory database");
        let state = build_state(pool.clone(), &ServerConfig::default(), rate_limiter);
        Self {
            router: create_router(state),
            pool,
        }
    }

    /// Send a request, returning the status and the JSON body (`Null` if empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user_id) = user {
            builder = builder.header(header::AUTHORIZATION, bearer(user_id));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, user: Uuid) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: Uuid, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(user), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user: Uuid) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(user), None).await
    }

    /// Create a post over HTTP and return its ID
    pub async fn create_post(&self, user: Uuid) -> String {
        let (status, body) = self
            .post("/api/posts", user, serde_json::json!({ "text": "hello world" }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create post failed: {body}");
        body["id"].as_str().expect("post id").to_string()
    }
}
