//! Post Data Structure
//!
//! Posts own comment threads. Only the fields the threading engine reads or
//! maintains are modelled here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A post as returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    /// Live top-level comments
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Request to create a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub text: String,
}
