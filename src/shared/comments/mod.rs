//! Comment Threading Types
//!
//! This module contains the platform-agnostic half of the threading engine:
//!
//! - `path` - Materialized path encoding (`0001.0007`)
//! - `validation` - Content rules for comment bodies
//! - `comment` - Request/response types for the comment endpoints
//!
//! # Usage
//!
//! ```rust
//! use xfsocial::shared::comments::{encode_path, CommentPath};
//!
//! let parent = CommentPath::parse("0001").unwrap();
//! let child = encode_path(Some(&parent), 3).unwrap();
//! assert_eq!(child.as_str(), "0001.0003");
//! ```

pub mod comment;
pub mod path;
pub mod validation;

// Re-export all types
pub use comment::{
    CommentPage, CommentView, CreateCommentRequest, DeleteCommentQuery, DeleteCommentResponse,
    ListCommentsQuery, ListRepliesQuery,
};
pub use path::{encode as encode_path, CommentPath, PathError, MAX_POSITION, SEGMENT_WIDTH};
pub use validation::{CommentContent, MAX_AUDIO_REF_LEN, MAX_TEXT_CHARS};
