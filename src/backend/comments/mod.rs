//! Comments Module
//!
//! The comment/reply threading engine: a tree of comments per post encoded
//! with materialized paths, collision-free sibling positions under concurrent
//! writers, denormalized counters, depth-bounded cursor pagination and
//! bounded-batch cascading deletion.
//!
//! # Module Structure
//!
//! ```text
//! comments/
//! ├── mod.rs          - Module exports and documentation
//! ├── db.rs           - Row mapping and single-statement queries
//! ├── sequence.rs     - Sibling position allocation and the write retry runner
//! ├── counters.rs     - Denormalized counter maintenance
//! ├── pagination.rs   - Thread and replies listings
//! ├── cascade.rs      - Batched subtree deletion
//! ├── store.rs        - CommentStore, the operations behind the endpoints
//! └── handlers.rs     - HTTP handlers
//! ```
//!
//! # Write Flow
//!
//! A new comment or reply is one store transaction: allocate the next
//! position from the parent, encode the path, insert the row, bump the
//! parent's counter. Deletion removes likes, optionally the subtree, and
//! finally the target together with its parent's counter decrement.

pub mod cascade;
pub mod counters;
pub mod db;
pub mod handlers;
pub mod pagination;
pub mod sequence;
pub mod store;

pub use db::CommentRecord;
pub use store::CommentStore;
