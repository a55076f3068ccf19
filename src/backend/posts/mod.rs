//! Posts Module
//!
//! The minimal post aggregate that owns comment threads: creation, lookup and
//! the per-post top-level sequence and comment count.

pub mod db;
pub mod handlers;

pub use db::PostRecord;
