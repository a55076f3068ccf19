//! Materialized Path Encoding
//!
//! Every comment carries the full ancestry of its position in the thread as a
//! dot-separated list of fixed-width decimal segments:
//!
//! ```text
//! 0001            first top-level comment
//! 0001.0007       seventh reply to it
//! 0001.0007.0002  second reply to that reply
//! ```
//!
//! Segments are zero-padded to [`SEGMENT_WIDTH`] digits so that plain byte-wise
//! string ordering of full paths equals numeric sibling order and equals tree
//! preorder. That only holds while no parent has more than [`MAX_POSITION`]
//! direct children, so positions above that bound are rejected rather than
//! widened or truncated.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of decimal digits in every path segment
pub const SEGMENT_WIDTH: usize = 4;

/// Largest sibling position a single parent can hand out
pub const MAX_POSITION: u32 = 9999;

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Errors produced while encoding or parsing a path
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The allocated position does not fit in a segment
    #[error("position {0} is outside 1..={MAX_POSITION}")]
    PositionOutOfRange(u64),

    /// A stored or client-supplied path is not well formed
    #[error("malformed comment path '{0}'")]
    Malformed(String),
}

/// A validated materialized path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentPath(String);

impl CommentPath {
    /// Path of a top-level comment at `position`
    pub fn top_level(position: u32) -> Result<Self, PathError> {
        Ok(Self(pad_segment(position)?))
    }

    /// Path of a direct child of `self` at `position`
    pub fn child(&self, position: u32) -> Result<Self, PathError> {
        let segment = pad_segment(position)?;
        let mut path = String::with_capacity(self.0.len() + 1 + SEGMENT_WIDTH);
        path.push_str(&self.0);
        path.push(SEPARATOR);
        path.push_str(&segment);
        Ok(Self(path))
    }

    /// Parse and validate a path string
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Malformed(raw.to_string()));
        }
        for segment in raw.split(SEPARATOR) {
            let well_formed = segment.len() == SEGMENT_WIDTH
                && segment.bytes().all(|b| b.is_ascii_digit())
                && segment != "0000";
            if !well_formed {
                return Err(PathError::Malformed(raw.to_string()));
            }
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of segments minus one
    pub fn depth(&self) -> u32 {
        self.0.matches(SEPARATOR).count() as u32
    }

    /// Sibling position encoded in the last segment
    pub fn position(&self) -> u32 {
        self.0
            .rsplit(SEPARATOR)
            .next()
            .and_then(|segment| segment.parse().ok())
            .unwrap_or(0)
    }

    /// Half-open `[lower, upper)` string bounds covering every strict descendant.
    ///
    /// `'/'` is the byte directly after `'.'`, so `upper` is the smallest string
    /// greater than every path starting with `lower`.
    pub fn descendant_range(&self) -> (String, String) {
        (format!("{}.", self.0), format!("{}/", self.0))
    }
}

/// Derive a child path from its parent path and its allocated position.
///
/// `None` as parent yields a top-level path.
pub fn encode(parent: Option<&CommentPath>, position: u32) -> Result<CommentPath, PathError> {
    match parent {
        Some(parent) => parent.child(position),
        None => CommentPath::top_level(position),
    }
}

fn pad_segment(position: u32) -> Result<String, PathError> {
    if position == 0 || position > MAX_POSITION {
        return Err(PathError::PositionOutOfRange(position as u64));
    }
    Ok(format!("{:0width$}", position, width = SEGMENT_WIDTH))
}

impl fmt::Display for CommentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CommentPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CommentPath> for String {
    fn from(path: CommentPath) -> Self {
        path.0
    }
}

impl AsRef<str> for CommentPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
