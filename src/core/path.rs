//! # Tree Path
//!
//! The current location in the remote tree, as an ordered list of
//! directory-name segments from the root. The joined string form is always
//! derived on demand — it is never stored next to the segment list, so the
//! two can't drift apart.

use std::fmt;

/// A location in the remote tree. Root is the empty segment list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreePath {
    segments: Vec<String>,
}

/// Attempted to push an empty segment onto a path.
#[derive(Debug, PartialEq, Eq)]
pub struct EmptySegmentError;

impl fmt::Display for EmptySegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path segments must be non-empty")
    }
}

impl std::error::Error for EmptySegmentError {}

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The last segment, or `None` at the root.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Slash-joined form for API queries. Root joins to the empty string.
    pub fn joined(&self) -> String {
        self.segments.join("/")
    }

    pub fn push(&mut self, segment: &str) -> Result<(), EmptySegmentError> {
        if segment.is_empty() {
            return Err(EmptySegmentError);
        }
        self.segments.push(segment.to_string());
        Ok(())
    }

    /// Removes the last segment. Returns `None` at the root — never an
    /// out-of-range slice.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "/")
        } else {
            write!(f, "/{}", self.joined())
        }
    }
}
