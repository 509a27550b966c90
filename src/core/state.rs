//! # Navigation State
//!
//! The single source of truth for "where is the user, and at what point in
//! time". A continuous (path, reference) coordinate rather than enumerated
//! states:
//!
//! ```text
//! NavigationState
//! ├── path: TreePath                  // location in the tree
//! ├── reference: Option<String>      // None = latest
//! ├── listing: Option<DirectoryListing> // cache for (path, reference)
//! └── forward_log: Vec<Option<String>>  // refs displaced by shift-back
//! ```
//!
//! Every mutation of either coordinate invalidates the listing cache, so a
//! stale listing can never be read against a new (path, reference). The
//! history service has no "changes after X" query, so going forward in time
//! replays the session-local forward log instead of asking the server.

use std::fmt;

use crate::core::path::TreePath;
use crate::provider::{ContentProvider, DirectoryListing, ProviderError};

/// A navigation precondition failed. Always recoverable; the orchestrator
/// reports these and keeps the loop going.
#[derive(Debug, PartialEq, Eq)]
pub enum NavError {
    /// `ascend` at the root. The path is left untouched.
    AtRoot,
    /// `descend` with an empty segment.
    EmptySegment,
    /// `shift_to_next` with nothing recorded to return to.
    NoForwardHistory,
}

impl fmt::Display for NavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavError::AtRoot => write!(f, "already at the root"),
            NavError::EmptySegment => write!(f, "cannot descend into an unnamed place"),
            NavError::NoForwardHistory => write!(f, "no recorded future to return to"),
        }
    }
}

impl std::error::Error for NavError {}

pub struct NavigationState {
    path: TreePath,
    reference: Option<String>,
    listing: Option<DirectoryListing>,
    forward_log: Vec<Option<String>>,
}

impl NavigationState {
    /// Starts at the root, at the latest reference, with an empty cache.
    pub fn new() -> Self {
        Self::with_reference(None)
    }

    /// Starts at the root, pinned to `reference` (`None` = latest).
    pub fn with_reference(reference: Option<String>) -> Self {
        Self {
            path: TreePath::root(),
            reference,
            listing: None,
            forward_log: Vec::new(),
        }
    }

    pub fn path(&self) -> &TreePath {
        &self.path
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// The cached listing for the current (path, reference), if fresh.
    pub fn listing(&self) -> Option<&DirectoryListing> {
        self.listing.as_ref()
    }

    pub fn needs_refresh(&self) -> bool {
        self.listing.is_none()
    }

    /// Installs a freshly fetched listing for the current (path, reference).
    pub fn set_listing(&mut self, listing: DirectoryListing) {
        self.listing = Some(listing);
    }

    /// Marks the cache invalid. Called on every coordinate mutation, and by
    /// the orchestrator after a failed refetch so the next iteration retries
    /// instead of reusing old data.
    pub fn invalidate_listing(&mut self) {
        self.listing = None;
    }

    /// Pushes `segment` onto the path. The orchestrator only offers segments
    /// from the current listing's directory set, but an empty segment is
    /// rejected here regardless.
    pub fn descend(&mut self, segment: &str) -> Result<(), NavError> {
        self.path.push(segment).map_err(|_| NavError::EmptySegment)?;
        self.invalidate_listing();
        Ok(())
    }

    /// Pops the last path segment. At the root this is an error, not an
    /// out-of-range slice.
    pub fn ascend(&mut self) -> Result<(), NavError> {
        match self.path.pop() {
            Some(_) => {
                self.invalidate_listing();
                Ok(())
            }
            None => Err(NavError::AtRoot),
        }
    }

    /// Moves the reference to the one immediately preceding it that touched
    /// the current path. The displaced reference is recorded so
    /// [`shift_to_next`](Self::shift_to_next) can restore it. On failure
    /// (including `NoPriorHistory`) nothing is mutated.
    pub async fn shift_to_previous(
        &mut self,
        provider: &dyn ContentProvider,
    ) -> Result<(), ProviderError> {
        let prev = provider
            .previous_reference(&self.path.joined(), self.reference())
            .await?;
        self.forward_log.push(self.reference.take());
        self.reference = Some(prev);
        self.invalidate_listing();
        Ok(())
    }

    /// Restores the most recently displaced reference. The history service
    /// has no forward query; this only replays what shift-back recorded.
    pub fn shift_to_next(&mut self) -> Result<(), NavError> {
        match self.forward_log.pop() {
            Some(reference) => {
                self.reference = reference;
                self.invalidate_listing();
                Ok(())
            }
            None => Err(NavError::NoForwardHistory),
        }
    }

    /// Drops back to the root, keeping the current reference. Used to
    /// recover when the current path no longer exists.
    pub fn reset_to_root(&mut self) {
        self.path = TreePath::root();
        self.invalidate_listing();
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}
