//! # Content Provider
//!
//! Capability abstraction over the remote tree + history service. Providers
//! hold no navigation state; every call is a side-effect-free query
//! parameterized by path and optional historical reference, so repeating a
//! call is always safe.

pub mod github;

use std::fmt;

use async_trait::async_trait;

pub use github::GitHubProvider;

/// Errors that can occur during provider operations.
/// Variants carry enough info to determine retryability.
#[derive(Debug)]
pub enum ProviderError {
    /// The path does not exist at the given reference. Not retryable; the
    /// caller recovers by navigating somewhere that does exist.
    NotFound { path: String },
    /// No reference earlier than the given one touched the path. Not retryable.
    NoPriorHistory,
    /// Network-level failure (timeout, DNS, connection refused). Retryable.
    Transport(String),
    /// API returned an error response. Retryable if status >= 500 or 429.
    Api { status: u16, message: String },
    /// Failed to parse the service's response. Not retryable.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NotFound { path } => {
                write!(f, "nothing exists at '{path}' on this reference")
            }
            ProviderError::NoPriorHistory => write!(f, "no earlier reference touches this path"),
            ProviderError::Transport(msg) => write!(f, "transport error: {msg}"),
            ProviderError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

impl ProviderError {
    /// Whether the orchestrator may retry the same query.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Transport(_) => true,
            ProviderError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// One file visible in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub sha: String,
}

/// A single file resolved for examination, with its content locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub sha: String,
    /// Direct URL to the raw content, when the service exposes one.
    pub download_url: Option<String>,
}

/// The immediate children at a path + reference, partitioned by kind.
/// `reference` is the concrete reference the listing resolved against —
/// "latest" always resolves to a real one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    pub files: Vec<FileEntry>,
    pub dirs: Vec<String>,
    pub reference: String,
}

/// Read-only queries against the remote tree and its history.
///
/// `reference: None` means "latest". Implementations must treat every method
/// as idempotent.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Lists the immediate children of `path` at `reference`.
    async fn list_directory(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<DirectoryListing, ProviderError>;

    /// Resolves a single file at `path` for examination.
    async fn get_file(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<FileHandle, ProviderError>;

    /// Returns the reference immediately preceding `reference` that last
    /// modified `path`. The backing history query is ordered newest-first and
    /// starts at `reference` itself, so the answer is the *second* entry —
    /// the first is the current reference (or the most recent change
    /// at-or-before it), not the one before it.
    async fn previous_reference(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<String, ProviderError>;
}
