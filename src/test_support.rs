//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::provider::{ContentProvider, DirectoryListing, FileHandle, ProviderError};
use crate::repl::{Repl, ReplError};

/// A provider that answers from canned data instead of the network.
///
/// Listings are keyed by joined path. Unknown paths get an empty listing so
/// simple tests don't have to seed every room; paths registered as missing
/// answer `NotFound`. The first `transport_failures` list calls fail with a
/// transport error, for retry-policy tests.
pub struct CannedProvider {
    listings: HashMap<String, DirectoryListing>,
    missing: HashSet<String>,
    history: Vec<String>,
    transport_failures: Mutex<u32>,
}

impl CannedProvider {
    pub fn new() -> Self {
        Self {
            listings: HashMap::new(),
            missing: HashSet::new(),
            history: Vec::new(),
            transport_failures: Mutex::new(0),
        }
    }

    pub fn with_listing(mut self, path: &str, listing: DirectoryListing) -> Self {
        self.listings.insert(path.to_string(), listing);
        self
    }

    pub fn with_missing(mut self, path: &str) -> Self {
        self.missing.insert(path.to_string());
        self
    }

    /// Newest-first history answered by `previous_reference`, regardless of
    /// path and starting reference.
    pub fn with_history(mut self, history: Vec<String>) -> Self {
        self.history = history;
        self
    }

    pub fn with_transport_failures(self, count: u32) -> Self {
        *self.transport_failures.lock().unwrap() = count;
        self
    }
}

impl Default for CannedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentProvider for CannedProvider {
    async fn list_directory(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<DirectoryListing, ProviderError> {
        {
            let mut remaining = self.transport_failures.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(ProviderError::Transport("canned failure".to_string()));
            }
        }
        if self.missing.contains(path) {
            return Err(ProviderError::NotFound { path: path.to_string() });
        }
        let mut listing = self.listings.get(path).cloned().unwrap_or_default();
        if listing.reference.is_empty() {
            listing.reference = reference.unwrap_or("head").to_string();
        }
        Ok(listing)
    }

    async fn get_file(
        &self,
        path: &str,
        _reference: Option<&str>,
    ) -> Result<FileHandle, ProviderError> {
        if self.missing.contains(path) {
            return Err(ProviderError::NotFound { path: path.to_string() });
        }
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Ok(FileHandle {
            sha: format!("sha-{name}"),
            name,
            download_url: None,
        })
    }

    async fn previous_reference(
        &self,
        _path: &str,
        _reference: Option<&str>,
    ) -> Result<String, ProviderError> {
        // Same index-1 rule as the real provider: the first entry is the
        // current reference, the second is the answer.
        self.history
            .get(1)
            .cloned()
            .ok_or(ProviderError::NoPriorHistory)
    }
}

/// A scripted input surface: lines and selections are consumed in order.
/// An exhausted line script reads as end-of-input; an exhausted selection
/// script reads as a cancelled selection.
pub struct ScriptedRepl {
    lines: VecDeque<String>,
    selections: VecDeque<usize>,
}

impl ScriptedRepl {
    pub fn new(lines: &[&str], selections: &[usize]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            selections: selections.iter().copied().collect(),
        }
    }
}

impl Repl for ScriptedRepl {
    fn read_line(&mut self, _prompt: &str) -> Result<String, ReplError> {
        self.lines.pop_front().ok_or(ReplError::Eof)
    }

    fn select_one(&mut self, _prompt: &str, options: &[String]) -> Result<usize, ReplError> {
        match self.selections.pop_front() {
            Some(i) if i < options.len() => Ok(i),
            _ => Err(ReplError::Cancelled),
        }
    }
}
