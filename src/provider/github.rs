//! GitHub REST implementation of [`ContentProvider`].
//!
//! Two endpoint families back the whole capability set:
//! - `GET /repos/{repo}/contents/{path}?ref=` for tree listings and files
//! - `GET /repos/{repo}/commits?path=&sha=` for history walking
//!
//! Entries whose type is neither `file` nor `dir` (symlinks, submodules) are
//! ignored.

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;

use super::{ContentProvider, DirectoryListing, FileEntry, FileHandle, ProviderError};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// One entry in a contents response (also the shape of a single-file response).
#[derive(Deserialize, Debug)]
struct ContentEntry {
    name: String,
    #[serde(rename = "type")]
    entry_type: String,
    sha: String,
    #[serde(default)]
    download_url: Option<String>,
}

/// One entry in a commits response. Only the sha matters here.
#[derive(Deserialize, Debug)]
struct CommitEntry {
    sha: String,
}

pub struct GitHubProvider {
    client: reqwest::Client,
    base_url: String,
    repo: String,
    token: Option<String>,
}

impl GitHubProvider {
    /// `base_url` of `None` targets the public GitHub API.
    pub fn new(repo: String, token: Option<String>, base_url: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            repo,
            token,
        }
    }

    /// Sends a GET and deserializes the JSON body, mapping failures onto
    /// [`ProviderError`]. `path` is used for NotFound reporting only.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        path: &str,
    ) -> Result<T, ProviderError> {
        debug!("GET {} query={:?}", url, query);

        let mut request = self
            .client
            .get(url)
            .query(query)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", "delve");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Err(ProviderError::NotFound { path: path.to_string() });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status: status.as_u16(), message });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    fn contents_url(&self, path: &str) -> String {
        format!("{}/repos/{}/contents/{}", self.base_url, self.repo, path)
    }

    fn commits_url(&self) -> String {
        format!("{}/repos/{}/commits", self.base_url, self.repo)
    }

    /// Resolves "latest" to the concrete head commit sha.
    async fn head_reference(&self) -> Result<String, ProviderError> {
        let commits: Vec<CommitEntry> = self
            .get_json(&self.commits_url(), &[("per_page", "1")], "")
            .await?;
        commits
            .into_iter()
            .next()
            .map(|c| c.sha)
            .ok_or_else(|| ProviderError::Parse("empty commit history".to_string()))
    }
}

#[async_trait]
impl ContentProvider for GitHubProvider {
    async fn list_directory(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<DirectoryListing, ProviderError> {
        // A listing always reports the concrete reference it resolved
        // against, so "latest" is pinned to the head sha first.
        let resolved = match reference {
            Some(r) => r.to_string(),
            None => self.head_reference().await?,
        };

        let entries: Vec<ContentEntry> = self
            .get_json(&self.contents_url(path), &[("ref", resolved.as_str())], path)
            .await?;

        let mut listing = DirectoryListing {
            reference: resolved,
            ..Default::default()
        };
        for entry in entries {
            match entry.entry_type.as_str() {
                "file" => listing.files.push(FileEntry { name: entry.name, sha: entry.sha }),
                "dir" => listing.dirs.push(entry.name),
                other => debug!("ignoring entry '{}' of type '{}'", entry.name, other),
            }
        }

        info!(
            "listed '{}' at {}: {} files, {} dirs",
            path,
            listing.reference,
            listing.files.len(),
            listing.dirs.len()
        );
        Ok(listing)
    }

    async fn get_file(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<FileHandle, ProviderError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(r) = reference {
            query.push(("ref", r));
        }

        let entry: ContentEntry = self.get_json(&self.contents_url(path), &query, path).await?;
        Ok(FileHandle {
            name: entry.name,
            sha: entry.sha,
            download_url: entry.download_url,
        })
    }

    async fn previous_reference(
        &self,
        path: &str,
        reference: Option<&str>,
    ) -> Result<String, ProviderError> {
        let mut query: Vec<(&str, &str)> = vec![("per_page", "2")];
        if !path.is_empty() {
            query.push(("path", path));
        }
        if let Some(r) = reference {
            query.push(("sha", r));
        }

        let commits: Vec<CommitEntry> = self.get_json(&self.commits_url(), &query, path).await?;

        // The list is newest-first starting at `reference` itself, so the
        // answer is the second entry, not the first.
        let mut shas = commits.into_iter().map(|c| c.sha);
        let _current = shas.next();
        match shas.next() {
            Some(prev) => {
                info!("previous reference for '{}': {}", path, prev);
                Ok(prev)
            }
            None => Err(ProviderError::NoPriorHistory),
        }
    }
}
