// src/github/loader.rs
// =============================================================================
// Repository loader: repo identifier in, decoded files out.
//
// Strategy:
// 1. Try each candidate branch in order (main, then master by default) and ask
//    the GitHub trees API for the full recursive listing. Branches are tried
//    one after another, never in parallel.
// 2. The first branch that has a tree wins; later candidates are not touched.
//    "No tree" means the body had no `tree` field or the tree request failed
//    for good (any status or transport error once the retries ran out). The
//    next candidate is tried; the last failure is kept for the final error.
// 3. Every "blob" entry (regular file) is downloaded concurrently and its
//    base64 content decoded to text.
// 4. All downloads are awaited. If any of them failed for good, the whole
//    load fails with PartialLoad; partial file lists are never returned.
//
// Files come back in tree order, regardless of which download finished first.
// =============================================================================

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use futures::stream::{self, StreamExt};
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::fetch::{Fetcher, NetworkError, Transport};
use crate::config::LoaderConfig;
use crate::graph::FileRecord;

// Body of GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1
#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Option<Vec<TreeEntry>>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: EntryKind,
    url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum EntryKind {
    Blob,
    Tree,
    Commit,
    #[serde(other)]
    Other,
}

// Body of GET /repos/{owner}/{repo}/git/blobs/{sha}
#[derive(Debug, Deserialize)]
struct BlobResponse {
    content: String,
    encoding: Option<String>,
}

// Why a single file could not be materialized
#[derive(Debug, Clone, Error)]
pub enum BlobFailureReason {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error("tree entry has no blob url")]
    MissingUrl,
    #[error("content is not valid base64: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, Error)]
#[error("{path}: {reason}")]
pub struct BlobFailure {
    pub path: String,
    pub reason: BlobFailureReason,
}

#[derive(Debug, Error)]
pub enum LoadError {
    /// Every candidate branch came back without a tree
    #[error(
        "no file tree found for {repo} (tried branches: {}){}",
        branches.join(", "),
        LastError(last_error.as_ref())
    )]
    NoBranchFound {
        repo: String,
        branches: Vec<String>,
        /// Failure of the most recent tree request that did not answer at all
        last_error: Option<NetworkError>,
    },

    /// A tree was found but some blobs could not be downloaded or decoded
    #[error(
        "{} of {total} file(s) in {repo}@{branch} could not be loaded{}",
        failures.len(),
        FirstFailure(failures)
    )]
    PartialLoad {
        repo: String,
        branch: String,
        total: usize,
        failures: Vec<BlobFailure>,
    },

    /// The configured API base cannot be turned into a request URL
    #[error("invalid API base url {0:?}")]
    InvalidEndpoint(String),
}

// Renders ": <first failure>" for the PartialLoad message, or nothing
struct FirstFailure<'a>(&'a [BlobFailure]);

impl fmt::Display for FirstFailure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.first() {
            Some(failure) => write!(f, "; first failure: {}", failure),
            None => Ok(()),
        }
    }
}

// Renders "; last error: <error>" for the NoBranchFound message, or nothing
struct LastError<'a>(Option<&'a NetworkError>);

impl fmt::Display for LastError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(error) => write!(f, "; last error: {}", error),
            None => Ok(()),
        }
    }
}

// What one tree request said about a branch
enum TreeOutcome {
    Found(TreeResponse),
    Missing,
    Failed(NetworkError),
}

// Result of a successful load
#[derive(Debug, Clone)]
pub struct LoadedRepository {
    pub repo: String,
    pub branch: String,
    pub files: Vec<FileRecord>,
    /// GitHub cut the recursive listing short; `files` is what it returned
    pub truncated: bool,
}

pub struct RepositoryLoader<T> {
    fetcher: Fetcher<T>,
    api_base: String,
    branches: Vec<String>,
    concurrency: usize,
}

impl<T: Transport> RepositoryLoader<T> {
    pub fn new(transport: T, config: &LoaderConfig) -> Self {
        Self {
            fetcher: Fetcher::new(transport, config.max_attempts)
                .with_retry_delay(config.retry_delay),
            api_base: config.api_base.clone(),
            branches: config.branches.clone(),
            concurrency: config.concurrency.max(1),
        }
    }

    // Loads every file of `repo` ("owner/name") from the first branch that has a tree
    pub async fn load(&self, repo: &str) -> Result<LoadedRepository, LoadError> {
        let mut last_error = None;

        for branch in &self.branches {
            info!(repo, branch = %branch, "requesting file tree");

            let listing = match self.fetch_tree(repo, branch).await? {
                TreeOutcome::Found(listing) => listing,
                TreeOutcome::Missing => {
                    info!(repo, branch = %branch, "branch has no tree, trying next candidate");
                    continue;
                }
                TreeOutcome::Failed(error) => {
                    last_error = Some(error);
                    continue;
                }
            };

            if listing.truncated {
                warn!(repo, branch = %branch, "tree listing was truncated by the API");
            }

            let entries = listing.tree.unwrap_or_default();
            let files = self.fetch_blobs(repo, branch, entries).await?;

            info!(repo, branch = %branch, files = files.len(), "repository loaded");
            return Ok(LoadedRepository {
                repo: repo.to_string(),
                branch: branch.clone(),
                files,
                truncated: listing.truncated,
            });
        }

        warn!(repo, branches = ?self.branches, "no candidate branch has a tree");
        Err(LoadError::NoBranchFound {
            repo: repo.to_string(),
            branches: self.branches.clone(),
            last_error,
        })
    }

    // Only a bad API base is an error here; every branch-level failure is an outcome
    async fn fetch_tree(&self, repo: &str, branch: &str) -> Result<TreeOutcome, LoadError> {
        let url = self.tree_url(repo, branch)?;

        let outcome = match self.fetcher.fetch_json::<TreeResponse>(url.as_str()).await {
            Ok(listing) if listing.tree.is_some() => TreeOutcome::Found(listing),
            Ok(_) => TreeOutcome::Missing,
            Err(error) if means_missing_branch(&error) => {
                debug!(repo, branch, error = %error, "tree request says the branch is missing");
                TreeOutcome::Missing
            }
            Err(error) => {
                warn!(repo, branch, error = %error, "tree request failed, trying next candidate");
                TreeOutcome::Failed(error)
            }
        };

        Ok(outcome)
    }

    fn tree_url(&self, repo: &str, branch: &str) -> Result<Url, LoadError> {
        let invalid = || LoadError::InvalidEndpoint(self.api_base.clone());

        let mut url = Url::parse(&self.api_base).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("repos")
            .extend(repo.split('/'))
            .extend(["git", "trees"])
            .extend(branch.split('/'));
        url.query_pairs_mut().append_pair("recursive", "1");

        Ok(url)
    }

    // Downloads every blob entry; all-or-fail
    async fn fetch_blobs(
        &self,
        repo: &str,
        branch: &str,
        entries: Vec<TreeEntry>,
    ) -> Result<Vec<FileRecord>, LoadError> {
        let blobs: Vec<TreeEntry> = entries
            .into_iter()
            .filter(|entry| entry.kind == EntryKind::Blob)
            .collect();
        let total = blobs.len();

        info!(
            repo,
            branch,
            blobs = total,
            concurrency = self.concurrency,
            "downloading blobs"
        );

        let downloads = blobs
            .into_iter()
            .enumerate()
            .map(move |(position, entry)| async move {
                (position, self.fetch_blob(entry).await)
            });

        // Results arrive in completion order; `position` restores tree order
        let mut results: Vec<(usize, Result<FileRecord, BlobFailure>)> =
            stream::iter(downloads)
                .buffer_unordered(self.concurrency)
                .collect()
                .await;
        results.sort_by_key(|(position, _)| *position);

        let mut files = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (_, result) in results {
            match result {
                Ok(file) => files.push(file),
                Err(failure) => failures.push(failure),
            }
        }

        if !failures.is_empty() {
            warn!(
                repo,
                branch,
                failed = failures.len(),
                total,
                "load failed: some blobs are unavailable"
            );
            return Err(LoadError::PartialLoad {
                repo: repo.to_string(),
                branch: branch.to_string(),
                total,
                failures,
            });
        }

        Ok(files)
    }

    async fn fetch_blob(&self, entry: TreeEntry) -> Result<FileRecord, BlobFailure> {
        let fail = |reason| BlobFailure {
            path: entry.path.clone(),
            reason,
        };

        let url = entry
            .url
            .as_deref()
            .ok_or_else(|| fail(BlobFailureReason::MissingUrl))?;
        let blob: BlobResponse = self
            .fetcher
            .fetch_json(url)
            .await
            .map_err(|e| fail(BlobFailureReason::Network(e)))?;
        let content = decode_blob(blob).map_err(fail)?;

        debug!(path = %entry.path, bytes = content.len(), "blob decoded");
        Ok(FileRecord::new(entry.path, content))
    }
}

// 404: unknown branch, 409: empty repository, 422: ref is not a tree
//
// These are the expected answers for an absent branch and are only logged at
// debug; they are not kept as the load's last error.
fn means_missing_branch(error: &NetworkError) -> bool {
    matches!(
        error.status(),
        Some(status) if status == StatusCode::NOT_FOUND
            || status == StatusCode::CONFLICT
            || status == StatusCode::UNPROCESSABLE_ENTITY
    )
}

// Decodes blob content to text; invalid UTF-8 is replaced, not rejected
fn decode_blob(blob: BlobResponse) -> Result<String, BlobFailureReason> {
    match blob.encoding.as_deref() {
        Some("base64") | None => {
            // The API wraps base64 at 60 columns
            let compact: String = blob.content.split_whitespace().collect();
            let bytes = STANDARD
                .decode(compact)
                .map_err(|e| BlobFailureReason::Decode(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        // "utf-8" (and "none" for oversized blobs) carry the text as-is
        Some(_) => Ok(blob.content),
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. buffer_unordered vs join_all
//    - join_all would start every download at once
//    - buffer_unordered(n) keeps at most n in flight, which is kinder to the
//      API rate limit on repositories with thousands of files
//
// 2. Why collect every result instead of try_collect?
//    - try_collect stops at the first error and drops the other downloads
//    - We want the full list of failed files in the PartialLoad error
//
// 3. Why does fetch_tree return TreeOutcome instead of Result?
//    - A failed tree request is not fatal: the next branch may still have a tree
//    - Only a broken API base (InvalidEndpoint) stops the whole load early
// -----------------------------------------------------------------------------
