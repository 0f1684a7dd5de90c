// src/github/mod.rs
// =============================================================================
// This module loads a repository's files from the GitHub REST API.
//
// - repo: normalizes user input to an `owner/name` identifier
// - fetch: single GETs with a bounded retry budget (Transport + Fetcher)
// - loader: branch fallback, tree listing, concurrent blob download
//
// Authentication is a bearer token passed in through LoaderConfig; nothing
// here reads the environment or keeps global state.
// =============================================================================

mod fetch;
mod loader;
mod repo;

#[cfg(test)]
mod stub;

pub use fetch::{FetchError, Fetcher, HttpTransport, NetworkError, RawResponse, Transport};
pub use loader::{BlobFailure, BlobFailureReason, LoadError, LoadedRepository, RepositoryLoader};
pub use repo::{parse_repo_identifier, RepoId};
