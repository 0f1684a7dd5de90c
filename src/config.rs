// src/config.rs
// =============================================================================
// Settings for one repository load.
//
// Everything the loader needs is passed in explicitly through LoaderConfig;
// there is no global client or credential. The CLI builds one from its flags
// (see cli.rs), tests build their own.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_BRANCHES: [&str; 2] = ["main", "master"];
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_CONCURRENCY: usize = 16;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Root of the GitHub REST API
    pub api_base: String,
    /// Candidate branches, tried in order; the first with a tree wins
    pub branches: Vec<String>,
    /// Attempts per request before giving up
    pub max_attempts: u32,
    /// Maximum blob downloads in flight at once
    pub concurrency: usize,
    /// Pause between failed attempts of the same request
    pub retry_delay: Duration,
    /// Per-request timeout handed to the HTTP client
    pub timeout: Duration,
    /// Bearer token; requests are anonymous when None
    pub token: Option<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            branches: DEFAULT_BRANCHES.iter().map(|b| b.to_string()).collect(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            concurrency: DEFAULT_CONCURRENCY,
            retry_delay: Duration::ZERO,
            timeout: DEFAULT_TIMEOUT,
            token: None,
        }
    }
}

impl LoaderConfig {
    // Replaces the candidate branch list; an empty list keeps the defaults
    pub fn with_branches(mut self, branches: Vec<String>) -> Self {
        if !branches.is_empty() {
            self.branches = branches;
        }
        self
    }

    // Empty tokens (e.g. GITHUB_TOKEN="") are treated as no token
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }
}
