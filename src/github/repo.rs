// src/github/repo.rs
// =============================================================================
// Turns what the user typed into an `owner/name` repository identifier.
//
// Supported formats:
//   - owner/repo
//   - https://github.com/owner/repo
//   - https://github.com/owner/repo.git
//   - github.com/owner/repo/tree/main/src   (extra segments are ignored)
//
// The loader itself only ever sees the normalized identifier.
// =============================================================================

use std::fmt;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

// Parses a repository URL or `owner/name` shorthand
//
// Example:
//   "https://github.com/rust-lang/rust" -> RepoId { owner: "rust-lang", name: "rust" }
pub fn parse_repo_identifier(input: &str) -> Result<RepoId> {
    let trimmed = input.trim();

    // Remove common prefixes
    let without_scheme = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_start_matches("www.");

    let path = match without_scheme.strip_prefix("github.com/") {
        Some(path) => path,
        // Anything else that still has a host in it is not a GitHub repo
        None if trimmed.contains("://") || without_scheme.contains(".com/") => {
            return Err(anyhow!("Not a GitHub repository: {}", input));
        }
        None => without_scheme,
    };

    let mut parts = path.split('/').filter(|p| !p.is_empty());
    let (owner, name) = match (parts.next(), parts.next()) {
        (Some(owner), Some(name)) => (owner, name),
        _ => return Err(anyhow!("Expected owner/name, got: {}", input)),
    };

    let name = name.strip_suffix(".git").unwrap_or(name);
    if name.is_empty() {
        return Err(anyhow!("Missing repository name in: {}", input));
    }

    Ok(RepoId {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
