// src/local/mod.rs
// =============================================================================
// This module loads a file set from a local folder instead of GitHub.
//
// The result is the same FileRecord sequence the GitHub loader produces, so
// the graph builder does not care where the files came from.
// =============================================================================

mod walk;

pub use walk::{load_local, LocalLoadError};
