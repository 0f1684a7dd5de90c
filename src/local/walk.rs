// src/local/walk.rs
// =============================================================================
// Loads a local folder as a file set, breadth-first.
//
// How it works:
// 1. Start with the root directory in a queue
// 2. Read the directory; files are read as text, subdirectories are queued
// 3. Repeat until the queue is empty
// 4. Sort the records by path so the file sequence (and every index derived
//    from it) does not depend on directory read order
//
// Skipped: hidden entries (".git", ".env", ...), dependency/build output
// directories, and symlinks (so a link cycle cannot loop forever).
// Files are decoded lossily, so binary files still come through as text.
// =============================================================================

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::graph::FileRecord;

// Directory names never descended into
const EXCLUDED_DIRS: &[&str] = &["node_modules", "target", "dist", "build"];

#[derive(Debug, Error)]
pub enum LocalLoadError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// Reads every file under `root` into FileRecords with posix paths relative to root
pub async fn load_local(root: &Path) -> Result<Vec<FileRecord>, LocalLoadError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LocalLoadError::Io { path, source }
    };

    let metadata = tokio::fs::metadata(root).await.map_err(io_error(root))?;
    if !metadata.is_dir() {
        return Err(LocalLoadError::NotADirectory(root.to_path_buf()));
    }

    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());
    let mut records = Vec::new();

    while let Some(dir) = queue.pop_front() {
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(io_error(&dir))?;

        while let Some(entry) = entries.next_entry().await.map_err(io_error(&dir))? {
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if name.starts_with('.') {
                continue;
            }

            let file_type = entry.file_type().await.map_err(io_error(&path))?;

            if file_type.is_dir() {
                if EXCLUDED_DIRS.contains(&&*name) {
                    debug!(path = %path.display(), "skipping excluded directory");
                } else {
                    queue.push_back(path);
                }
            } else if file_type.is_file() {
                let bytes = tokio::fs::read(&path).await.map_err(io_error(&path))?;
                records.push(FileRecord::new(
                    relative_posix_path(root, &path),
                    String::from_utf8_lossy(&bytes).into_owned(),
                ));
            }
        }
    }

    records.sort_by(|a, b| a.path.cmp(&b.path));
    info!(root = %root.display(), files = records.len(), "local folder loaded");

    Ok(records)
}

// "root/src/app.js" -> "src/app.js", always with '/' separators
fn relative_posix_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is VecDeque?
//    - A double-ended queue; push_back + pop_front gives breadth-first order
//
// 2. Why tokio::fs instead of std::fs?
//    - std::fs blocks the thread; tokio::fs hands the work to a blocking pool
//      so the async runtime keeps running
//
// 3. What does from_utf8_lossy do?
//    - Turns bytes into text, replacing invalid sequences with U+FFFD
//    - Images and other binaries become unreadable text instead of errors
// -----------------------------------------------------------------------------
