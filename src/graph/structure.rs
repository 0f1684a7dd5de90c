// src/graph/structure.rs
// =============================================================================
// Directory listing derived from the loaded file paths.
//
// Every prefix directory of every file, first-seen order, no duplicates:
//   ["src/components/App.js", "public/index.html"]
//     -> ["src", "src/components", "public"]
// =============================================================================

use std::collections::HashSet;

use super::types::FileRecord;

pub fn directory_structure(files: &[FileRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut directories = Vec::new();

    for file in files {
        // Every '/' ends one directory prefix; the last segment is the file itself
        for (slash, _) in file.path.match_indices('/') {
            let prefix = &file.path[..slash];
            if !prefix.is_empty() && seen.insert(prefix) {
                directories.push(prefix.to_string());
            }
        }
    }

    directories
}
