// src/graph/types.rs
// =============================================================================
// Core records shared by the loaders, the graph builder and the report.
//
// - FileRecord: one file of a load (path + decoded text)
// - Edge: one resolved import line between two files of the same load
// - Graph: the files, edges and color assignment produced by one build
//
// Edges borrow the FileRecord slice they were built from. That ties an edge's
// indices to that exact sequence: the compiler will not let a Graph outlive
// (or be mixed with) a different file list.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::color::{Color, ColorAssignment, GroupingMode};

// A single file materialized by a loader
//
// `path` is the unique key within a load, posix style ("src/app/main.js").
// `content` is the raw decoded text; binary files come through lossily.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub content: String,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    // Final path segment, used as the node caption ("src/App.js" -> "App.js")
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

// A directed import edge: file `source_index` imports file `target_index`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<'a> {
    pub source_index: usize,
    pub target_index: usize,
    /// The trimmed import line that produced this edge
    pub raw_import_line: String,
    pub target_file: &'a FileRecord,
}

// Output of one Graph Builder run
#[derive(Debug, Clone)]
pub struct Graph<'a> {
    pub files: &'a [FileRecord],
    pub edges: Vec<Edge<'a>>,
    pub colors: ColorAssignment,
    pub mode: GroupingMode,
}

impl<'a> Graph<'a> {
    // All edges leaving one file, in line order
    pub fn edges_from(&self, index: usize) -> impl Iterator<Item = &Edge<'a>> + '_ {
        self.edges.iter().filter(move |e| e.source_index == index)
    }

    // Caption for the node at `index`
    pub fn node_label(&self, index: usize) -> Option<&'a str> {
        self.files.get(index).map(FileRecord::file_name)
    }

    // Grouping key of the file at `index` under this graph's mode
    pub fn group_of(&self, index: usize) -> Option<&'a str> {
        self.files
            .get(index)
            .map(|file| self.mode.group_key(&file.path))
    }

    // Color of the file at `index` (its group's color)
    pub fn color_of(&self, index: usize) -> Option<&Color> {
        self.group_of(index).and_then(|key| self.colors.get(key))
    }
}
