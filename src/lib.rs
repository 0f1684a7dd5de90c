// src/lib.rs
// =============================================================================
// import-mapper: file-level import graphs for repositories and folders.
//
// Data flows one way:
//
//   github (fetch -> loader) or local  ->  graph (builder -> layout)
//
// - github: resilient GET + GitHub tree/blob loading with branch fallback
// - local: the same FileRecord sequence read from a folder on disk
// - graph: import scanning, path resolution, edges, colors, grid layout
// - config: explicit settings for a repository load
//
// Rendering is left to whoever consumes the Graph and LayoutPositions; the
// binary in main.rs prints them as a table or JSON.
// =============================================================================

pub mod config;
pub mod github;
pub mod graph;
pub mod local;
