// src/graph/mod.rs
// =============================================================================
// Static analysis: file text in, import graph out.
//
// Submodules:
// - types: FileRecord, Edge, Graph
// - scanner: finds the target of a single-line `import ... from "..."`
// - resolve: maps an import target to a known file path
// - builder: runs scanner + resolver over a file set, assigns group colors
// - color: grouping modes and the collision-free dark palette
// - layout: fixed grid positions for the renderer
// - structure: directory listing of a file set
//
// Nothing in here touches the network or the filesystem.
// =============================================================================

mod builder;
mod color;
mod layout;
mod resolve;
mod scanner;
mod structure;
mod types;

pub use builder::{build, build_with_rng, extract_edges};
pub use color::{Color, ColorAssignment, GroupingMode, MAX_COLOR_DRAWS};
pub use layout::{position, positions, LayoutPosition, CELL_HEIGHT, CELL_WIDTH, GRID_WIDTH};
pub use resolve::{normalize_target, resolve, strip_extension, PathIndex};
pub use scanner::scan_import_target;
pub use structure::directory_structure;
pub use types::{Edge, FileRecord, Graph};
