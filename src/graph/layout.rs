// src/graph/layout.rs
// =============================================================================
// Grid placement for the renderer.
//
// Node i goes to column (i mod GRID_WIDTH), row (i div GRID_WIDTH). Nothing is
// stored: positions are recomputed from the index whenever the file list changes.
// =============================================================================

use serde::Serialize;

use super::types::FileRecord;

pub const GRID_WIDTH: usize = 10;
pub const CELL_WIDTH: f64 = 200.0;
pub const CELL_HEIGHT: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutPosition {
    pub index: usize,
    pub x: f64,
    pub y: f64,
}

pub fn position(index: usize) -> LayoutPosition {
    LayoutPosition {
        index,
        x: (index % GRID_WIDTH) as f64 * CELL_WIDTH,
        y: (index / GRID_WIDTH) as f64 * CELL_HEIGHT,
    }
}

pub fn positions(files: &[FileRecord]) -> Vec<LayoutPosition> {
    (0..files.len()).map(position).collect()
}
