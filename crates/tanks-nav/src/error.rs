use thiserror::Error;

use crate::TileId;

/// Invalid grid parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    Empty { rows: usize, cols: usize },

    #[error("grid of {rows}x{cols} tiles is too large to allocate")]
    TooLarge { rows: usize, cols: usize },

    #[error("tile size must be finite and positive (got {x}x{y})")]
    TileSize { x: f32, y: f32 },

    #[error("grid origin must be finite")]
    Origin,

    #[error("obstacle probability must be within 0..=100 (got {0})")]
    ObstacleProbability(u8),

    #[error("ascii layout rows must all have {expected} columns (row {row} has {actual})")]
    RaggedLayout {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Failure of a path query. All variants are recoverable at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no path from {start:?} to {goal:?}")]
    NoSolution { start: TileId, goal: TileId },

    #[error("tile {0:?} is not part of this grid")]
    InvalidTile(TileId),

    #[error("position is outside the grid")]
    OutsideGrid,
}
