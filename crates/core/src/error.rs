//! Error types for the engine.
//!
//! Only construction can fail hard. Everything that happens during play is
//! recovered locally and reported through events and logs.

use thiserror::Error;

use crate::types::{GridPos, PieceKind};

/// Rejected configuration; raised before any grid is built
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rows must be within {min}..={max}, got {got}")]
    Rows { got: usize, min: usize, max: usize },

    #[error("columns must be within {min}..={max}, got {got}")]
    Columns { got: usize, min: usize, max: usize },

    #[error("board limits are inverted or zero: rows {min_rows}..={max_rows}, columns {min_columns}..={max_columns}")]
    Limits {
        min_rows: usize,
        max_rows: usize,
        min_columns: usize,
        max_columns: usize,
    },

    #[error("tile size must be positive and finite, got {0}")]
    TileSize(f64),

    #[error("supply must have between 1 and {max} slots, got {got}")]
    SupplySlots { got: usize, max: usize },

    #[error("minimum match count must be at least 2, got {0}")]
    MinMatchCount(usize),

    #[error("hint run length must be at least 2, got {0}")]
    HintMinRun(usize),

    #[error("hint interval must be at least 1")]
    HintEvery,

    #[error("max moves must be at least 1")]
    MaxMoves,

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// A preset layout that does not fit the configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has {got} rows, board has {expected}")]
    RowCount { got: usize, expected: usize },

    #[error("layout row {row} has {got} cells, board has {expected} columns")]
    RowWidth {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("layout supply has {got} pieces, supply has {expected} slots")]
    SupplyLen { got: usize, expected: usize },

    #[error("unknown piece code {code:?} at {at}")]
    UnknownCode { code: char, at: String },

    #[error("{kind:?} is not in the active palette")]
    OutsidePalette { kind: PieceKind },
}

/// Grid mutation refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell ({}, {}) is out of bounds", .0.row, .0.col)]
    OutOfBounds(GridPos),

    #[error("cell ({}, {}) is already occupied", .0.row, .0.col)]
    Occupied(GridPos),
}
