//! Error type for fallible board construction.
//!
//! Gameplay never fails: invalid moves are silent no-ops and broken
//! preconditions (out-of-range coordinates, impossible evolutions) panic.
//! `BoardError` covers the remaining case, building boards and positions
//! from untrusted input such as text fixtures.

use thiserror::Error;

/// Errors produced while building positions or grids.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position ({row}, {col}) is outside the {size}x{size} grid")]
    OutOfBounds { row: usize, col: usize, size: usize },

    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown token code `{0}`")]
    UnknownToken(String),
}
