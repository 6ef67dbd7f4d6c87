//! Error types for forcing-core.

use thiserror::Error;

/// Result type for forcing-core boundary operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the boundary, before values reach the solver.
///
/// The solver, validator and resolver themselves are total: every call
/// produces a grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Target outside `1..=9_999_999`.
    #[error("target {0} is out of range (expected 1..=9999999)")]
    TargetOutOfRange(i64),

    /// Row or column index outside the 4x4 grid.
    #[error("cell ({row}, {col}) is outside the 4x4 grid")]
    CellOutOfBounds { row: usize, col: usize },

    /// A second edit landed on a different row of an already edited column.
    #[error("column {col} is already edited at row {existing_row}; cannot edit row {row}")]
    ColumnAlreadyEdited {
        col: usize,
        row: usize,
        existing_row: usize,
    },

    /// Grid text could not be parsed.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
}
