//! Grid-subsystem error type.

use thiserror::Error;

use da_core::{Cell, CoreError};

/// Errors produced by `da-grid`.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} are empty or exceed the cell limit")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("terrain cost at {cell} must be at least 1")]
    ZeroCost { cell: Cell },

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("start {0} is out of bounds or blocked")]
    StartBlocked(Cell),

    #[error("goal {0} is out of bounds or blocked")]
    GoalBlocked(Cell),

    #[error("map parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GridResult<T> = Result<T, GridError>;
