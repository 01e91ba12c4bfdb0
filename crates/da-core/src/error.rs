//! Framework error type.
//!
//! Sub-crates define their own error enums (`GridError`, `SearchError`, …)
//! and wrap `CoreError` as one variant where they need it.

use thiserror::Error;

use crate::Cell;

/// The base error type for `da-core` and a common building block for
/// sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `da-core`.
pub type CoreResult<T> = Result<T, CoreError>;
