use thiserror::Error;

use da_grid::GridError;
use da_search::SearchError;

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("controller configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("controller has already started")]
    AlreadyStarted,

    #[error("controller has not produced a plan yet")]
    NotStarted,

    #[error("planning failed: {0}")]
    Search(#[from] SearchError),

    #[error("{0} exhausted before reaching the goal")]
    ResourceExhausted(&'static str),
}

pub type ControllerResult<T> = Result<T, ControllerError>;
