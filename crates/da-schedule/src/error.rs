use thiserror::Error;

use da_core::{Cell, ObstacleId, Tick};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{obstacle} visits {cell}, which is outside the grid")]
    OutOfBounds { obstacle: ObstacleId, cell: Cell },

    #[error("{obstacle} trajectory is not strictly increasing in time at {tick}")]
    NonMonotonic { obstacle: ObstacleId, tick: Tick },

    #[error("{0} is defined more than once")]
    DuplicateObstacle(ObstacleId),

    #[error("{0} mixes motion models across its trajectory rows")]
    MixedMotion(ObstacleId),

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
