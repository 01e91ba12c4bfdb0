//! `MapSpec`: a grid together with its delivery endpoints.

use da_core::Cell;

use crate::{GridError, GridMap, GridResult};

/// A grid plus validated start and goal cells.
///
/// Both endpoints are guaranteed in bounds and free of static obstacles for
/// as long as the value exists; the only constructor is [`MapSpec::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapSpec {
    grid:  GridMap,
    start: Cell,
    goal:  Cell,
}

impl MapSpec {
    pub fn new(grid: GridMap, start: Cell, goal: Cell) -> GridResult<Self> {
        validate(&grid, start, goal)?;
        Ok(Self { grid, start, goal })
    }

    #[inline]
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Cell {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    /// Replace the endpoints, re-running validation.
    pub fn with_endpoints(self, start: Cell, goal: Cell) -> GridResult<Self> {
        Self::new(self.grid, start, goal)
    }

    pub fn into_grid(self) -> GridMap {
        self.grid
    }
}

/// Check that `start` and `goal` are usable endpoints on `grid`.
///
/// Start is checked first, so a map where both are blocked reports
/// [`GridError::StartBlocked`].
pub fn validate(grid: &GridMap, start: Cell, goal: Cell) -> GridResult<()> {
    if !grid.is_passable(start) {
        return Err(GridError::StartBlocked(start));
    }
    if !grid.is_passable(goal) {
        return Err(GridError::GoalBlocked(goal));
    }
    Ok(())
}
