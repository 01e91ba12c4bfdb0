//! Search output: `Path` and `Solution`.

use da_core::{Cell, Tick};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::SearchError;

/// Result of one planner invocation.
pub type SearchResult = Result<Solution, SearchError>;

// ── Path ──────────────────────────────────────────────────────────────────────

/// An ordered cell sequence from start to goal, both inclusive.
///
/// The path is empty only for a trivial query (start == goal).  `cost` is the
/// sum of the terrain costs of every entered cell; the start cell is free.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells:       Vec<Cell>,
    cost:        u64,
    computed_at: Tick,
}

impl Path {
    /// Build a path over `grid`, summing terrain costs.  Impassable cells
    /// contribute nothing; callers only pass cells the search admitted.
    pub fn new(grid: &GridMap, cells: Vec<Cell>, computed_at: Tick) -> Self {
        let cost = cells
            .iter()
            .skip(1)
            .map(|&c| u64::from(grid.cost(c).unwrap_or(0)))
            .sum();
        Self { cells, cost, computed_at }
    }

    /// The path for start == goal.
    pub fn empty(computed_at: Tick) -> Self {
        Self { cells: Vec::new(), cost: 0, computed_at }
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Number of cells, start and goal included.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (`len() - 1`, or 0 for the empty path).
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[inline]
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Tick at which the search that produced this path started.
    #[inline]
    pub fn computed_at(&self) -> Tick {
        self.computed_at
    }

    pub fn first(&self) -> Option<Cell> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<Cell> {
        self.cells.last().copied()
    }

    /// Checks every path invariant against `grid` and, if given, `view`:
    /// consecutive cells are 4-adjacent, no cell is a static obstacle, and
    /// step `k` is free in the view at step `k` (the start excluded).
    pub fn is_feasible(&self, grid: &GridMap, view: Option<ScheduleView<'_>>) -> bool {
        let adjacent = self.cells.windows(2).all(|w| w[0].is_adjacent(w[1]));
        let passable = self.cells.iter().all(|&c| grid.is_passable(c));
        let unobstructed = view.is_none_or(|v| {
            self.cells
                .iter()
                .enumerate()
                .skip(1)
                .all(|(k, &c)| !v.blocked(c, k as u64))
        });
        adjacent && passable && unobstructed
    }
}

// ── Solution ──────────────────────────────────────────────────────────────────

/// A successful search: the path plus the work it took.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    pub path:           Path,
    pub nodes_expanded: u64,
}

impl Solution {
    pub fn new(path: Path, nodes_expanded: u64) -> Self {
        Self { path, nodes_expanded }
    }
}
