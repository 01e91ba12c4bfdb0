//! The `Planner` trait and the plumbing every algorithm shares.

use da_core::{Cell, Tick};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::{Deadline, Path, SearchError, SearchResult, Solution};

// ── Planner trait ─────────────────────────────────────────────────────────────

/// A path-finding algorithm.
///
/// # Contract
///
/// - Start out of bounds or blocked → [`SearchError::StartBlocked`]; the same
///   for the goal → [`SearchError::GoalBlocked`].  Start is checked first.
/// - `start == goal` → an empty path with cost 0 and no expansions.
/// - With a `schedule`, a cell reached after `k` moves is refused if
///   `schedule.blocked(cell, k)`.
/// - The deadline is checked before every expansion.
/// - Same inputs (and seed, for stochastic planners) → same result.
///
/// # Thread safety
///
/// Planners are `Send + Sync` and keep all per-invocation state on the
/// stack, so one planner value can serve concurrent searches.
pub trait Planner: Send + Sync {
    /// Short stable name used on the command line and in metrics.
    fn name(&self) -> &'static str;

    fn search(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> SearchResult;
}

// ── Shared plumbing ───────────────────────────────────────────────────────────

/// The environment as one search sees it: static grid plus optional
/// time-indexed obstacles.
#[derive(Copy, Clone)]
pub(crate) struct Env<'a> {
    pub grid: &'a GridMap,
    pub view: Option<ScheduleView<'a>>,
}

impl<'a> Env<'a> {
    pub fn new(grid: &'a GridMap, view: Option<ScheduleView<'a>>) -> Self {
        Self { grid, view }
    }

    /// Tick the returned path is stamped with.
    #[inline]
    pub fn origin(&self) -> Tick {
        self.view.map_or(Tick::ZERO, |v| v.origin())
    }

    /// `cell` may be occupied by the agent at path step `step`.
    #[inline]
    pub fn admits(&self, cell: Cell, step: u64) -> bool {
        self.view.is_none_or(|v| !v.blocked(cell, step))
    }

    /// Neighbours of `cell` (which the agent occupies at `step`) that can be
    /// entered at `step + 1`, in the fixed neighbour order.
    #[inline]
    pub fn successors(&self, cell: Cell, step: u64) -> impl Iterator<Item = Cell> + '_ {
        self.grid
            .neighbors(cell)
            .filter(move |&n| self.admits(n, step + 1))
    }

    #[inline]
    pub fn cost(&self, cell: Cell) -> u64 {
        u64::from(self.grid.cost(cell).unwrap_or(0))
    }

    pub fn path(&self, cells: Vec<Cell>) -> Path {
        Path::new(self.grid, cells, self.origin())
    }
}

/// Input validation common to every planner.
///
/// Returns `Ok(Some(_))` with the trivial solution when `start == goal`.
pub(crate) fn preflight(env: &Env<'_>, start: Cell, goal: Cell) -> Result<Option<Solution>, SearchError> {
    if !env.grid.is_passable(start) {
        return Err(SearchError::StartBlocked { cell: start });
    }
    if !env.grid.is_passable(goal) {
        return Err(SearchError::GoalBlocked { cell: goal });
    }
    if start == goal {
        return Ok(Some(Solution::new(Path::empty(env.origin()), 0)));
    }
    Ok(None)
}
