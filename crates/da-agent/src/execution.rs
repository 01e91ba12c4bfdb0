//! Per-run execution state and the records handed to observers.

use std::time::Duration;

use da_core::{Cell, Tick};
use da_search::{Algorithm, FailureReason, Path, Planner, SearchResult};

// ── ExecutionState ────────────────────────────────────────────────────────────

/// Everything that changes while one delivery runs.
///
/// `path.get(cursor) == Some(position)` whenever a non-empty path is being
/// executed.  `path` is `None` until the first plan succeeds; for
/// start == goal the committed path is empty.
#[derive(Clone, Debug)]
pub struct ExecutionState {
    pub path:       Option<Path>,
    pub cursor:     usize,
    pub position:   Cell,
    pub tick:       Tick,
    /// Planner that produced `path` (or will produce the next one).
    pub algorithm:  Algorithm,
    pub fuel:       u64,
    pub replans:    u32,
    pub moves:      u64,
    /// Terrain cost of every cell entered so far.
    pub cost:       u64,
    /// Cells occupied so far, start included.
    pub trail:      Vec<Cell>,
}

impl ExecutionState {
    pub fn new(start: Cell, tick: Tick, fuel: u64, algorithm: Algorithm) -> Self {
        Self {
            path: None,
            cursor: 0,
            position: start,
            tick,
            algorithm,
            fuel,
            replans: 0,
            moves: 0,
            cost: 0,
            trail: vec![start],
        }
    }

    /// Adopt a freshly planned path; the agent stands on its first cell.
    pub fn commit(&mut self, path: Path) {
        self.path = Some(path);
        self.cursor = 0;
    }

    /// The cell the next move enters, `None` at the end of the path.
    #[inline]
    pub fn next_cell(&self) -> Option<Cell> {
        self.path.as_ref()?.get(self.cursor + 1)
    }

    /// Move onto `cell`, paying `cost`.  One tick passes.
    pub fn advance(&mut self, cell: Cell, cost: u64) {
        self.cursor += 1;
        self.position = cell;
        self.tick = self.tick.next();
        self.fuel = self.fuel.saturating_sub(1);
        self.moves += 1;
        self.cost += cost;
        self.trail.push(cell);
    }

    pub fn snapshot(&self) -> ExecutionSnapshot {
        ExecutionSnapshot {
            tick:     self.tick,
            position: self.position,
            cursor:   self.cursor,
            fuel:     self.fuel,
            replans:  self.replans,
            cost:     self.cost,
        }
    }
}

// ── Observer records ──────────────────────────────────────────────────────────

/// Agent state right after one move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ExecutionSnapshot {
    pub tick:     Tick,
    pub position: Cell,
    pub cursor:   usize,
    pub fuel:     u64,
    pub replans:  u32,
    pub cost:     u64,
}

/// One planner invocation, as seen by the metrics recorder.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchRecord {
    pub tick:           Tick,
    pub algorithm:      &'static str,
    pub from:           Cell,
    pub goal:           Cell,
    pub success:        bool,
    pub path_cost:      Option<u64>,
    pub path_length:    Option<usize>,
    pub nodes_expanded: u64,
    pub elapsed:        Duration,
    pub failure:        Option<FailureReason>,
    /// 0 for the initial plan, then 1, 2, … per replan.
    pub replan:         u32,
}

impl SearchRecord {
    pub fn new(
        exec:      &ExecutionState,
        algorithm: &Algorithm,
        goal:      Cell,
        result:    &SearchResult,
        elapsed:   Duration,
    ) -> Self {
        let (path_cost, path_length, nodes_expanded, failure) = match result {
            Ok(sol) => (Some(sol.path.cost()), Some(sol.path.len()), sol.nodes_expanded, None),
            Err(e) => (None, None, e.nodes_expanded(), Some(e.reason())),
        };
        Self {
            tick: exec.tick,
            algorithm: algorithm.name(),
            from: exec.position,
            goal,
            success: result.is_ok(),
            path_cost,
            path_length,
            nodes_expanded,
            elapsed,
            failure,
            replan: exec.replans,
        }
    }
}
