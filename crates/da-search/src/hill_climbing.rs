//! Greedy hill climbing with random restarts.
//!
//! # Explored region
//!
//! Every neighbour the climber scores is recorded in the node arena with the
//! cell it was scored from as parent.  The arena therefore holds exactly the
//! visited cells plus their unvisited, enterable neighbours, and every one of
//! them hangs off the start through the parent tree.  A restart jumps to a
//! uniformly drawn arena node, so the reconstructed path is always a valid
//! 4-connected walk from the start, even after many restarts.

use tracing::trace;

use da_core::{Cell, NodeIdx, SearchRng};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::deadline::Budget;
use crate::node::{Node, NodeArena};
use crate::planner::{preflight, Env};
use crate::{Deadline, Heuristic, Planner, SearchError, SearchResult, Solution};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HillClimbingParams {
    /// Score minimised by the climb.
    pub heuristic:    Heuristic,
    /// Restarts allowed before the next local optimum ends the search.
    pub max_restarts: u32,
    pub seed:         u64,
}

impl Default for HillClimbingParams {
    fn default() -> Self {
        Self { heuristic: Heuristic::Manhattan, max_restarts: 10, seed: 0 }
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct HillClimbing {
    pub params: HillClimbingParams,
}

impl HillClimbing {
    pub fn new(params: HillClimbingParams) -> Self {
        Self { params }
    }
}

impl Planner for HillClimbing {
    fn name(&self) -> &'static str {
        "hill_climbing"
    }

    fn search(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> SearchResult {
        let env = Env::new(grid, schedule);
        if let Some(trivial) = preflight(&env, start, goal)? {
            return Ok(trivial);
        }

        let HillClimbingParams { heuristic, max_restarts, seed } = self.params;
        let score = |c: Cell| heuristic.estimate(c, goal);

        let mut rng = SearchRng::new(seed);
        let mut budget = Budget::start(deadline);
        let mut arena = NodeArena::new(grid);
        let mut visited = vec![false; grid.cell_count()];
        let mut restarts = 0u32;

        let mut current = arena.insert(Node::root(start, score(start)));
        mark(grid, &mut visited, start);

        loop {
            let node = *arena.get(current);
            if node.cell == goal {
                let path = env.path(arena.path_to(current));
                return Ok(Solution::new(path, budget.spent()));
            }
            if !budget.allow() {
                return Err(SearchError::DeadlineExceeded { expanded: budget.spent() });
            }

            // Strictly best unvisited neighbour; the first one wins ties.
            let mut best: Option<(NodeIdx, f64)> = None;
            for next in env.successors(node.cell, node.steps) {
                if is_visited(grid, &visited, next) {
                    continue;
                }
                let idx = match arena.lookup(next) {
                    Some(seen) => seen,
                    None => arena.insert(Node {
                        cell:   next,
                        g:      node.g + env.cost(next),
                        steps:  node.steps + 1,
                        h:      score(next),
                        parent: current,
                        closed: false,
                    }),
                };
                let h = arena.get(idx).h;
                if best.is_none_or(|(_, b)| h < b) {
                    best = Some((idx, h));
                }
            }

            match best {
                Some((idx, h)) if h < node.h => current = idx,
                _ => {
                    if restarts == max_restarts {
                        return Err(SearchError::RestartBudgetExhausted {
                            restarts,
                            expanded: budget.spent(),
                        });
                    }
                    restarts += 1;
                    current = NodeIdx(rng.gen_range(0..arena.len()) as u32);
                    trace!(
                        restart = restarts,
                        from = %node.cell,
                        to = %arena.get(current).cell,
                        "hill climbing restart"
                    );
                }
            }
            mark(grid, &mut visited, arena.get(current).cell);
        }
    }
}

#[inline]
fn mark(grid: &GridMap, visited: &mut [bool], cell: Cell) {
    if let Some(i) = grid.index(cell) {
        visited[i] = true;
    }
}

#[inline]
fn is_visited(grid: &GridMap, visited: &[bool], cell: Cell) -> bool {
    grid.index(cell).is_some_and(|i| visited[i])
}
