//! Uniform-cost search (Dijkstra on the grid).

use da_core::Cell;
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::best_first::best_first;
use crate::planner::{preflight, Env};
use crate::{Deadline, Planner, SearchResult};

/// Frontier ordered by cost-so-far `g`; ties by discovery order.
///
/// Cost-optimal for any terrain costs.
#[derive(Copy, Clone, Debug, Default)]
pub struct UniformCost;

impl Planner for UniformCost {
    fn name(&self) -> &'static str {
        "ucs"
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
        best_first(&env, start, goal, deadline, |_| 0.0, |n| n.g)
    }
}
