//! A* search.

use ordered_float::OrderedFloat;

use da_core::Cell;
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::best_first::best_first;
use crate::planner::{preflight, Env};
use crate::{Deadline, Heuristic, Planner, SearchResult};

/// Frontier ordered by `f = g + h`, then lower `h`, then discovery order.
///
/// `h` is the heuristic scaled by the grid's cheapest terrain cost, which
/// keeps it admissible on weighted grids while staying as tight as possible.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStar {
    pub heuristic: Heuristic,
}

impl AStar {
    pub fn new(heuristic: Heuristic) -> Self {
        Self { heuristic }
    }
}

impl Planner for AStar {
    fn name(&self) -> &'static str {
        "astar"
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
        let scale = f64::from(grid.min_cost());
        let heuristic = self.heuristic;
        best_first(
            &env,
            start,
            goal,
            deadline,
            |c| heuristic.estimate(c, goal) * scale,
            |n| (OrderedFloat(n.f()), OrderedFloat(n.h)),
        )
    }
}
