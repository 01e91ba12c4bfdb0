//! `Algorithm`: every planner plus its parameters as one value.
//!
//! The controller, the comparison runner and configuration files all pick
//! planners through this enum.  It implements [`Planner`] itself by
//! dispatching to the concrete type, and logs one `debug!` line per search.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use tracing::debug;

use da_core::{Cell, CoreError};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::annealing::{AnnealingParams, SimulatedAnnealing};
use crate::hill_climbing::{HillClimbing, HillClimbingParams};
use crate::{AStar, Bfs, Deadline, Heuristic, Planner, SearchResult, UniformCost};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Algorithm {
    Bfs,
    #[cfg_attr(feature = "serde", serde(rename = "ucs"))]
    UniformCost,
    #[cfg_attr(feature = "serde", serde(rename = "astar"))]
    AStar { heuristic: Heuristic },
    HillClimbing(HillClimbingParams),
    SimulatedAnnealing(AnnealingParams),
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::AStar { heuristic: Heuristic::Manhattan }
    }
}

impl Algorithm {
    /// Names accepted by [`FromStr`], in presentation order.
    pub const NAMES: [&'static str; 5] =
        ["bfs", "ucs", "astar", "hill_climbing", "simulated_annealing"];

    /// All five algorithms with default parameters.
    pub fn all() -> Vec<Algorithm> {
        vec![
            Algorithm::Bfs,
            Algorithm::UniformCost,
            Algorithm::AStar { heuristic: Heuristic::default() },
            Algorithm::HillClimbing(HillClimbingParams::default()),
            Algorithm::SimulatedAnnealing(AnnealingParams::default()),
        ]
    }

    /// Replace the heuristic of the informed and local-search variants.
    /// BFS and UCS are returned unchanged.
    pub fn with_heuristic(self, h: Heuristic) -> Self {
        match self {
            Algorithm::AStar { .. } => Algorithm::AStar { heuristic: h },
            Algorithm::HillClimbing(p) => Algorithm::HillClimbing(HillClimbingParams { heuristic: h, ..p }),
            Algorithm::SimulatedAnnealing(p) => {
                Algorithm::SimulatedAnnealing(AnnealingParams { heuristic: h, ..p })
            }
            other => other,
        }
    }

    /// Replace the seed of the stochastic variants.
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            Algorithm::HillClimbing(p) => Algorithm::HillClimbing(HillClimbingParams { seed, ..p }),
            Algorithm::SimulatedAnnealing(p) => {
                Algorithm::SimulatedAnnealing(AnnealingParams { seed, ..p })
            }
            other => other,
        }
    }

    /// Seed of the stochastic variants; `None` for the systematic ones.
    pub fn seed(&self) -> Option<u64> {
        match self {
            Algorithm::HillClimbing(p) => Some(p.seed),
            Algorithm::SimulatedAnnealing(p) => Some(p.seed),
            _ => None,
        }
    }

    /// `true` for the local-search variants that trade optimality for speed.
    pub fn is_local_search(&self) -> bool {
        matches!(self, Algorithm::HillClimbing(_) | Algorithm::SimulatedAnnealing(_))
    }

    /// Check parameter sanity before a run.
    pub fn validate(&self) -> Result<(), CoreError> {
        match self {
            Algorithm::SimulatedAnnealing(p) => p.validate(),
            _ => Ok(()),
        }
    }

    fn dispatch(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> SearchResult {
        match *self {
            Algorithm::Bfs => Bfs.search(grid, schedule, start, goal, deadline),
            Algorithm::UniformCost => UniformCost.search(grid, schedule, start, goal, deadline),
            Algorithm::AStar { heuristic } => {
                AStar::new(heuristic).search(grid, schedule, start, goal, deadline)
            }
            Algorithm::HillClimbing(params) => {
                HillClimbing::new(params).search(grid, schedule, start, goal, deadline)
            }
            Algorithm::SimulatedAnnealing(params) => {
                SimulatedAnnealing::new(params).search(grid, schedule, start, goal, deadline)
            }
        }
    }
}

impl Planner for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::UniformCost => "ucs",
            Algorithm::AStar { .. } => "astar",
            Algorithm::HillClimbing(_) => "hill_climbing",
            Algorithm::SimulatedAnnealing(_) => "simulated_annealing",
        }
    }

    fn search(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> SearchResult {
        let began = Instant::now();
        let result = self.dispatch(grid, schedule, start, goal, deadline);
        match &result {
            Ok(sol) => debug!(
                algorithm = self.name(),
                %start,
                %goal,
                cost = sol.path.cost(),
                length = sol.path.len(),
                expanded = sol.nodes_expanded,
                elapsed_us = began.elapsed().as_micros() as u64,
                "search succeeded"
            ),
            Err(e) => debug!(
                algorithm = self.name(),
                %start,
                %goal,
                reason = %e.reason(),
                expanded = e.nodes_expanded(),
                elapsed_us = began.elapsed().as_micros() as u64,
                "search failed"
            ),
        }
        result
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CoreError;

    /// Parse an algorithm name into that algorithm with default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bfs" => Ok(Algorithm::Bfs),
            "ucs" => Ok(Algorithm::UniformCost),
            "astar" => Ok(Algorithm::AStar { heuristic: Heuristic::default() }),
            "hill_climbing" => Ok(Algorithm::HillClimbing(HillClimbingParams::default())),
            "simulated_annealing" => {
                Ok(Algorithm::SimulatedAnnealing(AnnealingParams::default()))
            }
            other => Err(CoreError::Parse(format!(
                "unknown algorithm {other:?}: expected one of {}",
                Algorithm::NAMES.join(", ")
            ))),
        }
    }
}
