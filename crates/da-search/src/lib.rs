//! `da-search`: path planners over a [`da_grid::GridMap`], optionally
//! avoiding the dynamic obstacles of a [`da_schedule::ScheduleView`].
//!
//! # Crate layout
//!
//! | Module             | Contents                                                  |
//! |--------------------|-----------------------------------------------------------|
//! | [`planner`]        | `Planner` trait                                           |
//! | [`algorithm`]      | `Algorithm`: tagged union of all planners + parameters    |
//! | [`bfs`]            | `Bfs`                                                     |
//! | [`ucs`]            | `UniformCost`                                             |
//! | [`astar`]          | `AStar`                                                   |
//! | [`hill_climbing`]  | `HillClimbing`, `HillClimbingParams`                      |
//! | [`annealing`]      | `SimulatedAnnealing`, `AnnealingParams`, `Cooling`, …     |
//! | [`heuristic`]      | `Heuristic` (Manhattan, Euclidean, Diagonal)              |
//! | [`frontier`]       | `Frontier<K>`: ordered open list with decrease-key        |
//! | [`node`]           | `Node`, `NodeArena`                                       |
//! | [`deadline`]       | `Deadline`                                                |
//! | [`path`]           | `Path`, `Solution`, `SearchResult`                        |
//! | [`compare`]        | `compare`, `repeat`: all planners on one instance         |
//! | [`error`]          | `SearchError`, `FailureReason`                            |
//!
//! # Counting expansions
//!
//! | Planner              | `nodes_expanded`                                  |
//! |----------------------|---------------------------------------------------|
//! | BFS                  | size of the visited set (marked on discovery)     |
//! | UCS, A*              | closed non-goal nodes                             |
//! | Hill climbing        | climb iterations (one neighbourhood scan each)    |
//! | Simulated annealing  | annealing iterations                              |
//!
//! With these definitions, on a uniform-cost grid
//! `A* ≤ UCS ≤ BFS` for the same query.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | [`compare`](compare::compare) runs on Rayon's pool.       |
//! | `serde`    | Derives `Serialize`/`Deserialize` on parameter types.     |

pub mod algorithm;
pub mod annealing;
pub mod astar;
mod best_first;
pub mod bfs;
pub mod compare;
pub mod deadline;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod hill_climbing;
pub mod node;
pub mod path;
pub mod planner;
pub mod ucs;

#[cfg(test)]
mod tests;

pub use algorithm::Algorithm;
pub use annealing::{AnnealOutcome, AnnealingParams, Cooling, NeighborChoice, SimulatedAnnealing};
pub use astar::AStar;
pub use bfs::Bfs;
pub use compare::{compare, repeat, Comparison, RunStats};
pub use deadline::Deadline;
pub use error::{FailureReason, SearchError};
pub use heuristic::Heuristic;
pub use hill_climbing::{HillClimbing, HillClimbingParams};
pub use path::{Path, SearchResult, Solution};
pub use planner::Planner;
pub use ucs::UniformCost;
