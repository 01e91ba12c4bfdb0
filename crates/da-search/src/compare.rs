//! Run several planners on the same instance and collect their results.
//!
//! [`compare`] runs each planner once; [`repeat`] runs each one `runs` times
//! with derived seeds and folds the outcomes into [`RunStats`].

use std::time::{Duration, Instant};

use da_core::{Cell, SearchRng};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::{Algorithm, Deadline, Planner, SearchResult};

/// One planner's outcome on the shared instance.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub algorithm: Algorithm,
    pub result:    SearchResult,
    pub elapsed:   Duration,
}

impl Comparison {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }

    pub fn nodes_expanded(&self) -> u64 {
        match &self.result {
            Ok(sol) => sol.nodes_expanded,
            Err(e) => e.nodes_expanded(),
        }
    }
}

/// Run every algorithm in `algorithms` from `start` to `goal`.
///
/// Results come back in the order of `algorithms`.  Each search is
/// independent (own arena, own RNG), so with the `parallel` feature they run
/// on Rayon's pool and the results are identical to a sequential run apart
/// from `elapsed`.
pub fn compare(
    grid:       &GridMap,
    schedule:   Option<ScheduleView<'_>>,
    start:      Cell,
    goal:       Cell,
    algorithms: &[Algorithm],
    deadline:   &Deadline,
) -> Vec<Comparison> {
    let run = |algorithm: &Algorithm| {
        let began = Instant::now();
        let result = algorithm.search(grid, schedule, start, goal, deadline);
        Comparison { algorithm: *algorithm, result, elapsed: began.elapsed() }
    };

    #[cfg(not(feature = "parallel"))]
    {
        algorithms.iter().map(run).collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        algorithms.par_iter().map(run).collect()
    }
}

// ── Repeated runs ─────────────────────────────────────────────────────────────

/// Averages over repeated runs of one planner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RunStats {
    pub algorithm:          &'static str,
    pub runs:               u32,
    pub successes:          u32,
    /// Over successful runs only; `None` when every run failed.
    pub avg_path_cost:      Option<f64>,
    pub avg_nodes_expanded: f64,
    pub avg_elapsed_secs:   f64,
    pub success_rate:       f64,
    /// Failure tag of the first failed run, if any.
    pub first_failure:      Option<&'static str>,
}

impl RunStats {
    /// Fold the runs of one planner.  `rows` must not be empty.
    fn from_runs(rows: &[Comparison]) -> Self {
        let runs = rows.len() as u32;
        let n = f64::from(runs.max(1));
        let costs: Vec<u64> = rows
            .iter()
            .filter_map(|r| r.result.as_ref().ok().map(|s| s.path.cost()))
            .collect();
        let successes = costs.len() as u32;
        Self {
            algorithm:          rows.first().map_or("", |r| r.algorithm.name()),
            runs,
            successes,
            avg_path_cost:      (successes > 0)
                .then(|| costs.iter().sum::<u64>() as f64 / f64::from(successes)),
            avg_nodes_expanded: rows.iter().map(|r| r.nodes_expanded() as f64).sum::<f64>() / n,
            avg_elapsed_secs:   rows.iter().map(|r| r.elapsed.as_secs_f64()).sum::<f64>() / n,
            success_rate:       f64::from(successes) / n,
            first_failure:      rows
                .iter()
                .find_map(|r| r.result.as_ref().err())
                .map(|e| e.reason().tag()),
        }
    }
}

/// Run every algorithm `runs` times (at least once) and average the results.
///
/// Run `i` of a stochastic planner uses `SearchRng::derive_seed(seed, i)`, so
/// run 0 is exactly the single run [`compare`] would make.  Systematic
/// planners repeat identically apart from `elapsed`.  All runs go through
/// [`compare`], so they share its Rayon pool under `parallel`.
pub fn repeat(
    grid:       &GridMap,
    schedule:   Option<ScheduleView<'_>>,
    start:      Cell,
    goal:       Cell,
    algorithms: &[Algorithm],
    runs:       u32,
    deadline:   &Deadline,
) -> Vec<RunStats> {
    let runs = runs.max(1);
    let plan: Vec<Algorithm> = algorithms
        .iter()
        .flat_map(|a| (0..runs).map(move |i| reseed(*a, i)))
        .collect();
    compare(grid, schedule, start, goal, &plan, deadline)
        .chunks(runs as usize)
        .map(RunStats::from_runs)
        .collect()
}

fn reseed(algorithm: Algorithm, run: u32) -> Algorithm {
    match algorithm.seed() {
        Some(seed) => algorithm.with_seed(SearchRng::derive_seed(seed, u64::from(run))),
        None => algorithm,
    }
}
