//! Simulated annealing over loop-erased walks.
//!
//! The state is a walk from the start.  Each iteration proposes one
//! neighbour of the walk's head; improvements (lower heuristic score) are
//! always taken and regressions with the Metropolis probability
//! `exp(-Δ / T)`.  Stepping back onto a cell already on the walk cuts the
//! loop, so the walk is always a simple path and can be returned as-is once
//! it reaches the goal.
//!
//! # Termination (first match wins, checked every iteration)
//!
//! 1. head == goal → success
//! 2. `T < min_temperature` → `NoPath`
//! 3. `iterations ≥ max_iterations` → `NoPath`
//! 4. deadline reached → `DeadlineExceeded`

use tracing::trace;

use da_core::{Cell, CoreError, CoreResult, SearchRng};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::deadline::Budget;
use crate::planner::{preflight, Env};
use crate::{Deadline, Heuristic, Planner, SearchError, SearchResult, Solution};

// ── Parameters ────────────────────────────────────────────────────────────────

/// Temperature schedule, applied once per iteration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Cooling {
    /// `T ← T · ratio`, `0 < ratio < 1`.
    Geometric { ratio: f64 },
    /// `T ← T − step`, `step > 0`.
    Linear { step: f64 },
}

impl Cooling {
    #[inline]
    pub fn next(self, t: f64) -> f64 {
        match self {
            Cooling::Geometric { ratio } => t * ratio,
            Cooling::Linear { step } => t - step,
        }
    }
}

impl Default for Cooling {
    fn default() -> Self {
        Cooling::Geometric { ratio: 0.999 }
    }
}

/// How the proposed neighbour is drawn.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NeighborChoice {
    #[default]
    Uniform,
    /// Probability inversely proportional to the neighbour's terrain cost.
    CostWeighted,
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnnealingParams {
    pub heuristic:           Heuristic,
    pub initial_temperature: f64,
    pub min_temperature:     f64,
    pub cooling:             Cooling,
    pub max_iterations:      u64,
    pub neighbor_choice:     NeighborChoice,
    pub seed:                u64,
}

impl Default for AnnealingParams {
    fn default() -> Self {
        Self {
            heuristic:           Heuristic::Manhattan,
            initial_temperature: 100.0,
            min_temperature:     1e-3,
            cooling:             Cooling::default(),
            max_iterations:      100_000,
            neighbor_choice:     NeighborChoice::Uniform,
            seed:                0,
        }
    }
}

impl AnnealingParams {
    /// Reject schedules under which the temperature would not strictly decay.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.min_temperature > 0.0 && self.initial_temperature >= self.min_temperature) {
            return Err(CoreError::Config(format!(
                "annealing needs 0 < min_temperature ({}) <= initial_temperature ({})",
                self.min_temperature, self.initial_temperature
            )));
        }
        match self.cooling {
            Cooling::Geometric { ratio } if !(ratio > 0.0 && ratio < 1.0) => Err(
                CoreError::Config(format!("geometric cooling ratio must be in (0, 1), got {ratio}")),
            ),
            Cooling::Linear { step } if !(step > 0.0) => Err(CoreError::Config(format!(
                "linear cooling step must be positive, got {step}"
            ))),
            _ => Ok(()),
        }
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default)]
pub struct SimulatedAnnealing {
    pub params: AnnealingParams,
}

/// Everything one annealing run observed, for diagnostics and tests.
#[derive(Clone, Debug)]
pub struct AnnealOutcome {
    pub result:            SearchResult,
    /// Lowest score the walk's head ever had.
    pub best_score:        f64,
    /// Score of the walk's head when the run stopped.
    pub final_score:       f64,
    /// The walk as it was when `best_score` was reached.
    pub best_walk:         Vec<Cell>,
    pub iterations:        u64,
    pub final_temperature: f64,
}

impl SimulatedAnnealing {
    pub fn new(params: AnnealingParams) -> Self {
        Self { params }
    }

    /// Run the search and report the full outcome.
    pub fn anneal(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> AnnealOutcome {
        let p = self.params;
        let env = Env::new(grid, schedule);
        match preflight(&env, start, goal) {
            Err(e) => return AnnealOutcome::settled(Err(e), Vec::new(), f64::INFINITY, p),
            Ok(Some(trivial)) => return AnnealOutcome::settled(Ok(trivial), vec![start], 0.0, p),
            Ok(None) => {}
        }

        let score = |c: Cell| p.heuristic.estimate(c, goal);
        let mut rng = SearchRng::new(p.seed);
        let mut budget = Budget::start(deadline);

        let mut walk = vec![start];
        // Position of each cell on the walk, indexed by grid cell index.
        let mut on_walk: Vec<Option<usize>> = vec![None; grid.cell_count()];
        set(grid, &mut on_walk, start, Some(0));

        let mut best_score = score(start);
        let mut best_walk = walk.clone();
        let mut t = p.initial_temperature;
        let mut iterations = 0u64;
        let mut candidates: Vec<Cell> = Vec::with_capacity(4);
        let mut weights: Vec<f64> = Vec::with_capacity(4);

        let result = loop {
            let head = walk[walk.len() - 1];
            if head == goal {
                break Ok(Solution::new(env.path(walk.clone()), iterations));
            }
            if t < p.min_temperature {
                trace!(iterations, temperature = t, "annealing froze");
                break Err(SearchError::NoPath { expanded: iterations });
            }
            if iterations >= p.max_iterations {
                break Err(SearchError::NoPath { expanded: iterations });
            }
            if !budget.allow() {
                break Err(SearchError::DeadlineExceeded { expanded: iterations });
            }
            iterations += 1;

            // A cell already on the walk keeps its step index after the cut.
            candidates.clear();
            for n in grid.neighbors(head) {
                let step = get(grid, &on_walk, n).unwrap_or(walk.len());
                if env.admits(n, step as u64) {
                    candidates.push(n);
                }
            }

            let proposal = match p.neighbor_choice {
                NeighborChoice::Uniform => rng.choose(&candidates).copied(),
                NeighborChoice::CostWeighted => {
                    weights.clear();
                    weights.extend(candidates.iter().map(|&c| 1.0 / env.cost(c) as f64));
                    rng.choose_weighted(&weights).map(|i| candidates[i])
                }
            };

            if let Some(next) = proposal {
                let delta = score(next) - score(head);
                if delta <= 0.0 || rng.unit() < (-delta / t).exp() {
                    match get(grid, &on_walk, next) {
                        Some(i) => {
                            for cut in walk.drain(i + 1..) {
                                set(grid, &mut on_walk, cut, None);
                            }
                        }
                        None => {
                            set(grid, &mut on_walk, next, Some(walk.len()));
                            walk.push(next);
                        }
                    }
                    let s = score(next);
                    if s < best_score {
                        best_score = s;
                        best_walk.clone_from(&walk);
                    }
                }
            }

            t = p.cooling.next(t);
        };

        let final_score = score(walk[walk.len() - 1]);
        AnnealOutcome {
            result,
            best_score,
            final_score,
            best_walk,
            iterations,
            final_temperature: t,
        }
    }
}

impl AnnealOutcome {
    fn settled(result: SearchResult, walk: Vec<Cell>, score: f64, p: AnnealingParams) -> Self {
        Self {
            result,
            best_score: score,
            final_score: score,
            best_walk: walk,
            iterations: 0,
            final_temperature: p.initial_temperature,
        }
    }
}

impl Planner for SimulatedAnnealing {
    fn name(&self) -> &'static str {
        "simulated_annealing"
    }

    fn search(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> SearchResult {
        self.anneal(grid, schedule, start, goal, deadline).result
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

#[inline]
fn get(grid: &GridMap, on_walk: &[Option<usize>], cell: Cell) -> Option<usize> {
    on_walk[grid.index(cell)?]
}

#[inline]
fn set(grid: &GridMap, on_walk: &mut [Option<usize>], cell: Cell, pos: Option<usize>) {
    if let Some(i) = grid.index(cell) {
        on_walk[i] = pos;
    }
}
