//! The `Controller` and its plan / execute / replan state machine.

use std::mem;
use std::time::Instant;

use tracing::{debug, info, warn};

use da_core::{Cell, Tick};
use da_grid::GridMap;
use da_schedule::ObstacleSchedule;
use da_search::{Path, Planner};

use crate::{
    ControllerConfig, ControllerError, ControllerObserver, ControllerResult, ControllerState,
    ExecutionState, Failure, ReplanContext, ReplanPolicy, RunSummary, SearchRecord,
};

// ── Controller ────────────────────────────────────────────────────────────────

/// Drives one agent from start to goal.
///
/// Each call to [`step`](Self::step) performs exactly one transition:
///
/// | State       | Action                                                      |
/// |-------------|-------------------------------------------------------------|
/// | `Idle`      | → `Planning`                                                |
/// | `Planning`  | search from the current cell at the current tick;           |
/// |             | success → `Executing`, failure → `Failed`                   |
/// | `Executing` | path end → `Succeeded`; no fuel → `Failed`;                 |
/// |             | next cell occupied at `now + 1` → `Blocked`; else one move  |
/// | `Blocked`   | replan limit hit → `Failed`; else policy picks → `Planning` |
/// | terminal    | no-op                                                       |
///
/// The grid and schedule are borrowed, so many controllers can run over the
/// same instance concurrently.  Create via
/// [`ControllerBuilder`][crate::ControllerBuilder].
pub struct Controller<'a, P: ReplanPolicy> {
    pub(crate) grid:     &'a GridMap,
    pub(crate) schedule: Option<&'a ObstacleSchedule>,
    pub(crate) goal:     Cell,
    pub(crate) config:   ControllerConfig,
    pub(crate) policy:   P,
    pub(crate) state:    ControllerState,
    pub(crate) exec:     ExecutionState,

    /// Planner invocations so far.
    pub(crate) searches:       u32,
    pub(crate) nodes_expanded: u64,
}

impl<'a, P: ReplanPolicy> Controller<'a, P> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn execution(&self) -> &ExecutionState {
        &self.exec
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> Cell {
        self.exec.position
    }

    #[inline]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[inline]
    pub fn tick(&self) -> Tick {
        self.exec.tick
    }

    /// The currently committed path.
    ///
    /// # Errors
    /// [`ControllerError::NotStarted`] until a plan has succeeded.
    pub fn path(&self) -> ControllerResult<&Path> {
        self.exec.path.as_ref().ok_or(ControllerError::NotStarted)
    }

    // ── Driving ───────────────────────────────────────────────────────────

    /// Leave `Idle` for `Planning`.
    ///
    /// Optional: [`step`](Self::step) does the same from `Idle`.
    ///
    /// # Errors
    /// [`ControllerError::AlreadyStarted`] from any other state.
    pub fn begin<O: ControllerObserver>(&mut self, observer: &mut O) -> ControllerResult<()> {
        if self.state != ControllerState::Idle {
            return Err(ControllerError::AlreadyStarted);
        }
        self.transition(ControllerState::Planning, observer);
        Ok(())
    }

    /// Perform one transition and return the resulting state.
    pub fn step<O: ControllerObserver>(&mut self, observer: &mut O) -> &ControllerState {
        let next = match self.state {
            ControllerState::Idle => ControllerState::Planning,
            ControllerState::Planning => self.plan(observer),
            ControllerState::Executing => self.execute(observer),
            ControllerState::Blocked => self.replan(),
            ControllerState::Succeeded | ControllerState::Failed(_) => return &self.state,
        };
        self.transition(next, observer);
        &self.state
    }

    /// Step until a terminal state, then report the run to `observer`.
    ///
    /// Always terminates: every `Executing` step either moves (spending fuel)
    /// or leaves `Executing`, and a fresh plan is never blocked on its first
    /// move at the tick it was made.
    pub fn run<O: ControllerObserver>(&mut self, observer: &mut O) -> RunSummary {
        while !self.state.is_terminal() {
            self.step(observer);
        }
        let summary = self.summary();
        match summary.outcome.failure() {
            None => info!(
                tick = summary.tick.0,
                moves = summary.moves,
                cost = summary.cost,
                replans = summary.replans,
                "delivery succeeded"
            ),
            Some(why) => warn!(
                tick = summary.tick.0,
                position = %summary.position,
                reason = %why.reason(),
                replans = summary.replans,
                "delivery failed: {why}"
            ),
        }
        observer.on_finish(&summary);
        summary
    }

    /// Snapshot of the run so far.  Final once the state is terminal.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            outcome:        self.state.clone(),
            position:       self.exec.position,
            tick:           self.exec.tick,
            trail:          self.exec.trail.clone(),
            moves:          self.exec.moves,
            cost:           self.exec.cost,
            fuel_remaining: self.exec.fuel,
            replans:        self.exec.replans,
            searches:       self.searches,
            nodes_expanded: self.nodes_expanded,
        }
    }

    // ── State handlers ────────────────────────────────────────────────────

    fn plan<O: ControllerObserver>(&mut self, observer: &mut O) -> ControllerState {
        let algorithm = self.exec.algorithm;
        let view = self.schedule.map(|s| s.view(self.exec.tick));

        let began = Instant::now();
        let result = algorithm.search(
            self.grid,
            view,
            self.exec.position,
            self.goal,
            &self.config.deadline,
        );
        let record = SearchRecord::new(&self.exec, &algorithm, self.goal, &result, began.elapsed());

        self.searches += 1;
        self.nodes_expanded += record.nodes_expanded;
        observer.on_search(&record);

        match result {
            Ok(solution) => {
                self.exec.commit(solution.path);
                ControllerState::Executing
            }
            Err(e) => ControllerState::Failed(Failure::Search(e)),
        }
    }

    fn execute<O: ControllerObserver>(&mut self, observer: &mut O) -> ControllerState {
        let Some(next) = self.exec.next_cell() else {
            return ControllerState::Succeeded;
        };
        if self.exec.fuel == 0 {
            return ControllerState::Failed(Failure::FuelExhausted);
        }
        // Knowledge stops at `now`; the move lands at `now + 1`.
        if let Some(schedule) = self.schedule
            && schedule.view(self.exec.tick).blocked(next, 1)
        {
            warn!(
                tick = self.exec.tick.0,
                position = %self.exec.position,
                next = %next,
                "path blocked"
            );
            return ControllerState::Blocked;
        }

        let cost = self.grid.cost(next).map_or(0, u64::from);
        self.exec.advance(next, cost);
        observer.on_step(&self.exec.snapshot());
        ControllerState::Executing
    }

    fn replan(&mut self) -> ControllerState {
        if let Some(limit) = self.config.max_replans
            && self.exec.replans >= limit
        {
            return ControllerState::Failed(Failure::ReplanLimit { replans: self.exec.replans });
        }
        let ctx = ReplanContext {
            position: self.exec.position,
            goal:     self.goal,
            tick:     self.exec.tick,
            fuel:     self.exec.fuel,
            replans:  self.exec.replans,
            previous: self.exec.algorithm,
        };
        let chosen = self.policy.choose(&ctx);
        self.exec.replans += 1;
        self.exec.algorithm = chosen;
        info!(
            tick = self.exec.tick.0,
            replan = self.exec.replans,
            algorithm = chosen.name(),
            "replanning"
        );
        ControllerState::Planning
    }

    fn transition<O: ControllerObserver>(&mut self, next: ControllerState, observer: &mut O) {
        if next == self.state {
            return;
        }
        let from = mem::replace(&mut self.state, next);
        debug!(tick = self.exec.tick.0, from = from.name(), to = self.state.name(), "transition");
        observer.on_transition(self.exec.tick, &from, &self.state);
    }
}
