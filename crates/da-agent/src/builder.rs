//! Fluent builder for constructing a [`Controller`].

use da_core::{Cell, Tick};
use da_grid::{GridMap, MapSpec, map};
use da_schedule::ObstacleSchedule;
use da_search::{Algorithm, Deadline};

use crate::{
    Controller, ControllerConfig, ControllerError, ControllerResult, ControllerState,
    ExecutionState, ReplanPolicy,
};

/// Fluent builder for [`Controller<P>`].
///
/// # Required inputs
///
/// - [`GridMap`] (borrowed) plus start and goal cells, or a [`MapSpec`]
/// - `P: ReplanPolicy`, which picks the planner after each block
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                           |
/// |---------------------|-----------------------------------|
/// | `.schedule(s)`      | no dynamic obstacles              |
/// | `.config(c)`        | `ControllerConfig::default()`     |
/// | `.fuel(n)`          | 1 000                             |
/// | `.algorithm(a)`     | A* with Manhattan                 |
/// | `.max_replans(n)`   | 32                                |
/// | `.deadline(d)`      | unbounded                         |
/// | `.start_tick(t)`    | `Tick(0)`                         |
///
/// # Example
///
/// ```
/// use da_agent::{BudgetPolicy, ControllerBuilder, NoopObserver};
/// use da_core::Cell;
/// use da_grid::GridMap;
///
/// let grid = GridMap::uniform(4, 4).unwrap();
/// let mut controller =
///     ControllerBuilder::new(&grid, Cell::new(0, 0), Cell::new(3, 3), BudgetPolicy::default())
///         .fuel(20)
///         .build()
///         .unwrap();
/// let summary = controller.run(&mut NoopObserver);
/// assert!(summary.succeeded());
/// assert_eq!(summary.moves, 6);
/// ```
pub struct ControllerBuilder<'a, P: ReplanPolicy> {
    grid:       &'a GridMap,
    schedule:   Option<&'a ObstacleSchedule>,
    start:      Cell,
    goal:       Cell,
    policy:     P,
    config:     ControllerConfig,
    start_tick: Tick,
}

impl<'a, P: ReplanPolicy> ControllerBuilder<'a, P> {
    /// Create a builder with all required inputs.
    pub fn new(grid: &'a GridMap, start: Cell, goal: Cell, policy: P) -> Self {
        Self {
            grid,
            schedule:   None,
            start,
            goal,
            policy,
            config:     ControllerConfig::default(),
            start_tick: Tick(0),
        }
    }

    /// Take grid, start and goal from a loaded map.
    pub fn from_map(map: &'a MapSpec, policy: P) -> Self {
        Self::new(map.grid(), map.start(), map.goal(), policy)
    }

    /// Avoid the dynamic obstacles of `schedule` while planning and moving.
    pub fn schedule(mut self, schedule: &'a ObstacleSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Replace the whole configuration.  Later setters override fields.
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn fuel(mut self, fuel: u64) -> Self {
        self.config.fuel = fuel;
        self
    }

    /// Planner for the first plan.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.config.algorithm = algorithm;
        self
    }

    /// `None` allows unlimited replans.
    pub fn max_replans(mut self, max: Option<u32>) -> Self {
        self.config.max_replans = max;
        self
    }

    pub fn deadline(mut self, deadline: Deadline) -> Self {
        self.config.deadline = deadline;
        self
    }

    pub fn start_tick(mut self, tick: Tick) -> Self {
        self.start_tick = tick;
        self
    }

    /// Validate inputs and return an `Idle` [`Controller`].
    ///
    /// # Errors
    /// - [`ControllerError::Grid`] when start or goal is out of bounds or a
    ///   static obstacle.
    /// - [`ControllerError::Config`] for invalid planner parameters.
    pub fn build(self) -> ControllerResult<Controller<'a, P>> {
        map::validate(self.grid, self.start, self.goal)?;
        self.config
            .algorithm
            .validate()
            .and_then(|()| self.policy.validate())
            .map_err(|e| ControllerError::Config(e.to_string()))?;

        Ok(Controller {
            grid:           self.grid,
            schedule:       self.schedule,
            goal:           self.goal,
            exec:           ExecutionState::new(
                self.start,
                self.start_tick,
                self.config.fuel,
                self.config.algorithm,
            ),
            config:         self.config,
            policy:         self.policy,
            state:          ControllerState::Idle,
            searches:       0,
            nodes_expanded: 0,
        })
    }
}
