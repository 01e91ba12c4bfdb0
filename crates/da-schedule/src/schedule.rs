//! `ObstacleSchedule` and the time-indexed `ScheduleView` handed to searches.
//!
//! # Footprint index
//!
//! Fully-known obstacles (persistent and transient) can only ever occupy the
//! cells listed in their trajectories.  `ObstacleSchedule::new` inverts those
//! lists into a `cell → [obstacle]` map, so `occupancy` on a cell no obstacle
//! ever touches is a single hash miss instead of a scan over all obstacles.
//!
//! Observed obstacles have an unbounded uncertainty region and are always
//! checked; there are typically only a handful of them.

use da_core::{Cell, ObstacleId, Tick};
use da_grid::GridMap;

use crate::obstacle::{DynamicObstacle, Motion, Occupancy};
use crate::{ScheduleError, ScheduleResult};

#[cfg(feature = "fx-hash")]
type CellMap<V> = rustc_hash::FxHashMap<Cell, V>;
#[cfg(not(feature = "fx-hash"))]
type CellMap<V> = std::collections::HashMap<Cell, V>;

// ── ObstacleSchedule ──────────────────────────────────────────────────────────

/// All dynamic obstacles of one environment.  Immutable after construction
/// and `Sync`, so it can be shared by concurrent runs.
#[derive(Debug, Default)]
pub struct ObstacleSchedule {
    obstacles: Vec<DynamicObstacle>,
    /// Fully-known obstacles by the cells they visit (indices into `obstacles`).
    footprint: CellMap<Vec<u32>>,
    /// Indices of observed obstacles.
    observed:  Vec<u32>,
}

impl ObstacleSchedule {
    /// A schedule with no dynamic obstacles.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Validate `obstacles` against `grid` and build the footprint index.
    ///
    /// # Errors
    ///
    /// - [`ScheduleError::OutOfBounds`] if any trajectory cell lies outside
    ///   the grid.
    /// - [`ScheduleError::DuplicateObstacle`] if two obstacles share an id.
    pub fn new(grid: &GridMap, obstacles: Vec<DynamicObstacle>) -> ScheduleResult<Self> {
        let mut footprint: CellMap<Vec<u32>> = CellMap::default();
        let mut observed = Vec::new();
        let mut ids: Vec<ObstacleId> = Vec::with_capacity(obstacles.len());

        for (i, obs) in obstacles.iter().enumerate() {
            if let Some(cell) = obs.cells().find(|&c| !grid.in_bounds(c)) {
                return Err(ScheduleError::OutOfBounds { obstacle: obs.id(), cell });
            }
            ids.push(obs.id());

            let slot = i as u32;
            match obs.motion() {
                Motion::Observed { .. } => observed.push(slot),
                Motion::Persistent | Motion::Transient => {
                    for cell in obs.cells() {
                        let list = footprint.entry(cell).or_default();
                        if list.last() != Some(&slot) {
                            list.push(slot);
                        }
                    }
                }
            }
        }

        ids.sort_unstable();
        if let Some(w) = ids.windows(2).find(|w| w[0] == w[1]) {
            return Err(ScheduleError::DuplicateObstacle(w[0]));
        }

        Ok(Self { obstacles, footprint, observed })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn obstacles(&self) -> &[DynamicObstacle] {
        &self.obstacles
    }

    pub fn get(&self, id: ObstacleId) -> Option<&DynamicObstacle> {
        self.obstacles.iter().find(|o| o.id() == id)
    }

    /// Occupancy of `cell` at `tick` as seen with knowledge up to `now`.
    ///
    /// The most severe answer over all obstacles wins
    /// (`Occupied` > `Unknown` > `Free`).
    pub fn occupancy_as_of(&self, cell: Cell, tick: Tick, now: Tick) -> Occupancy {
        let known = self
            .footprint
            .get(&cell)
            .into_iter()
            .flatten()
            .chain(self.observed.iter());

        let mut worst = Occupancy::Free;
        for &i in known {
            worst = worst.max(self.obstacles[i as usize].occupancy(cell, tick, now));
            if worst == Occupancy::Occupied {
                break;
            }
        }
        worst
    }

    /// Occupancy of `cell` at `tick` with knowledge up to `tick` itself.
    #[inline]
    pub fn occupancy(&self, cell: Cell, tick: Tick) -> Occupancy {
        self.occupancy_as_of(cell, tick, tick)
    }

    /// `true` only when an obstacle is known to be on `cell` at `tick`.
    #[inline]
    pub fn occupied(&self, cell: Cell, tick: Tick) -> bool {
        self.occupancy(cell, tick) == Occupancy::Occupied
    }

    /// Time-indexed view whose step 0 is `origin` and whose knowledge
    /// cut-off is `origin`.
    #[inline]
    pub fn view(&self, origin: Tick) -> ScheduleView<'_> {
        ScheduleView { schedule: self, origin }
    }
}

// ── ScheduleView ──────────────────────────────────────────────────────────────

/// The schedule as seen by a search started at `origin`.
///
/// A node reached after `step` moves is checked at tick `origin + step`, with
/// observed obstacles visible only up to `origin`.  Anything other than
/// [`Occupancy::Free`] blocks.
#[derive(Copy, Clone, Debug)]
pub struct ScheduleView<'a> {
    schedule: &'a ObstacleSchedule,
    origin:   Tick,
}

impl<'a> ScheduleView<'a> {
    #[inline]
    pub fn origin(&self) -> Tick {
        self.origin
    }

    #[inline]
    pub fn schedule(&self) -> &'a ObstacleSchedule {
        self.schedule
    }

    /// Absolute tick of path step `step`.
    #[inline]
    pub fn tick_at(&self, step: u64) -> Tick {
        self.origin.offset(step)
    }

    #[inline]
    pub fn occupancy(&self, cell: Cell, step: u64) -> Occupancy {
        self.schedule.occupancy_as_of(cell, self.tick_at(step), self.origin)
    }

    #[inline]
    pub fn blocked(&self, cell: Cell, step: u64) -> bool {
        !self.occupancy(cell, step).is_free()
    }
}
