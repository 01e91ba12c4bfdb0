//! Dynamic obstacles: a trajectory plus a motion model.
//!
//! # Motion models
//!
//! | Model                    | Before first entry | Between entries      | After last entry          |
//! |--------------------------|--------------------|----------------------|---------------------------|
//! | `Persistent`             | absent             | entry in effect      | holds final cell forever  |
//! | `Transient`              | absent             | entry in effect      | gone                      |
//! | `Observed { horizon }`   | absent             | see below            | see below                 |
//!
//! An observed obstacle's trajectory is a log of sightings.  A query at tick
//! `t` made with knowledge up to `now` sees only the latest sighting
//! `(t_obs, p)` with `t_obs ≤ min(t, now)`.  The sighting holds for `horizon`
//! ticks; after that the obstacle may be anywhere within Manhattan distance
//! `t − t_obs` of `p`, and those cells report [`Occupancy::Unknown`].

use std::fmt;
use std::str::FromStr;

use da_core::{Cell, ObstacleId, Tick};

use crate::{ScheduleError, ScheduleResult};

// ── Motion ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Motion {
    /// Holds its final position after the trajectory ends.
    Persistent,
    /// Disappears after the trajectory ends.
    Transient,
    /// Only sightings up to the knowledge cut-off are visible; each stays
    /// valid for `horizon` ticks.
    Observed { horizon: u64 },
}

impl Motion {
    /// Name used in trajectory CSVs.
    pub fn name(self) -> &'static str {
        match self {
            Motion::Persistent => "persistent",
            Motion::Transient => "transient",
            Motion::Observed { .. } => "observed",
        }
    }
}

impl fmt::Display for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Motion::Observed { horizon } => write!(f, "observed(horizon={horizon})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for Motion {
    type Err = ScheduleError;

    /// Parses `persistent`, `transient`, or `observed:<horizon>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "persistent" => Ok(Motion::Persistent),
            "transient" => Ok(Motion::Transient),
            other => other
                .strip_prefix("observed:")
                .and_then(|h| h.parse::<u64>().ok())
                .map(|horizon| Motion::Observed { horizon })
                .ok_or_else(|| {
                    ScheduleError::Parse(format!(
                        "invalid motion {other:?}: expected \"persistent\", \"transient\", or \"observed:<horizon>\""
                    ))
                }),
        }
    }
}

// ── Occupancy ─────────────────────────────────────────────────────────────────

/// Answer to "is this cell taken at this tick?".
///
/// Variants are ordered by severity so combining several obstacles is a
/// `max`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupancy {
    #[default]
    Free,
    /// An observed obstacle could be here; treated as blocked by planners.
    Unknown,
    Occupied,
}

impl Occupancy {
    #[inline]
    pub fn is_free(self) -> bool {
        self == Occupancy::Free
    }
}

// ── DynamicObstacle ───────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicObstacle {
    id:         ObstacleId,
    /// Strictly increasing in tick.
    trajectory: Vec<(Tick, Cell)>,
    motion:     Motion,
}

impl DynamicObstacle {
    /// Build an obstacle, rejecting trajectories whose ticks are not strictly
    /// increasing.  An empty trajectory is allowed and never occupies anything.
    pub fn new(
        id: ObstacleId,
        trajectory: Vec<(Tick, Cell)>,
        motion: Motion,
    ) -> ScheduleResult<Self> {
        if let Some(w) = trajectory.windows(2).find(|w| w[1].0 <= w[0].0) {
            return Err(ScheduleError::NonMonotonic { obstacle: id, tick: w[1].0 });
        }
        Ok(Self { id, trajectory, motion })
    }

    /// An obstacle that sits on `cell` from `from` onwards.
    pub fn stationary(id: ObstacleId, cell: Cell, from: Tick) -> Self {
        Self { id, trajectory: vec![(from, cell)], motion: Motion::Persistent }
    }

    #[inline]
    pub fn id(&self) -> ObstacleId {
        self.id
    }

    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    #[inline]
    pub fn trajectory(&self) -> &[(Tick, Cell)] {
        &self.trajectory
    }

    /// Every cell this obstacle can ever be *known* to occupy.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.trajectory.iter().map(|&(_, c)| c)
    }

    /// Index of the last entry with tick ≤ `t`.
    fn entry_index(&self, t: Tick) -> Option<usize> {
        self.trajectory.partition_point(|&(tick, _)| tick <= t).checked_sub(1)
    }

    /// Position under full knowledge; `None` when absent.  For observed
    /// obstacles this is the latest sighting at or before `tick`, ignoring
    /// its horizon.
    pub fn position_at(&self, tick: Tick) -> Option<Cell> {
        let i = self.entry_index(tick)?;
        let (last_tick, cell) = self.trajectory[i];
        let is_last = i + 1 == self.trajectory.len();
        match self.motion {
            Motion::Transient if is_last && tick > last_tick => None,
            _ => Some(cell),
        }
    }

    /// Occupancy of `cell` at `tick` with knowledge up to `now`.
    ///
    /// `now` only matters for observed obstacles; the others are fully known.
    pub fn occupancy(&self, cell: Cell, tick: Tick, now: Tick) -> Occupancy {
        match self.motion {
            Motion::Persistent | Motion::Transient => match self.position_at(tick) {
                Some(p) if p == cell => Occupancy::Occupied,
                _ => Occupancy::Free,
            },
            Motion::Observed { horizon } => {
                let Some(i) = self.entry_index(tick.min(now)) else {
                    return Occupancy::Free;
                };
                let (t_obs, p) = self.trajectory[i];
                let elapsed = tick.since(t_obs);
                if elapsed <= horizon {
                    if p == cell { Occupancy::Occupied } else { Occupancy::Free }
                } else if u64::from(p.manhattan(cell)) <= elapsed {
                    Occupancy::Unknown
                } else {
                    Occupancy::Free
                }
            }
        }
    }
}
