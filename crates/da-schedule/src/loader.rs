//! CSV trajectory loading and writing.
//!
//! # CSV format
//!
//! One row per trajectory entry.  All rows for the same obstacle must share
//! the same `motion` (and `horizon`).
//!
//! ```csv
//! obstacle_id,tick,x,y,motion,horizon
//! 0,0,2,1,persistent,
//! 0,1,2,2,persistent,
//! 1,5,3,3,observed,2
//! ```
//!
//! **`motion`** field:
//!
//! | Value        | Meaning                                             |
//! |--------------|-----------------------------------------------------|
//! | `persistent` | `Motion::Persistent`; `horizon` ignored             |
//! | `transient`  | `Motion::Transient`; `horizon` ignored              |
//! | `observed`   | `Motion::Observed { horizon }`; `horizon` required  |
//!
//! Rows of one obstacle must appear in increasing `tick` order.  Obstacles
//! are returned sorted by id.

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use da_core::{Cell, ObstacleId, Tick};

use crate::obstacle::{DynamicObstacle, Motion};
use crate::{ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize, Serialize)]
struct TrajectoryRecord {
    obstacle_id: u32,
    tick:        u64,
    x:           u32,
    y:           u32,
    motion:      String,
    horizon:     Option<u64>,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load dynamic obstacles from a CSV file.
///
/// The result still needs [`ObstacleSchedule::new`](crate::ObstacleSchedule::new)
/// to be checked against a grid.
pub fn load_obstacles_csv(path: &Path) -> ScheduleResult<Vec<DynamicObstacle>> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_obstacles_reader(file)
}

/// Like [`load_obstacles_csv`] but accepts any `Read` source.
pub fn load_obstacles_reader<R: Read>(reader: R) -> ScheduleResult<Vec<DynamicObstacle>> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_obstacle: BTreeMap<u32, Vec<TrajectoryRecord>> = BTreeMap::new();

    for result in csv_reader.deserialize::<TrajectoryRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        by_obstacle.entry(row.obstacle_id).or_default().push(row);
    }

    // ── Build one DynamicObstacle per id ──────────────────────────────────
    by_obstacle
        .into_iter()
        .map(|(id, rows)| {
            let id = ObstacleId(id);
            let mut motion: Option<Motion> = None;
            let mut trajectory = Vec::with_capacity(rows.len());

            for r in rows {
                let m = parse_motion(&r.motion, r.horizon)?;
                match motion {
                    None => motion = Some(m),
                    Some(prev) if prev != m => return Err(ScheduleError::MixedMotion(id)),
                    Some(_) => {}
                }
                trajectory.push((Tick(r.tick), Cell::new(r.x, r.y)));
            }

            // `rows` is never empty: every map entry was created by a push.
            DynamicObstacle::new(id, trajectory, motion.unwrap_or(Motion::Persistent))
        })
        .collect()
}

/// Write `obstacles` to a CSV file in the format [`load_obstacles_csv`] reads.
pub fn write_obstacles_csv(path: &Path, obstacles: &[DynamicObstacle]) -> ScheduleResult<()> {
    let file = std::fs::File::create(path).map_err(ScheduleError::Io)?;
    write_obstacles(file, obstacles)
}

/// Like [`write_obstacles_csv`] but accepts any `Write` sink.
pub fn write_obstacles<W: Write>(writer: W, obstacles: &[DynamicObstacle]) -> ScheduleResult<()> {
    let csv_err = |e: csv::Error| ScheduleError::Parse(e.to_string());
    let mut w = csv::Writer::from_writer(writer);
    for o in obstacles {
        let horizon = match o.motion() {
            Motion::Observed { horizon } => Some(horizon),
            _ => None,
        };
        for &(tick, cell) in o.trajectory() {
            w.serialize(TrajectoryRecord {
                obstacle_id: o.id().0,
                tick:        tick.0,
                x:           cell.x,
                y:           cell.y,
                motion:      o.motion().name().to_string(),
                horizon,
            })
            .map_err(csv_err)?;
        }
    }
    w.flush().map_err(ScheduleError::Io)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_motion(name: &str, horizon: Option<u64>) -> ScheduleResult<Motion> {
    match (name.trim(), horizon) {
        ("persistent", _) => Ok(Motion::Persistent),
        ("transient", _) => Ok(Motion::Transient),
        ("observed", Some(horizon)) => Ok(Motion::Observed { horizon }),
        ("observed", None) => Err(ScheduleError::Parse(
            "observed obstacles need a horizon".to_string(),
        )),
        (other, _) => Err(ScheduleError::Parse(format!(
            "invalid motion {other:?}: expected \"persistent\", \"transient\", or \"observed\""
        ))),
    }
}
