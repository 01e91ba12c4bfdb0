//! `da-schedule`: dynamic obstacles and time-indexed occupancy.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`obstacle`]  | `DynamicObstacle`, `Motion`, `Occupancy`                  |
//! | [`schedule`]  | `ObstacleSchedule` (footprint index), `ScheduleView`      |
//! | [`loader`]    | `load_obstacles_csv`, `write_obstacles_csv` and readers   |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                      |
//!
//! # Time model (summary)
//!
//! A search started at tick `t` places the agent at step `k` of its path at
//! tick `t + k`.  The search therefore asks its [`ScheduleView`]:
//!
//! ```text
//! blocked(cell, k)  =  occupancy_as_of(cell, tick = t + k, now = t) != Free
//! ```
//!
//! Observed obstacles are only visible up to `now`, so a plan made at `t`
//! cannot dodge an obstacle first sighted at `t + 1`.  That is what makes the
//! controller replan.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `serde`   | Derives `Serialize`/`Deserialize` on obstacle types.      |
//! | `fx-hash` | FxHash for the footprint index.                           |

pub mod error;
pub mod loader;
pub mod obstacle;
pub mod schedule;

#[cfg(test)]
mod tests;

pub use error::{ScheduleError, ScheduleResult};
pub use loader::{load_obstacles_csv, load_obstacles_reader, write_obstacles, write_obstacles_csv};
pub use obstacle::{DynamicObstacle, Motion, Occupancy};
pub use schedule::{ObstacleSchedule, ScheduleView};
