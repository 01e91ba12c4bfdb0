//! `da-core`: foundational types for the `rust_da` delivery-agent framework.
//!
//! This crate is a dependency of every other `da-*` crate.  It intentionally
//! has no `da-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`cell`]        | `Cell`, 4-connected neighbour order                   |
//! | [`ids`]         | `ObstacleId`, `NodeIdx`                               |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SearchRng` (per-invocation, seeded)                  |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod cell;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cell::{Cell, NEIGHBOR_OFFSETS};
pub use error::{CoreError, CoreResult};
pub use ids::{NodeIdx, ObstacleId};
pub use rng::SearchRng;
pub use time::Tick;
