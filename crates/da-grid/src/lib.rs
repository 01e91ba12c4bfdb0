//! `da-grid`: the static environment of terrain costs and obstacles.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `GridMap` (dense cost + obstacle arrays), `GridBuilder`     |
//! | [`map`]     | `MapSpec`: grid plus validated start/goal                   |
//! | [`loader`]  | `load_map`, `load_map_reader`, `write_map` (text format)    |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! # Sharing
//!
//! A `GridMap` is never mutated after [`GridBuilder::build`].  Dynamic
//! obstacles live in `da-schedule` and are layered on top at query time, so a
//! single `&GridMap` can be handed to any number of concurrent searches.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod loader;
pub mod map;


pub use error::{GridError, GridResult};
pub use grid::{GridBuilder, GridMap};
pub use loader::{load_map, load_map_reader, write_map};
pub use map::MapSpec;
