//! `da-agent`: replanning controller for the rust_da framework.
//!
//! # State machine
//!
//! ```text
//! Idle ─▶ Planning ─▶ Executing ─┬─▶ Succeeded
//!            ▲   │               ├─▶ Failed (fuel exhausted)
//!            │   └─▶ Failed      └─▶ Blocked ─┬─▶ Planning (policy picks planner)
//!            │      (search error)            └─▶ Failed (replan limit)
//!            └────────────────────────────────────┘
//! ```
//!
//! `Executing` moves one cell per tick.  Before each move the next cell is
//! checked against the obstacle schedule as known at the current tick; an
//! occupied (or possibly occupied) cell sends the controller to `Blocked`,
//! and a [`ReplanPolicy`] picks the planner for the next `Planning` call.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`controller`]  | `Controller`                                          |
//! | [`builder`]     | `ControllerBuilder`                                   |
//! | [`config`]      | `ControllerConfig`                                    |
//! | [`policy`]      | `ReplanPolicy`, `BudgetPolicy`, `FixedPolicy`         |
//! | [`state`]       | `ControllerState`, `Failure`                          |
//! | [`execution`]   | `ExecutionState`, `ExecutionSnapshot`, `SearchRecord` |
//! | [`observer`]    | `ControllerObserver`, `NoopObserver`                  |
//! | [`summary`]     | `RunSummary`                                          |
//! | [`error`]       | `ControllerError`, `ControllerResult<T>`              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use da_agent::{BudgetPolicy, ControllerBuilder, NoopObserver};
//! use da_grid::load_map;
//!
//! let map = load_map("depot.map".as_ref())?;
//! let mut controller = ControllerBuilder::from_map(&map, BudgetPolicy::default())
//!     .schedule(&schedule)
//!     .fuel(500)
//!     .build()?;
//! let summary = controller.run(&mut NoopObserver).into_result()?;
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod error;
pub mod execution;
pub mod observer;
pub mod policy;
pub mod state;
pub mod summary;


pub use builder::ControllerBuilder;
pub use config::ControllerConfig;
pub use controller::Controller;
pub use error::{ControllerError, ControllerResult};
pub use execution::{ExecutionSnapshot, ExecutionState, SearchRecord};
pub use observer::{ControllerObserver, NoopObserver};
pub use policy::{BudgetPolicy, FixedPolicy, ReplanContext, ReplanPolicy};
pub use state::{ControllerState, Failure};
pub use summary::RunSummary;
