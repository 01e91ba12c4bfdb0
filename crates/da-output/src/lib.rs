//! `da-output`: search and execution metrics writers for the rust_da
//! framework.
//!
//! | Backend | Files created                    |
//! |---------|----------------------------------|
//! | CSV     | `searches.csv`, `steps.csv`      |
//!
//! Backends implement [`MetricsWriter`] and are driven by
//! [`MetricsObserver`], which implements `da_agent::ControllerObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use da_output::{CsvWriter, MetricsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./out"))?;
//! let mut obs = MetricsObserver::new(writer);
//! let summary = controller.run(&mut obs);
//! if let Some(e) = obs.take_error() {
//!     eprintln!("metrics error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{SearchRow, StepRow};
pub use writer::MetricsWriter;
