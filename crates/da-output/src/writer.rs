//! The `MetricsWriter` trait implemented by all backend writers.

use crate::{OutputResult, SearchRow, StepRow};

/// Trait implemented by metrics backends.
///
/// All methods are infallible from the observer's perspective: errors are
/// stored internally and retrieved with
/// [`MetricsObserver::take_error`][crate::MetricsObserver::take_error].
pub trait MetricsWriter {
    /// Write one planner invocation.
    fn write_search(&mut self, row: &SearchRow) -> OutputResult<()>;

    /// Write one agent move.
    fn write_step(&mut self, row: &StepRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
