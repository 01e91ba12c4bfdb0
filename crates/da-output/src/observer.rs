//! `MetricsObserver<W>`: bridges `ControllerObserver` to a `MetricsWriter`.

use da_agent::{ControllerObserver, ExecutionSnapshot, RunSummary, SearchRecord};

use crate::writer::MetricsWriter;
use crate::{OutputError, OutputResult, SearchRow, StepRow};

/// A [`ControllerObserver`] that writes every search and every move to any
/// [`MetricsWriter`] backend.
///
/// Errors from the writer are stored internally because `ControllerObserver`
/// methods have no return value.  After `controller.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct MetricsObserver<W: MetricsWriter> {
    writer:     W,
    searches:   u64,
    steps:      u64,
    last_error: Option<OutputError>,
}

impl<W: MetricsWriter> MetricsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, searches: 0, steps: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows written so far as `(searches, steps)`.
    pub fn rows(&self) -> (u64, u64) {
        (self.searches, self.steps)
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) -> bool {
        match result {
            Ok(()) => true,
            Err(e) => {
                // Keep only the first error.
                if self.last_error.is_none() {
                    self.last_error = Some(e);
                }
                false
            }
        }
    }
}

impl<W: MetricsWriter> ControllerObserver for MetricsObserver<W> {
    fn on_search(&mut self, record: &SearchRecord) {
        let result = self.writer.write_search(&SearchRow::from(record));
        if self.store_err(result) {
            self.searches += 1;
        }
    }

    fn on_step(&mut self, snapshot: &ExecutionSnapshot) {
        let result = self.writer.write_step(&StepRow::from(snapshot));
        if self.store_err(result) {
            self.steps += 1;
        }
    }

    fn on_finish(&mut self, _summary: &RunSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
