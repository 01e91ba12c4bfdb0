//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `searches.csv`
//! - `steps.csv`
//!
//! Missing values (path cost of a failed search, failure tag of a successful
//! one) are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::MetricsWriter;
use crate::{OutputResult, SearchRow, StepRow};

/// Writes controller metrics to two CSV files.
pub struct CsvWriter {
    searches: Writer<File>,
    steps:    Writer<File>,
    finished: bool,
}

fn opt<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut searches = Writer::from_path(dir.join("searches.csv"))?;
        searches.write_record([
            "tick",
            "replan",
            "algorithm",
            "success",
            "path_cost",
            "path_length",
            "nodes_expanded",
            "elapsed_us",
            "failure",
        ])?;

        let mut steps = Writer::from_path(dir.join("steps.csv"))?;
        steps.write_record(["tick", "x", "y", "fuel", "replans", "cost"])?;

        Ok(Self { searches, steps, finished: false })
    }
}

impl MetricsWriter for CsvWriter {
    fn write_search(&mut self, row: &SearchRow) -> OutputResult<()> {
        self.searches.write_record(&[
            row.tick.to_string(),
            row.replan.to_string(),
            row.algorithm.to_owned(),
            (row.success as u8).to_string(),
            opt(row.path_cost),
            opt(row.path_length),
            row.nodes_expanded.to_string(),
            row.elapsed_us.to_string(),
            opt(row.failure),
        ])?;
        Ok(())
    }

    fn write_step(&mut self, row: &StepRow) -> OutputResult<()> {
        self.steps.write_record(&[
            row.tick.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.fuel.to_string(),
            row.replans.to_string(),
            row.cost.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.searches.flush()?;
        self.steps.flush()?;
        Ok(())
    }
}
