//! Search failure type and the kebab-case failure tags shared with the
//! controller and metrics output.

use std::fmt;

use thiserror::Error;

use da_core::Cell;

/// Why a search (or a whole delivery run) failed.
///
/// The string form is the stable tag written to metrics files.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FailureReason {
    NoPath,
    StartBlocked,
    GoalBlocked,
    DeadlineExceeded,
    RestartBudgetExhausted,
    /// Fuel or replan budget ran out during execution.  Never produced by a
    /// planner.
    ResourceExhausted,
}

impl FailureReason {
    pub fn tag(self) -> &'static str {
        match self {
            FailureReason::NoPath => "no-path",
            FailureReason::StartBlocked => "start-blocked",
            FailureReason::GoalBlocked => "goal-blocked",
            FailureReason::DeadlineExceeded => "deadline-exceeded",
            FailureReason::RestartBudgetExhausted => "restart-budget-exhausted",
            FailureReason::ResourceExhausted => "resource-exhausted",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A failed search.  Every variant that ran the algorithm carries the number
/// of nodes it expanded before giving up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("start {cell} is out of bounds or blocked")]
    StartBlocked { cell: Cell },

    #[error("goal {cell} is out of bounds or blocked")]
    GoalBlocked { cell: Cell },

    #[error("no path to goal after {expanded} expansions")]
    NoPath { expanded: u64 },

    #[error("search deadline exceeded after {expanded} expansions")]
    DeadlineExceeded { expanded: u64 },

    #[error("gave up after {restarts} restarts ({expanded} expansions)")]
    RestartBudgetExhausted { restarts: u32, expanded: u64 },
}

impl SearchError {
    pub fn reason(&self) -> FailureReason {
        match self {
            SearchError::StartBlocked { .. } => FailureReason::StartBlocked,
            SearchError::GoalBlocked { .. } => FailureReason::GoalBlocked,
            SearchError::NoPath { .. } => FailureReason::NoPath,
            SearchError::DeadlineExceeded { .. } => FailureReason::DeadlineExceeded,
            SearchError::RestartBudgetExhausted { .. } => FailureReason::RestartBudgetExhausted,
        }
    }

    /// Expansions spent before failing; 0 for input-validation failures.
    pub fn nodes_expanded(&self) -> u64 {
        match *self {
            SearchError::StartBlocked { .. } | SearchError::GoalBlocked { .. } => 0,
            SearchError::NoPath { expanded }
            | SearchError::DeadlineExceeded { expanded }
            | SearchError::RestartBudgetExhausted { expanded, .. } => expanded,
        }
    }
}
