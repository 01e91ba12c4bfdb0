//! Controller state machine states and terminal failures.
//!
//! ```text
//! Idle ──▶ Planning ──▶ Executing ──▶ Succeeded
//!             ▲   │         │
//!             │   ▼         ├──▶ Failed (fuel)
//!          Blocked ◀────────┘
//!             │      Planning ──▶ Failed (search error)
//!             └──▶ Failed (replan limit)
//! ```

use std::fmt;

use da_search::{FailureReason, SearchError};

/// Why a run ended without reaching the goal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    /// A planning call failed; the error is passed through untouched.
    Search(SearchError),
    /// The next move needed fuel and none was left.
    FuelExhausted,
    /// The path was blocked again after `replans` replans.
    ReplanLimit { replans: u32 },
}

impl Failure {
    pub fn reason(&self) -> FailureReason {
        match self {
            Failure::Search(e) => e.reason(),
            Failure::FuelExhausted | Failure::ReplanLimit { .. } => FailureReason::ResourceExhausted,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Search(e) => write!(f, "{e}"),
            Failure::FuelExhausted => f.write_str("fuel exhausted"),
            Failure::ReplanLimit { replans } => write!(f, "replan limit reached after {replans}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Planning,
    Executing,
    Blocked,
    Succeeded,
    Failed(Failure),
}

impl ControllerState {
    pub fn name(&self) -> &'static str {
        match self {
            ControllerState::Idle => "idle",
            ControllerState::Planning => "planning",
            ControllerState::Executing => "executing",
            ControllerState::Blocked => "blocked",
            ControllerState::Succeeded => "succeeded",
            ControllerState::Failed(_) => "failed",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ControllerState::Succeeded | ControllerState::Failed(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ControllerState::Failed(f) => Some(f),
            _ => None,
        }
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerState::Failed(why) => write!(f, "failed ({})", why.reason()),
            other => f.write_str(other.name()),
        }
    }
}
