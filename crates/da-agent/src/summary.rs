//! Outcome of a complete run.

use da_core::{Cell, Tick};
use da_search::FailureReason;

use crate::{ControllerError, ControllerResult, ControllerState, Failure};

/// Returned by [`Controller::run`][crate::Controller::run].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Terminal state the run ended in.
    pub outcome:        ControllerState,
    pub position:       Cell,
    pub tick:           Tick,
    pub trail:          Vec<Cell>,
    pub moves:          u64,
    pub cost:           u64,
    pub fuel_remaining: u64,
    pub replans:        u32,
    pub searches:       u32,
    /// Summed over every search of the run.
    pub nodes_expanded: u64,
}

impl RunSummary {
    #[inline]
    pub fn succeeded(&self) -> bool {
        self.outcome == ControllerState::Succeeded
    }

    pub fn reason(&self) -> Option<FailureReason> {
        self.outcome.failure().map(Failure::reason)
    }

    /// `Ok(self)` on success, otherwise the failure as a [`ControllerError`].
    pub fn into_result(self) -> ControllerResult<Self> {
        match self.outcome.failure() {
            None => Ok(self),
            Some(Failure::Search(e)) => Err(ControllerError::Search(e.clone())),
            Some(Failure::FuelExhausted) => Err(ControllerError::ResourceExhausted("fuel")),
            Some(Failure::ReplanLimit { .. }) => {
                Err(ControllerError::ResourceExhausted("replan budget"))
            }
        }
    }
}
