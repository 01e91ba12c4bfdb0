//! Per-search work limits.

use std::time::{Duration, Instant};

/// Upper bounds on one planner invocation.  `None` means unlimited.
///
/// Every planner checks its budget before each expansion, so a limit of `n`
/// expansions allows exactly `n`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deadline {
    pub max_expansions: Option<u64>,
    pub max_duration:   Option<Duration>,
}

impl Deadline {
    pub const UNBOUNDED: Deadline = Deadline { max_expansions: None, max_duration: None };

    pub fn expansions(n: u64) -> Self {
        Self { max_expansions: Some(n), ..Self::UNBOUNDED }
    }

    pub fn duration(d: Duration) -> Self {
        Self { max_duration: Some(d), ..Self::UNBOUNDED }
    }
}

/// Running account against a [`Deadline`] for one invocation.
pub(crate) struct Budget {
    deadline: Deadline,
    started:  Instant,
    spent:    u64,
}

impl Budget {
    pub(crate) fn start(deadline: &Deadline) -> Self {
        Self { deadline: *deadline, started: Instant::now(), spent: 0 }
    }

    /// Reserve one expansion.  Returns `false` once the deadline is reached.
    #[inline]
    pub(crate) fn allow(&mut self) -> bool {
        if self.deadline.max_expansions.is_some_and(|m| self.spent >= m) {
            return false;
        }
        if self
            .deadline
            .max_duration
            .is_some_and(|d| self.started.elapsed() >= d)
        {
            return false;
        }
        self.spent += 1;
        true
    }

    /// Expansions granted so far.
    #[inline]
    pub(crate) fn spent(&self) -> u64 {
        self.spent
    }
}
