//! Controller configuration.

use da_search::{Algorithm, Deadline};

use crate::BudgetPolicy;

/// Run-level settings for one delivery.
///
/// Loaded from JSON by the driver when the `serde` feature is on; missing
/// fields fall back to [`Default`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Moves available for the whole run.
    pub fuel:        u64,
    /// Blocks tolerated before giving up; `None` for unlimited.
    pub max_replans: Option<u32>,
    /// Applied to every search.
    pub deadline:    Deadline,
    /// Planner for the first plan.  Replans are chosen by the policy.
    pub algorithm:   Algorithm,
    /// Default replan policy used by the driver.
    pub policy:      BudgetPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            fuel:        1_000,
            max_replans: Some(32),
            deadline:    Deadline::UNBOUNDED,
            algorithm:   Algorithm::default(),
            policy:      BudgetPolicy::default(),
        }
    }
}
