//! Replan policies: which algorithm to run after a block.

use da_core::{Cell, CoreError, CoreResult, Tick};
use da_search::{Algorithm, Heuristic, HillClimbingParams};

/// What a policy may look at when choosing the next planner.
#[derive(Copy, Clone, Debug)]
pub struct ReplanContext {
    pub position: Cell,
    pub goal:     Cell,
    pub tick:     Tick,
    /// Moves the agent can still make.
    pub fuel:     u64,
    /// Replans already performed, this one excluded.
    pub replans:  u32,
    /// Planner that produced the blocked path.
    pub previous: Algorithm,
}

impl ReplanContext {
    /// Manhattan distance still to cover; a lower bound on the moves needed.
    pub fn distance_left(&self) -> u32 {
        self.position.manhattan(self.goal)
    }
}

/// Pluggable replan strategy.
///
/// Implementations must be `Send + Sync` so independent controllers running
/// on different threads can share one policy.
pub trait ReplanPolicy: Send + Sync {
    fn choose(&self, ctx: &ReplanContext) -> Algorithm;

    /// Reject parameters that would make a later `choose` unusable.
    /// Called once by `ControllerBuilder::build`.
    fn validate(&self) -> CoreResult<()> {
        Ok(())
    }
}

// ── BudgetPolicy ──────────────────────────────────────────────────────────────

/// Switch to a cheap local search when fuel gets tight.
///
/// ```text
/// fuel ≤ tight_ratio × manhattan(position, goal)  →  fast
/// otherwise                                       →  thorough
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BudgetPolicy {
    pub tight_ratio: f64,
    pub fast:        Algorithm,
    pub thorough:    Algorithm,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            tight_ratio: 1.5,
            fast:        Algorithm::HillClimbing(HillClimbingParams::default()),
            thorough:    Algorithm::AStar { heuristic: Heuristic::Manhattan },
        }
    }
}

impl BudgetPolicy {
    pub fn is_tight(&self, ctx: &ReplanContext) -> bool {
        ctx.fuel as f64 <= self.tight_ratio * f64::from(ctx.distance_left())
    }
}

impl ReplanPolicy for BudgetPolicy {
    fn choose(&self, ctx: &ReplanContext) -> Algorithm {
        if self.is_tight(ctx) { self.fast } else { self.thorough }
    }

    fn validate(&self) -> CoreResult<()> {
        if !(self.tight_ratio.is_finite() && self.tight_ratio >= 0.0) {
            return Err(CoreError::Config(format!(
                "tight_ratio must be finite and non-negative, got {}",
                self.tight_ratio
            )));
        }
        self.fast.validate()?;
        self.thorough.validate()
    }
}

// ── FixedPolicy ───────────────────────────────────────────────────────────────

/// Always replan with the same algorithm.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedPolicy(pub Algorithm);

impl ReplanPolicy for FixedPolicy {
    fn choose(&self, _ctx: &ReplanContext) -> Algorithm {
        self.0
    }

    fn validate(&self) -> CoreResult<()> {
        self.0.validate()
    }
}
