//! Plain data row types written by metrics backends.

use da_agent::{ExecutionSnapshot, SearchRecord};

/// One planner invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRow {
    pub tick:           u64,
    pub replan:         u32,
    pub algorithm:      &'static str,
    pub success:        bool,
    /// `None` when the search failed.
    pub path_cost:      Option<u64>,
    pub path_length:    Option<usize>,
    pub nodes_expanded: u64,
    pub elapsed_us:     u64,
    /// Kebab-case failure tag, `None` on success.
    pub failure:        Option<&'static str>,
}

impl From<&SearchRecord> for SearchRow {
    fn from(r: &SearchRecord) -> Self {
        Self {
            tick:           r.tick.0,
            replan:         r.replan,
            algorithm:      r.algorithm,
            success:        r.success,
            path_cost:      r.path_cost,
            path_length:    r.path_length,
            nodes_expanded: r.nodes_expanded,
            elapsed_us:     r.elapsed.as_micros() as u64,
            failure:        r.failure.map(|f| f.tag()),
        }
    }
}

/// The agent's state right after one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRow {
    pub tick:    u64,
    pub x:       u32,
    pub y:       u32,
    pub fuel:    u64,
    pub replans: u32,
    /// Cumulative terrain cost.
    pub cost:    u64,
}

impl From<&ExecutionSnapshot> for StepRow {
    fn from(s: &ExecutionSnapshot) -> Self {
        Self {
            tick:    s.tick.0,
            x:       s.position.x,
            y:       s.position.y,
            fuel:    s.fuel,
            replans: s.replans,
            cost:    s.cost,
        }
    }
}
