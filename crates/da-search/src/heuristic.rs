//! Distance estimates for informed and local search.
//!
//! All three estimates are bounded above by the Manhattan distance, which is
//! the exact step count on an obstacle-free 4-connected grid.  Multiplied by
//! the grid's minimum terrain cost they are therefore admissible and
//! consistent.

use std::fmt;
use std::str::FromStr;

use da_core::{Cell, CoreError};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// `dx + dy`
    #[default]
    Manhattan,
    /// `sqrt(dx² + dy²)`
    Euclidean,
    /// `max(dx, dy) + (√2 − 1) · min(dx, dy)`
    Diagonal,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Diagonal];

    #[inline]
    pub fn estimate(self, from: Cell, to: Cell) -> f64 {
        let (dx, dy) = from.deltas(to);
        let (dx, dy) = (f64::from(dx), f64::from(dy));
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => dx.hypot(dy),
            Heuristic::Diagonal => {
                dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy)
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Euclidean => "euclidean",
            Heuristic::Diagonal => "diagonal",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.name() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown heuristic {s:?}")))
    }
}
