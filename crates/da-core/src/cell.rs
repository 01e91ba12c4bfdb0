//! Grid coordinate type and 4-connected adjacency.
//!
//! A `Cell` has no identity beyond its coordinates.  Coordinates are `u32`
//! so a cell is 8 bytes and `Copy`; signed arithmetic only happens inside
//! [`Cell::offset`], which refuses to step below zero.  Upper bounds are the
//! grid's business (`GridMap::in_bounds`).

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Neighbour offsets in the fixed enumeration order used by every algorithm:
/// `(x, y+1)`, `(x+1, y)`, `(x, y-1)`, `(x-1, y)`.
///
/// This order is the deterministic tie-break whenever two neighbours score
/// the same, so it must never change.
pub const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// An integer grid coordinate.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: u32,
    pub y: u32,
}

impl Cell {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Step by `(dx, dy)`.  Returns `None` if either coordinate would become
    /// negative or overflow `u32`.
    #[inline]
    pub fn offset(self, dx: i64, dy: i64) -> Option<Cell> {
        let x = u32::try_from(self.x as i64 + dx).ok()?;
        let y = u32::try_from(self.y as i64 + dy).ok()?;
        Some(Cell { x, y })
    }

    /// The (up to four) 4-connected neighbours in [`NEIGHBOR_OFFSETS`] order.
    ///
    /// Bounds above are not checked here; filter with the grid.
    #[inline]
    pub fn neighbors4(self) -> impl Iterator<Item = Cell> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy))
    }

    /// Absolute coordinate differences `(|dx|, |dy|)`.
    #[inline]
    pub fn deltas(self, other: Cell) -> (u32, u32) {
        (self.x.abs_diff(other.x), self.y.abs_diff(other.y))
    }

    /// L1 distance, the exact step count on an empty 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        let (dx, dy) = self.deltas(other);
        dx + dy
    }

    /// `true` if `other` differs by exactly one unit in exactly one axis.
    #[inline]
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(u32, u32)> for Cell {
    #[inline]
    fn from((x, y): (u32, u32)) -> Self {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl FromStr for Cell {
    type Err = CoreError;

    /// Parse `"x,y"` or `"x y"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(|c: char| c == ',' || c.is_whitespace()).filter(|p| !p.is_empty());
        let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(CoreError::Parse(format!("expected \"x,y\", got {s:?}")));
        };
        let coord = |v: &str| {
            v.parse::<u32>()
                .map_err(|e| CoreError::Parse(format!("invalid coordinate {v:?}: {e}")))
        };
        Ok(Cell { x: coord(x)?, y: coord(y)? })
    }
}
