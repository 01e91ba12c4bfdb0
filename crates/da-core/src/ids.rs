//! Identifier newtypes.
//!
//! The inner integer is `pub` so ids can index dense `Vec`s directly; prefer
//! `.index()` at call sites.

use std::fmt;

/// Identifier of a dynamic obstacle, unique within one `ObstacleSchedule`.
///
/// Ids come straight from the trajectory file and are not required to be
/// contiguous.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleId(pub u32);

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obstacle {}", self.0)
    }
}

/// Index of a search node inside one invocation's node arena.
///
/// Parent back-references are stored as `NodeIdx` rather than pointers so
/// the search tree has a single owner (the arena) and no cycles.  The root's
/// parent is [`NodeIdx::NONE`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    /// "No node": the root's parent and the empty slot of a per-cell table.
    pub const NONE: NodeIdx = NodeIdx(u32::MAX);

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}
