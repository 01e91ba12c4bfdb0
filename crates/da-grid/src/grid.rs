//! Grid representation and builder.
//!
//! # Data layout
//!
//! Cells are stored row-major in a single dense `Vec<u32>`:
//!
//! ```text
//! index(x, y) = y * width + x
//! ```
//!
//! A stored cost of `0` is the static-obstacle sentinel; every passable cell
//! has cost ≥ 1.  One array lookup therefore answers bounds, passability and
//! cost at once, which is all the inner loop of every search needs.  Search
//! arenas use the same `index` to allocate per-cell tables of exactly
//! `cell_count()` entries.

use da_core::Cell;

use crate::{GridError, GridResult};

/// Sentinel cost marking a static obstacle.
const BLOCKED: u32 = 0;

/// Largest grid accepted by [`GridBuilder`]: 2^26 cells, 256 MiB of costs.
pub const MAX_CELLS: usize = 1 << 26;

/// Cell count of a `width × height` grid, or `None` when it is empty or
/// larger than [`MAX_CELLS`].
pub fn checked_cell_count(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .filter(|&n| n > 0 && n <= MAX_CELLS)
}

// ── GridMap ───────────────────────────────────────────────────────────────────

/// Immutable cost-weighted occupancy grid.
///
/// Do not construct directly; use [`GridBuilder`] (or the map loader).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    width:  u32,
    height: u32,
    /// Row-major terrain costs; `BLOCKED` for static obstacles.
    costs:  Vec<u32>,
    /// Cheapest passable terrain cost (1 for an empty grid).
    min_cost: u32,
}

impl GridMap {
    /// An all-passable grid where every cell costs 1.
    pub fn uniform(width: u32, height: u32) -> GridResult<Self> {
        GridBuilder::new(width, height).build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells, passable or not.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.costs.len()
    }

    // ── Cell addressing ───────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Dense row-major index of `cell`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| cell.y as usize * self.width as usize + cell.x as usize)
    }

    /// Inverse of [`index`](Self::index).
    ///
    /// # Panics
    /// Panics in debug mode if `index >= cell_count()`.
    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        debug_assert!(index < self.cell_count());
        let w = self.width as usize;
        Cell::new((index % w) as u32, (index / w) as u32)
    }

    // ── Terrain queries ───────────────────────────────────────────────────

    /// Cost of entering `cell`, or `None` if it is impassable (static
    /// obstacle or out of bounds).
    #[inline]
    pub fn cost(&self, cell: Cell) -> Option<u32> {
        let c = self.costs[self.index(cell)?];
        (c != BLOCKED).then_some(c)
    }

    /// `true` for in-bounds static obstacles.  Out-of-bounds cells are not
    /// obstacles (they are simply not part of the grid); use
    /// [`is_passable`](Self::is_passable) for the combined check.
    #[inline]
    pub fn is_static_obstacle(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.costs[i] == BLOCKED)
    }

    /// In bounds and not a static obstacle.
    #[inline]
    pub fn is_passable(&self, cell: Cell) -> bool {
        self.cost(cell).is_some()
    }

    /// Passable 4-connected neighbours of `cell`, in the fixed
    /// [`da_core::NEIGHBOR_OFFSETS`] order.
    #[inline]
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors4().filter(move |&n| self.is_passable(n))
    }

    /// All passable cells in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.costs
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != BLOCKED)
            .map(|(i, _)| self.cell_at(i))
    }

    pub fn obstacle_count(&self) -> usize {
        self.costs.iter().filter(|&&c| c == BLOCKED).count()
    }

    /// Cheapest passable terrain cost.  Heuristics measured in steps are
    /// admissible because every step costs at least this much (≥ 1).
    #[inline]
    pub fn min_cost(&self) -> u32 {
        self.min_cost
    }

    /// `true` if every passable cell has the same cost; the only case in
    /// which breadth-first search is cost-optimal.
    pub fn is_uniform_cost(&self) -> bool {
        let mut passable = self.costs.iter().filter(|&&c| c != BLOCKED);
        match passable.next() {
            None => true,
            Some(&first) => passable.all(|&c| c == first),
        }
    }
}

// ── GridBuilder ───────────────────────────────────────────────────────────────

/// Construct a [`GridMap`] incrementally, then call [`build`](Self::build).
///
/// Every cell starts passable with the default cost (1 unless changed with
/// [`with_default_cost`](Self::with_default_cost)).
///
/// # Example
///
/// ```
/// use da_core::Cell;
/// use da_grid::GridBuilder;
///
/// let mut b = GridBuilder::new(3, 2);
/// b.add_obstacle(Cell::new(1, 0)).unwrap();
/// b.set_cost(Cell::new(2, 1), 5).unwrap();
/// let grid = b.build().unwrap();
/// assert!(grid.is_static_obstacle(Cell::new(1, 0)));
/// assert_eq!(grid.cost(Cell::new(2, 1)), Some(5));
/// assert_eq!(grid.cost(Cell::new(0, 0)), Some(1));
/// ```
pub struct GridBuilder {
    width:  u32,
    height: u32,
    costs:  Vec<u32>,
}

impl GridBuilder {
    /// Dimensions are checked lazily: an empty or oversized grid allocates
    /// nothing, rejects every edit and fails in [`build`](Self::build).
    pub fn new(width: u32, height: u32) -> Self {
        let costs = checked_cell_count(width, height).map_or_else(Vec::new, |n| vec![1; n]);
        Self { width, height, costs }
    }

    fn invalid(&self) -> GridError {
        GridError::InvalidDimensions { width: self.width, height: self.height }
    }

    /// Reset every cell that has not been made an obstacle to `cost`.
    pub fn with_default_cost(mut self, cost: u32) -> GridResult<Self> {
        if cost == BLOCKED {
            return Err(GridError::ZeroCost { cell: Cell::default() });
        }
        for c in self.costs.iter_mut().filter(|c| **c != BLOCKED) {
            *c = cost;
        }
        Ok(self)
    }

    fn slot(&self, cell: Cell) -> GridResult<usize> {
        if self.costs.is_empty() {
            Err(self.invalid())
        } else if cell.x < self.width && cell.y < self.height {
            Ok(cell.y as usize * self.width as usize + cell.x as usize)
        } else {
            Err(GridError::OutOfBounds(cell))
        }
    }

    /// Set the terrain cost of `cell`.  Also clears an obstacle there.
    pub fn set_cost(&mut self, cell: Cell, cost: u32) -> GridResult<()> {
        if cost == BLOCKED {
            return Err(GridError::ZeroCost { cell });
        }
        let i = self.slot(cell)?;
        self.costs[i] = cost;
        Ok(())
    }

    /// Mark `cell` as a permanent static obstacle.
    pub fn add_obstacle(&mut self, cell: Cell) -> GridResult<()> {
        let i = self.slot(cell)?;
        self.costs[i] = BLOCKED;
        Ok(())
    }

    /// Convenience: mark every cell in `cells` as an obstacle.
    pub fn add_obstacles<I>(&mut self, cells: I) -> GridResult<()>
    where
        I: IntoIterator<Item = Cell>,
    {
        cells.into_iter().try_for_each(|c| self.add_obstacle(c))
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }

    /// Consume the builder and produce a [`GridMap`].
    pub fn build(self) -> GridResult<GridMap> {
        if self.costs.is_empty() {
            return Err(self.invalid());
        }
        let min_cost = self
            .costs
            .iter()
            .copied()
            .filter(|&c| c != BLOCKED)
            .min()
            .unwrap_or(1);

        Ok(GridMap {
            width:  self.width,
            height: self.height,
            costs:  self.costs,
            min_cost,
        })
    }
}
