//! Per-invocation node storage.
//!
//! Every search builds a fresh [`NodeArena`] and drops it on return.  Parent
//! links are arena indices ([`NodeIdx`]), so the parent graph is a tree and
//! path reconstruction is a walk up that tree.  A dense `cell → NodeIdx`
//! table makes "have I seen this cell?" a single array read.

use da_core::{Cell, NodeIdx};
use da_grid::GridMap;

#[derive(Copy, Clone, Debug)]
pub struct Node {
    pub cell:   Cell,
    /// Cost-so-far from the start (terrain cost of every entered cell).
    pub g:      u64,
    /// Moves from the start; the node is occupied at tick `origin + steps`.
    pub steps:  u64,
    /// Heuristic estimate to the goal (0 for uninformed search).
    pub h:      f64,
    pub parent: NodeIdx,
    /// Finalized: popped and expanded, never reopened.
    pub closed: bool,
}

impl Node {
    pub fn root(cell: Cell, h: f64) -> Self {
        Self { cell, g: 0, steps: 0, h, parent: NodeIdx::NONE, closed: false }
    }

    #[inline]
    pub fn f(&self) -> f64 {
        self.g as f64 + self.h
    }
}

pub struct NodeArena<'g> {
    grid:    &'g GridMap,
    nodes:   Vec<Node>,
    by_cell: Vec<NodeIdx>,
}

impl<'g> NodeArena<'g> {
    pub fn new(grid: &'g GridMap) -> Self {
        Self {
            grid,
            nodes: Vec::new(),
            by_cell: vec![NodeIdx::NONE; grid.cell_count()],
        }
    }

    /// Store `node`, replacing the cell's previous entry in the lookup table.
    pub fn insert(&mut self, node: Node) -> NodeIdx {
        let idx = NodeIdx(self.nodes.len() as u32);
        if let Some(i) = self.grid.index(node.cell) {
            self.by_cell[i] = idx;
        }
        self.nodes.push(node);
        idx
    }

    /// The node currently recorded for `cell`, if any.
    #[inline]
    pub fn lookup(&self, cell: Cell) -> Option<NodeIdx> {
        let idx = self.by_cell[self.grid.index(cell)?];
        (!idx.is_none()).then_some(idx)
    }

    #[inline]
    pub fn get(&self, idx: NodeIdx) -> &Node {
        &self.nodes[idx.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, idx: NodeIdx) -> &mut Node {
        &mut self.nodes[idx.index()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Cells from the root to `idx`, both inclusive.
    pub fn path_to(&self, idx: NodeIdx) -> Vec<Cell> {
        let mut cells = Vec::new();
        let mut cur = idx;
        while !cur.is_none() {
            let node = &self.nodes[cur.index()];
            cells.push(node.cell);
            cur = node.parent;
        }
        cells.reverse();
        cells
    }
}
