//! Best-first search engine behind [`UniformCost`](crate::UniformCost) and
//! [`AStar`](crate::AStar).
//!
//! One node per cell, updated in place when a cheaper route is found while it
//! is still queued.  A popped node is closed for good; with the consistent
//! heuristics in [`crate::heuristic`] it already carries its optimal `g`.
//! The goal terminates the search when it is *popped*, and `nodes_expanded`
//! counts the closed non-goal nodes.

use da_core::{Cell, NodeIdx};

use crate::deadline::Budget;
use crate::frontier::Frontier;
use crate::node::{Node, NodeArena};
use crate::planner::Env;
use crate::{Deadline, SearchError, SearchResult, Solution};

#[cfg(test)]
thread_local! {
    /// Cells closed by searches on this thread, in closing order.
    static CLOSED: std::cell::RefCell<Vec<Cell>> = const { std::cell::RefCell::new(Vec::new()) };
}

/// Drain the cells closed on this thread since the last call.
#[cfg(test)]
pub(crate) fn take_closed() -> Vec<Cell> {
    CLOSED.with(|c| std::mem::take(&mut *c.borrow_mut()))
}

pub(crate) fn best_first<K, H, F>(
    env:      &Env<'_>,
    start:    Cell,
    goal:     Cell,
    deadline: &Deadline,
    h:        H,
    key:      F,
) -> SearchResult
where
    K: Ord + Copy,
    H: Fn(Cell) -> f64,
    F: Fn(&Node) -> K,
{
    let mut budget = Budget::start(deadline);
    let mut arena = NodeArena::new(env.grid);
    let mut open: Frontier<K> = Frontier::new(env.grid.cell_count());

    let root = arena.insert(Node::root(start, h(start)));
    open.push_or_improve(root.index(), key(arena.get(root)));

    while let Some((_, slot)) = open.pop() {
        let idx = NodeIdx(slot as u32);
        let node = *arena.get(idx);

        if node.cell == goal {
            let path = env.path(arena.path_to(idx));
            return Ok(Solution::new(path, budget.spent()));
        }
        if !budget.allow() {
            return Err(SearchError::DeadlineExceeded { expanded: budget.spent() });
        }
        arena.get_mut(idx).closed = true;
        #[cfg(test)]
        CLOSED.with(|c| c.borrow_mut().push(node.cell));

        for next in env.successors(node.cell, node.steps) {
            let g = node.g + env.cost(next);
            match arena.lookup(next) {
                Some(seen) => {
                    let entry = arena.get_mut(seen);
                    if entry.closed || g >= entry.g {
                        continue;
                    }
                    entry.g = g;
                    entry.steps = node.steps + 1;
                    entry.parent = idx;
                    open.push_or_improve(seen.index(), key(&*entry));
                }
                None => {
                    let child = arena.insert(Node {
                        cell:   next,
                        g,
                        steps:  node.steps + 1,
                        h:      h(next),
                        parent: idx,
                        closed: false,
                    });
                    open.push_or_improve(child.index(), key(arena.get(child)));
                }
            }
        }
    }

    Err(SearchError::NoPath { expanded: budget.spent() })
}
