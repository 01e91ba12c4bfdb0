//! Breadth-first search.
//!
//! Treats every move as unit cost and stops the moment the goal is
//! *discovered*.  A node is marked visited (and counted as expanded) when it
//! is discovered, so `nodes_expanded` is the size of the visited set.
//!
//! The returned path has the fewest moves; its reported cost uses real
//! terrain costs, so it is cost-optimal only on uniform-cost grids.

use da_core::{Cell, NodeIdx};
use da_grid::GridMap;
use da_schedule::ScheduleView;

use crate::deadline::Budget;
use crate::frontier::Frontier;
use crate::node::{Node, NodeArena};
use crate::planner::{preflight, Env};
use crate::{Deadline, Planner, SearchError, SearchResult, Solution};

#[derive(Copy, Clone, Debug, Default)]
pub struct Bfs;

impl Planner for Bfs {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn search(
        &self,
        grid:     &GridMap,
        schedule: Option<ScheduleView<'_>>,
        start:    Cell,
        goal:     Cell,
        deadline: &Deadline,
    ) -> SearchResult {
        let env = Env::new(grid, schedule);
        if let Some(trivial) = preflight(&env, start, goal)? {
            return Ok(trivial);
        }

        let mut budget = Budget::start(deadline);
        let mut arena = NodeArena::new(grid);
        let mut queue: Frontier<()> = Frontier::new(grid.cell_count());

        let root = arena.insert(Node::root(start, 0.0));
        queue.push_or_improve(root.index(), ());

        while let Some(((), slot)) = queue.pop() {
            if !budget.allow() {
                return Err(SearchError::DeadlineExceeded { expanded: arena.len() as u64 });
            }
            let idx = NodeIdx(slot as u32);
            let node = *arena.get(idx);

            for next in env.successors(node.cell, node.steps) {
                if arena.lookup(next).is_some() {
                    continue;
                }
                let child = arena.insert(Node {
                    cell:   next,
                    g:      node.g + env.cost(next),
                    steps:  node.steps + 1,
                    h:      0.0,
                    parent: idx,
                    closed: false,
                });
                if next == goal {
                    let path = env.path(arena.path_to(child));
                    return Ok(Solution::new(path, arena.len() as u64));
                }
                queue.push_or_improve(child.index(), ());
            }
            arena.get_mut(idx).closed = true;
        }

        Err(SearchError::NoPath { expanded: arena.len() as u64 })
    }
}
