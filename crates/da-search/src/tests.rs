//! Unit tests for da-search.
//!
//! Grids are built in memory; see `helpers` for the fixtures.

#[cfg(test)]
mod helpers {
    use da_core::{Cell, SearchRng};
    use da_grid::{GridBuilder, GridMap};

    use crate::{Algorithm, AnnealingParams, HillClimbingParams, Path};

    pub fn c(x: u32, y: u32) -> Cell {
        Cell::new(x, y)
    }

    pub fn open(w: u32, h: u32) -> GridMap {
        GridMap::uniform(w, h).unwrap()
    }

    /// 5×5 with a full-height wall at x = 2.
    pub fn walled() -> GridMap {
        let mut b = GridBuilder::new(5, 5);
        b.add_obstacles((0..5).map(|y| c(2, y))).unwrap();
        b.build().unwrap()
    }

    /// 3×3 whose centre costs 10.
    pub fn expensive_centre() -> GridMap {
        let mut b = GridBuilder::new(3, 3);
        b.set_cost(c(1, 1), 10).unwrap();
        b.build().unwrap()
    }

    /// `w×h` with ~25% random obstacles; the two corners are kept free.
    pub fn scattered(w: u32, h: u32, seed: u64) -> GridMap {
        let mut rng = SearchRng::new(seed);
        let mut b = GridBuilder::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let corner = (x, y) == (0, 0) || (x, y) == (w - 1, h - 1);
                if !corner && rng.gen_bool(0.25) {
                    b.add_obstacle(c(x, y)).unwrap();
                }
            }
        }
        b.build().unwrap()
    }

    /// No repeated cells.
    pub fn is_simple(path: &Path) -> bool {
        let mut cells = path.cells().to_vec();
        cells.sort();
        cells.windows(2).all(|w| w[0] != w[1])
    }

    /// The five algorithms with enough restarts/iterations for small grids.
    pub fn every_algorithm() -> Vec<Algorithm> {
        vec![
            Algorithm::Bfs,
            Algorithm::UniformCost,
            Algorithm::AStar { heuristic: crate::Heuristic::Manhattan },
            Algorithm::HillClimbing(HillClimbingParams { max_restarts: 3, ..Default::default() }),
            Algorithm::SimulatedAnnealing(AnnealingParams::default()),
        ]
    }
}

// ── Frontier ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod frontier {
    use crate::frontier::Frontier;

    #[test]
    fn unit_key_is_fifo() {
        let mut f: Frontier<()> = Frontier::new(8);
        for slot in [5, 2, 7, 0] {
            assert!(f.push_or_improve(slot, ()));
        }
        let order: Vec<usize> = std::iter::from_fn(|| f.pop().map(|(_, s)| s)).collect();
        assert_eq!(order, vec![5, 2, 7, 0]);
    }

    #[test]
    fn ties_break_by_discovery() {
        let mut f: Frontier<u64> = Frontier::new(4);
        f.push_or_improve(3, 5);
        f.push_or_improve(1, 5);
        f.push_or_improve(2, 4);
        assert_eq!(f.pop(), Some((4, 2)));
        assert_eq!(f.pop(), Some((5, 3)));
        assert_eq!(f.pop(), Some((5, 1)));
        assert!(f.is_empty());
    }

    #[test]
    fn improve_keeps_original_sequence() {
        let mut f: Frontier<u64> = Frontier::new(4);
        f.push_or_improve(0, 9); // seq 0
        f.push_or_improve(1, 3); // seq 1
        // Lowering slot 0 to the same key as slot 1: slot 0 was discovered
        // first and must pop first.
        assert!(f.push_or_improve(0, 3));
        assert_eq!(f.len(), 2);
        assert_eq!(f.pop(), Some((3, 0)));
        assert_eq!(f.pop(), Some((3, 1)));
    }

    #[test]
    fn worse_key_ignored() {
        let mut f: Frontier<u64> = Frontier::new(2);
        f.push_or_improve(0, 3);
        assert!(!f.push_or_improve(0, 3));
        assert!(!f.push_or_improve(0, 7));
        assert!(f.contains(0));
        assert_eq!(f.len(), 1);
        assert_eq!(f.pop(), Some((3, 0)));
        assert!(!f.contains(0));
    }
}

// ── Heuristics ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod heuristic {
    use super::helpers::c;
    use crate::Heuristic;

    #[test]
    fn known_values() {
        let (a, b) = (c(0, 0), c(3, 4));
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert!((Heuristic::Euclidean.estimate(a, b) - 5.0).abs() < 1e-12);
        let diag = 4.0 + (2f64.sqrt() - 1.0) * 3.0;
        assert!((Heuristic::Diagonal.estimate(a, b) - diag).abs() < 1e-12);
    }

    #[test]
    fn never_exceed_manhattan() {
        for x in 0..6 {
            for y in 0..6 {
                let m = Heuristic::Manhattan.estimate(c(0, 0), c(x, y));
                for h in Heuristic::ALL {
                    assert!(h.estimate(c(0, 0), c(x, y)) <= m + 1e-12);
                    assert_eq!(h.estimate(c(x, y), c(x, y)), 0.0);
                }
            }
        }
    }

    #[test]
    fn names_parse() {
        for h in Heuristic::ALL {
            assert_eq!(h.name().parse::<Heuristic>().unwrap(), h);
        }
        assert!("chebyshev".parse::<Heuristic>().is_err());
    }
}

// ── Shared planner contract ───────────────────────────────────────────────────

#[cfg(test)]
mod contract {
    use super::helpers::*;
    use crate::{Deadline, FailureReason, Planner, SearchError};

    #[test]
    fn four_by_four_optimal_planners() {
        let g = open(4, 4);
        for alg in every_algorithm().into_iter().take(3) {
            let sol = alg.search(&g, None, c(0, 0), c(3, 3), &Deadline::UNBOUNDED).unwrap();
            assert_eq!(sol.path.cost(), 6, "{alg}");
            assert_eq!(sol.path.len(), 7, "{alg}");
            assert_eq!(sol.path.first(), Some(c(0, 0)));
            assert_eq!(sol.path.last(), Some(c(3, 3)));
            assert!(sol.path.is_feasible(&g, None));
        }
    }

    #[test]
    fn start_equals_goal_is_empty_path() {
        let g = open(3, 3);
        for alg in every_algorithm() {
            let sol = alg.search(&g, None, c(1, 1), c(1, 1), &Deadline::UNBOUNDED).unwrap();
            assert!(sol.path.is_empty(), "{alg}");
            assert_eq!(sol.path.cost(), 0);
            assert_eq!(sol.nodes_expanded, 0);
        }
    }

    #[test]
    fn blocked_endpoints() {
        let g = walled();
        for alg in every_algorithm() {
            let err = alg.search(&g, None, c(2, 0), c(4, 4), &Deadline::UNBOUNDED).unwrap_err();
            assert_eq!(err, SearchError::StartBlocked { cell: c(2, 0) });
            let err = alg.search(&g, None, c(0, 0), c(9, 9), &Deadline::UNBOUNDED).unwrap_err();
            assert_eq!(err, SearchError::GoalBlocked { cell: c(9, 9) });
            assert_eq!(err.reason().tag(), "goal-blocked");
        }
    }

    #[test]
    fn wall_defeats_every_algorithm() {
        let g = walled();
        for alg in every_algorithm() {
            let err = alg.search(&g, None, c(0, 0), c(4, 4), &Deadline::UNBOUNDED).unwrap_err();
            let expected = if matches!(alg, crate::Algorithm::HillClimbing(_)) {
                FailureReason::RestartBudgetExhausted
            } else {
                FailureReason::NoPath
            };
            assert_eq!(err.reason(), expected, "{alg}");
        }
    }

    #[test]
    fn zero_expansion_deadline() {
        let g = open(6, 6);
        for alg in every_algorithm() {
            let err = alg
                .search(&g, None, c(0, 0), c(5, 5), &Deadline::expansions(0))
                .unwrap_err();
            assert_eq!(err.reason(), FailureReason::DeadlineExceeded, "{alg}");
            assert!(err.nodes_expanded() <= 1, "{alg}");
        }
    }

    #[test]
    fn expansion_cap_is_respected() {
        let g = open(20, 20);
        let err = crate::UniformCost
            .search(&g, None, c(0, 0), c(19, 19), &Deadline::expansions(25))
            .unwrap_err();
        assert_eq!(err, SearchError::DeadlineExceeded { expanded: 25 });
    }

    #[test]
    fn results_are_deterministic() {
        let g = scattered(12, 12, 5);
        for alg in every_algorithm() {
            let a = alg.search(&g, None, c(0, 0), c(11, 11), &Deadline::UNBOUNDED);
            let b = alg.search(&g, None, c(0, 0), c(11, 11), &Deadline::UNBOUNDED);
            assert_eq!(a, b, "{alg}");
        }
    }
}

// ── BFS / UCS / A* ────────────────────────────────────────────────────────────

#[cfg(test)]
mod systematic {
    use da_core::SearchRng;
    use da_grid::{GridBuilder, GridMap};

    use super::helpers::*;
    use crate::best_first;
    use crate::{AStar, Algorithm, Bfs, Deadline, Heuristic, Planner, UniformCost};

    #[test]
    fn expansion_order_on_open_grid() {
        let g = open(4, 4);
        let d = Deadline::UNBOUNDED;
        let bfs = Bfs.search(&g, None, c(0, 0), c(3, 3), &d).unwrap();
        let ucs = UniformCost.search(&g, None, c(0, 0), c(3, 3), &d).unwrap();
        let astar = AStar::default().search(&g, None, c(0, 0), c(3, 3), &d).unwrap();
        assert_eq!(bfs.nodes_expanded, 16);
        assert_eq!(ucs.nodes_expanded, 15);
        // Lower-h tie-breaking walks straight down one shortest path.
        assert_eq!(astar.nodes_expanded, 6);
    }

    #[test]
    fn uniform_grids_agree_on_cost_and_order_expansions() {
        let d = Deadline::UNBOUNDED;
        let mut solved = 0;
        for seed in 0..20 {
            let g = scattered(15, 15, seed);
            let (s, t) = (c(0, 0), c(14, 14));
            let Ok(bfs) = Bfs.search(&g, None, s, t, &d) else {
                assert!(UniformCost.search(&g, None, s, t, &d).is_err());
                continue;
            };
            solved += 1;
            let ucs = UniformCost.search(&g, None, s, t, &d).unwrap();
            for h in Heuristic::ALL {
                let astar = AStar::new(h).search(&g, None, s, t, &d).unwrap();
                assert_eq!(astar.path.cost(), ucs.path.cost(), "seed {seed} {h}");
                assert!(astar.nodes_expanded <= ucs.nodes_expanded, "seed {seed} {h}");
            }
            assert_eq!(bfs.path.cost(), ucs.path.cost(), "seed {seed}");
            assert!(ucs.nodes_expanded <= bfs.nodes_expanded, "seed {seed}");
            assert!(ucs.path.is_feasible(&g, None));
        }
        assert!(solved > 0);
    }

    /// `w×h` with ~20% obstacles and random terrain costs in 1..=9.
    fn weighted(w: u32, h: u32, seed: u64) -> GridMap {
        let mut rng = SearchRng::new(seed);
        let mut b = GridBuilder::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let corner = (x, y) == (0, 0) || (x, y) == (w - 1, h - 1);
                if !corner && rng.gen_bool(0.2) {
                    b.add_obstacle(c(x, y)).unwrap();
                } else {
                    b.set_cost(c(x, y), rng.gen_range(1..=9)).unwrap();
                }
            }
        }
        b.build().unwrap()
    }

    #[test]
    fn weighted_grids_astar_matches_ucs_for_every_heuristic() {
        let d = Deadline::UNBOUNDED;
        let mut solved = 0;
        for seed in 0..40 {
            let g = weighted(12, 10, 1_000 + seed);
            let (s, t) = (c(0, 0), c(11, 9));
            let Ok(ucs) = UniformCost.search(&g, None, s, t, &d) else {
                for h in Heuristic::ALL {
                    assert!(AStar::new(h).search(&g, None, s, t, &d).is_err());
                }
                continue;
            };
            solved += 1;
            for h in Heuristic::ALL {
                let astar = AStar::new(h).search(&g, None, s, t, &d).unwrap();
                assert_eq!(astar.path.cost(), ucs.path.cost(), "seed {seed} {h}");
                assert!(astar.path.is_feasible(&g, None), "seed {seed} {h}");
            }
        }
        assert!(solved > 10);
    }

    #[test]
    fn no_cell_is_closed_twice() {
        let d = Deadline::UNBOUNDED;
        let mut planners: Vec<Algorithm> = vec![Algorithm::UniformCost];
        planners.extend(Heuristic::ALL.map(|heuristic| Algorithm::AStar { heuristic }));
        for seed in 0..20 {
            let g = weighted(12, 10, 2_000 + seed);
            for a in &planners {
                best_first::take_closed();
                let result = a.search(&g, None, c(0, 0), c(11, 9), &d);
                let mut closed = best_first::take_closed();
                let count = closed.len();
                closed.sort();
                closed.dedup();
                assert_eq!(closed.len(), count, "seed {seed} {}", a.name());
                let expanded = match result {
                    Ok(sol) => sol.nodes_expanded,
                    Err(e) => e.nodes_expanded(),
                };
                assert_eq!(count as u64, expanded, "seed {seed} {}", a.name());
            }
        }
    }

    #[test]
    fn terrain_costs_matter_to_ucs_not_bfs() {
        let g = expensive_centre();
        let d = Deadline::UNBOUNDED;
        let bfs = Bfs.search(&g, None, c(0, 1), c(2, 1), &d).unwrap();
        assert_eq!(bfs.path.cells(), &[c(0, 1), c(1, 1), c(2, 1)]);
        assert_eq!(bfs.path.cost(), 11);

        let ucs = UniformCost.search(&g, None, c(0, 1), c(2, 1), &d).unwrap();
        assert_eq!(ucs.path.cost(), 4);
        assert!(!ucs.path.cells().contains(&c(1, 1)));

        let astar = AStar::default().search(&g, None, c(0, 1), c(2, 1), &d).unwrap();
        assert_eq!(astar.path.cost(), 4);
    }
}

// ── Time-aware search ─────────────────────────────────────────────────────────

#[cfg(test)]
mod time_aware {
    use da_core::{ObstacleId, Tick};
    use da_schedule::{DynamicObstacle, Motion, ObstacleSchedule};

    use super::helpers::*;
    use crate::{AStar, Bfs, Deadline, Planner, UniformCost};

    #[test]
    fn transient_obstacle_forces_detour() {
        let g = open(5, 3);
        // Sits on the straight-line route exactly when the agent would arrive.
        let blocker = DynamicObstacle::new(
            ObstacleId(0),
            vec![(Tick(2), c(2, 1))],
            Motion::Transient,
        )
        .unwrap();
        let sched = ObstacleSchedule::new(&g, vec![blocker]).unwrap();
        let view = sched.view(Tick::ZERO);

        let planners: [&dyn Planner; 3] = [&Bfs, &UniformCost, &AStar::default()];
        for p in planners {
            let sol = p.search(&g, Some(view), c(0, 1), c(4, 1), &Deadline::UNBOUNDED).unwrap();
            assert!(sol.path.is_feasible(&g, Some(view)), "{}", p.name());
            assert_ne!(sol.path.get(2), Some(c(2, 1)), "{}", p.name());
        }
    }

    #[test]
    fn origin_shifts_the_clock() {
        let g = open(5, 1);
        let blocker = DynamicObstacle::new(
            ObstacleId(0),
            vec![(Tick(12), c(2, 0))],
            Motion::Transient,
        )
        .unwrap();
        let sched = ObstacleSchedule::new(&g, vec![blocker]).unwrap();

        // Started at 10: step 2 lands on (2,0) at tick 12 and there is no detour.
        let late = UniformCost.search(&g, Some(sched.view(Tick(10))), c(0, 0), c(4, 0), &Deadline::UNBOUNDED);
        assert!(late.is_err());

        // Started at 11: the cell is entered at 13, after the obstacle left.
        let sol = UniformCost
            .search(&g, Some(sched.view(Tick(11))), c(0, 0), c(4, 0), &Deadline::UNBOUNDED)
            .unwrap();
        assert_eq!(sol.path.computed_at(), Tick(11));
        assert_eq!(sol.path.len(), 5);
    }

    #[test]
    fn unknown_region_is_avoided() {
        let g = open(7, 3);
        // Sighted at tick 0 on (3,0) with no horizon: by tick 3 it could be
        // anywhere within distance 3, which covers the middle column.
        let ghost = DynamicObstacle::new(
            ObstacleId(0),
            vec![(Tick(0), c(3, 0))],
            Motion::Observed { horizon: 0 },
        )
        .unwrap();
        let sched = ObstacleSchedule::new(&g, vec![ghost]).unwrap();
        let res = AStar::default().search(&g, Some(sched.view(Tick::ZERO)), c(0, 1), c(6, 1), &Deadline::UNBOUNDED);
        assert!(res.is_err());
        // Without the schedule the route is trivial.
        assert!(AStar::default().search(&g, None, c(0, 1), c(6, 1), &Deadline::UNBOUNDED).is_ok());
    }
}

// ── Hill climbing ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod hill_climbing {
    use da_grid::GridBuilder;

    use super::helpers::*;
    use crate::{Deadline, HillClimbing, HillClimbingParams, Planner, SearchError};

    #[test]
    fn open_grid_climbs_straight_to_goal() {
        let g = open(6, 6);
        let sol = HillClimbing::default()
            .search(&g, None, c(0, 0), c(5, 5), &Deadline::UNBOUNDED)
            .unwrap();
        assert_eq!(sol.path.len(), 11);
        assert!(sol.path.is_feasible(&g, None));
    }

    #[test]
    fn restart_budget_is_exact() {
        let g = walled();
        for restarts in [0, 1, 4, 9] {
            let hc = HillClimbing::new(HillClimbingParams { max_restarts: restarts, ..Default::default() });
            let err = hc.search(&g, None, c(0, 2), c(4, 2), &Deadline::UNBOUNDED).unwrap_err();
            assert!(
                matches!(err, SearchError::RestartBudgetExhausted { restarts: r, .. } if r == restarts),
                "{err:?}"
            );
        }
    }

    #[test]
    fn restarted_paths_stay_connected() {
        // A cup that traps the greedy climb under its floor.
        //
        //   y=6  . . . G . . .
        //   y=3  . # # # # # .
        //   y=2  . # . . . # .
        //   y=1  . . . S . . .
        let mut b = GridBuilder::new(7, 7);
        b.add_obstacles((1..=5).map(|x| c(x, 3))).unwrap();
        b.add_obstacles([c(1, 2), c(5, 2)]).unwrap();
        let g = b.build().unwrap();

        for seed in 0..10 {
            let hc = HillClimbing::new(HillClimbingParams { max_restarts: 40, seed, ..Default::default() });
            match hc.search(&g, None, c(3, 1), c(3, 6), &Deadline::UNBOUNDED) {
                Ok(sol) => {
                    assert!(sol.path.is_feasible(&g, None), "seed {seed}");
                    assert_eq!(sol.path.first(), Some(c(3, 1)));
                    assert_eq!(sol.path.last(), Some(c(3, 6)));
                    assert!(is_simple(&sol.path));
                }
                Err(e) => assert!(
                    matches!(e, SearchError::RestartBudgetExhausted { restarts: 40, .. }),
                    "seed {seed}: {e:?}"
                ),
            }
        }
    }
}

// ── Simulated annealing ───────────────────────────────────────────────────────

#[cfg(test)]
mod annealing {
    use super::helpers::*;
    use crate::{
        AnnealingParams, Cooling, Deadline, NeighborChoice, Planner, SearchError, SimulatedAnnealing,
    };

    #[test]
    fn reaches_goal_on_open_grid() {
        let g = open(5, 5);
        for choice in [NeighborChoice::Uniform, NeighborChoice::CostWeighted] {
            let sa = SimulatedAnnealing::new(AnnealingParams {
                neighbor_choice: choice,
                seed: 7,
                ..Default::default()
            });
            let out = sa.anneal(&g, None, c(0, 0), c(4, 4), &Deadline::UNBOUNDED);
            let sol = out.result.unwrap();
            assert_eq!(sol.path.last(), Some(c(4, 4)));
            assert!(sol.path.is_feasible(&g, None));
            assert!(is_simple(&sol.path), "walk must be loop-erased");
            assert_eq!(out.final_score, 0.0);
        }
    }

    #[test]
    fn best_score_never_above_final() {
        let g = walled();
        for seed in 0..8 {
            let sa = SimulatedAnnealing::new(AnnealingParams {
                seed,
                max_iterations: 2_000,
                ..Default::default()
            });
            let out = sa.anneal(&g, None, c(0, 0), c(4, 4), &Deadline::UNBOUNDED);
            assert!(matches!(out.result, Err(SearchError::NoPath { .. })));
            assert!(out.best_score <= out.final_score, "seed {seed}");
            assert_eq!(out.best_walk.first(), Some(&c(0, 0)));
        }
    }

    #[test]
    fn freezing_stops_before_iteration_cap() {
        let g = open(10, 10);
        let sa = SimulatedAnnealing::new(AnnealingParams {
            initial_temperature: 1.0,
            min_temperature: 0.5,
            cooling: Cooling::Geometric { ratio: 0.5 },
            ..Default::default()
        });
        let out = sa.anneal(&g, None, c(0, 0), c(9, 9), &Deadline::UNBOUNDED);
        assert_eq!(out.result, Err(SearchError::NoPath { expanded: 2 }));
        assert_eq!(out.iterations, 2);
        assert_eq!(out.final_temperature, 0.25);
    }

    #[test]
    fn iteration_cap() {
        let g = open(10, 10);
        let sa = SimulatedAnnealing::new(AnnealingParams {
            max_iterations: 3,
            cooling: Cooling::Linear { step: 0.001 },
            ..Default::default()
        });
        let err = sa.search(&g, None, c(0, 0), c(9, 9), &Deadline::UNBOUNDED).unwrap_err();
        assert_eq!(err, SearchError::NoPath { expanded: 3 });
    }

    #[test]
    fn validation() {
        assert!(AnnealingParams::default().validate().is_ok());
        let bad_ratio = AnnealingParams { cooling: Cooling::Geometric { ratio: 1.0 }, ..Default::default() };
        assert!(bad_ratio.validate().is_err());
        let bad_step = AnnealingParams { cooling: Cooling::Linear { step: 0.0 }, ..Default::default() };
        assert!(bad_step.validate().is_err());
        let bad_floor = AnnealingParams { min_temperature: 0.0, ..Default::default() };
        assert!(bad_floor.validate().is_err());
    }
}

// ── Algorithm & compare ───────────────────────────────────────────────────────

#[cfg(test)]
mod algorithm {
    use super::helpers::*;
    use crate::{compare, repeat, Algorithm, Deadline, Heuristic, Planner};

    #[test]
    fn names_roundtrip() {
        for name in Algorithm::NAMES {
            let alg: Algorithm = name.parse().unwrap();
            assert_eq!(alg.name(), name);
            assert_eq!(alg.to_string(), name);
        }
        assert!("dijkstra".parse::<Algorithm>().is_err());
    }

    #[test]
    fn with_heuristic_and_seed() {
        let a = Algorithm::UniformCost.with_heuristic(Heuristic::Diagonal);
        assert_eq!(a, Algorithm::UniformCost);
        let a = Algorithm::default().with_heuristic(Heuristic::Euclidean);
        assert_eq!(a, Algorithm::AStar { heuristic: Heuristic::Euclidean });
        match "hill_climbing".parse::<Algorithm>().unwrap().with_seed(99) {
            Algorithm::HillClimbing(p) => assert_eq!(p.seed, 99),
            other => panic!("unexpected {other:?}"),
        }
        assert!(Algorithm::SimulatedAnnealing(Default::default()).is_local_search());
        assert!(!Algorithm::Bfs.is_local_search());
    }

    #[test]
    fn compare_preserves_order_and_results() {
        let g = open(6, 6);
        let algs = every_algorithm();
        let rows = compare(&g, None, c(0, 0), c(5, 5), &algs, &Deadline::UNBOUNDED);
        assert_eq!(rows.len(), algs.len());
        for (row, alg) in rows.iter().zip(&algs) {
            assert_eq!(row.algorithm, *alg);
            let direct = alg.search(&g, None, c(0, 0), c(5, 5), &Deadline::UNBOUNDED);
            assert_eq!(row.result, direct);
            assert_eq!(row.nodes_expanded(), match &direct {
                Ok(s) => s.nodes_expanded,
                Err(e) => e.nodes_expanded(),
            });
        }
        assert!(rows.iter().take(3).all(|r| r.succeeded()));
    }

    #[test]
    fn repeat_averages_per_algorithm() {
        let g = open(6, 6);
        let algs = [Algorithm::Bfs, Algorithm::UniformCost];
        let stats = repeat(&g, None, c(0, 0), c(5, 5), &algs, 3, &Deadline::UNBOUNDED);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].algorithm, "bfs");
        assert_eq!(stats[1].algorithm, "ucs");
        for s in &stats {
            assert_eq!((s.runs, s.successes), (3, 3));
            assert_eq!(s.success_rate, 1.0);
            assert_eq!(s.avg_path_cost, Some(10.0));
            assert_eq!(s.first_failure, None);
        }
        assert_eq!(stats[0].avg_nodes_expanded, 36.0);
    }

    #[test]
    fn repeat_reports_failures_without_a_cost() {
        let g = walled();
        let stats = repeat(&g, None, c(0, 0), c(4, 4), &[Algorithm::Bfs], 0, &Deadline::UNBOUNDED);
        assert_eq!(stats[0].runs, 1);
        assert_eq!(stats[0].successes, 0);
        assert_eq!(stats[0].avg_path_cost, None);
        assert_eq!(stats[0].success_rate, 0.0);
        assert_eq!(stats[0].first_failure, Some("no-path"));
    }

    #[test]
    fn repeat_first_run_keeps_the_configured_seed() {
        let g = scattered(10, 10, 3);
        let hc: Algorithm = "hill_climbing".parse::<Algorithm>().unwrap().with_seed(17);
        let single = hc.search(&g, None, c(0, 0), c(9, 9), &Deadline::UNBOUNDED);
        let stats = repeat(&g, None, c(0, 0), c(9, 9), &[hc], 1, &Deadline::UNBOUNDED);
        assert_eq!(stats[0].successes, u32::from(single.is_ok()));
        assert_eq!(stats[0].avg_path_cost, single.as_ref().ok().map(|s| s.path.cost() as f64));
        assert_eq!(stats[0].algorithm, "hill_climbing");
    }
}
