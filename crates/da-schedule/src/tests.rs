//! Unit tests for da-schedule.

use da_core::{Cell, ObstacleId, Tick};
use da_grid::GridMap;

use crate::{DynamicObstacle, Motion, ObstacleSchedule, Occupancy, ScheduleError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn traj(points: &[(u64, u32, u32)]) -> Vec<(Tick, Cell)> {
    points.iter().map(|&(t, x, y)| (Tick(t), Cell::new(x, y))).collect()
}

fn obstacle(id: u32, points: &[(u64, u32, u32)], motion: Motion) -> DynamicObstacle {
    DynamicObstacle::new(ObstacleId(id), traj(points), motion).unwrap()
}

fn grid() -> GridMap {
    GridMap::uniform(6, 6).unwrap()
}

// ── DynamicObstacle ───────────────────────────────────────────────────────────

#[cfg(test)]
mod dynamic_obstacle {
    use super::*;

    #[test]
    fn rejects_non_monotonic_trajectory() {
        let err = DynamicObstacle::new(
            ObstacleId(3),
            traj(&[(0, 1, 1), (2, 1, 2), (2, 1, 3)]),
            Motion::Persistent,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::NonMonotonic { obstacle: ObstacleId(3), tick: Tick(2) }
        ));
    }

    #[test]
    fn persistent_holds_final_cell() {
        let o = obstacle(0, &[(2, 1, 1), (4, 1, 2)], Motion::Persistent);
        assert_eq!(o.position_at(Tick(1)), None);
        assert_eq!(o.position_at(Tick(2)), Some(Cell::new(1, 1)));
        assert_eq!(o.position_at(Tick(3)), Some(Cell::new(1, 1)));
        assert_eq!(o.position_at(Tick(4)), Some(Cell::new(1, 2)));
        assert_eq!(o.position_at(Tick(1_000)), Some(Cell::new(1, 2)));
    }

    #[test]
    fn transient_vanishes_after_last_entry() {
        let o = obstacle(0, &[(2, 1, 1), (4, 1, 2)], Motion::Transient);
        assert_eq!(o.position_at(Tick(4)), Some(Cell::new(1, 2)));
        assert_eq!(o.position_at(Tick(5)), None);
        assert_eq!(o.occupancy(Cell::new(1, 2), Tick(5), Tick(5)), Occupancy::Free);
    }

    #[test]
    fn observed_respects_knowledge_cutoff() {
        let o = obstacle(0, &[(5, 3, 3)], Motion::Observed { horizon: 2 });
        let c = Cell::new(3, 3);
        // Not yet sighted as of tick 4, even though the query is for tick 6.
        assert_eq!(o.occupancy(c, Tick(6), Tick(4)), Occupancy::Free);
        // Sighted at 5: known position through tick 7.
        assert_eq!(o.occupancy(c, Tick(6), Tick(5)), Occupancy::Occupied);
        assert_eq!(o.occupancy(c, Tick(7), Tick(5)), Occupancy::Occupied);
        assert_eq!(o.occupancy(Cell::new(3, 4), Tick(7), Tick(5)), Occupancy::Free);
    }

    #[test]
    fn observed_uncertainty_grows_past_horizon() {
        let o = obstacle(0, &[(5, 3, 3)], Motion::Observed { horizon: 2 });
        // Tick 8 is 3 ticks after the sighting: radius-3 diamond is unknown.
        assert_eq!(o.occupancy(Cell::new(3, 3), Tick(8), Tick(5)), Occupancy::Unknown);
        assert_eq!(o.occupancy(Cell::new(5, 4), Tick(8), Tick(5)), Occupancy::Unknown);
        assert_eq!(o.occupancy(Cell::new(5, 5), Tick(8), Tick(5)), Occupancy::Free);
        assert_eq!(o.occupancy(Cell::new(0, 0), Tick(8), Tick(5)), Occupancy::Free);
    }

    #[test]
    fn motion_names_parse() {
        assert_eq!("persistent".parse::<Motion>().unwrap(), Motion::Persistent);
        assert_eq!("transient".parse::<Motion>().unwrap(), Motion::Transient);
        assert_eq!(
            "observed:4".parse::<Motion>().unwrap(),
            Motion::Observed { horizon: 4 }
        );
        assert!("observed".parse::<Motion>().is_err());
        assert!("flying".parse::<Motion>().is_err());
    }
}

// ── ObstacleSchedule ──────────────────────────────────────────────────────────

#[cfg(test)]
mod schedule {
    use super::*;

    #[test]
    fn empty_schedule_is_free_everywhere() {
        let s = ObstacleSchedule::empty();
        assert!(s.is_empty());
        assert!(!s.occupied(Cell::new(0, 0), Tick(0)));
        assert!(!s.view(Tick(3)).blocked(Cell::new(2, 2), 10));
    }

    #[test]
    fn out_of_bounds_trajectory_rejected() {
        let o = obstacle(9, &[(0, 1, 1), (1, 6, 1)], Motion::Persistent);
        let err = ObstacleSchedule::new(&grid(), vec![o]).unwrap_err();
        assert!(matches!(
            err,
            ScheduleError::OutOfBounds { obstacle: ObstacleId(9), cell } if cell == Cell::new(6, 1)
        ));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let a = obstacle(1, &[(0, 1, 1)], Motion::Persistent);
        let b = obstacle(1, &[(0, 2, 2)], Motion::Transient);
        assert!(matches!(
            ObstacleSchedule::new(&grid(), vec![a, b]),
            Err(ScheduleError::DuplicateObstacle(ObstacleId(1)))
        ));
    }

    #[test]
    fn occupied_follows_trajectory() {
        let walker = obstacle(0, &[(0, 0, 2), (1, 1, 2), (2, 2, 2)], Motion::Transient);
        let parked = DynamicObstacle::stationary(ObstacleId(1), Cell::new(4, 4), Tick(3));
        let s = ObstacleSchedule::new(&grid(), vec![walker, parked]).unwrap();

        assert!(s.occupied(Cell::new(0, 2), Tick(0)));
        assert!(!s.occupied(Cell::new(0, 2), Tick(1)));
        assert!(s.occupied(Cell::new(1, 2), Tick(1)));
        assert!(s.occupied(Cell::new(2, 2), Tick(2)));
        assert!(!s.occupied(Cell::new(2, 2), Tick(3)));

        assert!(!s.occupied(Cell::new(4, 4), Tick(2)));
        assert!(s.occupied(Cell::new(4, 4), Tick(3)));
        assert!(s.occupied(Cell::new(4, 4), Tick(99)));
        assert_eq!(s.get(ObstacleId(1)).map(|o| o.motion()), Some(Motion::Persistent));
    }

    #[test]
    fn occupied_wins_over_unknown() {
        let parked = DynamicObstacle::stationary(ObstacleId(0), Cell::new(2, 2), Tick(0));
        let seen = obstacle(1, &[(0, 2, 3)], Motion::Observed { horizon: 0 });
        let s = ObstacleSchedule::new(&grid(), vec![parked, seen]).unwrap();
        assert_eq!(s.occupancy(Cell::new(2, 2), Tick(2)), Occupancy::Occupied);
        assert_eq!(s.occupancy(Cell::new(2, 4), Tick(2)), Occupancy::Unknown);
    }

    #[test]
    fn view_offsets_steps_and_freezes_knowledge() {
        let seen = obstacle(0, &[(5, 3, 3)], Motion::Observed { horizon: 10 });
        let s = ObstacleSchedule::new(&grid(), vec![seen]).unwrap();

        let early = s.view(Tick(4));
        assert_eq!(early.tick_at(2), Tick(6));
        assert!(!early.blocked(Cell::new(3, 3), 2));

        let late = s.view(Tick(5));
        assert!(late.blocked(Cell::new(3, 3), 1));
        assert!(!late.blocked(Cell::new(3, 2), 1));
    }

    #[test]
    fn schedule_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ObstacleSchedule>();
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use super::*;
    use crate::{load_obstacles_reader, write_obstacles};

    #[test]
    fn loads_grouped_obstacles() {
        let csv = "\
obstacle_id,tick,x,y,motion,horizon
1,5,3,3,observed,2
0,0,2,1,persistent,
0,1,2,2,persistent,
";
        let obs = load_obstacles_reader(csv.as_bytes()).unwrap();
        assert_eq!(obs.len(), 2);
        assert_eq!(obs[0].id(), ObstacleId(0));
        assert_eq!(obs[0].trajectory(), traj(&[(0, 2, 1), (1, 2, 2)]).as_slice());
        assert_eq!(obs[1].motion(), Motion::Observed { horizon: 2 });
    }

    #[test]
    fn written_obstacles_reload() {
        let obstacles = vec![
            obstacle(0, &[(0, 2, 1), (1, 2, 2)], Motion::Transient),
            obstacle(4, &[(3, 0, 0)], Motion::Observed { horizon: 6 }),
        ];
        let mut out = Vec::new();
        write_obstacles(&mut out, &obstacles).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("obstacle_id,tick,x,y,motion,horizon\n0,0,2,1,transient,\n"));
        assert_eq!(load_obstacles_reader(text.as_bytes()).unwrap(), obstacles);
    }

    #[test]
    fn mixed_motion_rejected() {
        let csv = "\
obstacle_id,tick,x,y,motion,horizon
0,0,2,1,persistent,
0,1,2,2,transient,
";
        assert!(matches!(
            load_obstacles_reader(csv.as_bytes()),
            Err(ScheduleError::MixedMotion(ObstacleId(0)))
        ));
    }

    #[test]
    fn observed_without_horizon_rejected() {
        let csv = "obstacle_id,tick,x,y,motion,horizon\n0,0,1,1,observed,\n";
        assert!(matches!(
            load_obstacles_reader(csv.as_bytes()),
            Err(ScheduleError::Parse(_))
        ));
    }

    #[test]
    fn out_of_order_rows_rejected() {
        let csv = "obstacle_id,tick,x,y,motion,horizon\n0,3,1,1,transient,\n0,1,1,2,transient,\n";
        assert!(matches!(
            load_obstacles_reader(csv.as_bytes()),
            Err(ScheduleError::NonMonotonic { .. })
        ));
    }
}
