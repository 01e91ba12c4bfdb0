//! Random solvable maps and moving obstacles for `generate-map`.

use anyhow::{Result, bail};
use tracing::debug;

use da_core::{Cell, ObstacleId, SearchRng, Tick};
use da_grid::{GridBuilder, MapSpec};
use da_schedule::{DynamicObstacle, Motion};
use da_search::{Bfs, Deadline, Planner};

const MAX_ATTEMPTS: u64 = 64;

/// Scatter obstacles with probability `density`, keeping the corners free,
/// until start (top-left) and goal (bottom-right) are connected.
///
/// Each attempt draws from its own seed derived from `seed`, so a given
/// `(width, height, density, seed)` always produces the same map.
pub fn solvable_map(width: u32, height: u32, density: f64, seed: u64) -> Result<MapSpec> {
    if width == 0 || height == 0 {
        bail!("map must be at least 1×1, got {width}×{height}");
    }
    let start = Cell::new(0, 0);
    let goal = Cell::new(width - 1, height - 1);

    for attempt in 0..MAX_ATTEMPTS {
        let mut rng = SearchRng::new(SearchRng::derive_seed(seed, attempt));
        let mut builder = GridBuilder::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let cell = Cell::new(x, y);
                if cell != start && cell != goal && rng.gen_bool(density) {
                    builder.add_obstacle(cell)?;
                }
            }
        }
        let map = MapSpec::new(builder.build()?, start, goal)?;
        if Bfs.search(map.grid(), None, start, goal, &Deadline::UNBOUNDED).is_ok() {
            debug!(attempt, obstacles = map.grid().obstacle_count(), "generated map");
            return Ok(map);
        }
    }
    bail!("no solvable {width}×{height} map at density {density} after {MAX_ATTEMPTS} attempts")
}

/// `count` transient obstacles, each a random walk of `ticks` steps over free
/// cells that never enters the start or goal cell.
///
/// Obstacle `i` draws from stream `MAX_ATTEMPTS + i` of `seed`, disjoint from
/// the streams [`solvable_map`] uses.
pub fn moving_obstacles(
    map: &MapSpec,
    count: u32,
    ticks: u64,
    seed: u64,
) -> Result<Vec<DynamicObstacle>> {
    let grid = map.grid();
    let allowed = |c: Cell| c != map.start() && c != map.goal() && grid.is_passable(c);
    let free: Vec<Cell> = grid.free_cells().filter(|&c| allowed(c)).collect();

    let mut obstacles = Vec::with_capacity(count as usize);
    for i in 0..count {
        let mut rng = SearchRng::new(SearchRng::derive_seed(seed, MAX_ATTEMPTS + u64::from(i)));
        let Some(&first) = rng.choose(&free) else {
            bail!("no free cell left for moving obstacles");
        };
        let mut trajectory = vec![(Tick::ZERO, first)];
        let mut at = first;
        for t in 1..ticks {
            let options: Vec<Cell> = grid.neighbors(at).filter(|&c| allowed(c)).collect();
            if let Some(&next) = rng.choose(&options) {
                at = next;
            }
            trajectory.push((Tick(t), at));
        }
        obstacles.push(DynamicObstacle::new(ObstacleId(i), trajectory, Motion::Transient)?);
    }
    Ok(obstacles)
}

#[cfg(test)]
mod tests {
    use da_schedule::ObstacleSchedule;

    use super::*;

    #[test]
    fn generated_maps_are_solvable_and_reproducible() {
        let a = solvable_map(12, 8, 0.3, 7).unwrap();
        let b = solvable_map(12, 8, 0.3, 7).unwrap();
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.start(), Cell::new(0, 0));
        assert_eq!(a.goal(), Cell::new(11, 7));
        assert!(Bfs.search(a.grid(), None, a.start(), a.goal(), &Deadline::UNBOUNDED).is_ok());
    }

    #[test]
    fn zero_density_is_open() {
        let map = solvable_map(5, 5, 0.0, 1).unwrap();
        assert_eq!(map.grid().obstacle_count(), 0);
    }

    #[test]
    fn oversized_map_is_an_error() {
        assert!(solvable_map(100_000, 100_000, 0.0, 1).is_err());
    }

    #[test]
    fn moving_obstacles_walk_free_cells_and_avoid_endpoints() {
        let map = solvable_map(10, 6, 0.2, 3).unwrap();
        let obstacles = moving_obstacles(&map, 4, 30, 3).unwrap();
        assert_eq!(obstacles.len(), 4);
        for o in &obstacles {
            assert_eq!(o.trajectory().len(), 30);
            assert_eq!(o.motion(), Motion::Transient);
            for w in o.trajectory().windows(2) {
                assert!(w[0].1.manhattan(w[1].1) <= 1);
            }
            assert!(o.cells().all(|c| c != map.start() && c != map.goal()));
        }
        assert!(ObstacleSchedule::new(map.grid(), obstacles.clone()).is_ok());
        assert_eq!(moving_obstacles(&map, 4, 30, 3).unwrap(), obstacles);
    }
}
