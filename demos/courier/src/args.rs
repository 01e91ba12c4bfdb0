//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use da_core::Cell;
use da_search::{Algorithm, Heuristic};

#[derive(Parser, Debug)]
#[command(name = "courier", version)]
#[command(about = "Plan, execute and replan grid deliveries")]
#[command(after_help = "algorithms: bfs, ucs, astar, hill_climbing, simulated_annealing\n\
                        heuristics: manhattan, euclidean, diagonal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan, execute and replan until delivered or out of budget
    Run(RunArgs),
    /// Run the selected planners on one map, optionally repeated
    Compare(CompareArgs),
    /// Repeat the selected planners over every map in a directory
    Benchmark(BenchmarkArgs),
    /// Write a random solvable map, optionally with moving obstacles
    GenerateMap(GenerateArgs),
}

/// `--start X Y` / `--goal X Y` overrides of the map's endpoints.
#[derive(Args, Debug)]
pub struct Endpoints {
    /// Start cell, overriding the map's START line
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    start: Option<Vec<u32>>,

    /// Goal cell, overriding the map's GOAL line
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    goal: Option<Vec<u32>>,
}

impl Endpoints {
    pub fn start(&self) -> Option<Cell> {
        cell(self.start.as_deref())
    }

    pub fn goal(&self) -> Option<Cell> {
        cell(self.goal.as_deref())
    }
}

fn cell(xy: Option<&[u32]>) -> Option<Cell> {
    match *xy? {
        [x, y] => Some(Cell::new(x, y)),
        _ => None,
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Map file
    pub map: PathBuf,

    /// Planner for the first search; replans follow the config's policy
    #[arg(short, long)]
    pub algorithm: Option<Algorithm>,

    /// Heuristic for every informed and local-search planner
    #[arg(long)]
    pub heuristic: Option<Heuristic>,

    /// Dynamic obstacle trajectories (CSV)
    #[arg(long)]
    pub obstacles: Option<PathBuf>,

    /// Controller configuration (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub endpoints: Endpoints,

    /// Fuel budget in moves
    #[arg(long)]
    pub fuel: Option<u64>,

    /// Seed for the stochastic planners
    #[arg(long)]
    pub seed: Option<u64>,

    /// Directory for searches.csv and steps.csv
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write the run summary as JSON
    #[arg(long)]
    pub save_result: Option<PathBuf>,
}

/// Planner selection shared by `compare` and `benchmark`.
#[derive(Args, Debug)]
pub struct Selection {
    /// Planners to run, comma or space separated (default: all)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    algorithms: Vec<Algorithm>,

    /// Heuristic for every informed and local-search planner
    #[arg(long)]
    heuristic: Option<Heuristic>,

    /// Expansion limit per search
    #[arg(long)]
    pub max_expansions: Option<u64>,
}

impl Selection {
    /// The chosen planners with the heuristic override applied.
    pub fn algorithms(&self) -> Vec<Algorithm> {
        let chosen = if self.algorithms.is_empty() {
            Algorithm::all()
        } else {
            self.algorithms.clone()
        };
        match self.heuristic {
            Some(h) => chosen.into_iter().map(|a| a.with_heuristic(h)).collect(),
            None => chosen,
        }
    }
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Map file
    pub map: PathBuf,

    #[command(flatten)]
    pub selection: Selection,

    /// Dynamic obstacle trajectories (CSV), seen from tick 0
    #[arg(long)]
    pub obstacles: Option<PathBuf>,

    #[command(flatten)]
    pub endpoints: Endpoints,

    /// Runs per planner; stochastic planners get a derived seed per run
    #[arg(long, default_value_t = 1)]
    pub runs: u32,

    /// Write the averaged results as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BenchmarkArgs {
    /// Directory of map files; files that fail to load are skipped
    #[arg(long)]
    pub map_dir: PathBuf,

    #[command(flatten)]
    pub selection: Selection,

    /// Runs per planner and map
    #[arg(long, default_value_t = 5)]
    pub runs: u32,

    /// JSON results file
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    pub width: u32,
    pub height: u32,

    /// Probability that a cell is a static obstacle, in [0, 1)
    #[arg(long, default_value_t = 0.2, value_parser = density)]
    pub density: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Map file to write (default: stdout)
    #[arg(short, long, alias = "out")]
    pub output: Option<PathBuf>,

    /// Number of randomly walking obstacles
    #[arg(long, default_value_t = 0, requires = "obstacles_out")]
    pub dynamic_obstacles: u32,

    /// Ticks each moving obstacle walks before it disappears
    #[arg(long, default_value_t = 50)]
    pub obstacle_ticks: u64,

    /// Trajectory CSV for the moving obstacles
    #[arg(long)]
    pub obstacles_out: Option<PathBuf>,
}

fn density(raw: &str) -> Result<f64, String> {
    let d: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("must be in [0, 1), got {d}"))
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    fn parse(line: &str) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("courier").chain(line.split_whitespace()))
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_with_overrides() {
        let cli = parse("run depot.map --algorithm bfs --start 1 2 --goal 7 8 --fuel 90").unwrap();
        let Command::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.map, PathBuf::from("depot.map"));
        assert_eq!(run.algorithm, Some(Algorithm::Bfs));
        assert_eq!(run.endpoints.start(), Some(Cell::new(1, 2)));
        assert_eq!(run.endpoints.goal(), Some(Cell::new(7, 8)));
        assert_eq!(run.fuel, Some(90));
        assert_eq!(run.save_result, None);
    }

    #[test]
    fn compare_algorithm_list() {
        let cli = parse("compare m.map --algorithms ucs,astar --runs 4").unwrap();
        let Command::Compare(cmp) = cli.command else {
            panic!("expected compare");
        };
        let algs = cmp.selection.algorithms();
        assert_eq!(algs.len(), 2);
        assert_eq!(algs[0], Algorithm::UniformCost);
        assert_eq!(cmp.runs, 4);

        let cli = parse("compare m.map --heuristic diagonal").unwrap();
        let Command::Compare(cmp) = cli.command else {
            panic!("expected compare");
        };
        let algs = cmp.selection.algorithms();
        assert_eq!(algs.len(), Algorithm::NAMES.len());
        assert_eq!(algs[2], Algorithm::AStar { heuristic: Heuristic::Diagonal });
    }

    #[test]
    fn benchmark_defaults() {
        let cli = parse("benchmark --map-dir maps -o bench.json").unwrap();
        let Command::Benchmark(b) = cli.command else {
            panic!("expected benchmark");
        };
        assert_eq!(b.map_dir, PathBuf::from("maps"));
        assert_eq!(b.runs, 5);
        assert_eq!(b.output, PathBuf::from("bench.json"));
    }

    #[test]
    fn generate_with_moving_obstacles() {
        let cli = parse("generate-map 20 10 --dynamic-obstacles 3 --obstacles-out o.csv").unwrap();
        let Command::GenerateMap(g) = cli.command else {
            panic!("expected generate-map");
        };
        assert_eq!((g.width, g.height, g.dynamic_obstacles), (20, 10, 3));
        assert_eq!(g.density, 0.2);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("fly").is_err());
        assert!(parse("run").is_err());
        assert!(parse("run m.map --start 1").is_err());
        assert!(parse("compare m.map --algorithms dijkstra").is_err());
        assert!(parse("generate-map 10 10 --density 1.5").is_err());
        assert!(parse("generate-map 10 10 --dynamic-obstacles 2").is_err());
        assert!(parse("benchmark --map-dir maps").is_err());
    }
}
