//! courier: drive a delivery agent across a grid map.
//!
//! | Command        | What it does                                                  |
//! |----------------|---------------------------------------------------------------|
//! | `run`          | plan, execute and replan until delivered or out of budget     |
//! | `compare`      | run the selected planners `--runs` times on one instance      |
//! | `benchmark`    | the same over every map in a directory, results as JSON       |
//! | `generate-map` | write a random solvable map, optionally with moving obstacles |
//!
//! Logging goes to stderr and is filtered by `RUST_LOG` (default `info`).

mod args;
mod generate;

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use da_agent::{ControllerBuilder, ControllerConfig, NoopObserver, RunSummary};
use da_core::{Cell, Tick};
use da_grid::{GridMap, MapSpec, load_map, write_map};
use da_output::{CsvWriter, MetricsObserver};
use da_schedule::{ObstacleSchedule, load_obstacles_csv, write_obstacles_csv};
use da_search::{Deadline, Planner, RunStats, repeat};

use args::{BenchmarkArgs, Cli, Command, CompareArgs, Endpoints, GenerateArgs, RunArgs};

// ── Shared setup ──────────────────────────────────────────────────────────────

fn load_instance(path: &Path, endpoints: &Endpoints) -> Result<MapSpec> {
    let map = load_map(path).with_context(|| format!("loading map {}", path.display()))?;
    let start = endpoints.start().unwrap_or(map.start());
    let goal = endpoints.goal().unwrap_or(map.goal());
    let map = map.with_endpoints(start, goal)?;
    info!(
        width = map.grid().width(),
        height = map.grid().height(),
        obstacles = map.grid().obstacle_count(),
        start = %map.start(),
        goal = %map.goal(),
        "map loaded"
    );
    Ok(map)
}

fn load_schedule(grid: &GridMap, path: Option<&Path>) -> Result<Option<ObstacleSchedule>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let obstacles = load_obstacles_csv(path)
        .with_context(|| format!("loading obstacles {}", path.display()))?;
    let schedule = ObstacleSchedule::new(grid, obstacles)?;
    info!(obstacles = schedule.len(), "obstacle schedule loaded");
    Ok(Some(schedule))
}

fn load_config(path: Option<&Path>) -> Result<ControllerConfig> {
    let Some(path) = path else {
        return Ok(ControllerConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening config {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing config {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), "results written");
    Ok(())
}

// ── run ───────────────────────────────────────────────────────────────────────

fn cmd_run(args: RunArgs) -> Result<()> {
    let map = load_instance(&args.map, &args.endpoints)?;
    let schedule = load_schedule(map.grid(), args.obstacles.as_deref())?;

    let mut config = load_config(args.config.as_deref())?;
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(h) = args.heuristic {
        config.algorithm = config.algorithm.with_heuristic(h);
        config.policy.fast = config.policy.fast.with_heuristic(h);
        config.policy.thorough = config.policy.thorough.with_heuristic(h);
    }
    if let Some(seed) = args.seed {
        config.algorithm = config.algorithm.with_seed(seed);
        config.policy.fast = config.policy.fast.with_seed(seed);
        config.policy.thorough = config.policy.thorough.with_seed(seed);
    }
    if let Some(fuel) = args.fuel {
        config.fuel = fuel;
    }

    let mut builder = ControllerBuilder::from_map(&map, config.policy).config(config);
    if let Some(schedule) = &schedule {
        builder = builder.schedule(schedule);
    }
    let mut controller = builder.build()?;

    println!("=== courier: {} from {} to {} ===", config.algorithm.name(), map.start(), map.goal());
    println!("Fuel: {}  |  Max replans: {:?}", config.fuel, config.max_replans);
    println!();

    let t0 = Instant::now();
    let summary = match &args.out {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let mut obs = MetricsObserver::new(CsvWriter::new(dir)?);
            let summary = controller.run(&mut obs);
            if let Some(e) = obs.take_error() {
                eprintln!("metrics error: {e}");
            }
            let (searches, steps) = obs.rows();
            println!("  {}/searches.csv : {searches} rows", dir.display());
            println!("  {}/steps.csv    : {steps} rows", dir.display());
            summary
        }
        None => controller.run(&mut NoopObserver),
    };
    let elapsed = t0.elapsed();

    print_summary(&summary, elapsed.as_secs_f64());
    println!();
    println!("{}", render(map.grid(), &summary.trail, map.start(), map.goal()));

    if let Some(path) = &args.save_result {
        let report = RunReport {
            map:            &args.map,
            algorithm:      config.algorithm.name(),
            start:          map.start(),
            goal:           map.goal(),
            success:        summary.succeeded(),
            outcome:        summary.outcome.name(),
            failure:        summary.reason().map(|r| r.tag()),
            path_cost:      summary.cost,
            path_length:    summary.trail.len(),
            moves:          summary.moves,
            fuel_remaining: summary.fuel_remaining,
            replans:        summary.replans,
            searches:       summary.searches,
            nodes_expanded: summary.nodes_expanded,
            elapsed_secs:   elapsed.as_secs_f64(),
            trail:          &summary.trail,
        };
        write_json(path, &report)?;
    }

    summary.into_result()?;
    Ok(())
}

/// `run --save-result` file contents.
#[derive(Serialize)]
struct RunReport<'a> {
    map:            &'a Path,
    algorithm:      &'static str,
    start:          Cell,
    goal:           Cell,
    success:        bool,
    outcome:        &'static str,
    failure:        Option<&'static str>,
    path_cost:      u64,
    path_length:    usize,
    moves:          u64,
    fuel_remaining: u64,
    replans:        u32,
    searches:       u32,
    nodes_expanded: u64,
    elapsed_secs:   f64,
    trail:          &'a [Cell],
}

fn print_summary(s: &RunSummary, secs: f64) {
    println!("Run finished in {secs:.3} s: {}", s.outcome);
    println!("{:<16} {:>10}", "Metric", "Value");
    println!("{}", "-".repeat(27));
    println!("{:<16} {:>10}", "moves", s.moves);
    println!("{:<16} {:>10}", "cost", s.cost);
    println!("{:<16} {:>10}", "final tick", s.tick.0);
    println!("{:<16} {:>10}", "fuel left", s.fuel_remaining);
    println!("{:<16} {:>10}", "replans", s.replans);
    println!("{:<16} {:>10}", "searches", s.searches);
    println!("{:<16} {:>10}", "nodes expanded", s.nodes_expanded);
}

/// ASCII rendering: `#` obstacle, `*` visited, `S`/`G` endpoints.
fn render(grid: &GridMap, trail: &[Cell], start: Cell, goal: Cell) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let cell = Cell::new(x, y);
            let ch = if cell == start {
                'S'
            } else if cell == goal {
                'G'
            } else if grid.is_static_obstacle(cell) {
                '#'
            } else if trail.contains(&cell) {
                '*'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}

// ── compare ───────────────────────────────────────────────────────────────────

fn cmd_compare(args: CompareArgs) -> Result<()> {
    let map = load_instance(&args.map, &args.endpoints)?;
    let schedule = load_schedule(map.grid(), args.obstacles.as_deref())?;
    let algorithms = args.selection.algorithms();
    for a in &algorithms {
        a.validate()?;
    }
    let deadline = args.selection.max_expansions.map_or(Deadline::UNBOUNDED, Deadline::expansions);

    println!("=== compare: {} planner(s), {} run(s) each ===", algorithms.len(), args.runs.max(1));
    let stats = repeat(
        map.grid(),
        schedule.as_ref().map(|s| s.view(Tick(0))),
        map.start(),
        map.goal(),
        &algorithms,
        args.runs,
        &deadline,
    );
    print_stats(&stats);

    if let Some(path) = &args.output {
        write_json(path, &stats)?;
    }
    Ok(())
}

fn print_stats(stats: &[RunStats]) {
    println!(
        "{:<20} {:>10} {:>12} {:>12} {:>9}  {}",
        "Algorithm", "Avg cost", "Avg nodes", "Avg time ms", "Success", "Failure"
    );
    println!("{}", "-".repeat(88));
    for s in stats {
        let cost = s.avg_path_cost.map_or_else(|| "-".to_string(), |c| format!("{c:.1}"));
        println!(
            "{:<20} {:>10} {:>12.1} {:>12.3} {:>8.0}%  {}",
            s.algorithm,
            cost,
            s.avg_nodes_expanded,
            s.avg_elapsed_secs * 1e3,
            s.success_rate * 100.0,
            s.first_failure.unwrap_or(""),
        );
    }
}

// ── benchmark ─────────────────────────────────────────────────────────────────

/// One map's entry in the `benchmark` results file.
#[derive(Serialize)]
struct BenchmarkEntry {
    map:     PathBuf,
    width:   u32,
    height:  u32,
    start:   Cell,
    goal:    Cell,
    results: Vec<RunStats>,
}

fn cmd_benchmark(args: BenchmarkArgs) -> Result<()> {
    let algorithms = args.selection.algorithms();
    for a in &algorithms {
        a.validate()?;
    }
    let deadline = args.selection.max_expansions.map_or(Deadline::UNBOUNDED, Deadline::expansions);

    let mut paths: Vec<PathBuf> = fs::read_dir(&args.map_dir)
        .with_context(|| format!("reading {}", args.map_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        let map = match load_map(&path) {
            Ok(map) => map,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping map");
                continue;
            }
        };
        let grid = map.grid();
        println!();
        println!("=== {} ({}×{}) ===", path.display(), grid.width(), grid.height());
        let results = repeat(grid, None, map.start(), map.goal(), &algorithms, args.runs, &deadline);
        print_stats(&results);
        entries.push(BenchmarkEntry {
            width: grid.width(),
            height: grid.height(),
            start: map.start(),
            goal: map.goal(),
            map: path,
            results,
        });
    }
    if entries.is_empty() {
        anyhow::bail!("no loadable maps in {}", args.map_dir.display());
    }
    write_json(&args.output, &entries)
}

// ── generate-map ──────────────────────────────────────────────────────────────

fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let map = generate::solvable_map(args.width, args.height, args.density, args.seed)?;
    let text = write_map(&map);
    match &args.output {
        Some(path) => {
            fs::write(path, text)?;
            info!(path = %path.display(), "map written");
        }
        None => print!("{text}"),
    }

    if let Some(path) = &args.obstacles_out {
        let obstacles =
            generate::moving_obstacles(&map, args.dynamic_obstacles, args.obstacle_ticks, args.seed)?;
        write_obstacles_csv(path, &obstacles)?;
        info!(path = %path.display(), obstacles = obstacles.len(), "obstacles written");
    }
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Run(a) => cmd_run(a),
        Command::Compare(a) => cmd_compare(a),
        Command::Benchmark(a) => cmd_benchmark(a),
        Command::GenerateMap(a) => cmd_generate(a),
    }
}
