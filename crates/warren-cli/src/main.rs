//! Warren batch driver
//!
//! Loads a JSON run description (grid shape plus maze configuration),
//! generates the maze, validates it, and prints a summary. There is no
//! rendering here - the maze graph is the artifact; this binary exists
//! to exercise the pipeline end to end from declarative input.
//!
//! Usage: `warren [RUN.json]`. With no argument a default 16x16 square
//! run with a fresh random seed is used.

use std::{env, fs, process};

use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use warren_grid::{build_grid, GridKind};
use warren_maze::{generate_maze, random_seed, validate, FragmentKind, MazeConfig};

/// A full run description: what to build and how to carve it.
#[derive(Debug, Deserialize)]
struct RunSpec {
    grid: GridSpec,
    /// (ring, index) entry position; defaults to the first point.
    #[serde(default)]
    start: (usize, usize),
    maze: MazeConfig,
}

#[derive(Debug, Deserialize)]
struct GridSpec {
    kind: GridKind,
    height: f64,
    width: f64,
    cell_size: f64,
}

impl RunSpec {
    /// The no-argument run: a 16x16 square grid, one ring-carved layer.
    fn default_run() -> Self {
        Self {
            grid: GridSpec {
                kind: GridKind::Square,
                height: 16.0,
                width: 16.0,
                cell_size: 1.0,
            },
            start: (0, 0),
            maze: MazeConfig::single(FragmentKind::Ring, String::new()),
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warren=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(err) = run() {
        error!("{err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let spec = match args.get(1) {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => RunSpec::default_run(),
    };

    let grid = build_grid(
        spec.grid.kind,
        spec.grid.height,
        spec.grid.width,
        spec.grid.cell_size,
    )?;
    info!(
        kind = %spec.grid.kind,
        rings = grid.num_rings(),
        points = grid.num_points(),
        "grid built"
    );

    let mut config = spec.maze;
    if config.seed.is_empty() {
        config.seed = random_seed();
        info!(seed = %config.seed, "no seed given, generated one");
    }

    let result = generate_maze(&grid, spec.start, &[], &config)?;

    println!("seed:       {}", config.seed);
    println!("fragments:  {}", result.outline.num_fragments());
    println!("nodes:      {}", result.graph.len());
    println!("edges:      {}", result.graph.edge_count());
    println!("start:      {}", result.start);

    let report = validate(&result);
    if report.is_clean() {
        println!("validation: clean");
    } else {
        println!("validation: {} violation(s)", report.violations.len());
        for violation in &report.violations {
            error!("{violation}");
        }
        process::exit(2);
    }

    Ok(())
}
