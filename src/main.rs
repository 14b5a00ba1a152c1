//! Microcosm - headless colony runner
//!
//! Runs one or more seeded colony simulations and prints a summary or the
//! full JSON output.

use std::path::PathBuf;

use clap::Parser;
use rayon::prelude::*;

use microcosm::colony::{run, RunOptions, SimulationOutput};
use microcosm::core::{Result, SimulationConfig};

/// Microcosm - cell colony simulation with immune combat
#[derive(Parser, Debug)]
#[command(name = "microcosm")]
#[command(about = "Run seeded cell colony simulations and report the outcome")]
struct Args {
    /// Number of ticks to simulate (60 ticks = 1 simulated second)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Random seed of the first run; further runs use seed + 1, seed + 2, ...
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// TOML file overriding the default configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of independent runs, executed in parallel
    #[arg(long, default_value_t = 1)]
    runs: u64,

    /// Output format: json or text
    #[arg(long, default_value = "text")]
    format: String,

    /// Write JSON output to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Disable the periodic pathogen/antibody spawner
    #[arg(long)]
    no_spawn: bool,

    /// Log births, deaths and spawns
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading config from {}", path.display());
            SimulationConfig::load(path)?
        }
        None => SimulationConfig::default(),
    };
    config.validate()?;

    let outputs: Vec<SimulationOutput> = (0..args.runs)
        .into_par_iter()
        .map(|offset| {
            let options = RunOptions {
                ticks: args.ticks,
                seed: args.seed.wrapping_add(offset),
                spawning: !args.no_spawn,
            };
            run(&config, options)
        })
        .collect();

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&outputs)?;
            match &args.output {
                Some(path) => {
                    std::fs::write(path, json)?;
                    tracing::info!("Output written to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
        _ => {
            for output in &outputs {
                println!("{}", output.summary());
                println!();
            }
            if let Some(path) = &args.output {
                std::fs::write(path, serde_json::to_string_pretty(&outputs)?)?;
                println!("Full output written to {}", path.display());
            }
        }
    }

    Ok(())
}
