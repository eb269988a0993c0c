//! Headless truck-defense runner.
//!
//! # Usage
//!
//! ```bash
//! # Play the built-in campaign once
//! cargo run -p td_headless -- run --seed 7
//!
//! # Play custom levels, printing ASCII snapshots to stderr
//! cargo run -p td_headless -- run --level a.ron --level b.ron --ascii
//!
//! # Run 500 seeds in parallel
//! cargo run -p td_headless -- batch --count 500 --seed 1000
//!
//! # Look at a level before playing it
//! cargo run -p td_headless -- render --index 2
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use td_core::level::Level;
use td_headless::{
    ascii::{render_ascii, AsciiConfig},
    batch::{run_batch, BatchConfig},
    levels::{load_campaign, load_config},
    runner::{run_campaign, RunConfig, DEFAULT_MAX_TICKS},
    strategies::Strategy,
    HeadlessError,
};

#[derive(Parser)]
#[command(name = "td_headless")]
#[command(about = "Headless truck-defense runner for CI and balance testing")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a campaign once and print a JSON report
    Run {
        /// Level files to play in order (default: built-in campaign)
        #[arg(short, long)]
        level: Vec<PathBuf>,

        /// Simulation seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,

        /// Simulation config file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tick budget per level
        #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u64,

        /// Build-stage strategy
        #[arg(long, value_enum, default_value_t = Strategy::Greedy)]
        strategy: Strategy,

        /// Print an ASCII snapshot of each level as it ends
        #[arg(long)]
        ascii: bool,
    },

    /// Play many seeds in parallel and print a JSON summary
    Batch {
        /// Number of runs
        #[arg(short = 'n', long, default_value = "100")]
        count: u32,

        /// Seed of the first run
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Level files to play in order (default: built-in campaign)
        #[arg(short, long)]
        level: Vec<PathBuf>,

        /// Simulation config file (RON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Tick budget per level
        #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
        max_ticks: u64,

        /// Maximum parallel runs (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: usize,

        /// Write full results to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the ASCII view of a level's initial state
    Render {
        /// Level file (default: built-in campaign)
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Built-in campaign level index
        #[arg(short, long, default_value = "0")]
        index: usize,

        /// Use ANSI colors
        #[arg(long)]
        color: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs to stderr; stdout carries the reports.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Run {
            level,
            seed,
            config,
            max_ticks,
            strategy,
            ascii,
        } => cmd_run(&level, seed, config.as_deref(), max_ticks, strategy, ascii),
        Commands::Batch {
            count,
            seed,
            level,
            config,
            max_ticks,
            parallel,
            output,
        } => cmd_batch(count, seed, &level, config.as_deref(), max_ticks, parallel, output.as_deref()),
        Commands::Render { level, index, color } => cmd_render(level, index, color),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(%e, "td_headless failed");
            ExitCode::FAILURE
        }
    }
}

fn cmd_run(
    levels: &[PathBuf],
    seed: Option<u64>,
    config: Option<&Path>,
    max_ticks: u64,
    strategy: Strategy,
    ascii: bool,
) -> Result<(), HeadlessError> {
    let mut sim = load_config(config)?;
    if let Some(seed) = seed {
        sim.seed = seed;
    }
    let run = RunConfig {
        sim,
        strategy,
        max_ticks_per_level: max_ticks,
        snapshots: ascii,
    };

    let mut report = run_campaign(load_campaign(levels)?, &run)?;
    for level in &mut report.levels {
        if let Some(snapshot) = level.snapshot.take() {
            eprintln!("{snapshot}");
        }
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_batch(
    count: u32,
    seed: u64,
    levels: &[PathBuf],
    config: Option<&Path>,
    max_ticks: u64,
    parallel: usize,
    output: Option<&Path>,
) -> Result<(), HeadlessError> {
    let designs = load_campaign(levels)?;
    let batch = BatchConfig {
        count,
        seed_start: seed,
        parallel,
        run: RunConfig {
            sim: load_config(config)?,
            max_ticks_per_level: max_ticks,
            ..RunConfig::default()
        },
    };

    let results = run_batch(&designs, &batch);
    if let Some(path) = output {
        results.save(path)?;
        tracing::info!(path = %path.display(), "Results saved");
    }
    println!("{}", serde_json::to_string_pretty(&results.summary)?);
    Ok(())
}

fn cmd_render(level: Option<PathBuf>, index: usize, color: bool) -> Result<(), HeadlessError> {
    let designs = load_campaign(level.as_slice())?;
    let design = designs.get(index).or_else(|| designs.last());
    let Some(design) = design else {
        return Ok(());
    };

    let level = Level::new(design, &td_core::config::SimConfig::default())?;
    let config = AsciiConfig {
        use_color: color,
        ..AsciiConfig::default()
    };
    print!("{}", render_ascii(&level, &config));
    Ok(())
}
