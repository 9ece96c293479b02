//! Drapery CLI: headless simulation, benchmarking, and debugging.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "drapery")]
#[command(version, about = "Drapery: pinned Verlet cloth simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Starting configuration when no TOML file is given.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Preset {
    /// 25×12 curtain pinned along the top edge.
    Default,
    /// 10×5 curtain for quick runs.
    Preview,
    /// Default curtain with wind enabled.
    Windy,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation headlessly.
    Simulate {
        /// Simulation config (TOML). Overrides --preset.
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "default")]
        preset: Preset,

        /// Number of frames to simulate.
        #[arg(short, long, default_value_t = 120)]
        frames: u32,

        /// Frame at which to start releasing the pins.
        #[arg(long)]
        release_at: Option<u32>,

        /// Write the animation as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write a binary snapshot of the final state.
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Write telemetry events as JSON lines.
        #[arg(long)]
        events: Option<PathBuf>,
    },

    /// Run benchmark scenarios.
    Benchmark {
        /// curtain_drop, windy_curtain, corner_sag, free_fall, or all.
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use the 10×5 preview grid.
        #[arg(long)]
        preview: bool,
    },

    /// Inspect a state snapshot file.
    Inspect {
        path: PathBuf,
    },

    /// Validate a simulation config (TOML).
    Validate {
        path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Simulate {
            config,
            preset,
            frames,
            release_at,
            output,
            snapshot,
            events,
        } => commands::simulate(commands::SimulateArgs {
            config,
            preset,
            frames,
            release_at,
            output,
            snapshot,
            events,
        }),
        Commands::Benchmark {
            scenario,
            output,
            preview,
        } => commands::benchmark(&scenario, output.as_deref(), preview),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
