//! HEXFOG CLI - Command-line interface
//!
//! Commands:
//! - path: Shortest path between two tiles
//! - fog: Visibility from a set of units
//! - bench: Time pathfinding and fog refresh on random maps

mod bench;
mod fog_cmd;
mod path_cmd;
mod source;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexfog")]
#[command(about = "Hex grid pathfinding and fog of war")]
struct Cli {
    /// Engine config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest path between two tiles
    Path(path_cmd::PathArgs),
    /// Show which tiles a set of units can see
    Fog(fog_cmd::FogArgs),
    /// Benchmark searches and fog refreshes on random maps
    Bench(bench::BenchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = source::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Path(args) => path_cmd::run(args, config),
        Commands::Fog(args) => fog_cmd::run(args, config),
        Commands::Bench(args) => bench::run(args, config),
    }
}

/// RUST_LOG wins; otherwise info, or debug with --verbose
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
