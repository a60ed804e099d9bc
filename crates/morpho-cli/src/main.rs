//! Morpho CLI - Command-line driver for cell aggregate simulations.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "morpho")]
#[command(author, version, about = "Morpho - Cell-cycle aggregate simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (births and deaths are logged)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default morpho.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Seed an aggregate and run the simulation
    Run {
        /// Number of ticks to run (default: from morpho.toml)
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Number of cells to seed (default: from morpho.toml)
        #[arg(short, long)]
        cells: Option<usize>,

        /// Write the final state as JSON to this file
        #[arg(short, long)]
        export: Option<String>,
    },

    /// Print the effective configuration
    Config,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run { ticks, cells, export } => {
            commands::run::run(ticks, cells, export.as_deref(), cli.verbose)
        }
        Commands::Config => commands::config::run(),
    }
}
