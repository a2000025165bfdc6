//! Max-Cut QAOA Command-Line Interface
//!
//! Solves Max-Cut on graphs from a YAML configuration file (or drawn at
//! random) with an exactly simulated depth-1 QAOA, and writes the final
//! probability distribution as JSON.
//!
//! ```text
//! maxcut run    --config maxcut.yaml --graph triangle
//! maxcut random --config maxcut.yaml --nodes 6 --prob 0.4 --seed 7
//! maxcut cut    --config maxcut.yaml --graph triangle --bitstring 011
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{cut, random, run, version};

/// maxcut - QAOA Max-Cut simulation
#[derive(Parser)]
#[command(name = "maxcut")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run QAOA on a graph from the configuration file
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, env = "MAXCUT_CONFIG", default_value = "maxcut.yaml")]
        config: PathBuf,

        /// Graph identifier in the `graphs` section
        #[arg(short, long)]
        graph: String,

        /// Output file (defaults to the configured destination)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the grid resolution
        #[arg(short, long)]
        resolution: Option<usize>,
    },

    /// Run QAOA on an Erdős–Rényi random graph
    Random {
        /// Configuration file (YAML)
        #[arg(short, long, env = "MAXCUT_CONFIG", default_value = "maxcut.yaml")]
        config: PathBuf,

        /// Number of nodes (>= 2)
        #[arg(short, long)]
        nodes: usize,

        /// Edge probability in (0, 1]
        #[arg(short, long, default_value = "0.5")]
        prob: f64,

        /// Random seed
        #[arg(short, long)]
        seed: u64,

        /// Output file (defaults to the configured output directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate the cut value of a bitstring on a configured graph
    Cut {
        /// Configuration file (YAML)
        #[arg(short, long, env = "MAXCUT_CONFIG", default_value = "maxcut.yaml")]
        config: PathBuf,

        /// Graph identifier in the `graphs` section
        #[arg(short, long)]
        graph: String,

        /// Assignment, one `0`/`1` per node, node 0 first
        #[arg(short, long)]
        bitstring: String,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Run {
            config,
            graph,
            output,
            resolution,
        } => run::execute(&config, &graph, output.as_deref(), resolution),

        Commands::Random {
            config,
            nodes,
            prob,
            seed,
            output,
        } => random::execute(&config, nodes, prob, seed, output.as_deref()),

        Commands::Cut {
            config,
            graph,
            bitstring,
        } => cut::execute(&config, &graph, &bitstring),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
