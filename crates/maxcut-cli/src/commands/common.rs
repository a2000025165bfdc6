//! Shared helpers for CLI commands.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use maxcut_core::graph::Graph;
use maxcut_core::runner::QaoaOutcome;
use maxcut_core::state::index_to_bitstring;
use maxcut_io::{Config, DistributionRecord, write_distribution};

/// Outcomes listed by [`print_outcome`].
const MAX_LISTED: usize = 16;

/// Load configuration with environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Config file not found: {}", path.display());
    }
    Config::load(path).with_context(|| format!("Failed to load config: {}", path.display()))
}

/// Run QAOA on `graph`, print the outcome and save the distribution.
///
/// Returns the path the distribution was written to.
pub fn solve(
    config: &Config,
    graph_id: &str,
    graph: Graph,
    output: Option<&Path>,
) -> Result<PathBuf> {
    println!(
        "  Graph: {} nodes, {} edges",
        graph.n_nodes(),
        graph.num_edges()
    );
    println!(
        "  Grid:  {}x{} ({}, {})",
        config.grid.resolution,
        config.grid.resolution,
        style(format!("{:?}", config.simulation.representation)).yellow(),
        if config.simulation.parallel {
            "parallel"
        } else {
            "sequential"
        }
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Searching QAOA angles...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let start = Instant::now();
    let result = config.runner(graph.clone()).run();
    spinner.finish_and_clear();
    let outcome = result.with_context(|| format!("QAOA failed on graph '{graph_id}'"))?;

    print_outcome(&graph, &outcome);
    println!(
        "\n  Elapsed: {} ms",
        style(start.elapsed().as_millis()).yellow()
    );

    let destination = output.map_or_else(|| config.destination(graph_id), Path::to_path_buf);
    let record = DistributionRecord::new(graph_id, &graph, &outcome);
    write_distribution(&destination, &record)
        .with_context(|| format!("Failed to write {}", destination.display()))?;
    println!(
        "\n{} Distribution written to {}",
        style("✓").green().bold(),
        style(destination.display()).green()
    );
    Ok(destination)
}

/// Print optimal angles and the most probable outcomes.
pub fn print_outcome(graph: &Graph, outcome: &QaoaOutcome) {
    println!(
        "\n{} Optimal angles: γ = {:.6}, β = {:.6} ({} evaluations)",
        style("✓").green().bold(),
        outcome.gamma,
        outcome.beta,
        outcome.evaluations
    );
    println!(
        "  Expected cut: {} of {} edges",
        style(format!("{:.6}", outcome.expected_cut)).yellow(),
        graph.num_edges()
    );

    let mut ranked: Vec<(usize, f64)> = outcome.probabilities.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("\n  Most likely outcomes:");
    for &(index, p) in ranked.iter().take(MAX_LISTED) {
        let percent = p * 100.0;
        let bar: String = "█".repeat((percent / 2.0).round() as usize);
        println!(
            "  {}: cut {:>3} ({:>6.2}%) {}",
            style(index_to_bitstring(index, graph.n_nodes())).cyan(),
            graph.cut_value_of_index(index),
            percent,
            style(bar).green()
        );
    }
    if ranked.len() > MAX_LISTED {
        println!("  ... and {} more outcomes", ranked.len() - MAX_LISTED);
    }
}
