//! Random command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use maxcut_io::RandomGraph;

use super::common::{load_config, solve};

/// Execute the random command.
pub fn execute(
    config_path: &Path,
    nodes: usize,
    prob: f64,
    seed: u64,
    output: Option<&Path>,
) -> Result<()> {
    println!(
        "{} Running QAOA on G({}, {}) with seed {}",
        style("→").cyan().bold(),
        nodes,
        prob,
        style(seed).yellow()
    );

    let config = load_config(config_path)?;
    let source = RandomGraph::new(nodes, prob, seed)?;
    let graph = source
        .generate()
        .context("Failed to generate random graph")?;
    println!("  Edges: {:?}", graph.edges());

    solve(&config, &source.identifier(), graph, output)?;
    Ok(())
}
