//! Cut command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use maxcut_core::objective::cut_value;
use maxcut_core::state::index_to_bitstring;
use maxcut_io::GraphSource;

use super::common::load_config;

/// Execute the cut command.
pub fn execute(config_path: &Path, graph_id: &str, bitstring: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let graph = config
        .get_graph(graph_id)
        .with_context(|| format!("Failed to load graph '{graph_id}'"))?;

    if bitstring.len() != graph.n_nodes() {
        anyhow::bail!(
            "Bitstring '{bitstring}' has {} bits, graph '{graph_id}' has {} nodes",
            bitstring.len(),
            graph.n_nodes()
        );
    }
    let value = cut_value(bitstring, graph.edges())?;
    let (best_index, best) = graph.max_cut_brute_force_with_limits(&config.limits)?;

    println!(
        "{} Cut of {} on {}: {} of {} edges",
        style("→").cyan().bold(),
        style(bitstring).cyan(),
        style(graph_id).green(),
        style(value).yellow(),
        graph.num_edges()
    );
    println!(
        "  Maximum cut: {} (e.g. {})",
        style(best).yellow(),
        index_to_bitstring(best_index, graph.n_nodes())
    );
    Ok(())
}
