//! Run command implementation.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use maxcut_io::GraphSource;

use super::common::{load_config, solve};

/// Execute the run command.
pub fn execute(
    config_path: &Path,
    graph_id: &str,
    output: Option<&Path>,
    resolution: Option<usize>,
) -> Result<()> {
    println!(
        "{} Running QAOA on {} from {}",
        style("→").cyan().bold(),
        style(graph_id).green(),
        style(config_path.display()).yellow()
    );

    let mut config = load_config(config_path)?;
    if let Some(resolution) = resolution {
        config.grid.resolution = resolution;
        config
            .validate()
            .with_context(|| format!("Invalid resolution: {resolution}"))?;
    }

    let graph = config
        .get_graph(graph_id)
        .with_context(|| format!("Failed to load graph '{graph_id}'"))?;
    solve(&config, graph_id, graph, output)?;
    Ok(())
}
