//! Persistence of final probability distributions.
//!
//! Distributions are written as pretty-printed JSON. `probabilities[i]` is
//! the probability of basis state `i`, whose binary expansion (node 0 most
//! significant) is the cut assignment.

use std::path::Path;

use maxcut_core::graph::Graph;
use maxcut_core::runner::QaoaOutcome;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConfigError, ConfigResult};

/// A saved QAOA result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionRecord {
    /// Graph identifier.
    pub graph: String,
    pub n_qubits: usize,
    pub edges: Vec<(usize, usize)>,
    pub gamma: f64,
    pub beta: f64,
    /// Analytical expected cut at (gamma, beta).
    pub expected_cut: f64,
    /// Final distribution, indexed by basis-state integer.
    pub probabilities: Vec<f64>,
}

impl DistributionRecord {
    /// Record the outcome of a run on `graph`.
    pub fn new(graph_id: &str, graph: &Graph, outcome: &QaoaOutcome) -> Self {
        Self {
            graph: graph_id.to_string(),
            n_qubits: graph.n_nodes(),
            edges: graph.edges().to_vec(),
            gamma: outcome.gamma,
            beta: outcome.beta,
            expected_cut: outcome.expected_cut,
            probabilities: outcome.probabilities.clone(),
        }
    }
}

/// Write `record` to `path`, creating parent directories.
pub fn write_distribution(path: &Path, record: &DistributionRecord) -> ConfigResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", parent.display())))?;
    }
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| ConfigError::JsonError(e.to_string()))?;
    std::fs::write(path, json)
        .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), graph = %record.graph, "distribution written");
    Ok(())
}

/// Read a record written by [`write_distribution`].
pub fn read_distribution(path: &Path) -> ConfigResult<DistributionRecord> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
    let record: DistributionRecord =
        serde_json::from_str(&contents).map_err(|e| ConfigError::JsonError(e.to_string()))?;

    let expected = u32::try_from(record.n_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n));
    if expected != Some(record.probabilities.len()) {
        return Err(ConfigError::ValidationError(format!(
            "{} holds {} probabilities for {} qubits",
            path.display(),
            record.probabilities.len(),
            record.n_qubits
        )));
    }
    Ok(record)
}
