//! Run configuration.
//!
//! Loaded from a YAML file, then overridden by environment variables with
//! the `MAXCUT_` prefix:
//!
//! | Variable                   | Field                      |
//! |----------------------------|----------------------------|
//! | `MAXCUT_GRID_RESOLUTION`   | `grid.resolution`          |
//! | `MAXCUT_MAX_DENSE_QUBITS`  | `limits.max_dense_qubits`  |
//! | `MAXCUT_MAX_STATE_QUBITS`  | `limits.max_state_qubits`  |
//! | `MAXCUT_OUTPUT_DIR`        | `paths.output_dir`         |
//!
//! The grid section is required. Resolution and angle domains shape the
//! result, so there is no built-in default for them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use maxcut_core::graph::Graph;
use maxcut_core::grid::GridSpec;
use maxcut_core::limits::Limits;
use maxcut_core::runner::{QaoaRunner, Representation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};

/// Complete run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Grid-search resolution and angle domains
    pub grid: GridSpec,

    /// Resource ceilings
    #[serde(default)]
    pub limits: Limits,

    /// How the final state is simulated
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Where distributions are written
    #[serde(default)]
    pub paths: PathsConfig,

    /// Named graph definitions
    #[serde(default)]
    pub graphs: BTreeMap<String, GraphSection>,
}

/// Simulation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// `dense`, `density_matrix` or `state_vector`
    #[serde(default)]
    pub representation: Representation,

    /// Evaluate the parameter grid on all cores
    #[serde(default = "default_true")]
    pub parallel: bool,
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for distributions without an explicit destination
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Per-graph destination overrides
    #[serde(default)]
    pub prob_dist: BTreeMap<String, PathBuf>,
}

/// One `graphs` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSection {
    pub n_nodes: usize,
    pub edges: EdgeList,
}

/// Edges as a YAML list of pairs, or the compact `(0,1);(1,2)` text form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeList {
    Pairs(Vec<(usize, usize)>),
    Text(String),
}

fn default_true() -> bool {
    true
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("prob_dist")
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            representation: Representation::default(),
            parallel: default_true(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            output_dir: default_output_dir(),
            prob_dist: BTreeMap::new(),
        }
    }
}

impl EdgeList {
    /// Edge pairs, parsing the text form if needed.
    pub fn pairs(&self) -> ConfigResult<Vec<(usize, usize)>> {
        match self {
            EdgeList::Pairs(pairs) => Ok(pairs.clone()),
            EdgeList::Text(text) => parse_edges(text),
        }
    }
}

impl GraphSection {
    /// Build the validated graph.
    pub fn to_graph(&self) -> ConfigResult<Graph> {
        Ok(Graph::new(self.n_nodes, self.edges.pairs()?)?)
    }
}

/// Parse `(u,v);(u,v);...`. Whitespace and a trailing `;` are allowed.
pub fn parse_edges(text: &str) -> ConfigResult<Vec<(usize, usize)>> {
    let malformed = |reason: String| ConfigError::MalformedEdges {
        text: text.to_string(),
        reason,
    };

    text.split(';')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| -> ConfigResult<(usize, usize)> {
            let inner = item
                .strip_prefix('(')
                .and_then(|s| s.strip_suffix(')'))
                .ok_or_else(|| malformed(format!("'{item}' is not of the form (u,v)")))?;
            let (u, v) = inner
                .split_once(',')
                .ok_or_else(|| malformed(format!("'{item}' needs two endpoints")))?;
            let node = |s: &str| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|e| malformed(format!("'{}': {e}", s.trim())))
            };
            Ok((node(u)?, node(v)?))
        })
        .collect()
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.display())))?;
        let config = Self::from_yaml(&contents)?;
        debug!(path = %path.display(), graphs = config.graphs.len(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate configuration text.
    pub fn from_yaml(contents: &str) -> ConfigResult<Self> {
        let config: Config = serde_yaml_ng::from_str(contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load with the following precedence:
    /// 1. Environment variables
    /// 2. Configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let config = Self::from_file(path)?.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply `MAXCUT_*` environment overrides.
    pub fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Only variables that are present override; values that fail to parse
    /// are ignored with a warning.
    pub fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| -> Option<usize> {
            let value = lookup(key)?;
            match value.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %value, "ignoring unparsable override");
                    None
                }
            }
        };

        if let Some(v) = parsed("MAXCUT_GRID_RESOLUTION") {
            self.grid.resolution = v;
        }
        if let Some(v) = parsed("MAXCUT_MAX_DENSE_QUBITS") {
            self.limits.max_dense_qubits = v;
        }
        if let Some(v) = parsed("MAXCUT_MAX_STATE_QUBITS") {
            self.limits.max_state_qubits = v;
        }
        if let Some(v) = lookup("MAXCUT_OUTPUT_DIR") {
            self.paths.output_dir = PathBuf::from(v);
        }
        self
    }

    /// Validate the grid and every graph section.
    pub fn validate(&self) -> ConfigResult<()> {
        self.grid
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("grid: {e}")))?;

        for (id, section) in &self.graphs {
            section.to_graph().map_err(|e| match e {
                ConfigError::Graph(inner) => {
                    ConfigError::ValidationError(format!("graph '{id}': {inner}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    /// Destination of the distribution for `graph_id`.
    pub fn destination(&self, graph_id: &str) -> PathBuf {
        self.paths
            .prob_dist
            .get(graph_id)
            .cloned()
            .unwrap_or_else(|| self.paths.output_dir.join(format!("prob_dist_{graph_id}.json")))
    }

    /// A runner for `graph` with this configuration's grid, limits and simulation settings.
    pub fn runner(&self, graph: Graph) -> QaoaRunner {
        QaoaRunner::new(graph, self.grid)
            .with_limits(self.limits)
            .with_representation(self.simulation.representation)
            .with_parallel(self.simulation.parallel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
grid:
  resolution: 16
  gamma: { min: 0.0, max: 3.141592653589793 }
  beta: { min: 0.0, max: 3.141592653589793 }
paths:
  prob_dist:
    triangle: out/tri.json
graphs:
  triangle:
    n_nodes: 3
    edges: [[0, 1], [1, 2], [0, 2]]
  legacy:
    n_nodes: 3
    edges: "(0,1);(1,2)"
"#;

    #[test]
    fn test_sample_config() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.grid.resolution, 16);
        assert_eq!(config.limits, Limits::default());
        assert_eq!(config.simulation.representation, Representation::StateVector);
        assert!(config.simulation.parallel);
        assert_eq!(config.paths.output_dir, PathBuf::from("prob_dist"));
        assert_eq!(config.graphs.len(), 2);
        assert_eq!(
            config.graphs["legacy"].to_graph().unwrap().edges(),
            &[(0, 1), (1, 2)]
        );
    }

    #[test]
    fn test_grid_is_required() {
        let err = Config::from_yaml("graphs: {}\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let yaml = SAMPLE.replace("resolution: 16", "resolution: 0");
        assert!(matches!(
            Config::from_yaml(&yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_out_of_range_edge_rejected() {
        let yaml = SAMPLE.replace("(0,1);(1,2)", "(0,1);(1,3)");
        assert!(matches!(
            Config::from_yaml(&yaml),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_edges() {
        assert_eq!(
            parse_edges(" (0,1); (1, 12) ;").unwrap(),
            vec![(0, 1), (1, 12)]
        );
        assert!(parse_edges("").unwrap().is_empty());
        assert!(matches!(
            parse_edges("(0,1);1,2"),
            Err(ConfigError::MalformedEdges { .. })
        ));
        assert!(parse_edges("(0;1)").is_err());
        assert!(parse_edges("(a,1)").is_err());
    }

    #[test]
    fn test_destination() {
        let config = Config::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.destination("triangle"), PathBuf::from("out/tri.json"));
        assert_eq!(
            config.destination("legacy"),
            PathBuf::from("prob_dist").join("prob_dist_legacy.json")
        );
    }

    #[test]
    fn test_merge_vars() {
        let config = Config::from_yaml(SAMPLE).unwrap().merge_vars(|key| match key {
            "MAXCUT_GRID_RESOLUTION" => Some("8".to_string()),
            "MAXCUT_MAX_DENSE_QUBITS" => Some("not-a-number".to_string()),
            "MAXCUT_OUTPUT_DIR" => Some("/tmp/dists".to_string()),
            _ => None,
        });
        assert_eq!(config.grid.resolution, 8);
        assert_eq!(config.limits.max_dense_qubits, 10);
        assert_eq!(config.paths.output_dir, PathBuf::from("/tmp/dists"));
    }

    #[test]
    fn test_runner_uses_settings() {
        let yaml = format!("{SAMPLE}simulation:\n  representation: dense\n  parallel: false\n");
        let config = Config::from_yaml(&yaml).unwrap();
        assert_eq!(config.simulation.representation, Representation::Dense);
        let graph = config.graphs["triangle"].to_graph().unwrap();
        let outcome = config.runner(graph).run().unwrap();
        assert_eq!(outcome.evaluations, 256);
    }
}
