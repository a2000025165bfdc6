//! Where graphs come from.
//!
//! The pipeline only needs [`GraphSource::get_graph`]; the configuration
//! file is one source, the random generator another.

use maxcut_core::graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, ConfigResult};

/// A provider of graphs by identifier.
pub trait GraphSource {
    /// Look up and build the graph called `id`.
    fn get_graph(&self, id: &str) -> ConfigResult<Graph>;
}

impl GraphSource for Config {
    fn get_graph(&self, id: &str) -> ConfigResult<Graph> {
        let section = self
            .graphs
            .get(id)
            .ok_or_else(|| ConfigError::GraphNotFound(id.to_string()))?;
        let graph = section.to_graph()?;
        debug!(id, n_nodes = graph.n_nodes(), n_edges = graph.num_edges(), "graph loaded");
        Ok(graph)
    }
}

/// Erdős–Rényi G(n, p) generator.
///
/// Every pair of nodes is joined independently with probability `p`. Graphs
/// without edges are redrawn, up to [`RandomGraph::MAX_ATTEMPTS`] times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomGraph {
    n_nodes: usize,
    probability: f64,
    seed: u64,
}

impl RandomGraph {
    /// Redraws allowed before giving up on an edgeless graph.
    pub const MAX_ATTEMPTS: usize = 1000;

    /// Validate the parameters: `n_nodes >= 2`, `0 < probability <= 1`.
    pub fn new(n_nodes: usize, probability: f64, seed: u64) -> ConfigResult<Self> {
        if n_nodes < 2 {
            return Err(ConfigError::ValidationError(format!(
                "random graph needs at least 2 nodes, got {n_nodes}"
            )));
        }
        if !(probability > 0.0 && probability <= 1.0) {
            return Err(ConfigError::ValidationError(format!(
                "edge probability must be in (0, 1], got {probability}"
            )));
        }
        Ok(Self {
            n_nodes,
            probability,
            seed,
        })
    }

    /// Identifier used for output file names.
    pub fn identifier(&self) -> String {
        format!("random_{}_{}", self.n_nodes, self.seed)
    }

    /// Draw the graph. The same parameters always give the same graph.
    pub fn generate(&self) -> ConfigResult<Graph> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        for attempt in 1..=Self::MAX_ATTEMPTS {
            let edges: Vec<(usize, usize)> = (0..self.n_nodes)
                .flat_map(|u| ((u + 1)..self.n_nodes).map(move |v| (u, v)))
                .filter(|_| rng.gen_bool(self.probability))
                .collect();
            if !edges.is_empty() {
                info!(
                    n_nodes = self.n_nodes,
                    n_edges = edges.len(),
                    attempt,
                    "generated random graph"
                );
                return Ok(Graph::new(self.n_nodes, edges)?);
            }
        }
        Err(ConfigError::GenerationFailed {
            attempts: Self::MAX_ATTEMPTS,
        })
    }
}

impl GraphSource for RandomGraph {
    /// Any identifier yields the generated graph.
    fn get_graph(&self, _id: &str) -> ConfigResult<Graph> {
        self.generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_graph_is_reproducible() {
        let a = RandomGraph::new(6, 0.5, 42).unwrap().generate().unwrap();
        let b = RandomGraph::new(6, 0.5, 42).unwrap().generate().unwrap();
        assert_eq!(a, b);
        assert!(a.num_edges() >= 1);
        assert_eq!(a.n_nodes(), 6);
    }

    #[test]
    fn test_complete_when_probability_one() {
        let g = RandomGraph::new(5, 1.0, 0).unwrap().generate().unwrap();
        assert_eq!(g.num_edges(), 10);
    }

    #[test]
    fn test_sparse_graph_still_has_an_edge() {
        let g = RandomGraph::new(2, 0.05, 3).unwrap().generate().unwrap();
        assert_eq!(g.edges(), &[(0, 1)]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(RandomGraph::new(1, 0.5, 0).is_err());
        assert!(RandomGraph::new(4, 0.0, 0).is_err());
        assert!(RandomGraph::new(4, 1.5, 0).is_err());
        assert!(RandomGraph::new(4, f64::NAN, 0).is_err());
    }

    #[test]
    fn test_identifier() {
        let g = RandomGraph::new(7, 0.3, 99).unwrap();
        assert_eq!(g.identifier(), "random_7_99");
    }
}
