//! End-to-end QAOA Max-Cut runner.
//!
//! graph → grid search on the analytical expectation → evolution of |+>^n
//! under the optimal angles → Born-rule distribution.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SimResult;
use crate::evolution::{evolution_operator_with_limits, evolve_state};
use crate::graph::Graph;
use crate::grid::{GridPoint, GridSearch, GridSpec};
use crate::limits::Limits;
use crate::objective::expected_cut;
use crate::state::{
    basis_probabilities, density_matrix, density_probabilities, index_to_bitstring,
    initial_state_with_limits,
};

/// How the final state is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Representation {
    /// Dense evolution operator applied to the initial ket.
    Dense,
    /// Dense evolution, then the density matrix |ψ><ψ|.
    DensityMatrix,
    /// On-the-fly state-vector kernels, no dense operators.
    #[default]
    StateVector,
}

/// Most probable basis state of the final distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisOutcome {
    /// Basis index.
    pub index: usize,
    /// Bitstring, node 0 first.
    pub bitstring: String,
    /// Probability of this outcome.
    pub probability: f64,
    /// Cut value of this assignment.
    pub cut: usize,
}

/// Result of a QAOA run.
#[derive(Debug, Clone)]
pub struct QaoaOutcome {
    /// Optimal gamma parameter.
    pub gamma: f64,
    /// Optimal beta parameter.
    pub beta: f64,
    /// Analytical expected cut at the optimal angles.
    pub expected_cut: f64,
    /// Number of objective evaluations in the grid search.
    pub evaluations: usize,
    /// Final distribution, indexed by basis-state integer.
    pub probabilities: Vec<f64>,
    /// Most probable outcome.
    pub most_likely: BasisOutcome,
}

/// QAOA runner configuration.
#[derive(Debug, Clone)]
pub struct QaoaRunner {
    graph: Graph,
    grid: GridSpec,
    limits: Limits,
    representation: Representation,
    parallel: bool,
}

impl QaoaRunner {
    /// Create a runner for `graph` searching over `grid`.
    pub fn new(graph: Graph, grid: GridSpec) -> Self {
        Self {
            graph,
            grid,
            limits: Limits::default(),
            representation: Representation::default(),
            parallel: false,
        }
    }

    /// Set resource limits.
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Choose how the final state is computed.
    #[must_use]
    pub fn with_representation(mut self, representation: Representation) -> Self {
        self.representation = representation;
        self
    }

    /// Evaluate the grid in parallel.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The graph being solved.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Find the optimal angles only.
    pub fn optimise(&self) -> SimResult<GridPoint> {
        let graph = &self.graph;
        GridSearch::new(self.grid)
            .with_limits(self.limits)
            .with_parallel(self.parallel)
            .run(|gamma, beta| expected_cut(gamma, beta, graph))
    }

    /// Final distribution for the given single-layer angles.
    pub fn distribution(&self, gamma: f64, beta: f64) -> SimResult<Vec<f64>> {
        let n = self.graph.n_nodes();
        let edges = self.graph.edges();
        debug!(n, representation = ?self.representation, "computing final distribution");
        match self.representation {
            Representation::StateVector => {
                let state = evolve_state(n, edges, &[gamma], &[beta], &self.limits)?;
                basis_probabilities(&state)
            }
            Representation::Dense | Representation::DensityMatrix => {
                let u = evolution_operator_with_limits(n, edges, &[gamma], &[beta], &self.limits)?;
                let state = u.dot(&initial_state_with_limits(n, &self.limits)?);
                if self.representation == Representation::DensityMatrix {
                    density_probabilities(&density_matrix(&state, &self.limits)?)
                } else {
                    basis_probabilities(&state)
                }
            }
        }
    }

    /// Run the full pipeline.
    pub fn run(&self) -> SimResult<QaoaOutcome> {
        let n = self.graph.n_nodes();
        // Fail before the grid search if the final evolution cannot be afforded.
        match self.representation {
            Representation::StateVector => self.limits.check_state(n)?,
            _ => self.limits.check_dense(n)?,
        }

        info!(
            n_nodes = n,
            n_edges = self.graph.num_edges(),
            resolution = self.grid.resolution,
            "running QAOA"
        );
        let best = self.optimise()?;
        let probabilities = self.distribution(best.gamma(), best.beta())?;

        let (index, probability) = probabilities
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (i, p)| {
                if p > acc.1 { (i, p) } else { acc }
            });
        let most_likely = BasisOutcome {
            index,
            bitstring: index_to_bitstring(index, n),
            probability,
            cut: self.graph.cut_value_of_index(index),
        };

        info!(
            gamma = best.gamma(),
            beta = best.beta(),
            expected_cut = best.value,
            most_likely = %most_likely.bitstring,
            "QAOA finished"
        );

        Ok(QaoaOutcome {
            gamma: best.gamma(),
            beta: best.beta(),
            expected_cut: best.value,
            evaluations: best.evaluations,
            probabilities,
            most_likely,
        })
    }
}
