//! `maxcut-core` — exact QAOA simulation for the Max-Cut problem.
//!
//! Solves Max-Cut on small undirected graphs with a depth-1 Quantum
//! Approximate Optimisation Algorithm, simulated exactly:
//!
//! - **Register algebra**: identities, Pauli operators and Kronecker
//!   products over an n-qubit register ([`register`])
//! - **States**: the uniform superposition, random product states, density
//!   matrices and Born-rule distributions ([`state`])
//! - **Evolution**: cost and mixer unitaries, dense or on the fly ([`evolution`])
//! - **Objective**: classical cut value and the closed-form single-layer
//!   expectation ([`objective`])
//! - **Grid search**: deterministic exhaustive search over (γ, β) ([`grid`])
//!
//! Basis index `i` encodes node `k` as bit `n − 1 − k`, so the bitstring of
//! `i` written most significant bit first lists nodes 0..n-1 in order.
//!
//! # Quick start
//!
//! ```rust
//! use maxcut_core::graph::Graph;
//! use maxcut_core::grid::{AngleDomain, GridSpec};
//! use maxcut_core::runner::QaoaRunner;
//!
//! let grid = GridSpec::new(16, AngleDomain::half_turn(), AngleDomain::half_turn()).unwrap();
//! let outcome = QaoaRunner::new(Graph::triangle(), grid).run().unwrap();
//!
//! assert_eq!(outcome.probabilities.len(), 8);
//! assert!(outcome.expected_cut >= 1.5);
//! ```

pub mod error;
pub mod evolution;
pub mod graph;
pub mod grid;
pub mod limits;
pub mod objective;
pub mod register;
pub mod runner;
pub mod state;

pub use error::{ErrorKind, SimError, SimResult};
pub use evolution::{evolution_operator, evolve_state};
pub use graph::Graph;
pub use grid::{AngleDomain, GridPoint, GridSearch, GridSpec, grid_search, grid_search_layers};
pub use limits::Limits;
pub use objective::{cut_value, expected_cut};
pub use register::{Operator, PauliAxis, Register};
pub use runner::{QaoaOutcome, QaoaRunner, Representation};
pub use state::{StateVector, basis_probabilities, initial_state};
