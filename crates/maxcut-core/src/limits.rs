//! Resource ceilings.
//!
//! Memory grows as 2^N for state vectors and 4^N for dense operators, so
//! every entry point checks the requested size against a [`Limits`] value
//! before allocating anything.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Configurable resource ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Largest register for which dense 2^N x 2^N operators are built.
    #[serde(default = "default_max_dense_qubits")]
    pub max_dense_qubits: usize,

    /// Largest register for which a 2^N state vector is allocated.
    #[serde(default = "default_max_state_qubits")]
    pub max_state_qubits: usize,

    /// Largest number of objective evaluations a grid search may perform.
    #[serde(default = "default_max_grid_points")]
    pub max_grid_points: usize,
}

fn default_max_dense_qubits() -> usize {
    10
}

fn default_max_state_qubits() -> usize {
    20
}

fn default_max_grid_points() -> usize {
    100_000_000
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dense_qubits: default_max_dense_qubits(),
            max_state_qubits: default_max_state_qubits(),
            max_grid_points: default_max_grid_points(),
        }
    }
}

impl Limits {
    /// Check a register width for dense operator construction.
    pub fn check_dense(&self, n_qubits: usize) -> SimResult<()> {
        check_qubits(n_qubits, self.max_dense_qubits.min(self.max_state_qubits))
    }

    /// Check a register width for state-vector work.
    pub fn check_state(&self, n_qubits: usize) -> SimResult<()> {
        check_qubits(n_qubits, self.max_state_qubits)
    }

    /// Check the number of points a grid search is about to evaluate.
    pub fn check_grid_points(&self, points: usize) -> SimResult<()> {
        if points > self.max_grid_points {
            return Err(SimError::ResourceLimit {
                what: "grid point count",
                requested: points,
                max: self.max_grid_points,
            });
        }
        Ok(())
    }
}

fn check_qubits(n_qubits: usize, max: usize) -> SimResult<()> {
    if n_qubits < 1 {
        return Err(SimError::NoQubits(n_qubits));
    }
    // usize::BITS bounds the shift in `1 << n` as well.
    let max = max.min(usize::BITS as usize - 2);
    if n_qubits > max {
        return Err(SimError::ResourceLimit {
            what: "qubit count",
            requested: n_qubits,
            max,
        });
    }
    Ok(())
}
