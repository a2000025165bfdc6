//! Error types for the simulation core.

use thiserror::Error;

/// Coarse classification of a [`SimError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a value outside the operation's domain.
    InvalidArgument,
    /// The request is valid but exceeds a configured resource ceiling.
    ResourceLimitExceeded,
}

/// Errors produced by operator construction, evolution and grid search.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimError {
    /// A register must hold at least one qubit.
    #[error("number of qubits must be > 0, but is {0}")]
    NoQubits(usize),

    /// A qubit position is outside the register.
    #[error("qubit position {qubit} is out of range for a {n_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending position.
        qubit: usize,
        /// Register width.
        n_qubits: usize,
    },

    /// An edge references a node outside the graph, or joins a node to itself.
    #[error("invalid edge ({u}, {v}) for a graph with {n_nodes} nodes")]
    InvalidEdge {
        /// First endpoint.
        u: usize,
        /// Second endpoint.
        v: usize,
        /// Number of nodes in the graph.
        n_nodes: usize,
    },

    /// A bitstring is too short for the edges evaluated against it.
    #[error("bitstring of length {len} cannot be evaluated on edge touching node {node}")]
    BitstringTooShort {
        /// Length of the bitstring.
        len: usize,
        /// Highest node index referenced by an edge.
        node: usize,
    },

    /// A bitstring contains something other than `0` or `1`.
    #[error("bitstring contains invalid character {0:?}")]
    InvalidBit(char),

    /// Grid resolution must be at least one step per axis.
    #[error("grid resolution must be at least 1, got {0}")]
    InvalidResolution(usize),

    /// An angle domain is empty, inverted or not finite.
    #[error("angle domain [{min}, {max}) is empty or not finite")]
    EmptyDomain {
        /// Lower bound (inclusive).
        min: f64,
        /// Upper bound (exclusive).
        max: f64,
    },

    /// gamma and beta sequences must describe the same number of layers.
    #[error("layer mismatch: {gammas} gamma angles but {betas} beta angles")]
    LayerMismatch {
        /// Number of gamma angles.
        gammas: usize,
        /// Number of beta angles.
        betas: usize,
    },

    /// At least one QAOA layer is required.
    #[error("at least one QAOA layer is required")]
    NoLayers,

    /// A state vector length is not a power of two.
    #[error("state vector length {0} is not a positive power of two")]
    NotPowerOfTwo(usize),

    /// An operator does not match the dimension of the state it acts on.
    #[error("dimension mismatch: operator is {operator}x{operator}, state has length {state}")]
    DimensionMismatch {
        /// Operator dimension.
        operator: usize,
        /// State length.
        state: usize,
    },

    /// The request exceeds a configured resource ceiling.
    #[error("{what} of {requested} exceeds the configured maximum of {max}")]
    ResourceLimit {
        /// Which resource was exceeded.
        what: &'static str,
        /// Requested amount.
        requested: usize,
        /// Configured ceiling.
        max: usize,
    },
}

impl SimError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SimError::ResourceLimit { .. } => ErrorKind::ResourceLimitExceeded,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(SimError::NoQubits(0).kind(), ErrorKind::InvalidArgument);
        assert_eq!(
            SimError::ResourceLimit {
                what: "qubit count",
                requested: 30,
                max: 20
            }
            .kind(),
            ErrorKind::ResourceLimitExceeded
        );
    }

    #[test]
    fn test_display() {
        let err = SimError::QubitOutOfRange {
            qubit: 4,
            n_qubits: 3,
        };
        assert_eq!(
            err.to_string(),
            "qubit position 4 is out of range for a 3-qubit register"
        );
    }
}
