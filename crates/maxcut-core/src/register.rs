//! Qubit-register operator algebra.
//!
//! Operators on an n-qubit register are dense 2^n x 2^n complex matrices
//! built as Kronecker products of 2x2 single-qubit blocks:
//!
//!   O = B_0 ⊗ B_1 ⊗ ... ⊗ B_{n-1}
//!
//! Qubit 0 is the leftmost factor, i.e. the most significant bit of a
//! computational-basis index.
//!
//! # Example
//!
//! ```rust
//! use maxcut_core::register::{PauliAxis, Register};
//!
//! let reg = Register::new(3).unwrap();
//! let x1 = reg.pauli(PauliAxis::X, 1).unwrap(); // I ⊗ X ⊗ I
//! assert_eq!(x1.dim(), (8, 8));
//! ```

use ndarray::linalg::kron;
use ndarray::{Array2, array};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::limits::Limits;

/// A dense operator on the register's Hilbert space.
pub type Operator = Array2<Complex64>;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Axis of a single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliAxis {
    /// Pauli-X (bit flip).
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z (phase flip).
    Z,
}

impl PauliAxis {
    /// The 2x2 matrix of this Pauli operator.
    pub fn block(self) -> Operator {
        match self {
            PauliAxis::X => array![[ZERO, ONE], [ONE, ZERO]],
            PauliAxis::Y => array![[ZERO, -I], [I, ZERO]],
            PauliAxis::Z => array![[ONE, ZERO], [ZERO, -ONE]],
        }
    }
}

/// The 2x2 identity block.
pub fn identity_block() -> Operator {
    Array2::eye(2)
}

/// An n-qubit register whose width has been validated against [`Limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    n_qubits: usize,
}

impl Register {
    /// Create a register using the default resource limits.
    pub fn new(n_qubits: usize) -> SimResult<Self> {
        Self::with_limits(n_qubits, &Limits::default())
    }

    /// Create a register, checking its width against `limits`.
    pub fn with_limits(n_qubits: usize, limits: &Limits) -> SimResult<Self> {
        limits.check_dense(n_qubits)?;
        Ok(Self { n_qubits })
    }

    /// Number of qubits.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Hilbert-space dimension, 2^n.
    pub fn dim(&self) -> usize {
        1 << self.n_qubits
    }

    /// The 2^n x 2^n identity.
    pub fn identity(&self) -> Operator {
        Array2::eye(self.dim())
    }

    /// Kronecker product of one 2x2 block per qubit, `block_at(k)` for qubit `k`.
    pub fn tensor(&self, mut block_at: impl FnMut(usize) -> Operator) -> Operator {
        trace!(n_qubits = self.n_qubits, "building tensor-product operator");
        (0..self.n_qubits).fold(Array2::from_elem((1, 1), ONE), |acc, k| {
            kron(&acc, &block_at(k))
        })
    }

    /// Embed a single-qubit block at `pos`, identity elsewhere.
    pub fn embed(&self, block: &Operator, pos: usize) -> SimResult<Operator> {
        self.check_position(pos)?;
        Ok(self.tensor(|k| {
            if k == pos {
                block.clone()
            } else {
                identity_block()
            }
        }))
    }

    /// Pauli operator along `axis` acting on qubit `pos`.
    pub fn pauli(&self, axis: PauliAxis, pos: usize) -> SimResult<Operator> {
        self.embed(&axis.block(), pos)
    }

    fn check_position(&self, pos: usize) -> SimResult<()> {
        if pos >= self.n_qubits {
            return Err(SimError::QubitOutOfRange {
                qubit: pos,
                n_qubits: self.n_qubits,
            });
        }
        Ok(())
    }
}

/// The 2^n x 2^n identity operator.
pub fn identity(n_qubits: usize) -> SimResult<Operator> {
    Ok(Register::new(n_qubits)?.identity())
}

/// Pauli operator along `axis` on qubit `pos` of an n-qubit register.
pub fn pauli(axis: PauliAxis, n_qubits: usize, pos: usize) -> SimResult<Operator> {
    Register::new(n_qubits)?.pauli(axis, pos)
}

/// Conjugate transpose.
pub fn dagger(op: &Operator) -> Operator {
    op.t().mapv(|z| z.conj())
}

/// True if `op` is square and `op† · op` is the identity within `tol`.
pub fn is_unitary(op: &Operator, tol: f64) -> bool {
    let (rows, cols) = op.dim();
    if rows != cols {
        return false;
    }
    let product = dagger(op).dot(op);
    product.indexed_iter().all(|((r, c), z)| {
        let expected = if r == c { ONE } else { ZERO };
        (z - expected).norm() <= tol
    })
}
