//! QAOA time evolution.
//!
//! One QAOA layer applies the cost unitary, then the mixer:
//!
//!   U(γ, β) = exp(−iβ B) · exp(−iγ H_C)
//!   H_C = Σ_{(u,v) ∈ E} (I − Z_u Z_v)      (diagonal, H_C|z> = 2·C(z)|z>)
//!   B   = Σ_k X_k                          (exp(−iβB) = ⊗_k exp(−iβ X_k))
//!
//! and p layers compose as U = U_p ··· U_1, so U_1 acts on the state first.
//!
//! Two equivalent paths are provided: dense operators built from the
//! register algebra ([`evolution_operator`]), and an on-the-fly state-vector
//! kernel ([`evolve_state`]) that never materialises a 2^n x 2^n matrix.

use ndarray::{Array1, Array2, array};
use num_complex::Complex64;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::limits::Limits;
use crate::register::{Operator, PauliAxis, Register};
use crate::state::{StateVector, initial_state};

/// Single-qubit rotation exp(−iβX) = cos β · I − i sin β · X.
pub fn rx_block(beta: f64) -> Operator {
    let (s, c) = beta.sin_cos();
    let c = Complex64::new(c, 0.0);
    let s = Complex64::new(0.0, -s);
    array![[c, s], [s, c]]
}

/// Dense cost Hamiltonian H_C = Σ_{(u,v)} (I − Z_u Z_v).
pub fn cost_hamiltonian(n_qubits: usize, edges: &[(usize, usize)]) -> SimResult<Operator> {
    cost_hamiltonian_in(&Register::new(n_qubits)?, edges)
}

fn cost_hamiltonian_in(reg: &Register, edges: &[(usize, usize)]) -> SimResult<Operator> {
    validate_edges(reg.n_qubits(), edges)?;
    let identity = reg.identity();
    let mut h = Array2::zeros((reg.dim(), reg.dim()));
    for &(u, v) in edges {
        let zz = reg.pauli(PauliAxis::Z, u)?.dot(&reg.pauli(PauliAxis::Z, v)?);
        h = h + &identity - zz;
    }
    Ok(h)
}

/// Diagonal of H_C computed directly: entry z is 2 · C(z).
pub fn cost_diagonal(
    n_qubits: usize,
    edges: &[(usize, usize)],
    limits: &Limits,
) -> SimResult<Array1<f64>> {
    limits.check_state(n_qubits)?;
    validate_edges(n_qubits, edges)?;
    let bit = |index: usize, node: usize| (index >> (n_qubits - 1 - node)) & 1;
    Ok(Array1::from_shape_fn(1 << n_qubits, |index| {
        let cut = edges
            .iter()
            .filter(|&&(u, v)| bit(index, u) != bit(index, v))
            .count();
        2.0 * cut as f64
    }))
}

/// Cost unitary exp(−iγ H_C), diagonal in the computational basis.
pub fn cost_unitary(n_qubits: usize, edges: &[(usize, usize)], gamma: f64) -> SimResult<Operator> {
    Ok(cost_unitary_in(&cost_hamiltonian(n_qubits, edges)?, gamma))
}

/// exp(−iγH) for a diagonal H.
fn cost_unitary_in(hamiltonian: &Operator, gamma: f64) -> Operator {
    let phases = hamiltonian
        .diag()
        .mapv(|e| Complex64::from_polar(1.0, -gamma * e.re));
    Array2::from_diag(&phases)
}

/// Mixer unitary ⊗_k exp(−iβ X_k).
pub fn mixer_unitary(n_qubits: usize, beta: f64) -> SimResult<Operator> {
    Ok(mixer_unitary_in(&Register::new(n_qubits)?, beta))
}

fn mixer_unitary_in(reg: &Register, beta: f64) -> Operator {
    let block = rx_block(beta);
    reg.tensor(|_| block.clone())
}

/// Full p-layer evolution operator U_p ··· U_1 with U_l = mixer(β_l) · cost(γ_l).
pub fn evolution_operator(
    n_qubits: usize,
    edges: &[(usize, usize)],
    gammas: &[f64],
    betas: &[f64],
) -> SimResult<Operator> {
    evolution_operator_with_limits(n_qubits, edges, gammas, betas, &Limits::default())
}

/// [`evolution_operator`] checked against custom resource limits.
pub fn evolution_operator_with_limits(
    n_qubits: usize,
    edges: &[(usize, usize)],
    gammas: &[f64],
    betas: &[f64],
    limits: &Limits,
) -> SimResult<Operator> {
    validate_layers(gammas, betas)?;
    let reg = Register::with_limits(n_qubits, limits)?;
    validate_edges(n_qubits, edges)?;
    debug!(
        n_qubits,
        n_edges = edges.len(),
        layers = gammas.len(),
        dim = reg.dim(),
        "building dense QAOA evolution operator"
    );

    let hamiltonian = cost_hamiltonian_in(&reg, edges)?;
    let mut evolution: Option<Operator> = None;
    for (&gamma, &beta) in gammas.iter().zip(betas) {
        // The cost operator is diagonal, so mixer · cost scales mixer column j by cost[j][j].
        let cost = cost_unitary_in(&hamiltonian, gamma).diag().to_owned();
        let layer = mixer_unitary_in(&reg, beta) * &cost;
        evolution = Some(match evolution {
            None => layer,
            Some(previous) => layer.dot(&previous),
        });
    }
    evolution.ok_or(SimError::NoLayers)
}

/// Matrix-vector product `op · state`.
pub fn apply(op: &Operator, state: &StateVector) -> SimResult<StateVector> {
    let (rows, cols) = op.dim();
    if rows != cols || cols != state.len() {
        return Err(SimError::DimensionMismatch {
            operator: rows,
            state: state.len(),
        });
    }
    Ok(op.dot(state))
}

/// Final QAOA state via the dense evolution operator.
pub fn evolve_dense(
    n_qubits: usize,
    edges: &[(usize, usize)],
    gammas: &[f64],
    betas: &[f64],
) -> SimResult<StateVector> {
    let u = evolution_operator(n_qubits, edges, gammas, betas)?;
    apply(&u, &initial_state(n_qubits)?)
}

/// Final QAOA state computed directly on the state vector.
///
/// Cost layers multiply amplitude z by exp(−iγ · 2C(z)); mixer layers apply
/// exp(−iβX) to each qubit in turn.
pub fn evolve_state(
    n_qubits: usize,
    edges: &[(usize, usize)],
    gammas: &[f64],
    betas: &[f64],
    limits: &Limits,
) -> SimResult<StateVector> {
    validate_layers(gammas, betas)?;
    let diagonal = cost_diagonal(n_qubits, edges, limits)?;
    let dim = diagonal.len();
    debug!(n_qubits, dim, layers = gammas.len(), "evolving state vector");

    let amplitude = Complex64::new(1.0 / (dim as f64).sqrt(), 0.0);
    let mut state = Array1::from_elem(dim, amplitude);

    for (&gamma, &beta) in gammas.iter().zip(betas) {
        state.zip_mut_with(&diagonal, |a, &e| {
            *a *= Complex64::from_polar(1.0, -gamma * e)
        });
        for qubit in 0..n_qubits {
            apply_rx(&mut state, n_qubits, qubit, beta);
        }
    }
    Ok(state)
}

fn apply_rx(state: &mut StateVector, n_qubits: usize, qubit: usize, beta: f64) {
    let mask = 1 << (n_qubits - 1 - qubit);
    let (s, c) = beta.sin_cos();
    let neg_i_s = Complex64::new(0.0, -s);
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let a = state[i];
            let b = state[j];
            state[i] = c * a + neg_i_s * b;
            state[j] = neg_i_s * a + c * b;
        }
    }
}

fn validate_layers(gammas: &[f64], betas: &[f64]) -> SimResult<()> {
    if gammas.len() != betas.len() {
        return Err(SimError::LayerMismatch {
            gammas: gammas.len(),
            betas: betas.len(),
        });
    }
    if gammas.is_empty() {
        return Err(SimError::NoLayers);
    }
    Ok(())
}

fn validate_edges(n_qubits: usize, edges: &[(usize, usize)]) -> SimResult<()> {
    for &(u, v) in edges {
        if u == v || u >= n_qubits || v >= n_qubits {
            return Err(SimError::InvalidEdge {
                u,
                v,
                n_nodes: n_qubits,
            });
        }
    }
    Ok(())
}
