//! Quantum states and Born-rule probability extraction.
//!
//! A pure state on n qubits is a normalised complex vector of length 2^n.
//! Index `i` is the computational-basis state whose binary expansion, most
//! significant bit first, gives the values of qubits 0..n-1.

use ndarray::{Array1, Array2};
use num_complex::Complex64;
use rand::Rng;
use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::limits::Limits;
use crate::register::Operator;

/// A pure state vector.
pub type StateVector = Array1<Complex64>;

/// Tolerance used when checking that probabilities sum to one.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Tensor product of single-qubit states `[a_k, b_k]`, qubit 0 first.
///
/// Bounded by the default state-vector limit.
pub fn product_state(qubits: &[[Complex64; 2]]) -> SimResult<StateVector> {
    product_state_with_limits(qubits, &Limits::default())
}

/// [`product_state`] bounded by `limits.max_state_qubits`.
pub fn product_state_with_limits(
    qubits: &[[Complex64; 2]],
    limits: &Limits,
) -> SimResult<StateVector> {
    limits.check_state(qubits.len())?;
    let mut amplitudes = vec![Complex64::new(1.0, 0.0)];
    for qubit in qubits {
        amplitudes = amplitudes
            .iter()
            .flat_map(|a| [a * qubit[0], a * qubit[1]])
            .collect();
    }
    Ok(Array1::from(amplitudes))
}

/// The uniform superposition |+>^{⊗n}, i.e. (|0> + |1>)/√2 on every qubit.
pub fn initial_state(n_qubits: usize) -> SimResult<StateVector> {
    initial_state_with_limits(n_qubits, &Limits::default())
}

/// [`initial_state`] bounded by `limits.max_state_qubits`.
pub fn initial_state_with_limits(n_qubits: usize, limits: &Limits) -> SimResult<StateVector> {
    let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    let state = product_state_with_limits(&vec![[h, h]; n_qubits], limits)?;
    debug!(n_qubits, dim = state.len(), "prepared uniform superposition");
    Ok(state)
}

/// A normalised product of `n_qubits` random single-qubit states.
///
/// Each qubit is `c_0|b_0> + c_1|b_1>` with complex coefficients drawn
/// uniformly from the unit square and random basis labels, then normalised;
/// if both labels coincide the qubit is simply that basis state.
pub fn random_product_state<R: Rng + ?Sized>(
    n_qubits: usize,
    rng: &mut R,
) -> SimResult<StateVector> {
    if n_qubits < 1 {
        return Err(SimError::NoQubits(n_qubits));
    }
    let qubits: Vec<[Complex64; 2]> = (0..n_qubits)
        .map(|_| loop {
            let mut q = [Complex64::new(0.0, 0.0); 2];
            for _ in 0..2 {
                let c = Complex64::new(rng.r#gen::<f64>(), rng.r#gen::<f64>());
                q[rng.gen_range(0..2)] += c;
            }
            let norm = (q[0].norm_sqr() + q[1].norm_sqr()).sqrt();
            if norm > f64::EPSILON {
                break [q[0] / norm, q[1] / norm];
            }
        })
        .collect();
    product_state(&qubits)
}

/// Number of qubits represented by a vector of length `len`.
pub fn qubits_for_len(len: usize) -> SimResult<usize> {
    if len < 2 || !len.is_power_of_two() {
        return Err(SimError::NotPowerOfTwo(len));
    }
    Ok(len.trailing_zeros() as usize)
}

/// Squared norm, Σ |a_i|².
pub fn norm_sqr(state: &StateVector) -> f64 {
    state.iter().map(Complex64::norm_sqr).sum()
}

/// Born-rule distribution over the computational basis: entry i = |state[i]|².
pub fn basis_probabilities(state: &StateVector) -> SimResult<Vec<f64>> {
    let n_qubits = qubits_for_len(state.len())?;
    let probabilities: Vec<f64> = state.iter().map(Complex64::norm_sqr).collect();
    check_total(&probabilities, n_qubits);
    Ok(probabilities)
}

/// Density matrix |ψ><ψ| of a pure state, bounded by the dense-operator limit.
pub fn density_matrix(state: &StateVector, limits: &Limits) -> SimResult<Operator> {
    let n_qubits = qubits_for_len(state.len())?;
    limits.check_dense(n_qubits)?;
    let dim = state.len();
    Ok(Array2::from_shape_fn((dim, dim), |(i, j)| {
        state[i] * state[j].conj()
    }))
}

/// Computational-basis distribution of a density matrix: its real diagonal.
pub fn density_probabilities(rho: &Operator) -> SimResult<Vec<f64>> {
    let (rows, cols) = rho.dim();
    if rows != cols {
        return Err(SimError::DimensionMismatch {
            operator: rows,
            state: cols,
        });
    }
    let n_qubits = qubits_for_len(rows)?;
    let probabilities: Vec<f64> = rho.diag().iter().map(|z| z.re).collect();
    check_total(&probabilities, n_qubits);
    Ok(probabilities)
}

/// Basis index rendered as an n-character bitstring, qubit 0 first.
pub fn index_to_bitstring(index: usize, n_qubits: usize) -> String {
    format!("{index:0n_qubits$b}")
}

fn check_total(probabilities: &[f64], n_qubits: usize) {
    let total: f64 = probabilities.iter().sum();
    if (total - 1.0).abs() > NORM_TOLERANCE {
        warn!(n_qubits, total, "state is not normalised");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_initial_state_is_uniform() {
        let s = initial_state(3).unwrap();
        assert_eq!(s.len(), 8);
        for a in &s {
            assert!((a.re - 1.0 / 8f64.sqrt()).abs() < 1e-12);
            assert!(a.im.abs() < 1e-15);
        }
        assert!((norm_sqr(&s) - 1.0).abs() < NORM_TOLERANCE);
    }

    #[test]
    fn test_initial_state_rejects_zero() {
        assert!(matches!(initial_state(0), Err(SimError::NoQubits(0))));
    }

    #[test]
    fn test_initial_state_honours_limits() {
        let tight = Limits {
            max_state_qubits: 2,
            ..Limits::default()
        };
        assert!(matches!(
            initial_state_with_limits(3, &tight),
            Err(SimError::ResourceLimit {
                requested: 3,
                max: 2,
                ..
            })
        ));
        assert_eq!(initial_state_with_limits(2, &tight).unwrap().len(), 4);
    }

    #[test]
    fn test_product_state_ordering() {
        // |1> ⊗ |0> = |10> = index 2.
        let zero = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        let one = [Complex64::new(0.0, 0.0), Complex64::new(1.0, 0.0)];
        let s = product_state(&[one, zero]).unwrap();
        assert_eq!(s[2], Complex64::new(1.0, 0.0));
        assert_eq!(norm_sqr(&s), 1.0);
    }

    #[test]
    fn test_random_product_state_normalised() {
        let mut rng = StdRng::seed_from_u64(7);
        for n in 1..6 {
            let s = random_product_state(n, &mut rng).unwrap();
            assert_eq!(s.len(), 1 << n);
            assert!((norm_sqr(&s) - 1.0).abs() < 1e-12);
        }
        assert!(random_product_state(0, &mut rng).is_err());
    }

    #[test]
    fn test_probabilities_reject_bad_lengths() {
        for len in [0, 1, 3, 6] {
            let s = Array1::from(vec![Complex64::new(0.0, 0.0); len]);
            assert!(matches!(
                basis_probabilities(&s),
                Err(SimError::NotPowerOfTwo(l)) if l == len
            ));
        }
    }

    #[test]
    fn test_density_matrix_matches_ket() {
        let mut rng = StdRng::seed_from_u64(11);
        let s = random_product_state(3, &mut rng).unwrap();
        let rho = density_matrix(&s, &Limits::default()).unwrap();
        let from_ket = basis_probabilities(&s).unwrap();
        let from_rho = density_probabilities(&rho).unwrap();
        for (a, b) in from_ket.iter().zip(&from_rho) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_bitstring_formatting() {
        assert_eq!(index_to_bitstring(2, 3), "010");
        assert_eq!(index_to_bitstring(0, 2), "00");
        assert_eq!(index_to_bitstring(5, 3), "101");
    }
}
