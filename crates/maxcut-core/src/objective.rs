//! The Max-Cut objective, classical and QAOA expectation.
//!
//! For a bitstring z the objective is
//!
//!   C(z) = Σ_{(u,v) ∈ E} (z_u − z_v)²
//!
//! i.e. the number of edges whose endpoints land on different sides.
//!
//! For one QAOA layer the expectation ⟨γ,β| C |γ,β⟩ has a closed form per
//! edge (Wang, Hadfield, Jiang, Rieffel 2018). With the cost unitary
//! exp(−iγ Σ (I − Z_u Z_v)) used here the rotation angle in that formula is
//! γ' = 2γ:
//!
//!   ⟨C_uv⟩ = ½ + ¼ sin 4β sin γ' (cos^{d_u} γ' + cos^{d_v} γ')
//!          − ¼ sin² 2β cos^{d_u + d_v − 2λ} γ' (1 − cos^λ 2γ')
//!
//! where d_u = deg(u) − 1 and λ is the number of common neighbours.

use tracing::trace;

use crate::error::{SimError, SimResult};
use crate::evolution::evolve_state;
use crate::graph::Graph;
use crate::limits::Limits;

/// Classical Max-Cut objective of a `0`/`1` bitstring over `edges`.
///
/// Character `k` of the bitstring is the side of node `k`.
pub fn cut_value(bitstring: &str, edges: &[(usize, usize)]) -> SimResult<usize> {
    let bits = bitstring
        .chars()
        .map(|c| match c {
            '0' => Ok(0i64),
            '1' => Ok(1i64),
            other => Err(SimError::InvalidBit(other)),
        })
        .collect::<SimResult<Vec<_>>>()?;

    let mut value = 0;
    for &(u, v) in edges {
        let node = u.max(v);
        if node >= bits.len() {
            return Err(SimError::BitstringTooShort {
                len: bits.len(),
                node,
            });
        }
        value += (bits[u] - bits[v]).pow(2) as usize;
    }
    Ok(value)
}

/// Closed-form expected cut of the single-layer QAOA state at (γ, β).
///
/// Pure and deterministic, so it can be evaluated concurrently.
pub fn expected_cut(gamma: f64, beta: f64, graph: &Graph) -> f64 {
    let g = 2.0 * gamma;
    let (sin_g, cos_g) = g.sin_cos();
    let cos_2g = (2.0 * g).cos();
    let sin_4b = (4.0 * beta).sin();
    let sin_2b_sq = (2.0 * beta).sin().powi(2);

    let value: f64 = graph
        .edges()
        .iter()
        .map(|&(u, v)| {
            let d_u = graph.degree(u) as i32 - 1;
            let d_v = graph.degree(v) as i32 - 1;
            let lambda = graph.common_neighbors(u, v) as i32;

            let mixing = 0.25 * sin_4b * sin_g * (cos_g.powi(d_u) + cos_g.powi(d_v));
            let triangles = 0.25
                * sin_2b_sq
                * cos_g.powi(d_u + d_v - 2 * lambda)
                * (1.0 - cos_2g.powi(lambda));
            0.5 + mixing - triangles
        })
        .sum();

    trace!(gamma, beta, value, "analytical expected cut");
    value
}

/// Expected cut Σ_z p(z) C(z) of the simulated p-layer QAOA state.
pub fn simulated_expected_cut(gammas: &[f64], betas: &[f64], graph: &Graph) -> SimResult<f64> {
    simulated_expected_cut_with_limits(gammas, betas, graph, &Limits::default())
}

/// [`simulated_expected_cut`] bounded by `limits.max_state_qubits`.
pub fn simulated_expected_cut_with_limits(
    gammas: &[f64],
    betas: &[f64],
    graph: &Graph,
    limits: &Limits,
) -> SimResult<f64> {
    let state = evolve_state(graph.n_nodes(), graph.edges(), gammas, betas, limits)?;
    Ok(state
        .iter()
        .enumerate()
        .map(|(index, amplitude)| amplitude.norm_sqr() * graph.cut_value_of_index(index) as f64)
        .sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_cut_value_single_edge() {
        assert_eq!(cut_value("01", &[(0, 1)]).unwrap(), 1);
        assert_eq!(cut_value("11", &[(0, 1)]).unwrap(), 0);
    }

    #[test]
    fn test_cut_value_triangle() {
        let edges = [(0, 1), (1, 2), (0, 2)];
        assert_eq!(cut_value("000", &edges).unwrap(), 0);
        assert_eq!(cut_value("100", &edges).unwrap(), 2);
        assert_eq!(cut_value("101", &edges).unwrap(), 2);
    }

    #[test]
    fn test_cut_value_rejects_short_bitstring() {
        assert!(matches!(
            cut_value("01", &[(0, 2)]),
            Err(SimError::BitstringTooShort { len: 2, node: 2 })
        ));
    }

    #[test]
    fn test_cut_value_rejects_invalid_bits() {
        assert!(matches!(
            cut_value("0x1", &[(0, 1)]),
            Err(SimError::InvalidBit('x'))
        ));
    }

    #[test]
    fn test_expected_cut_at_zero_angles_is_half_the_edges() {
        // |+>^n is unbiased: every edge is cut with probability 1/2.
        let g = Graph::ring(5).unwrap();
        assert!((expected_cut(0.0, 0.0, &g) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_expected_cut_single_edge_optimum() {
        let g = Graph::new(2, vec![(0, 1)]).unwrap();
        assert!((expected_cut(PI / 4.0, PI / 8.0, &g) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analytical_matches_simulation() {
        let graphs = [
            Graph::new(2, vec![(0, 1)]).unwrap(),
            Graph::triangle(),
            Graph::new(3, vec![(0, 1)]).unwrap(),
            Graph::new(4, vec![(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]).unwrap(),
            Graph::complete(4).unwrap(),
        ];
        for g in &graphs {
            for (gamma, beta) in [(0.3, 0.2), (1.1, 0.7), (2.5, 2.9)] {
                let analytical = expected_cut(gamma, beta, g);
                let simulated = simulated_expected_cut(&[gamma], &[beta], g).unwrap();
                assert!(
                    (analytical - simulated).abs() < 1e-9,
                    "{g}: analytical {analytical} vs simulated {simulated}"
                );
            }
        }
    }
}
