//! Graphs for the Max-Cut problem.
//!
//! The Max-Cut problem: given a graph G = (V, E), partition the vertices into
//! two sets so that the number of edges running between them is maximal.
//!
//! Nodes are the integers `0..n_nodes`; node `k` is qubit `k` of the
//! register, so it is the k-th character of a bitstring and the
//! (n-1-k)-th bit of a basis index.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::error::{SimError, SimResult};
use crate::limits::Limits;

/// An undirected, unweighted simple graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    n_nodes: usize,
    /// Edges as (u, v) with u < v, sorted and deduplicated.
    edges: Vec<(usize, usize)>,
    #[serde(skip)]
    adjacency: Vec<BTreeSet<usize>>,
}

impl Graph {
    /// Create a graph, rejecting self-loops and out-of-range endpoints.
    ///
    /// Edges are unordered: `(1, 0)` and `(0, 1)` are the same edge and
    /// duplicates collapse.
    pub fn new(n_nodes: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> SimResult<Self> {
        if n_nodes < 1 {
            return Err(SimError::NoQubits(n_nodes));
        }
        let mut set = BTreeSet::new();
        for (u, v) in edges {
            if u == v || u >= n_nodes || v >= n_nodes {
                return Err(SimError::InvalidEdge { u, v, n_nodes });
            }
            set.insert((u.min(v), u.max(v)));
        }
        let edges: Vec<_> = set.into_iter().collect();

        let mut adjacency = vec![BTreeSet::new(); n_nodes];
        for &(u, v) in &edges {
            adjacency[u].insert(v);
            adjacency[v].insert(u);
        }
        let isolated = adjacency.iter().filter(|n| n.is_empty()).count();
        if isolated > 0 {
            warn!(isolated, n_nodes, "graph has isolated nodes");
        }

        Ok(Self {
            n_nodes,
            edges,
            adjacency,
        })
    }

    /// Triangle K3.
    pub fn triangle() -> Self {
        Self::from_valid(3, vec![(0, 1), (0, 2), (1, 2)])
    }

    /// Ring on `n` nodes.
    pub fn ring(n: usize) -> SimResult<Self> {
        Self::new(n, (0..n).map(|i| (i, (i + 1) % n)))
    }

    /// Complete graph on `n` nodes.
    pub fn complete(n: usize) -> SimResult<Self> {
        Self::new(n, (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
    }

    fn from_valid(n_nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        let mut adjacency = vec![BTreeSet::new(); n_nodes];
        for &(u, v) in &edges {
            adjacency[u].insert(v);
            adjacency[v].insert(u);
        }
        Self {
            n_nodes,
            edges,
            adjacency,
        }
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.n_nodes
    }

    /// Edges as (u, v) with u < v.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges incident to `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.get(node).map_or(0, BTreeSet::len)
    }

    /// Number of nodes adjacent to both `u` and `v` (triangles through edge uv).
    pub fn common_neighbors(&self, u: usize, v: usize) -> usize {
        match (self.adjacency.get(u), self.adjacency.get(v)) {
            (Some(a), Some(b)) => a.intersection(b).count(),
            _ => 0,
        }
    }

    /// Cut value of a computational-basis index (node k = bit n-1-k).
    pub fn cut_value_of_index(&self, index: usize) -> usize {
        let bit = |node: usize| (index >> (self.n_nodes - 1 - node)) & 1;
        self.edges
            .iter()
            .filter(|&&(u, v)| bit(u) != bit(v))
            .count()
    }

    /// Find the maximum cut by brute force (for small graphs).
    pub fn max_cut_brute_force(&self) -> SimResult<(usize, usize)> {
        self.max_cut_brute_force_with_limits(&Limits::default())
    }

    /// [`Graph::max_cut_brute_force`] bounded by `limits.max_state_qubits`.
    pub fn max_cut_brute_force_with_limits(&self, limits: &Limits) -> SimResult<(usize, usize)> {
        limits.check_state(self.n_nodes)?;
        let mut best = (0, 0);
        for index in 0..(1usize << self.n_nodes) {
            let value = self.cut_value_of_index(index);
            if value > best.1 {
                best = (index, value);
            }
        }
        Ok(best)
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph ({} nodes, {} edges):",
            self.n_nodes,
            self.edges.len()
        )?;
        for (u, v) in &self.edges {
            writeln!(f, "  {u} -- {v}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_normalised_and_deduplicated() {
        let g = Graph::new(3, vec![(1, 0), (0, 1), (2, 1)]).unwrap();
        assert_eq!(g.edges(), &[(0, 1), (1, 2)]);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.degree(0), 1);
    }

    #[test]
    fn test_invalid_edges() {
        assert!(matches!(
            Graph::new(3, vec![(1, 1)]),
            Err(SimError::InvalidEdge { u: 1, v: 1, .. })
        ));
        assert!(matches!(
            Graph::new(3, vec![(0, 3)]),
            Err(SimError::InvalidEdge { v: 3, .. })
        ));
        assert!(Graph::new(0, vec![]).is_err());
    }

    #[test]
    fn test_common_neighbors() {
        let g = Graph::triangle();
        assert_eq!(g.common_neighbors(0, 1), 1);
        let square = Graph::ring(4).unwrap();
        assert_eq!(square.common_neighbors(0, 1), 0);
        assert_eq!(square.common_neighbors(0, 2), 2);
    }

    #[test]
    fn test_cut_value_of_index() {
        let square = Graph::ring(4).unwrap();
        assert_eq!(square.cut_value_of_index(0b0000), 0);
        assert_eq!(square.cut_value_of_index(0b0101), 4);
        assert_eq!(square.cut_value_of_index(0b0011), 2);
    }

    #[test]
    fn test_max_cut_brute_force() {
        let (_, value) = Graph::triangle().max_cut_brute_force().unwrap();
        assert_eq!(value, 2);
        let (best, value) = Graph::ring(4).unwrap().max_cut_brute_force().unwrap();
        assert_eq!(value, 4);
        assert!(best == 0b0101 || best == 0b1010);
    }

    #[test]
    fn test_brute_force_honours_limits() {
        let ring = Graph::ring(6).unwrap();
        let tight = Limits {
            max_state_qubits: 4,
            ..Limits::default()
        };
        assert!(matches!(
            ring.max_cut_brute_force_with_limits(&tight),
            Err(SimError::ResourceLimit {
                requested: 6,
                max: 4,
                ..
            })
        ));
        let (_, value) = ring.max_cut_brute_force().unwrap();
        assert_eq!(value, 6);
    }

    #[test]
    fn test_complete_graph() {
        let k4 = Graph::complete(4).unwrap();
        assert_eq!(k4.num_edges(), 6);
        assert_eq!(k4.common_neighbors(0, 1), 2);
    }
}
