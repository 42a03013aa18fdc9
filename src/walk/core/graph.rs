//! Graph container for supervised random walk models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the undirected graph a walk is
//! trained on. This module centralizes edge-list validation and pair
//! canonicalization so that downstream code (transition builders, gradient
//! solvers, ranking) can assume clean structure.
//!
//! Key behaviors
//! -------------
//! - [`Graph`] enforces structural invariants (non-empty node set, in-range
//!   endpoints, no self-loops, no duplicate unordered pairs).
//! - Edges are stored canonicalized as `(min(u, v), max(u, v))`, one entry
//!   per undirected edge.
//!
//! Invariants & assumptions
//! ------------------------
//! - `nnodes > 0`; every endpoint is `< nnodes`.
//! - `u != v` for every edge; no unordered pair appears twice.
//! - The graph is immutable once constructed for a given training run.
//!
//! Conventions
//! -----------
//! - Node indices are 0-based.
//! - Isolated nodes are legal: a node may simply not appear in any edge.
//!
//! Downstream usage
//! ----------------
//! - `walk::core::transition` iterates `edges` to fill symmetric strength
//!   matrices; `walk::core::features` validates exact edge cover against
//!   this container; `walk::models::srw` uses [`Graph::neighbors`] to
//!   exclude already-linked candidates from predictions.
//!
//! Testing notes
//! -------------
//! - Unit tests cover construction behavior (happy path with
//!   canonicalization, empty node set, out-of-range endpoints, self-loops,
//!   duplicates in both orientations) and neighbor enumeration.
use std::collections::HashSet;

use crate::walk::errors::{GraphError, GraphResult};

/// `Graph` — validated undirected graph as a node count plus edge list.
///
/// Purpose
/// -------
/// Represent the fixed topology of a single training instance. This type
/// centralizes structural checks so downstream code can assume in-range,
/// loop-free, duplicate-free edges.
///
/// Key behaviors
/// -------------
/// - Canonicalizes every edge to `(min(u, v), max(u, v))` at construction.
/// - Rejects empty node sets, out-of-range endpoints, self-loops, and
///   duplicate unordered pairs (including reversed duplicates).
///
/// Fields
/// ------
/// - `nnodes`: `usize`
///   Number of nodes; node indices are `0..nnodes`.
/// - `edges`: `Vec<(usize, usize)>`
///   Canonicalized undirected edges, in input order.
///
/// Invariants
/// ----------
/// - `nnodes > 0`.
/// - For every stored edge `(u, v)`: `u < v < nnodes`.
/// - No unordered pair occurs twice.
///
/// Performance
/// -----------
/// - Validation is O(E) with a hash set for duplicate detection.
/// - After construction, this type is a lightweight container.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    /// Number of nodes; indices run over `0..nnodes`.
    pub nnodes: usize,
    /// Canonicalized undirected edges, `(min, max)` per pair.
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Construct a validated [`Graph`] from a node count and an edge list.
    ///
    /// Parameters
    /// ----------
    /// - `nnodes`: `usize`
    ///   Number of nodes. Must be at least 1.
    /// - `edges`: `Vec<(usize, usize)>`
    ///   Undirected edges in either orientation; canonicalized on input.
    ///
    /// Returns
    /// -------
    /// `GraphResult<Graph>`
    ///   - `Ok(Graph)` if all invariants hold.
    ///   - `Err(GraphError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `GraphError::EmptyGraph` when `nnodes == 0`.
    /// - `GraphError::NodeOutOfRange { edge, nnodes }` when an endpoint is
    ///   `>= nnodes`; reports the first offending edge.
    /// - `GraphError::SelfLoop { node }` when `u == v`.
    /// - `GraphError::DuplicateEdge { u, v }` when the same unordered pair
    ///   appears twice (reversed orientation included).
    ///
    /// Panics
    /// ------
    /// - Never panics. All invalid inputs are reported via `GraphError`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use rust_linkpred::walk::core::graph::Graph;
    /// #
    /// let graph = Graph::new(4, vec![(0, 1), (2, 0), (1, 2), (0, 3)]).unwrap();
    /// assert_eq!(graph.nedges(), 4);
    /// assert_eq!(graph.edges[1], (0, 2)); // canonicalized
    /// ```
    pub fn new(nnodes: usize, edges: Vec<(usize, usize)>) -> GraphResult<Graph> {
        if nnodes == 0 {
            return Err(GraphError::EmptyGraph);
        }

        let mut seen = HashSet::with_capacity(edges.len());
        let mut canonical = Vec::with_capacity(edges.len());
        for &(u, v) in &edges {
            if u >= nnodes || v >= nnodes {
                return Err(GraphError::NodeOutOfRange { edge: (u, v), nnodes });
            }
            if u == v {
                return Err(GraphError::SelfLoop { node: u });
            }
            let key = (u.min(v), u.max(v));
            if !seen.insert(key) {
                return Err(GraphError::DuplicateEdge { u: key.0, v: key.1 });
            }
            canonical.push(key);
        }

        Ok(Graph { nnodes, edges: canonical })
    }

    /// Number of undirected edges.
    pub fn nedges(&self) -> usize {
        self.edges.len()
    }

    /// Collect the neighbors of `node`, in edge-list order.
    ///
    /// Linear in the number of edges; callers that need repeated lookups
    /// should collect once. Out-of-range nodes simply have no neighbors.
    pub fn neighbors(&self, node: usize) -> Vec<usize> {
        let mut found = Vec::new();
        for &(u, v) in &self.edges {
            if u == node {
                found.push(v);
            } else if v == node {
                found.push(u);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::errors::GraphError;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction behavior of `Graph::new`.
    // - Enforcement of invariants:
    //   * non-empty node set,
    //   * in-range endpoints,
    //   * no self-loops,
    //   * no duplicate unordered pairs (reversed orientation included).
    // - Edge canonicalization and neighbor enumeration.
    //
    // These tests intentionally DO NOT cover:
    // - Transition-matrix construction (see `walk::core::transition`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `Graph::new` succeeds on a valid edge list and stores
    // every pair canonicalized as (min, max).
    //
    // Given
    // -----
    // - 4 nodes and edges {(0,1), (2,0), (1,2), (0,3)} with one reversed
    //   orientation.
    //
    // Expect
    // ------
    // - `Ok(..)` with 4 edges and (2,0) stored as (0,2).
    fn graph_new_returns_ok_and_canonicalizes() {
        let result = Graph::new(4, vec![(0, 1), (2, 0), (1, 2), (0, 3)]);

        assert!(result.is_ok());
        let graph = result.unwrap();
        assert_eq!(graph.nnodes, 4);
        assert_eq!(graph.nedges(), 4);
        assert_eq!(graph.edges, vec![(0, 1), (0, 2), (1, 2), (0, 3)]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `Graph::new` rejects an empty node set.
    //
    // Given
    // -----
    // - `nnodes = 0` and no edges.
    //
    // Expect
    // ------
    // - `Err(GraphError::EmptyGraph)`.
    fn graph_new_returns_error_for_zero_nodes() {
        let result = Graph::new(0, vec![]);

        assert_eq!(result.unwrap_err(), GraphError::EmptyGraph);
    }

    #[test]
    // Purpose
    // -------
    // Ensure `Graph::new` rejects an edge referencing a node outside the
    // index range and reports the offending edge.
    //
    // Given
    // -----
    // - 3 nodes and an edge (1, 3) where 3 == nnodes.
    //
    // Expect
    // ------
    // - `Err(GraphError::NodeOutOfRange { edge: (1, 3), nnodes: 3 })`.
    fn graph_new_returns_error_for_out_of_range_endpoint() {
        let result = Graph::new(3, vec![(0, 1), (1, 3)]);

        assert_eq!(result.unwrap_err(), GraphError::NodeOutOfRange { edge: (1, 3), nnodes: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure `Graph::new` rejects self-loops.
    //
    // Given
    // -----
    // - 3 nodes and an edge (2, 2).
    //
    // Expect
    // ------
    // - `Err(GraphError::SelfLoop { node: 2 })`.
    fn graph_new_returns_error_for_self_loop() {
        let result = Graph::new(3, vec![(0, 1), (2, 2)]);

        assert_eq!(result.unwrap_err(), GraphError::SelfLoop { node: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure `Graph::new` detects a duplicate unordered pair even when the
    // second occurrence is reversed.
    //
    // Given
    // -----
    // - 3 nodes and edges (0, 1) then (1, 0).
    //
    // Expect
    // ------
    // - `Err(GraphError::DuplicateEdge { u: 0, v: 1 })` with the canonical
    //   orientation in the payload.
    fn graph_new_returns_error_for_reversed_duplicate() {
        let result = Graph::new(3, vec![(0, 1), (1, 0)]);

        assert_eq!(result.unwrap_err(), GraphError::DuplicateEdge { u: 0, v: 1 });
    }

    #[test]
    // Purpose
    // -------
    // Verify neighbor enumeration returns the adjacent nodes regardless of
    // the stored orientation, and nothing for isolated nodes.
    //
    // Given
    // -----
    // - The triad {(0,1), (0,2), (1,2)} plus leaf edge (0,3) on 5 nodes, so
    //   node 4 is isolated.
    //
    // Expect
    // ------
    // - `neighbors(0) == [1, 2, 3]`, `neighbors(3) == [0]`,
    //   `neighbors(4)` empty.
    fn graph_neighbors_lists_adjacent_nodes() {
        let graph = Graph::new(5, vec![(0, 1), (0, 2), (1, 2), (0, 3)]).unwrap();

        assert_eq!(graph.neighbors(0), vec![1, 2, 3]);
        assert_eq!(graph.neighbors(3), vec![0]);
        assert!(graph.neighbors(4).is_empty());
    }
}
