//! Edge-feature container for supervised random walk models.
//!
//! Purpose
//! -------
//! Store one fixed-length feature vector per undirected edge and validate
//! that the feature table covers the graph's edge set exactly. Strength
//! evaluation and gradient code index into this container on every sweep,
//! so all per-entry checks happen once, at construction.
//!
//! Key behaviors
//! -------------
//! - [`EdgeFeatures`] keys vectors by canonicalized `(min, max)` pairs, so
//!   lookups succeed in either orientation.
//! - Construction rejects features for unknown edges, duplicate keys,
//!   length mismatches, non-finite entries, and uncovered edges.
//!
//! Invariants & assumptions
//! ------------------------
//! - `dim > 0`; every stored vector has exactly `dim` finite entries.
//! - The key set equals the graph's canonical edge set (exact cover).
//!
//! Downstream usage
//! ----------------
//! - `walk::core::transition` and `walk::core::gradient` call
//!   [`EdgeFeatures::get`] for every edge when filling strength and
//!   strength-gradient matrices.
use std::collections::HashMap;

use ndarray::{Array1, ArrayView1};

use crate::walk::core::graph::Graph;
use crate::walk::errors::{GraphError, GraphResult};

/// `EdgeFeatures` — per-edge feature vectors keyed by canonical node pairs.
///
/// Purpose
/// -------
/// Hold the feature vector attached to each undirected edge of a [`Graph`],
/// validated once so that per-sweep evaluation code can index without
/// re-checking lengths or finiteness.
///
/// Key behaviors
/// -------------
/// - Keys are canonicalized to `(min(u, v), max(u, v))`; [`EdgeFeatures::get`]
///   accepts either orientation.
/// - Construction enforces an exact cover: every graph edge has exactly one
///   vector, and no vector refers to a non-edge.
///
/// Fields
/// ------
/// - `dim`: `usize`
///   Shared length of every feature vector.
///
/// Invariants
/// ----------
/// - `dim > 0`.
/// - Every stored vector has length `dim` and only finite entries.
/// - The key set equals the graph's canonical edge set.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeFeatures {
    /// Shared length of every per-edge feature vector.
    pub dim: usize,
    map: HashMap<(usize, usize), Array1<f64>>,
}

impl EdgeFeatures {
    /// Construct a validated [`EdgeFeatures`] table for `graph`.
    ///
    /// Parameters
    /// ----------
    /// - `dim`: `usize`
    ///   Expected length of every feature vector. Must be at least 1.
    /// - `table`: `Vec<((usize, usize), Array1<f64>)>`
    ///   One `(edge, vector)` entry per edge, in either orientation.
    /// - `graph`: `&Graph`
    ///   The graph whose edge set the table must cover exactly.
    ///
    /// Returns
    /// -------
    /// `GraphResult<EdgeFeatures>`
    ///   - `Ok(EdgeFeatures)` if the table is an exact, well-formed cover.
    ///   - `Err(GraphError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `GraphError::ZeroFeatureDim` when `dim == 0`.
    /// - `GraphError::UnknownEdge { u, v }` when an entry names a pair that
    ///   is not a graph edge.
    /// - `GraphError::DuplicateFeatureKey { u, v }` when two entries name
    ///   the same unordered pair.
    /// - `GraphError::FeatureDimMismatch { u, v, expected, found }` when a
    ///   vector's length differs from `dim`.
    /// - `GraphError::NonFiniteFeature { u, v, index, value }` when a vector
    ///   contains NaN or an infinity.
    /// - `GraphError::MissingEdgeFeature { u, v }` when a graph edge has no
    ///   entry; reports the first uncovered edge in edge-list order.
    ///
    /// Panics
    /// ------
    /// - Never panics. All invalid inputs are reported via `GraphError`.
    pub fn new(
        dim: usize,
        table: Vec<((usize, usize), Array1<f64>)>,
        graph: &Graph,
    ) -> GraphResult<EdgeFeatures> {
        if dim == 0 {
            return Err(GraphError::ZeroFeatureDim);
        }

        let edge_set: std::collections::HashSet<(usize, usize)> =
            graph.edges.iter().copied().collect();

        let mut map = HashMap::with_capacity(table.len());
        for ((u, v), vec) in table {
            let key = (u.min(v), u.max(v));
            if !edge_set.contains(&key) {
                return Err(GraphError::UnknownEdge { u: key.0, v: key.1 });
            }
            if vec.len() != dim {
                return Err(GraphError::FeatureDimMismatch {
                    u: key.0,
                    v: key.1,
                    expected: dim,
                    found: vec.len(),
                });
            }
            for (index, &value) in vec.iter().enumerate() {
                if !value.is_finite() {
                    return Err(GraphError::NonFiniteFeature { u: key.0, v: key.1, index, value });
                }
            }
            if map.insert(key, vec).is_some() {
                return Err(GraphError::DuplicateFeatureKey { u: key.0, v: key.1 });
            }
        }

        for &(u, v) in &graph.edges {
            if !map.contains_key(&(u, v)) {
                return Err(GraphError::MissingEdgeFeature { u, v });
            }
        }

        Ok(EdgeFeatures { dim, map })
    }

    /// Look up the feature vector for the edge `{u, v}`.
    ///
    /// Accepts either orientation; the lookup key is canonicalized. Returns
    /// `GraphError::UnknownEdge` for pairs outside the table.
    pub fn get(&self, u: usize, v: usize) -> GraphResult<ArrayView1<'_, f64>> {
        let key = (u.min(v), u.max(v));
        match self.map.get(&key) {
            Some(vec) => Ok(vec.view()),
            None => Err(GraphError::UnknownEdge { u: key.0, v: key.1 }),
        }
    }
}
