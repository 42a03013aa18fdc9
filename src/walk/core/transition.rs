//! Transition-matrix construction for supervised random walks.
//!
//! Purpose
//! -------
//! Turn a graph plus per-edge strengths into the row-stochastic matrix a
//! walk steps by. Two variants exist:
//!
//! - [`build_transition`]: strengths come from the logistic model
//!   `σ(f·β)`, rows are normalized, and the result is blended with a
//!   teleport column at the source.
//! - [`build_plain_transition`]: every edge weighs 1 and no teleport is
//!   applied; this is the mask the gradient builder scans for edge
//!   positions.
//!
//! Key behaviors
//! -------------
//! - Rows whose strengths sum to zero are left as zero rows rather than
//!   reported as errors; after teleport blending such rows carry exactly
//!   the teleport mass on the source column.
//! - Strength matrices are symmetric before normalization because the
//!   graph is undirected; normalization then makes rows stochastic, not
//!   the full matrix.
//!
//! Conventions
//! -----------
//! - `m[[i, j]]` is the probability of stepping from node `i` to node `j`;
//!   the solvers iterate `p' = pᵀ M` accordingly.
use ndarray::{Array1, Array2};

use crate::walk::core::features::EdgeFeatures;
use crate::walk::core::graph::Graph;
use crate::walk::core::strength::edge_strength;
use crate::walk::core::validation::validate_beta;
use crate::walk::errors::{WalkError, WalkResult};

/// Build the teleport-blended transition matrix for one source node.
///
/// # Steps
/// 1. Validate `beta` against the feature dimension and the scalar inputs
///    against the graph.
/// 2. Fill a symmetric strength matrix with `σ(f·β)` per edge.
/// 3. Normalize each row by its sum, skipping rows that sum to zero.
/// 4. Scale by `1 - teleport` and add `teleport` to the source column.
///
/// # Arguments
/// - `graph`: validated graph topology.
/// - `features`: per-edge feature vectors covering the graph exactly.
/// - `beta`: parameter vector of length `features.dim`.
/// - `source`: node the walk restarts from; must be `< graph.nnodes`.
/// - `teleport`: restart probability, strictly inside (0, 1).
///
/// # Returns
/// The `nnodes x nnodes` transition matrix. Every row sums to 1; a row
/// that had no strength mass sums to `teleport`, all of it on the source
/// column.
///
/// # Errors
/// - `WalkError::DimensionMismatch` / `WalkError::NonFiniteBeta` from
///   parameter validation.
/// - `WalkError::SourceOutOfRange` when `source >= graph.nnodes`.
/// - `WalkError::InvalidTeleport` when teleport is NaN or outside (0, 1).
/// - `WalkError::Structure` if a feature lookup fails, which indicates the
///   feature table and graph fell out of sync.
pub fn build_transition(
    graph: &Graph,
    features: &EdgeFeatures,
    beta: &Array1<f64>,
    source: usize,
    teleport: f64,
) -> WalkResult<Array2<f64>> {
    validate_beta(beta, features.dim)?;
    if source >= graph.nnodes {
        return Err(WalkError::SourceOutOfRange { source, nnodes: graph.nnodes });
    }
    if !teleport.is_finite() || teleport <= 0.0 || teleport >= 1.0 {
        return Err(WalkError::InvalidTeleport { value: teleport });
    }

    let n = graph.nnodes;
    let mut trans = Array2::zeros((n, n));
    for &(u, v) in &graph.edges {
        let strength = edge_strength(features.get(u, v)?, beta);
        trans[[u, v]] = strength;
        trans[[v, u]] = strength;
    }
    normalize_rows(&mut trans);

    trans *= 1.0 - teleport;
    let mut source_column = trans.column_mut(source);
    source_column += teleport;
    Ok(trans)
}

/// Build the unweighted, un-teleported transition matrix of a graph.
///
/// Every edge weighs 1 in both directions and rows are normalized by their
/// degree; isolated nodes keep zero rows. The gradient builder uses this
/// matrix as an adjacency mask, scanning its positive entries to find edge
/// positions.
pub fn build_plain_transition(graph: &Graph) -> Array2<f64> {
    let n = graph.nnodes;
    let mut trans = Array2::zeros((n, n));
    for &(u, v) in &graph.edges {
        trans[[u, v]] = 1.0;
        trans[[v, u]] = 1.0;
    }
    normalize_rows(&mut trans);
    trans
}

// ---- Helper Methods ----

/// Divide each row by its sum, leaving zero-sum rows untouched.
fn normalize_rows(trans: &mut Array2<f64>) -> () {
    for mut row in trans.rows_mut() {
        let sum = row.sum();
        if sum > 0.0 {
            row /= sum;
        }
    }
}
