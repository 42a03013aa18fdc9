//! Parameter gradients of the teleport-blended transition matrix.
//!
//! Purpose
//! -------
//! Differentiate every entry of the transition matrix with respect to every
//! parameter component in one pass. For an edge entry the normalized value
//! is a quotient `s_ij / Σ_j s_ij`, so each derivative follows the quotient
//! rule; the teleport blend contributes only the constant factor
//! `1 - teleport` because the teleport column itself does not depend on the
//! parameters.
//!
//! Key behaviors
//! -------------
//! - [`transition_gradients`] scans the positive entries of an adjacency
//!   mask (the unweighted transition from
//!   [`build_plain_transition`](super::transition::build_plain_transition))
//!   to locate edges, evaluates strength and strength-gradient once per
//!   undirected edge, and mirrors both.
//! - Rows without strength mass are skipped: a degenerate row is constant
//!   in the parameters, so its gradient rows stay zero.
//!
//! Conventions
//! -----------
//! - The result is one dense matrix per parameter component, indexed like
//!   the transition itself: `out[k][[i, j]]` is `∂T_ij / ∂β_k`.
use ndarray::{Array1, Array2, Axis};

use crate::walk::core::features::EdgeFeatures;
use crate::walk::core::strength::{edge_strength, edge_strength_grad};
use crate::walk::core::validation::validate_beta;
use crate::walk::errors::{WalkError, WalkResult};

/// Differentiate the blended transition matrix with respect to every
/// parameter component.
///
/// # Steps
/// 1. Validate `beta` against the feature dimension, `teleport` against
///    (0, 1), and the mask for squareness.
/// 2. Scan the upper triangle of `mask` for positive entries; for each
///    edge evaluate the strength and its parameter gradient once and
///    mirror both into symmetric matrices.
/// 3. Apply the quotient rule per row and component:
///    `∂T_ij/∂β_k = (1 - teleport) · (g_ijk · Σ_j s_ij - s_ij · Σ_j g_ijk) / (Σ_j s_ij)²`,
///    skipping rows whose strength sum is zero.
///
/// # Arguments
/// - `features`: per-edge feature vectors.
/// - `beta`: parameter vector of length `features.dim`.
/// - `mask`: square adjacency mask whose positive entries mark edges;
///   normally the unweighted transition of the same graph.
/// - `teleport`: restart probability, strictly inside (0, 1).
///
/// # Returns
/// One `n x n` matrix per parameter component, in component order.
///
/// # Errors
/// - `WalkError::DimensionMismatch` / `WalkError::NonFiniteBeta` from
///   parameter validation.
/// - `WalkError::InvalidTeleport` when teleport is NaN or outside (0, 1).
/// - `WalkError::NonSquareTransition` when the mask is not square.
/// - `WalkError::Structure` if a positive mask entry names a pair the
///   feature table does not cover.
pub fn transition_gradients(
    features: &EdgeFeatures,
    beta: &Array1<f64>,
    mask: &Array2<f64>,
    teleport: f64,
) -> WalkResult<Vec<Array2<f64>>> {
    validate_beta(beta, features.dim)?;
    if !teleport.is_finite() || teleport <= 0.0 || teleport >= 1.0 {
        return Err(WalkError::InvalidTeleport { value: teleport });
    }
    let (rows, cols) = mask.dim();
    if rows != cols {
        return Err(WalkError::NonSquareTransition { rows, cols });
    }

    let n = rows;
    let dim = features.dim;
    let mut smat: Array2<f64> = Array2::zeros((n, n));
    let mut grads: Vec<Array2<f64>> = vec![Array2::zeros((n, n)); dim];
    let mut gbuf: Array1<f64> = Array1::zeros(dim);
    for i in 0..n {
        for j in (i + 1)..n {
            if mask[[i, j]] <= 0.0 {
                continue;
            }
            let fvec = features.get(i, j)?;
            let strength = edge_strength(fvec, beta);
            smat[[i, j]] = strength;
            smat[[j, i]] = strength;
            edge_strength_grad(fvec, beta, &mut gbuf);
            for (k, gmat) in grads.iter_mut().enumerate() {
                gmat[[i, j]] = gbuf[k];
                gmat[[j, i]] = gbuf[k];
            }
        }
    }

    let strength_sums = smat.sum_axis(Axis(1));
    let scale = 1.0 - teleport;
    for gmat in grads.iter_mut() {
        let grad_sums = gmat.sum_axis(Axis(1));
        for i in 0..n {
            let sum = strength_sums[i];
            if sum <= 0.0 {
                continue;
            }
            let denom = sum * sum;
            let gsum = grad_sums[i];
            for j in 0..n {
                let raw = gmat[[i, j]];
                gmat[[i, j]] = scale * (raw * sum - smat[[i, j]] * gsum) / denom;
            }
        }
    }
    Ok(grads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::core::graph::Graph;
    use crate::walk::core::transition::{build_plain_transition, build_transition};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the analytic transition gradient with central finite
    //   differences of the full transition builder.
    // - The zero-gradient policy for rows without strength mass.
    // - Input validation (beta length, mask shape).
    //
    // These tests intentionally DO NOT cover:
    // - Propagation of these gradients through the stationary solver (see
    //   `walk::core::solver`).
    // -------------------------------------------------------------------------

    fn triad_with_leaf_2d() -> (Graph, EdgeFeatures) {
        let graph = Graph::new(4, vec![(0, 1), (0, 2), (1, 2), (0, 3)]).unwrap();
        let table = vec![
            ((0, 1), array![1.0, 0.0]),
            ((0, 2), array![0.0, 1.0]),
            ((1, 2), array![0.5, 0.5]),
            ((0, 3), array![-0.4, 0.3]),
        ];
        let features = EdgeFeatures::new(2, table, &graph).unwrap();
        (graph, features)
    }

    #[test]
    // Purpose
    // -------
    // Check every entry of every component matrix against a central finite
    // difference of `build_transition`.
    //
    // Given
    // -----
    // - The triad-with-leaf graph with 2-dimensional features,
    //   beta (0.5, -0.3), source 0, teleport 0.2, step h = 1e-6.
    //
    // Expect
    // ------
    // - Entrywise agreement within 1e-7 for both components.
    fn transition_gradients_match_finite_differences() {
        let (graph, features) = triad_with_leaf_2d();
        let beta = array![0.5, -0.3];
        let mask = build_plain_transition(&graph);

        let grads = transition_gradients(&features, &beta, &mask, 0.2).unwrap();

        let h = 1e-6;
        for k in 0..2 {
            let mut plus = beta.clone();
            plus[k] += h;
            let mut minus = beta.clone();
            minus[k] -= h;
            let t_plus = build_transition(&graph, &features, &plus, 0, 0.2).unwrap();
            let t_minus = build_transition(&graph, &features, &minus, 0, 0.2).unwrap();

            for i in 0..4 {
                for j in 0..4 {
                    let fd = (t_plus[[i, j]] - t_minus[[i, j]]) / (2.0 * h);
                    assert!(
                        (grads[k][[i, j]] - fd).abs() < 1e-7,
                        "component {k} entry ({i}, {j}): analytic {} vs fd {fd}",
                        grads[k][[i, j]]
                    );
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that rows without strength mass produce zero gradient rows.
    //
    // Given
    // -----
    // - 3 nodes with the single edge (0, 1); node 2 is isolated.
    //
    // Expect
    // ------
    // - Row 2 of the single component matrix is identically zero.
    fn transition_gradients_skip_rows_without_mass() {
        let graph = Graph::new(3, vec![(0, 1)]).unwrap();
        let features =
            EdgeFeatures::new(1, vec![((0, 1), array![0.7])], &graph).unwrap();
        let mask = build_plain_transition(&graph);

        let grads = transition_gradients(&features, &array![0.4], &mask, 0.2).unwrap();

        assert!(grads[0].row(2).iter().all(|&g| g == 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure validation fires for a mismatched parameter vector and a
    // non-square mask.
    //
    // Given
    // -----
    // - A beta of length 3 against dim 2, then a 2x3 mask.
    //
    // Expect
    // ------
    // - `DimensionMismatch` and `NonSquareTransition` respectively.
    fn transition_gradients_validate_inputs() {
        let (graph, features) = triad_with_leaf_2d();
        let mask = build_plain_transition(&graph);

        assert_eq!(
            transition_gradients(&features, &array![0.0, 0.0, 0.0], &mask, 0.2).unwrap_err(),
            WalkError::DimensionMismatch { expected: 2, found: 3 }
        );

        let skewed = Array2::zeros((2, 3));
        assert_eq!(
            transition_gradients(&features, &array![0.0, 0.0], &skewed, 0.2).unwrap_err(),
            WalkError::NonSquareTransition { rows: 2, cols: 3 }
        );
    }
}
