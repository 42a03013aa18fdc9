//! Fixed-point solvers for the walk distribution and its gradient.
//!
//! Purpose
//! -------
//! House the two power iterations at the heart of the model: the stationary
//! distribution of a transition matrix, and the derivative of that
//! distribution with respect to one parameter component. Both iterate a
//! row-vector update to a fixed point under the same elementwise closeness
//! rule.
//!
//! Key behaviors
//! -------------
//! - [`stationary_distribution`] repeats `p_next = p_curr · T` from a caller
//!   supplied start vector until `p_curr` and `p_next` agree elementwise.
//! - [`distribution_gradient`] solves `d = d · T + p · dT` for the
//!   derivative row vector `d`, starting from zero so the first iterate is
//!   the forcing term `p · dT`.
//! - Both fail with [`WalkError::NonConvergence`] when the sweep cap of the
//!   supplied [`Convergence`] is exhausted.
//!
//! Conventions
//! -----------
//! - Distributions are row vectors; the update is computed as
//!   `T^t · p` through [`general_mat_vec_mul`] into a reusable buffer.
//! - Closeness compares each old entry against the NEW iterate:
//!   `|old_i - new_i| <= atol + rtol * |new_i|`.
//!
//! Testing notes
//! -------------
//! Unit tests pin the stationary vector of a hand-solved two-node chain,
//! exercise the non-convergence path with a permutation matrix, and check
//! the gradient solver against finite differences of the stationary map.
use ndarray::linalg::general_mat_vec_mul;
use ndarray::{Array1, Array2, ArrayView1, Zip};

use crate::walk::core::options::Convergence;
use crate::walk::errors::{WalkError, WalkResult};

/// Build the uniform start vector over `nnodes` nodes.
///
/// # Arguments
/// - `nnodes`: number of nodes; callers guarantee it is positive.
///
/// # Returns
/// A vector of length `nnodes` with every entry `1 / nnodes`.
pub fn uniform_start(nnodes: usize) -> Array1<f64> {
    Array1::from_elem(nnodes, 1.0 / nnodes as f64)
}

/// Iterate `p_next = p_curr · trans` to the stationary distribution.
///
/// # Steps
/// 1. Validate the transition shape, the start length, and start
///    finiteness.
/// 2. Repeat the row-vector update into a second buffer, returning as soon
///    as consecutive iterates agree elementwise, swapping buffers
///    otherwise.
///
/// # Arguments
/// - `start`: initial distribution, length matching the transition order.
/// - `trans`: square row-stochastic transition matrix.
/// - `conv`: tolerances and sweep cap for the fixed-point loop.
///
/// # Returns
/// The converged distribution.
///
/// # Errors
/// - `WalkError::NonSquareTransition` when `trans` is not square.
/// - `WalkError::DimensionMismatch` when `start` has the wrong length.
/// - `WalkError::NonFiniteDistribution` when `start` carries a NaN or
///   infinity.
/// - `WalkError::NonConvergence` when the sweep cap runs out first.
pub fn stationary_distribution(
    start: ArrayView1<f64>,
    trans: &Array2<f64>,
    conv: &Convergence,
) -> WalkResult<Array1<f64>> {
    let (rows, cols) = trans.dim();
    if rows != cols {
        return Err(WalkError::NonSquareTransition { rows, cols });
    }
    if start.len() != rows {
        return Err(WalkError::DimensionMismatch {
            expected: rows,
            found: start.len(),
        });
    }
    if let Some((index, &value)) = start.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(WalkError::NonFiniteDistribution { index, value });
    }

    let mut curr = start.to_owned();
    let mut next: Array1<f64> = Array1::zeros(rows);
    for _ in 1..=conv.max_sweeps {
        general_mat_vec_mul(1.0, &trans.t(), &curr, 0.0, &mut next);
        if all_close(&curr, &next, conv) {
            return Ok(next);
        }
        std::mem::swap(&mut curr, &mut next);
    }
    Err(WalkError::NonConvergence {
        sweeps: conv.max_sweeps,
        atol: conv.atol,
        rtol: conv.rtol,
    })
}

/// Solve `d = d · trans + stationary · trans_grad` for the derivative of
/// the stationary distribution along one parameter component.
///
/// # Steps
/// 1. Validate the shapes of the transition, its gradient, and the
///    stationary vector.
/// 2. Compute the constant forcing term `stationary · trans_grad` once.
/// 3. Iterate `d_next = d_curr · trans + forcing` from zero until
///    consecutive iterates agree elementwise.
///
/// # Arguments
/// - `stationary`: converged walk distribution for the current parameters.
/// - `trans`: the transition matrix the distribution was solved under.
/// - `trans_grad`: derivative of every transition entry along one
///   parameter component.
/// - `conv`: tolerances and sweep cap for the fixed-point loop.
///
/// # Returns
/// The derivative of each distribution entry along that component.
///
/// # Errors
/// - `WalkError::NonSquareTransition` when either matrix is not square.
/// - `WalkError::DimensionMismatch` when the shapes disagree with each
///   other or with `stationary`.
/// - `WalkError::NonFiniteDistribution` when `stationary` carries a NaN or
///   infinity.
/// - `WalkError::NonConvergence` when the sweep cap runs out first.
pub fn distribution_gradient(
    stationary: &Array1<f64>,
    trans: &Array2<f64>,
    trans_grad: &Array2<f64>,
    conv: &Convergence,
) -> WalkResult<Array1<f64>> {
    let (rows, cols) = trans.dim();
    if rows != cols {
        return Err(WalkError::NonSquareTransition { rows, cols });
    }
    let (grows, gcols) = trans_grad.dim();
    if grows != gcols {
        return Err(WalkError::NonSquareTransition {
            rows: grows,
            cols: gcols,
        });
    }
    if grows != rows {
        return Err(WalkError::DimensionMismatch {
            expected: rows,
            found: grows,
        });
    }
    if stationary.len() != rows {
        return Err(WalkError::DimensionMismatch {
            expected: rows,
            found: stationary.len(),
        });
    }
    if let Some((index, &value)) = stationary
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(WalkError::NonFiniteDistribution { index, value });
    }

    let mut forcing: Array1<f64> = Array1::zeros(rows);
    general_mat_vec_mul(1.0, &trans_grad.t(), stationary, 0.0, &mut forcing);

    let mut curr: Array1<f64> = Array1::zeros(rows);
    let mut next: Array1<f64> = Array1::zeros(rows);
    for _ in 1..=conv.max_sweeps {
        next.assign(&forcing);
        general_mat_vec_mul(1.0, &trans.t(), &curr, 1.0, &mut next);
        if all_close(&curr, &next, conv) {
            return Ok(next);
        }
        std::mem::swap(&mut curr, &mut next);
    }
    Err(WalkError::NonConvergence {
        sweeps: conv.max_sweeps,
        atol: conv.atol,
        rtol: conv.rtol,
    })
}

// ---- Helper Methods ----

/// Elementwise closeness of consecutive iterates, referenced to the new
/// one: `|old_i - new_i| <= atol + rtol * |new_i|` for every entry.
fn all_close(old: &Array1<f64>, new: &Array1<f64>, conv: &Convergence) -> bool {
    Zip::from(old)
        .and(new)
        .all(|&o, &n| (o - n).abs() <= conv.atol + conv.rtol * n.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::core::features::EdgeFeatures;
    use crate::walk::core::gradient::transition_gradients;
    use crate::walk::core::graph::Graph;
    use crate::walk::core::transition::{build_plain_transition, build_transition};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence of the stationary solver to a hand-solved fixed point.
    // - Immediate convergence when the start vector is already stationary.
    // - The non-convergence error on an oscillating iteration.
    // - Shape and finiteness validation for both solvers.
    // - Agreement of the gradient solver with finite differences of the
    //   stationary map, and the zero-forcing shortcut.
    //
    // These tests intentionally DO NOT cover:
    // - Assembly of the loss from solved distributions (see
    //   `walk::core::objective`).
    // -------------------------------------------------------------------------

    /// Transition of a two-node chain with source 0 and teleport 0.2:
    /// rows [[0.2, 0.8], [1.0, 0.0]], stationary (5/9, 4/9).
    fn two_node_transition() -> Array2<f64> {
        array![[0.2, 0.8], [1.0, 0.0]]
    }

    #[test]
    // Purpose
    // -------
    // Confirm the power iteration reaches the hand-solved stationary vector
    // of the two-node chain.
    //
    // Given
    // -----
    // - The transition [[0.2, 0.8], [1.0, 0.0]] and a uniform start under
    //   default tolerances.
    //
    // Expect
    // ------
    // - The result is within 1e-5 of (5/9, 4/9) and sums to one.
    fn stationary_distribution_solves_two_node_chain() {
        let trans = two_node_transition();
        let start = uniform_start(2);

        let dist =
            stationary_distribution(start.view(), &trans, &Convergence::default()).unwrap();

        assert!((dist[0] - 5.0 / 9.0).abs() < 1e-5);
        assert!((dist[1] - 4.0 / 9.0).abs() < 1e-5);
        assert!((dist.sum() - 1.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a start vector already at the fixed point converges on
    // the first sweep.
    //
    // Given
    // -----
    // - The doubly stochastic swap matrix [[0, 1], [1, 0]] with the uniform
    //   start, which it maps to itself.
    //
    // Expect
    // ------
    // - The uniform vector comes back unchanged.
    fn stationary_distribution_accepts_fixed_start() {
        let trans = array![[0.0, 1.0], [1.0, 0.0]];

        let dist = stationary_distribution(
            uniform_start(2).view(),
            &trans,
            &Convergence::default(),
        )
        .unwrap();

        assert_eq!(dist, array![0.5, 0.5]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure an oscillating iteration is reported instead of looping
    // forever.
    //
    // Given
    // -----
    // - The swap matrix with the start (1, 0), which alternates between
    //   (1, 0) and (0, 1), and a cap of 50 sweeps.
    //
    // Expect
    // ------
    // - `NonConvergence` carrying the cap and the tolerances in force.
    fn stationary_distribution_reports_non_convergence() {
        let trans = array![[0.0, 1.0], [1.0, 0.0]];
        let conv = Convergence::new(1e-8, 1e-5, 50).unwrap();

        let result = stationary_distribution(array![1.0, 0.0].view(), &trans, &conv);

        assert_eq!(
            result.unwrap_err(),
            WalkError::NonConvergence {
                sweeps: 50,
                atol: 1e-8,
                rtol: 1e-5
            }
        );
    }

    #[test]
    // Purpose
    // -------
    // Check shape and finiteness validation of the stationary solver.
    //
    // Given
    // -----
    // - A 2x3 transition, then a start of wrong length, then a NaN start
    //   entry.
    //
    // Expect
    // ------
    // - `NonSquareTransition`, `DimensionMismatch`, and
    //   `NonFiniteDistribution` in turn.
    fn stationary_distribution_validates_inputs() {
        let conv = Convergence::default();

        let skewed: Array2<f64> = Array2::zeros((2, 3));
        assert_eq!(
            stationary_distribution(array![0.5, 0.5].view(), &skewed, &conv).unwrap_err(),
            WalkError::NonSquareTransition { rows: 2, cols: 3 }
        );

        let trans = two_node_transition();
        assert_eq!(
            stationary_distribution(array![1.0].view(), &trans, &conv).unwrap_err(),
            WalkError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );

        let result = stationary_distribution(array![f64::NAN, 1.0].view(), &trans, &conv);
        assert!(matches!(
            result.unwrap_err(),
            WalkError::NonFiniteDistribution { index: 0, .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check the gradient solver against central finite differences of the
    // full pipeline: transition build followed by stationary solve.
    //
    // Given
    // -----
    // - The triad-with-leaf graph with one feature component, beta (0.4,),
    //   source 0, teleport 0.2, tight tolerances, step h = 1e-5.
    //
    // Expect
    // ------
    // - Every entry of the solved derivative is within 1e-6 of the finite
    //   difference.
    fn distribution_gradient_matches_finite_differences() {
        let graph = Graph::new(4, vec![(0, 1), (0, 2), (1, 2), (0, 3)]).unwrap();
        let table = vec![
            ((0, 1), array![1.0]),
            ((0, 2), array![-0.5]),
            ((1, 2), array![0.3]),
            ((0, 3), array![0.8]),
        ];
        let features = EdgeFeatures::new(1, table, &graph).unwrap();
        let beta = array![0.4];
        let conv = Convergence::new(1e-12, 0.0, 100_000).unwrap();

        let trans = build_transition(&graph, &features, &beta, 0, 0.2).unwrap();
        let dist = stationary_distribution(uniform_start(4).view(), &trans, &conv).unwrap();
        let mask = build_plain_transition(&graph);
        let trans_grads = transition_gradients(&features, &beta, &mask, 0.2).unwrap();

        let deriv = distribution_gradient(&dist, &trans, &trans_grads[0], &conv).unwrap();

        let h = 1e-5;
        let solve = |b: &Array1<f64>| -> Array1<f64> {
            let t = build_transition(&graph, &features, b, 0, 0.2).unwrap();
            stationary_distribution(uniform_start(4).view(), &t, &conv).unwrap()
        };
        let plus = solve(&array![0.4 + h]);
        let minus = solve(&array![0.4 - h]);
        for i in 0..4 {
            let fd = (plus[i] - minus[i]) / (2.0 * h);
            assert!(
                (deriv[i] - fd).abs() < 1e-6,
                "entry {i}: analytic {} vs fd {fd}",
                deriv[i]
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that a zero transition gradient yields a zero distribution
    // gradient immediately.
    //
    // Given
    // -----
    // - The two-node chain with an all-zero gradient matrix.
    //
    // Expect
    // ------
    // - The solved derivative is identically zero.
    fn distribution_gradient_zero_forcing_is_zero() {
        let trans = two_node_transition();
        let dist = array![5.0 / 9.0, 4.0 / 9.0];
        let zeros: Array2<f64> = Array2::zeros((2, 2));

        let deriv =
            distribution_gradient(&dist, &trans, &zeros, &Convergence::default()).unwrap();

        assert_eq!(deriv, array![0.0, 0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Check shape validation of the gradient solver.
    //
    // Given
    // -----
    // - A 3x3 gradient against the 2x2 transition, then a stationary vector
    //   of wrong length.
    //
    // Expect
    // ------
    // - `DimensionMismatch` for both.
    fn distribution_gradient_validates_shapes() {
        let trans = two_node_transition();
        let conv = Convergence::default();

        let wide: Array2<f64> = Array2::zeros((3, 3));
        assert_eq!(
            distribution_gradient(&array![0.5, 0.5], &trans, &wide, &conv).unwrap_err(),
            WalkError::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );

        let zeros: Array2<f64> = Array2::zeros((2, 2));
        assert_eq!(
            distribution_gradient(&array![1.0], &trans, &zeros, &conv).unwrap_err(),
            WalkError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }
}
