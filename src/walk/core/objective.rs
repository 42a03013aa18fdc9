//! Hinge-loss objective over walk scores, with its analytic gradient.
//!
//! Purpose
//! -------
//! Turn a parameter vector into the number the optimizer minimizes: a
//! squared-hinge penalty over every (negative, positive) node pair plus an
//! L2 term, evaluated at the stationary distribution of the parameterized
//! walk. The gradient assembles the same quantity's derivative from the
//! transition gradients and the distribution-gradient solver.
//!
//! Key behaviors
//! -------------
//! - [`pair_cost`] penalizes one pair: `max(0, neg - pos + offset)^2`, so a
//!   negative node outscoring a positive one (within the offset) is charged
//!   quadratically and a well-ordered pair costs nothing.
//! - [`objective_value`] runs transition build and stationary solve, then
//!   sums pair costs over the cross product of the training sets and adds
//!   `lambda * beta . beta`.
//! - [`objective_gradient`] collects the hinge slope of every active pair
//!   once, then accumulates `slope * (d_neg - d_pos)` per parameter
//!   component from the solved distribution derivatives, plus
//!   `2 * lambda * beta_k`.
//!
//! Conventions
//! -----------
//! - Pair functions take the negative score first, mirroring the margin
//!   `neg - pos + offset`.
//! - Inactive pairs (margin at or below zero) contribute zero to both value
//!   and gradient; the kink itself counts as inactive.
use ndarray::Array1;

use crate::walk::core::features::EdgeFeatures;
use crate::walk::core::gradient::transition_gradients;
use crate::walk::core::graph::Graph;
use crate::walk::core::options::{Convergence, WalkConfig};
use crate::walk::core::sets::TrainingSets;
use crate::walk::core::solver::{distribution_gradient, stationary_distribution, uniform_start};
use crate::walk::core::transition::{build_plain_transition, build_transition};
use crate::walk::errors::WalkResult;

/// Squared-hinge penalty for one (negative, positive) score pair:
/// `max(0, negative_score - positive_score + offset)^2`.
pub fn pair_cost(negative_score: f64, positive_score: f64, offset: f64) -> f64 {
    let margin = negative_score - positive_score + offset;
    if margin > 0.0 {
        margin * margin
    } else {
        0.0
    }
}

/// Derivative of [`pair_cost`] with respect to its margin:
/// `2 * max(0, negative_score - positive_score + offset)`.
pub fn pair_cost_grad(negative_score: f64, positive_score: f64, offset: f64) -> f64 {
    let margin = negative_score - positive_score + offset;
    if margin > 0.0 {
        2.0 * margin
    } else {
        0.0
    }
}

/// Evaluate the full training objective at one parameter vector.
///
/// # Steps
/// 1. Build the teleport-blended transition for `beta` and solve its
///    stationary distribution from the uniform start.
/// 2. Sum [`pair_cost`] over every (negative, positive) pair of the
///    training sets.
/// 3. Add the L2 term `lambda * beta . beta`.
///
/// # Arguments
/// - `graph`: undirected graph the walk runs on.
/// - `features`: per-edge feature vectors.
/// - `config`: source node, teleport probability, hinge offset, and L2
///   weight.
/// - `conv`: tolerances and sweep cap for the stationary solve.
/// - `sets`: positive and negative node sets.
/// - `beta`: parameter vector of length `features.dim`.
///
/// # Returns
/// The objective value; non-negative whenever `lambda >= 0`.
///
/// # Errors
/// Any [`WalkError`](crate::walk::errors::WalkError) from parameter
/// validation, transition building, or the stationary solve.
pub fn objective_value(
    graph: &Graph,
    features: &EdgeFeatures,
    config: &WalkConfig,
    conv: &Convergence,
    sets: &TrainingSets,
    beta: &Array1<f64>,
) -> WalkResult<f64> {
    let trans = build_transition(graph, features, beta, config.source, config.teleport)?;
    let dist = stationary_distribution(uniform_start(graph.nnodes).view(), &trans, conv)?;

    let mut value = config.lambda * beta.dot(beta);
    for &negative in &sets.negatives {
        for &positive in &sets.positives {
            value += pair_cost(dist[negative], dist[positive], config.offset);
        }
    }
    Ok(value)
}

/// Evaluate the analytic gradient of [`objective_value`].
///
/// # Steps
/// 1. Build the transition and solve the stationary distribution, as in
///    the value evaluation.
/// 2. Record the hinge slope of every active (negative, positive) pair;
///    inactive pairs drop out here.
/// 3. Differentiate the transition along every parameter component, and
///    for each component solve the distribution derivative and accumulate
///    `slope * (d_negative - d_positive)` over the active pairs plus the
///    L2 term `2 * lambda * beta_k`.
///
/// # Arguments
/// Identical to [`objective_value`].
///
/// # Returns
/// The gradient vector, one entry per parameter component.
///
/// # Errors
/// Any [`WalkError`](crate::walk::errors::WalkError) from validation, the
/// transition builders, or either fixed-point solve.
pub fn objective_gradient(
    graph: &Graph,
    features: &EdgeFeatures,
    config: &WalkConfig,
    conv: &Convergence,
    sets: &TrainingSets,
    beta: &Array1<f64>,
) -> WalkResult<Array1<f64>> {
    let trans = build_transition(graph, features, beta, config.source, config.teleport)?;
    let dist = stationary_distribution(uniform_start(graph.nnodes).view(), &trans, conv)?;

    let mut active: Vec<(usize, usize, f64)> = Vec::new();
    for &negative in &sets.negatives {
        for &positive in &sets.positives {
            let slope = pair_cost_grad(dist[negative], dist[positive], config.offset);
            if slope > 0.0 {
                active.push((negative, positive, slope));
            }
        }
    }

    let mask = build_plain_transition(graph);
    let trans_grads = transition_gradients(features, beta, &mask, config.teleport)?;

    let mut grad: Array1<f64> = Array1::zeros(beta.len());
    for (k, trans_grad) in trans_grads.iter().enumerate() {
        let deriv = distribution_gradient(&dist, &trans, trans_grad, conv)?;
        let mut acc = 2.0 * config.lambda * beta[k];
        for &(negative, positive, slope) in &active {
            acc += slope * (deriv[negative] - deriv[positive]);
        }
        grad[k] = acc;
    }
    Ok(grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk::errors::WalkError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Pair-cost values and slopes on, above, and below the hinge kink.
    // - The objective value on a hand-solved two-node chain, with and
    //   without the L2 term.
    // - Bitwise determinism of repeated value evaluations.
    // - Agreement of the analytic gradient with central finite differences
    //   of the value.
    // - The pure-L2 gradient when every pair is inactive.
    // - Error propagation from the underlying builders.
    //
    // These tests intentionally DO NOT cover:
    // - Optimizer integration (see `walk::models::srw` and the pipeline
    //   integration test).
    // -------------------------------------------------------------------------

    fn triad_with_leaf() -> (Graph, EdgeFeatures) {
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
    // Pin the pair cost and its slope for a violated pair.
    //
    // Given
    // -----
    // - negative 0.5, positive 0.2, offset 0.1, so the margin is 0.4.
    //
    // Expect
    // ------
    // - Cost 0.16 and slope 0.8.
    fn pair_cost_charges_violated_pair() {
        assert!((pair_cost(0.5, 0.2, 0.1) - 0.16).abs() < 1e-12);
        assert!((pair_cost_grad(0.5, 0.2, 0.1) - 0.8).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify that pairs at or below the kink cost nothing and have zero
    // slope.
    //
    // Given
    // -----
    // - Equal scores with zero offset (0.3, 0.3, 0.0), a margin of exactly
    //   zero (0.25 - 0.5 + 0.25), and a strictly negative one
    //   (0.125 - 0.5 + 0.25).
    //
    // Expect
    // ------
    // - Cost and slope both exactly zero in every case.
    fn pair_cost_is_zero_at_and_below_kink() {
        assert_eq!(pair_cost(0.3, 0.3, 0.0), 0.0);
        assert_eq!(pair_cost_grad(0.3, 0.3, 0.0), 0.0);
        assert_eq!(pair_cost(0.25, 0.5, 0.25), 0.0);
        assert_eq!(pair_cost_grad(0.25, 0.5, 0.25), 0.0);
        assert_eq!(pair_cost(0.125, 0.5, 0.25), 0.0);
        assert_eq!(pair_cost_grad(0.125, 0.5, 0.25), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Check the objective value against a hand-solved stationary
    // distribution.
    //
    // Given
    // -----
    // - A two-node graph with one zero feature, source 0, teleport 0.2,
    //   offset 0, lambda 0; the stationary distribution is (5/9, 4/9).
    // - positives {1}, negatives {0}, so the single margin is 1/9.
    //
    // Expect
    // ------
    // - Value within 1e-5 of (1/9)^2 = 1/81.
    // - Raising lambda to 0.5 with beta (2,) adds exactly 2 to the value.
    fn objective_value_matches_hand_solved_chain() {
        let graph = Graph::new(2, vec![(0, 1)]).unwrap();
        let features = EdgeFeatures::new(1, vec![((0, 1), array![0.0])], &graph).unwrap();
        let sets = TrainingSets::new(vec![1], vec![0], 2).unwrap();
        let conv = Convergence::default();
        let config = WalkConfig::new(0, 0.2, 0.0, 0.0, 2).unwrap();

        let value =
            objective_value(&graph, &features, &config, &conv, &sets, &array![2.0]).unwrap();

        assert!((value - 1.0 / 81.0).abs() < 1e-5);

        // The zero feature makes the transition independent of beta, so the
        // regularized run differs by the L2 term alone.
        let reg_config = WalkConfig::new(0, 0.2, 0.0, 0.5, 2).unwrap();
        let reg_value =
            objective_value(&graph, &features, &reg_config, &conv, &sets, &array![2.0]).unwrap();
        assert!((reg_value - value - 2.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Pin down evaluation determinism: the objective is a pure function of
    // its inputs, so repeated calls must agree bit for bit.
    //
    // Given
    // -----
    // - The triad-with-leaf fixture evaluated twice at the same beta.
    //
    // Expect
    // ------
    // - Exactly equal results, no tolerance.
    fn objective_value_is_deterministic_across_calls() {
        let (graph, features) = triad_with_leaf();
        let sets = TrainingSets::new(vec![3], vec![2], 4).unwrap();
        let conv = Convergence::default();
        let config = WalkConfig::new(0, 0.2, 0.05, 0.1, 4).unwrap();
        let beta = array![0.3, -0.2];

        let first = objective_value(&graph, &features, &config, &conv, &sets, &beta).unwrap();
        let second = objective_value(&graph, &features, &config, &conv, &sets, &beta).unwrap();

        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    // Purpose
    // -------
    // Check the analytic gradient against central finite differences of
    // the objective value.
    //
    // Given
    // -----
    // - The triad-with-leaf graph, beta (0.3, -0.2), source 0, teleport
    //   0.2, offset 0.05, lambda 0.1, positives {3}, negatives {2}; the
    //   triad node outscores the leaf, so the hinge is active.
    // - Tight tolerances and step h = 1e-5.
    //
    // Expect
    // ------
    // - Both gradient entries within 1e-5 of the finite differences.
    fn objective_gradient_matches_finite_differences() {
        let (graph, features) = triad_with_leaf();
        let sets = TrainingSets::new(vec![3], vec![2], 4).unwrap();
        let conv = Convergence::new(1e-12, 0.0, 100_000).unwrap();
        let config = WalkConfig::new(0, 0.2, 0.05, 0.1, 4).unwrap();
        let beta = array![0.3, -0.2];

        let grad =
            objective_gradient(&graph, &features, &config, &conv, &sets, &beta).unwrap();

        let h = 1e-5;
        for k in 0..2 {
            let mut plus = beta.clone();
            plus[k] += h;
            let mut minus = beta.clone();
            minus[k] -= h;
            let v_plus =
                objective_value(&graph, &features, &config, &conv, &sets, &plus).unwrap();
            let v_minus =
                objective_value(&graph, &features, &config, &conv, &sets, &minus).unwrap();
            let fd = (v_plus - v_minus) / (2.0 * h);
            assert!(
                (grad[k] - fd).abs() < 1e-5,
                "component {k}: analytic {} vs fd {fd}",
                grad[k]
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that inactive pairs leave only the L2 term in the gradient.
    //
    // Given
    // -----
    // - The triad-with-leaf graph with positives {2} and negatives {3}:
    //   the positive node outscores the negative one and the offset is
    //   zero, so the single pair is inactive.
    //
    // Expect
    // ------
    // - The gradient equals 2 * lambda * beta within 1e-12.
    fn objective_gradient_reduces_to_l2_when_hinge_inactive() {
        let (graph, features) = triad_with_leaf();
        let sets = TrainingSets::new(vec![2], vec![3], 4).unwrap();
        let conv = Convergence::default();
        let config = WalkConfig::new(0, 0.2, 0.0, 0.1, 4).unwrap();
        let beta = array![0.3, -0.2];

        let grad =
            objective_gradient(&graph, &features, &config, &conv, &sets, &beta).unwrap();

        assert!((grad[0] - 2.0 * 0.1 * 0.3).abs() < 1e-12);
        assert!((grad[1] - 2.0 * 0.1 * (-0.2)).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure builder errors surface through both entry points.
    //
    // Given
    // -----
    // - A beta of length 1 against 2-dimensional features.
    //
    // Expect
    // ------
    // - `DimensionMismatch` from value and gradient alike.
    fn objective_propagates_validation_errors() {
        let (graph, features) = triad_with_leaf();
        let sets = TrainingSets::new(vec![3], vec![2], 4).unwrap();
        let conv = Convergence::default();
        let config = WalkConfig::new(0, 0.2, 0.0, 0.1, 4).unwrap();
        let short = array![0.5];

        assert_eq!(
            objective_value(&graph, &features, &config, &conv, &sets, &short).unwrap_err(),
            WalkError::DimensionMismatch { expected: 2, found: 1 }
        );
        assert_eq!(
            objective_gradient(&graph, &features, &config, &conv, &sets, &short).unwrap_err(),
            WalkError::DimensionMismatch { expected: 2, found: 1 }
        );
    }
}
