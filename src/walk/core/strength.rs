//! Logistic edge-strength evaluation and its parameter gradient.
//!
//! An edge with feature vector `f` and parameter vector `β` gets strength
//! `s = σ(f·β)` where `σ` is the overflow-safe logistic from
//! `optimization::numerical_stability`. The gradient with respect to each
//! parameter is `∂s/∂β_k = f_k · s · (1 - s)`, reusing the strength value
//! so no exponential is evaluated twice.
//!
//! Strengths are always in (0, 1) for finite inputs, which keeps the
//! un-normalized transition rows non-negative by construction.
use ndarray::{Array1, ArrayView1, Zip};

use crate::optimization::numerical_stability::safe_logistic;

/// Evaluate the logistic strength `σ(f·β)` of one edge.
///
/// # Arguments
/// - `features`: feature vector of the edge.
/// - `beta`: parameter vector; must have the same length as `features`
///   (enforced upstream by the feature and parameter validators).
///
/// # Returns
/// The strength in (0, 1); exactly 0.5 when the dot product is zero.
pub fn edge_strength(features: ArrayView1<'_, f64>, beta: &Array1<f64>) -> f64 {
    safe_logistic(features.dot(beta))
}

/// Fill `out` with the strength gradient `∂s/∂β_k = f_k · s · (1 - s)`.
///
/// The slope factor `s · (1 - s)` is computed once from the logistic value
/// itself, so the gradient inherits the overflow-safe tails: deep in either
/// saturation regime every component underflows cleanly to zero.
///
/// # Arguments
/// - `features`: feature vector of the edge.
/// - `beta`: parameter vector, same length as `features`.
/// - `out`: preallocated buffer of that same length, overwritten in full.
pub fn edge_strength_grad(
    features: ArrayView1<'_, f64>,
    beta: &Array1<f64>,
    out: &mut Array1<f64>,
) -> () {
    let s = edge_strength(features, beta);
    let slope = s * (1.0 - s);
    Zip::from(out).and(&features).for_each(|o, &f| *o = f * slope);
}
