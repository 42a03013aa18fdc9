//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here follow guarded strategies similar to those
//! in major ML libraries (e.g. PyTorch, TensorFlow), branching on the
//! sign of the argument to keep `f64` arithmetic in a well-conditioned
//! regime.
//!
//! # Provided items
//! - [`safe_logistic(x)`]: stable version of `1 / (1 + exp(-x))`,
//!   mapping ℝ → (0, 1) without overflow at either tail.
//!
//! # Rationale
//! Edge strengths are logistic transforms of feature/parameter dot
//! products. Feature vectors are user-supplied and the optimizer is free
//! to push parameters far from the origin, so the dot product can reach
//! magnitudes where the naïve logistic overflows `exp`. The branched
//! form never evaluates `exp` on a positive argument.

/// Numerically stable logistic: `logistic(x) = 1 / (1 + exp(-x))`.
///
/// Computes the logistic without overflow for large `|x|` by choosing
/// the branch whose exponential argument is non-positive:
///
/// - For `x >= 0`: `1 / (1 + exp(-x))`.
/// - For `x < 0`: `exp(x) / (1 + exp(x))`.
///
/// Both branches agree algebraically; the split keeps `exp` inputs in
/// `(-∞, 0]` so the result saturates cleanly at 0 and 1 instead of
/// producing `inf/inf` artifacts.
///
/// # Parameters
/// - `x`: real input
///
/// # Returns
/// - `logistic(x)` in `(0, 1)` (reaching the endpoints only by
///   floating-point saturation), as `f64`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let expx = x.exp();
        expx / (1.0 + expx)
    }
}
