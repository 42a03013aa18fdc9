//! Numerical stability helpers shared by the optimization stack.
//!
//! Purpose
//! -------
//! Collect the small, guarded numeric transforms that the rest of the
//! crate relies on to stay inside well-conditioned `f64` regimes. The
//! transforms live in their own module so that numeric policy (branch
//! cutoffs, saturation behavior) is decided in exactly one place.
//!
//! Key behaviors
//! -------------
//! - [`transformations::safe_logistic`]: overflow-free logistic used for
//!   edge strengths; never evaluates `exp` on a positive argument.
//!
//! Downstream usage
//! ----------------
//! - `walk::core::strength` maps feature/parameter dot products through
//!   [`transformations::safe_logistic`] to obtain edge strengths and their
//!   slopes.
//!
//! Testing notes
//! -------------
//! - Covered indirectly by the strength-model unit tests, which exercise
//!   the midpoint, symmetry, and saturated tails.
pub mod transformations;

// ---- Re-exports (primary public surface) ----
pub use transformations::safe_logistic;
