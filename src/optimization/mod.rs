//! optimization — loss-minimization stack, numerical helpers, and unified
//! error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed loss minimizer, numerically stable transforms, and a
//! single error/result surface. Callers implement a cost, choose
//! tolerances, and obtain fitted parameters and diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing losses** `c(θ)`
//!   (`loss_optimizer`), including configuration of solvers and stopping
//!   criteria.
//! - Supply shared numerical primitives (`numerical_stability`) for
//!   overflow-free evaluation of the logistic edge-strength function.
//! - Normalize configuration issues, numerical failures, walk-layer
//!   failures, and backend solver errors into a single enum
//!   (`errors::OptError`) with a common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ` and assume
//!   that inputs are finite once validation has passed; invalid states are
//!   reported as `OptError`, not panics.
//! - Loss implementations are expected to treat domain violations (e.g.,
//!   non-convergent walks, mismatched parameter dimensions) as recoverable
//!   errors surfaced through the optimization layer.
//!
//! Conventions
//! -----------
//! - All solvers minimize the user's cost `c(θ)` directly; there is no
//!   internal sign convention to translate.
//! - Parameters and gradients are represented using `ndarray`-based
//!   aliases (`Theta`, `Grad`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors or walk-specific error enums.
//! - This module and its submodules avoid I/O; the optional `obs_slog`
//!   observer is the only progress-reporting channel and lives behind a
//!   feature flag.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `Loss` for its types and calls `minimize` with a
//!   parameter guess, data payload, and `FitOptions` to obtain an
//!   `OptimOutcome` (via `loss_optimizer`).
//! - Walk code uses `numerical_stability::safe_logistic` when converting
//!   edge-feature dot products into strengths.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`, which forwards the submodule preludes and
//!   the core error types, or they depend directly on
//!   `loss_optimizer::prelude` when they want a more fine-grained split.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns:
//!   - `loss_optimizer`: solver wiring, tolerance handling, and basic
//!     minimization behavior on toy objectives.
//!   - `numerical_stability`: logistic values on safe grids and
//!     well-behaved tails.
//! - Higher-level integration tests exercise end-to-end fitting workflows,
//!   verifying that configuration mistakes, numerical problems, and backend
//!   failures all surface as sensible `OptError` values and that successful
//!   runs produce stable `OptimOutcome`s.

pub mod errors;
pub mod loss_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_linkpred::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loss_optimizer::prelude::*;
    pub use super::numerical_stability::safe_logistic;
}
