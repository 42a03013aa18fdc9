//! loss_optimizer — argmin-powered minimizer for user-defined costs.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing
//! losses** `c(θ)` from Rust or Python. Callers implement a single trait,
//! [`Loss`], and invoke [`minimize`] to run L-BFGS with a configurable line
//! search, tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Bridge user-supplied costs `c(θ)` into Argmin-compatible problems via
//!   [`adapter::ArgMinAdapter`], with no sign translation anywhere.
//! - Expose a single, user-facing entrypoint [`minimize`] that:
//!   - validates the initial guess with [`Loss::check`],
//!   - selects an L-BFGS solver via [`builders`] based on [`traits::LineSearcher`],
//!   - executes the solver via [`run::run_lbfgs`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Provide a robust finite-difference fallback in [`finite_diff`] for
//!   gradients when analytic derivatives are missing, with post-hoc
//!   validation and error capture.
//! - Centralize optimizer configuration ([`Tolerances`], [`FitOptions`]) and
//!   validation logic ([`validation`]) so downstream code can assume sane,
//!   finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always minimizes** the user's cost `c(θ)` directly;
//!   user code implements `c(θ)` and `∇c(θ)` (when available).
//! - [`Loss::value`] and [`Loss::grad`] must treat invalid inputs as
//!   recoverable [`OptError`](super::errors::OptError) values, not panics.
//! - Vectors use the canonical aliases [`Theta`] and [`Grad`]; all are
//!   assumed finite whenever optimization proceeds.
//! - Configuration types ([`Tolerances`], [`FitOptions`]) are validated on
//!   construction and are treated as internally consistent by the solver
//!   layer.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping from constrained → unconstrained space
//!   happens in the model layer.
//! - `converged` in [`OptimOutcome`] is `true` only for tolerance-driven
//!   stops; hitting the iteration cap is reported but not counted as
//!   convergence.
//! - Errors bubble up as [`OptResult<T>`](super::errors::OptResult); this
//!   module and its children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Model code implements [`Loss`] for its types, then calls [`minimize`]
//!   with:
//!   - an objective instance `&M`,
//!   - an initial parameter vector [`Theta`],
//!   - a data payload `&M::Data`, and
//!   - a [`FitOptions`] configuration (tolerances, line search, L-BFGS
//!     memory).
//! - Higher-level front-ends (Python bindings) are expected to interact
//!   only with the re-exported surface:
//!   [`minimize`], [`Loss`], [`FitOptions`], [`Tolerances`],
//!   [`LineSearcher`], [`OptimOutcome`], plus numeric aliases from
//!   [`types`].
//! - Internal optimizer code:
//!   - uses [`adapter`] to bridge into Argmin,
//!   - uses [`builders`] to construct L-BFGS solvers with the chosen
//!     line search,
//!   - delegates execution to [`run::run_lbfgs`], and
//!   - relies on [`finite_diff`] and [`validation`] for derivative and
//!     state checks.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - solver construction and tolerance wiring in [`builders`],
//!   - finite-difference + validation behavior in [`finite_diff`],
//!   - configuration and outcome invariants in [`traits`],
//!   - end-to-end toy minimizations in [`api`].
//! - Integration tests exercise [`minimize`] implicitly by fitting a
//!   supervised random walk model, verifying that line-search choices are
//!   respected and that [`OptimOutcome`] reports sensible diagnostics.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{FitOptions, LineSearcher, Loss, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_linkpred::optimization::loss_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{FitOptions, LineSearcher, Loss, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
