//! walk — supervised random walk stack: core numerics, models, and errors.
//!
//! Purpose
//! -------
//! Provide a cohesive supervised random walk layer for link prediction:
//! validated graph / feature / training-set containers, transition building
//! and fixed-point solvers, the hinge training objective, a user-facing
//! model API, and shared error types under a single namespace. This is the
//! surface most consumers (including the Python bindings) should depend on.
//!
//! Key behaviors
//! -------------
//! - Collect the numerical and structural building blocks in [`core`]:
//!   containers, the logistic edge-strength map, transition builders,
//!   stationary and gradient solvers, and the squared-hinge objective.
//! - Expose the model API in [`models`] via [`SRWModel`] (fit by L-BFGS,
//!   rank candidates from cached scores) and the one-call [`train_model`].
//! - Centralize walk-specific error types in [`errors`] ([`GraphError`]
//!   for container construction, [`WalkError`] for evaluation, and the
//!   `GraphResult` / `WalkResult` aliases) so callers see a uniform error
//!   surface across the stack.
//!
//! Invariants & assumptions
//! ------------------------
//! - Graphs are undirected, self-loop free, and edge-unique; features
//!   cover exactly the edge set with finite vectors of one shared
//!   dimension; training sets are non-empty, in-range, and disjoint.
//! - Teleport probabilities lie strictly inside (0, 1); blended transition
//!   rows sum to one except strength-free rows, which carry only the
//!   teleport entry.
//! - All numerics are finite `f64`; invalid inputs surface as errors,
//!   never panics.
//!
//! Conventions
//! -----------
//! - Node indices are 0-based and dense; edges are keyed by the canonical
//!   `(min, max)` pair.
//! - Distributions are row vectors iterated as `p_next = p · T`;
//!   convergence compares consecutive iterates elementwise against the
//!   new one.
//!
//! Downstream usage
//! ----------------
//! - Typical end-to-end flow:
//!   1. Construct a [`Graph`], [`EdgeFeatures`], and [`TrainingSets`].
//!   2. Build a [`WalkConfig`] (source, teleport, offset, lambda) and
//!      [`SRWOptions`] (solver tolerances, fit options).
//!   3. Assemble an [`SRWModel`] and call `fit(beta0, &sets)`.
//!   4. Rank candidates with `predict(top)` or inspect `scores` directly.
//! - Python bindings convert NumPy inputs into these containers and rely
//!   on the `PyErr` conversions defined in [`errors`].
//!
//! Testing notes
//! -------------
//! - Unit tests in [`core`] cover container validation, hand-solved
//!   transitions and stationary vectors, finite-difference agreement for
//!   the analytic gradients, and solver failure paths.
//! - Unit tests in [`models`] cover fitting, prediction, and error paths;
//!   the pipeline integration test exercises the full chain through the
//!   public API.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------
//
// These are the everyday types most users need. More specialized items
// (strength and transition internals, the fixed-point solvers, validation
// helpers) remain under their respective submodules.

pub use self::core::{Convergence, EdgeFeatures, Graph, SRWOptions, TrainingSets, WalkConfig};

pub use self::errors::{GraphError, GraphResult, WalkError, WalkResult};

pub use self::models::{SRWModel, train_model};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_linkpred::walk::prelude::*;
//
// to import the main walk surface in a single line, without pulling in
// lower-level internals.

pub mod prelude {
    pub use super::{
        Convergence, EdgeFeatures, Graph, GraphError, GraphResult, SRWModel, SRWOptions,
        TrainingSets, WalkConfig, WalkError, WalkResult, train_model,
    };
}
