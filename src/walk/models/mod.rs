//! models — user-facing supervised random walk models.
//!
//! Purpose
//! -------
//! Collect the high-level link-prediction API: the [`SRWModel`] container
//! that owns a graph, its edge features, and the walk configuration, plus
//! the one-call [`train_model`] entry point. This layer sits on top of
//! `walk::core`, wiring transition building, the fixed-point solvers, and
//! the hinge objective to the generic loss minimizer.
//!
//! Key behaviors
//! -------------
//! - Expose a complete model type [`SRWModel`] that implements the
//!   optimizer's [`Loss`](crate::optimization::loss_optimizer::Loss) trait
//!   and provides `fit` and `predict` methods.
//! - Cache the optimizer outcome and the stationary scores at the fitted
//!   parameters so prediction is a sort over precomputed values.
//! - Provide [`train_model`] for callers that hold raw vectors rather than
//!   constructed containers (the Python bindings route through it).
//!
//! Invariants & assumptions
//! ------------------------
//! - Containers are validated at construction; the model constructor
//!   re-checks only the cross-container constraint (source inside the
//!   graph).
//! - Parameter vectors match the feature dimension and are finite; the
//!   `Loss::check` hook enforces this before optimization starts.
//! - `fit` leaves `results` and `scores` either both populated or both
//!   untouched; `predict` errors until a fit succeeds.
//!
//! Conventions
//! -----------
//! - Fitting consumes the initial parameter vector, mirroring the
//!   optimizer API.
//! - Prediction excludes the source and its current neighbors and breaks
//!   score ties by ascending node index.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`srw`] cover fitting on a feature-separated graph,
//!   prediction order and exclusion, the not-fitted error path, `Loss`
//!   conformance, and the `train_model` wrapper. The pipeline integration
//!   test exercises the same surface end to end.

pub mod srw;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::srw::{SRWModel, train_model};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_linkpred::walk::models::prelude::*;
//
// to import the main model surface in a single line.

pub mod prelude {
    pub use super::srw::{SRWModel, train_model};
}
