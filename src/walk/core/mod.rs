//! core — graph data, edge strengths, transitions, solvers, and the
//! training objective for supervised random walks.
//!
//! Purpose
//! -------
//! Collect the building blocks a supervised random walk model is assembled
//! from: validated graph / feature / training-set containers, the logistic
//! edge-strength map, transition-matrix builders, fixed-point solvers for
//! the stationary distribution and its parameter derivatives, and the
//! squared-hinge training objective. The model layer in `walk::models`
//! wires these pieces to the generic optimizer.
//!
//! Key behaviors
//! -------------
//! - Define validated input containers ([`Graph`], [`EdgeFeatures`],
//!   [`TrainingSets`]) and run configuration ([`WalkConfig`],
//!   [`Convergence`], [`SRWOptions`]).
//! - Map edge features to walk strengths through a saturating logistic
//!   ([`edge_strength`], [`edge_strength_grad`]).
//! - Build the teleport-blended transition matrix and its unweighted
//!   counterpart ([`build_transition`], [`build_plain_transition`]), and
//!   differentiate the blended one along every parameter component
//!   ([`transition_gradients`]).
//! - Solve the stationary distribution and its derivatives by power
//!   iteration ([`stationary_distribution`], [`distribution_gradient`],
//!   [`uniform_start`]).
//! - Evaluate the training loss and its analytic gradient over labeled
//!   node pairs ([`objective_value`], [`objective_gradient`], with
//!   [`pair_cost`] / [`pair_cost_grad`] as the per-pair kernel).
//!
//! Invariants & assumptions
//! ------------------------
//! - Graphs are undirected and self-loop free; edges are stored once under
//!   the canonical `(min, max)` key, and [`EdgeFeatures`] covers exactly
//!   the edge set with finite vectors of one shared dimension.
//! - Parameter vectors are finite and match the feature dimension;
//!   [`validate_beta`] enforces this at every entry point that takes one.
//! - Blended transition rows sum to one except rows without strength mass,
//!   which carry only the teleport entry; the teleport probability lies
//!   strictly inside (0, 1).
//! - All numerics are finite `f64`; invalid inputs surface as
//!   [`WalkError`](crate::walk::errors::WalkError) /
//!   [`GraphError`](crate::walk::errors::GraphError), never as panics.
//!
//! Conventions
//! -----------
//! - Node indices are 0-based and dense in `0..nnodes`.
//! - Distributions are row vectors; one solver sweep is `p_next = p · T`,
//!   and closeness compares each old entry against the new iterate as
//!   `|old - new| <= atol + rtol * |new|`.
//! - This layer performs no I/O and no logging; it operates purely on
//!   `ndarray` containers and scalars.
//!
//! Downstream usage
//! ----------------
//! - `walk::models::srw` threads these pieces together: it implements the
//!   optimizer's loss trait on top of [`objective_value`] /
//!   [`objective_gradient`] and scores candidates from the solved
//!   stationary distribution.
//! - Python bindings construct the containers from NumPy inputs and rely
//!   on the error conversions in [`crate::walk::errors`].
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules cover container validation, the
//!   saturating strength map, hand-solved transitions and stationary
//!   vectors, finite-difference agreement for every analytic gradient, and
//!   the non-convergence paths of both solvers.
//! - The model layer and the pipeline integration test exercise the full
//!   chain (containers → transition → solve → objective → fit).

pub mod features;
pub mod gradient;
pub mod graph;
pub mod objective;
pub mod options;
pub mod sets;
pub mod solver;
pub mod strength;
pub mod transition;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::features::EdgeFeatures;
pub use self::gradient::transition_gradients;
pub use self::graph::Graph;
pub use self::objective::{objective_gradient, objective_value, pair_cost, pair_cost_grad};
pub use self::options::{Convergence, SRWOptions, WalkConfig};
pub use self::sets::TrainingSets;
pub use self::solver::{distribution_gradient, stationary_distribution, uniform_start};
pub use self::strength::{edge_strength, edge_strength_grad};
pub use self::transition::{build_plain_transition, build_transition};
pub use self::validation::validate_beta;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_linkpred::walk::core::prelude::*;
//
// to import the main core surface in a single line.

pub mod prelude {
    pub use super::features::EdgeFeatures;
    pub use super::graph::Graph;
    pub use super::options::{Convergence, SRWOptions, WalkConfig};
    pub use super::sets::TrainingSets;
    pub use super::solver::stationary_distribution;
    pub use super::transition::build_transition;
}
