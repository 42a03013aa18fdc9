//! rust_linkpred — supervised random walk link prediction with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the supervised random walk model to Python via the
//! `_rust_linkpred` extension module. When the `python-bindings` feature is
//! enabled, this module defines the Python-facing classes and functions used
//! by the `rust_linkpred` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`walk` and `optimization`) as the
//!   public crate surface.
//! - Define `#[pyclass]` wrappers ([`SupervisedRandomWalk`],
//!   [`SRWFitSummary`]), the [`train_srw`] convenience function, and the
//!   `#[pymodule]` initializer for the `_rust_linkpred` extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input conversion, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts (e.g.
//!   [`SRWModel`]).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed items live flat under `_rust_linkpred` and are typically
//!   wrapped by thin pure-Python facades in the top-level `rust_linkpred`
//!   package.
//! - Indexing and naming conventions follow the documentation of the
//!   underlying Rust modules (`walk::core`, `optimization`).
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_linkpred` module defined
//!   here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the pipeline integration test; smoke tests for the PyO3 bindings
//!   verify that classes can be constructed, fitted, and queried from
//!   Python.

pub mod optimization;
pub mod utils;
pub mod walk;

#[cfg(feature = "python-bindings")]
use std::collections::HashMap;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loss_optimizer::traits::OptimOutcome,
    utils::{build_walk_model, extract_beta_array, extract_feature_table},
    walk::{
        core::sets::TrainingSets,
        errors::WalkError,
        models::srw::{SRWModel, train_model},
    },
};

/// SupervisedRandomWalk — Python-facing wrapper for the walk model.
///
/// Purpose
/// -------
/// Expose the [`SRWModel`] API to Python callers while preserving the core
/// Rust invariants and error handling.
///
/// Key behaviors
/// -------------
/// - Build an [`SRWModel`] from Python-friendly arguments: an edge list, a
///   `{(u, v): [floats]}` feature dict, and scalar walk configuration.
/// - Provide `fit` and `predict` methods that convert Python inputs into
///   the validated containers and delegate to the core implementation.
/// - Cache the optimizer outcome and stationary scores for inspection from
///   Python via `scores`, `beta`, and `summary`.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `SupervisedRandomWalk(nnodes, edges, features, source, teleport, offset, l2, ...)`:
/// - `nnodes`: `usize`
///   Number of nodes; indices are 0-based and dense.
/// - `edges`: `list[tuple[int, int]]`
///   Undirected edge list; pairs are canonicalized internally.
/// - `features`: `dict[tuple[int, int], list[float]]`
///   One feature vector per edge; the dimension is taken from the vectors.
/// - `source`: `usize`
///   Walk restart node.
/// - `teleport`, `offset`, `l2`: `f64`
///   Restart probability in (0, 1), hinge offset >= 0, and L2 weight >= 0.
/// - `atol`, `rtol`, `max_sweeps`
///   Optional solver tolerances; crate defaults when omitted.
/// - `tol_grad`, `tol_cost`, `max_iter`, `line_searcher`, `lbfgs_mem`
///   Optional optimizer configuration used to build `FitOptions`.
///
/// Fields
/// ------
/// - `inner`: [`SRWModel`]
///   Fully configured model that caches fit results and scores.
///
/// Invariants
/// ----------
/// - `inner` is always a well-formed [`SRWModel`] created through
///   [`build_walk_model`]; container invariants are checked at
///   construction.
///
/// Performance
/// -----------
/// - All heavy numerical work occurs inside `inner`; this wrapper performs
///   only input conversion, dispatch, and error mapping.
///
/// Notes
/// -----
/// - Native Rust callers should usually work with [`SRWModel`] directly;
///   this type exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_linkpred")]
pub struct SupervisedRandomWalk {
    /// Underlying Rust SRWModel.
    pub inner: SRWModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SupervisedRandomWalk {
    #[new]
    #[pyo3(
        signature = (
            nnodes,
            edges,
            features,
            source,
            teleport,
            offset,
            l2,
            atol = None,
            rtol = None,
            max_sweeps = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
        ),
        text_signature = "(nnodes, edges, features, source, teleport, offset, l2, /, \
                          atol=None, rtol=None, max_sweeps=None, tol_grad=None, \
                          tol_cost=None, max_iter=None, line_searcher=None, lbfgs_mem=None)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        nnodes: usize, edges: Vec<(usize, usize)>, features: HashMap<(usize, usize), Vec<f64>>,
        source: usize, teleport: f64, offset: f64, l2: f64, atol: Option<f64>,
        rtol: Option<f64>, max_sweeps: Option<usize>, tol_grad: Option<f64>,
        tol_cost: Option<f64>, max_iter: Option<u64>, line_searcher: Option<&str>,
        lbfgs_mem: Option<usize>,
    ) -> PyResult<Self> {
        let inner = build_walk_model(
            nnodes,
            edges,
            features,
            source,
            teleport,
            offset,
            l2,
            atol,
            rtol,
            max_sweeps,
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            lbfgs_mem,
        )?;
        Ok(SupervisedRandomWalk { inner })
    }

    /// Fit the walk parameters from labeled node sets.
    #[pyo3(text_signature = "(self, beta0, positives, negatives, /)")]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, beta0: &Bound<'py, PyAny>, positives: Vec<usize>,
        negatives: Vec<usize>,
    ) -> PyResult<()> {
        let beta_vec = extract_beta_array(py, beta0)?;
        let sets = TrainingSets::new(positives, negatives, self.inner.graph.nnodes)?;
        self.inner.fit(beta_vec, &sets)?;
        Ok(())
    }

    /// Rank non-neighbor candidates by fitted score, best first.
    #[pyo3(text_signature = "(self, top, /)")]
    pub fn predict(&self, top: usize) -> PyResult<Vec<(usize, f64)>> {
        Ok(self.inner.predict(top)?)
    }

    /// Stationary scores at the fitted parameters, one per node.
    pub fn scores<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        match &self.inner.scores {
            Some(scores) => Ok(scores.to_vec().into_pyarray(py)),
            None => Err(WalkError::ModelNotFitted.into()),
        }
    }

    /// Fitted parameter vector.
    pub fn beta<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<f64>>> {
        match &self.inner.results {
            Some(outcome) => Ok(outcome.theta_hat.to_vec().into_pyarray(py)),
            None => Err(WalkError::ModelNotFitted.into()),
        }
    }

    /// Optimizer diagnostics for the last fit.
    pub fn summary(&self) -> PyResult<SRWFitSummary> {
        match &self.inner.results {
            Some(outcome) => Ok(SRWFitSummary { inner: outcome.clone() }),
            None => Err(WalkError::ModelNotFitted.into()),
        }
    }
}

/// SRWFitSummary — optimization outcome for a fitted walk model.
///
/// Purpose
/// -------
/// Present the key optimizer diagnostics from [`OptimOutcome`] to Python
/// code in a lightweight, read-only wrapper.
///
/// Key behaviors
/// -------------
/// - Hold scalar diagnostics: objective value, convergence flag, status
///   string, iteration count, and gradient norm.
/// - Provide accessors that copy the underlying values into Python-owned
///   containers.
///
/// Parameters
/// ----------
/// Instances are constructed internally by `SupervisedRandomWalk.summary`
/// and are not created directly by user code.
///
/// Fields
/// ------
/// - `inner`: [`OptimOutcome`]
///   Full optimizer result from the loss minimization.
///
/// Notes
/// -----
/// - This type is part of the Python FFI surface; Rust code should prefer
///   using [`OptimOutcome`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_linkpred")]
pub struct SRWFitSummary {
    /// Underlying Rust OptimOutcome.
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SRWFitSummary {
    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }
}

/// One-call training from Python: build, fit, and return the fitted
/// parameter vector as a numpy array. Mirrors [`train_model`].
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    text_signature = "(positives, negatives, offset, l2, nnodes, edges, features, source, \
                      teleport, beta0, /)"
)]
#[allow(clippy::too_many_arguments)]
pub fn train_srw<'py>(
    py: Python<'py>, positives: Vec<usize>, negatives: Vec<usize>, offset: f64, l2: f64,
    nnodes: usize, edges: Vec<(usize, usize)>, features: HashMap<(usize, usize), Vec<f64>>,
    source: usize, teleport: f64, beta0: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let beta_vec = extract_beta_array(py, beta0)?;
    let table = extract_feature_table(features);
    let theta_hat = train_model(
        positives, negatives, offset, l2, nnodes, edges, table, source, teleport, beta_vec,
    )?;
    Ok(theta_hat.to_vec().into_pyarray(py))
}

/// _rust_linkpred — PyO3 module initializer for the Python extension.
///
/// Purpose
/// -------
/// Define the `_rust_linkpred` Python module used by the public
/// `rust_linkpred` package.
///
/// Key behaviors
/// -------------
/// - Register the [`SupervisedRandomWalk`] and [`SRWFitSummary`] classes
///   and the [`train_srw`] function on the module.
///
/// Notes
/// -----
/// - This function is invoked automatically by Python when importing the
///   compiled extension; it is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_linkpred<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<SupervisedRandomWalk>()?;
    m.add_class::<SRWFitSummary>()?;
    m.add_function(wrap_pyfunction!(train_srw, m)?)?;
    Ok(())
}
