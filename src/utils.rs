#[cfg(feature = "python-bindings")]
use std::collections::HashMap;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::loss_optimizer::traits::{FitOptions, LineSearcher, Tolerances},
    walk::{
        core::{
            features::EdgeFeatures,
            graph::Graph,
            options::{Convergence, SRWOptions, WalkConfig},
        },
        models::srw::SRWModel,
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Coerce a Python object into a read-only 1-D `f64` array.
///
/// Accepts a `numpy.ndarray` directly, anything exposing `to_numpy`
/// (e.g. `pandas.Series`), or a plain sequence of floats, copying only in
/// the last case.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Convert a Python array-like into an owned parameter vector.
#[cfg(feature = "python-bindings")]
pub fn extract_beta_array<'py>(
    py: Python<'py>, raw_beta: &Bound<'py, PyAny>,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_beta)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err("beta0 must be a 1-D contiguous float64 array or sequence")
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Convert a `{(u, v): [f64]}` feature dict into the table
/// [`EdgeFeatures::new`] consumes. Key canonicalization and all validation
/// happen in the container constructor.
#[cfg(feature = "python-bindings")]
pub fn extract_feature_table(
    features: HashMap<(usize, usize), Vec<f64>>,
) -> Vec<((usize, usize), Array1<f64>)> {
    features.into_iter().map(|(key, vec)| (key, Array1::from(vec))).collect()
}

/// Assemble a ready-to-fit [`SRWModel`] from Python-friendly arguments.
///
/// The feature dimension is taken from one of the dict's vectors; the
/// container constructors then enforce that every vector shares it. Solver
/// and optimizer arguments left as `None` fall back to the crate defaults.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_walk_model(
    nnodes: usize, edges: Vec<(usize, usize)>, features: HashMap<(usize, usize), Vec<f64>>,
    source: usize, teleport: f64, offset: f64, l2: f64, atol: Option<f64>, rtol: Option<f64>,
    max_sweeps: Option<usize>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_iter: Option<u64>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<SRWModel> {
    let dim = match features.values().next() {
        Some(vec) => vec.len(),
        None => return Err(PyValueError::new_err("features must not be empty")),
    };

    let graph = Graph::new(nnodes, edges)?;
    let table = extract_feature_table(features);
    let edge_features = EdgeFeatures::new(dim, table, &graph)?;
    let config = WalkConfig::new(source, teleport, offset, l2, nnodes)?;
    let options = extract_walk_options(
        atol, rtol, max_sweeps, tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem,
    )?;

    Ok(SRWModel::new(graph, edge_features, config, options)?)
}

#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn extract_walk_options(
    atol: Option<f64>, rtol: Option<f64>, max_sweeps: Option<usize>, tol_grad: Option<f64>,
    tol_cost: Option<f64>, max_iter: Option<u64>, line_searcher: Option<&str>,
    lbfgs_mem: Option<usize>,
) -> PyResult<SRWOptions> {
    use std::str::FromStr;

    // Convergence::new -> WalkResult<Convergence> -> PyErr
    let defaults = Convergence::default();
    let convergence = Convergence::new(
        atol.unwrap_or(defaults.atol),
        rtol.unwrap_or(defaults.rtol),
        max_sweeps.unwrap_or(defaults.max_sweeps),
    )?;

    // Tolerances::new rejects the all-None case, so fall back to the
    // default tolerances when the caller supplied none of them.
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        FitOptions::default().tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter)?
    };

    // LineSearcher::from_str -> OptResult<LineSearcher> -> PyErr
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => LineSearcher::MoreThuente,
    };

    // FitOptions::new -> OptResult<FitOptions> -> PyErr
    let fit_opts = FitOptions::new(tols, ls, lbfgs_mem)?;

    Ok(SRWOptions::new(convergence, fit_opts))
}
