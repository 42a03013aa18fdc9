//! Errors for supervised random walk models (graph/feature/set construction,
//! configuration checks, solver convergence, and model state).
//!
//! This module defines a structural error type, [`GraphError`], raised while
//! building the validated input containers, and a model error type,
//! [`WalkError`], covering configuration, the power-iteration solvers, and
//! model lifecycle. Both implement `Display`/`Error`; with the
//! `python-bindings` feature they convert to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Undirected edges are canonicalized as `(min(u, v), max(u, v))`.
//! - A node with zero raw transition mass is *not* an error: normalization
//!   and gradient computation skip such rows.
//! - Solver failures always surface as [`WalkError::NonConvergence`] with
//!   the sweep count and tolerances; a non-fixed-point result is never
//!   returned silently.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for structural construction/validation paths that may produce
/// [`GraphError`].
pub type GraphResult<T> = Result<T, GraphError>;

/// Crate-wide result alias for walk operations that may produce [`WalkError`].
pub type WalkResult<T> = Result<T, WalkError>;

/// Errors specific to constructing the graph, edge features, and training
/// sets.
///
/// Typical causes include out-of-range node indices, self-loops, duplicate
/// edges or feature keys, dimension mismatches, and non-finite feature
/// entries.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    // ---- Graph construction ----
    /// Node count is zero.
    EmptyGraph,

    /// An edge references a node index >= the node count.
    NodeOutOfRange { edge: (usize, usize), nnodes: usize },

    /// An edge connects a node to itself.
    SelfLoop { node: usize },

    /// The same unordered pair appears more than once in the edge list.
    DuplicateEdge { u: usize, v: usize },

    // ---- Edge features ----
    /// Feature dimension must be at least 1.
    ZeroFeatureDim,

    /// A feature vector's length does not match the declared dimension.
    FeatureDimMismatch { u: usize, v: usize, expected: usize, found: usize },

    /// A feature entry is NaN/±inf.
    NonFiniteFeature { u: usize, v: usize, index: usize, value: f64 },

    /// A feature key does not correspond to any graph edge.
    UnknownEdge { u: usize, v: usize },

    /// Two feature entries collapse to the same unordered pair.
    DuplicateFeatureKey { u: usize, v: usize },

    /// A graph edge has no feature vector.
    MissingEdgeFeature { u: usize, v: usize },

    // ---- Training sets ----
    /// A training set is empty.
    EmptyTrainingSet { set: &'static str },

    /// A training set index is >= the node count.
    SetIndexOutOfRange { set: &'static str, value: usize, nnodes: usize },

    /// A node appears twice within the same training set.
    DuplicateSetIndex { set: &'static str, value: usize },

    /// A node appears in both training sets.
    OverlappingSets { node: usize },
}

impl std::error::Error for GraphError {}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Graph construction ----
            GraphError::EmptyGraph => {
                write!(f, "Graph must have at least one node.")
            }
            GraphError::NodeOutOfRange { edge, nnodes } => {
                write!(
                    f,
                    "Edge ({}, {}) references a node outside 0..{nnodes}",
                    edge.0, edge.1
                )
            }
            GraphError::SelfLoop { node } => {
                write!(f, "Self-loop at node {node} is not allowed")
            }
            GraphError::DuplicateEdge { u, v } => {
                write!(f, "Duplicate undirected edge ({u}, {v})")
            }
            // ---- Edge features ----
            GraphError::ZeroFeatureDim => {
                write!(f, "Edge feature dimension must be at least 1.")
            }
            GraphError::FeatureDimMismatch { u, v, expected, found } => {
                write!(
                    f,
                    "Feature vector for edge ({u}, {v}) has length {found}, expected {expected}"
                )
            }
            GraphError::NonFiniteFeature { u, v, index, value } => {
                write!(
                    f,
                    "Feature entry {index} for edge ({u}, {v}) is non-finite: {value}"
                )
            }
            GraphError::UnknownEdge { u, v } => {
                write!(f, "Feature key ({u}, {v}) is not an edge of the graph")
            }
            GraphError::DuplicateFeatureKey { u, v } => {
                write!(f, "Duplicate feature entry for undirected edge ({u}, {v})")
            }
            GraphError::MissingEdgeFeature { u, v } => {
                write!(f, "Edge ({u}, {v}) has no feature vector")
            }
            // ---- Training sets ----
            GraphError::EmptyTrainingSet { set } => {
                write!(f, "Training set '{set}' is empty.")
            }
            GraphError::SetIndexOutOfRange { set, value, nnodes } => {
                write!(f, "Training set '{set}' contains node {value}, outside 0..{nnodes}")
            }
            GraphError::DuplicateSetIndex { set, value } => {
                write!(f, "Training set '{set}' contains node {value} more than once")
            }
            GraphError::OverlappingSets { node } => {
                write!(f, "Node {node} appears in both training sets")
            }
        }
    }
}

/// Convert a [`GraphError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<GraphError> for PyErr {
    fn from(err: GraphError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// Unified error type for supervised random walk modeling.
///
/// Covers configuration validation, solver dimension checks, power-iteration
/// convergence, and model lifecycle. Structural construction errors are
/// wrapped via [`WalkError::Structure`]. Implements `Display`/`Error` and,
/// with the `python-bindings` feature, converts to a Python `ValueError` at
/// PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkError {
    // ---- Structural construction ----
    /// Wrapper for [`GraphError`] raised while building input containers.
    Structure(GraphError),

    // ---- Configuration validation ----
    /// Source node index is >= the node count.
    SourceOutOfRange { source: usize, nnodes: usize },

    /// Teleport rate must be finite and strictly inside (0, 1).
    InvalidTeleport { value: f64 },

    /// Margin offset must be finite and >= 0.
    InvalidOffset { value: f64 },

    /// Regularization weight must be finite and >= 0.
    InvalidLambda { value: f64 },

    /// A convergence tolerance must be finite and >= 0.
    InvalidTolerance { name: &'static str, value: f64 },

    /// The sweep cap must be at least 1.
    ZeroMaxSweeps,

    // ---- Evaluation inputs ----
    /// Beta length does not match the edge-feature dimension.
    DimensionMismatch { expected: usize, found: usize },

    /// Beta coordinates need to be finite.
    NonFiniteBeta { index: usize, value: f64 },

    /// A distribution entry is NaN/±inf.
    NonFiniteDistribution { index: usize, value: f64 },

    /// Transition matrix is not square.
    NonSquareTransition { rows: usize, cols: usize },

    // ---- Solvers ----
    /// A power iteration hit its sweep cap before satisfying the closeness
    /// test.
    NonConvergence { sweeps: usize, atol: f64, rtol: f64 },

    // ---- Model lifecycle ----
    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for WalkError {}

impl std::fmt::Display for WalkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Structural construction ----
            WalkError::Structure(err) => {
                write!(f, "{err}")
            }
            // ---- Configuration validation ----
            WalkError::SourceOutOfRange { source, nnodes } => {
                write!(f, "Source node {source} is outside 0..{nnodes}")
            }
            WalkError::InvalidTeleport { value } => {
                write!(f, "Teleport rate must be finite and strictly in (0, 1); got: {value}")
            }
            WalkError::InvalidOffset { value } => {
                write!(f, "Margin offset must be finite and >= 0; got: {value}")
            }
            WalkError::InvalidLambda { value } => {
                write!(f, "Regularization weight must be finite and >= 0; got: {value}")
            }
            WalkError::InvalidTolerance { name, value } => {
                write!(f, "Convergence tolerance '{name}' must be finite and >= 0; got: {value}")
            }
            WalkError::ZeroMaxSweeps => {
                write!(f, "Sweep cap must be at least 1.")
            }
            // ---- Evaluation inputs ----
            WalkError::DimensionMismatch { expected, found } => {
                write!(f, "Beta length mismatch: expected {expected}, got {found}")
            }
            WalkError::NonFiniteBeta { index, value } => {
                write!(f, "Beta coordinate at index {index} must be finite, got {value}")
            }
            WalkError::NonFiniteDistribution { index, value } => {
                write!(f, "Distribution entry at index {index} is non-finite: {value}")
            }
            WalkError::NonSquareTransition { rows, cols } => {
                write!(f, "Transition matrix must be square, got {rows} x {cols}")
            }
            // ---- Solvers ----
            WalkError::NonConvergence { sweeps, atol, rtol } => {
                write!(
                    f,
                    "Power iteration failed the closeness test (atol={atol}, rtol={rtol}) within {sweeps} sweeps"
                )
            }
            // ---- Model lifecycle ----
            WalkError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet.")
            }
        }
    }
}

impl From<GraphError> for WalkError {
    fn from(err: GraphError) -> WalkError {
        WalkError::Structure(err)
    }
}

/// Convert a [`WalkError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<WalkError> for PyErr {
    fn from(err: WalkError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
