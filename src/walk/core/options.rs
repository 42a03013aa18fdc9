//! Configuration containers for supervised random walk runs.
//!
//! Purpose
//! -------
//! Bundle the per-run scalars (source node, teleport probability, hinge
//! offset, regularization strength), the power-iteration stopping rule, and
//! the outer optimizer options into validated containers. All numeric
//! checks live here so that the transition builders and solvers can assume
//! well-formed inputs.
//!
//! Key behaviors
//! -------------
//! - [`WalkConfig`] rejects out-of-range sources, teleport probabilities
//!   outside the open interval (0, 1), and negative or non-finite offsets
//!   and regularization strengths.
//! - [`Convergence`] carries the absolute/relative tolerance pair and the
//!   sweep cap; both tolerances may be zero simultaneously, which demands
//!   exact agreement between successive iterates.
//! - [`SRWOptions`] pairs a [`Convergence`] with the L-BFGS
//!   [`FitOptions`], defaulting both.
//!
//! Conventions
//! -----------
//! - Teleport is the probability mass returned to the source on every
//!   step; the blended walk always combines `(1 - teleport) * M` with a
//!   teleport column at the source.
//! - Sweep counts are 1-based in diagnostics: a run that exhausts its cap
//!   reports `max_sweeps` performed sweeps.
use crate::optimization::loss_optimizer::FitOptions;
use crate::walk::errors::{WalkError, WalkResult};

/// `WalkConfig` — per-run scalars for one training source.
///
/// Purpose
/// -------
/// Hold the source node and the three scalars that shape a supervised
/// random walk: the teleport probability of the walk itself and the
/// offset/regularization pair of the training objective.
///
/// Fields
/// ------
/// - `source`: `usize`
///   Node the walk restarts from.
/// - `teleport`: `f64`
///   Restart probability, strictly inside (0, 1).
/// - `offset`: `f64`
///   Margin of the squared-hinge ranking penalty; non-negative.
/// - `lambda`: `f64`
///   L2 regularization strength on the parameter vector; non-negative.
///
/// Invariants
/// ----------
/// - `source < nnodes` for the graph the config was validated against.
/// - `0 < teleport < 1`; `offset >= 0`; `lambda >= 0`; all finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkConfig {
    /// Node the walk restarts from.
    pub source: usize,
    /// Restart probability, strictly inside (0, 1).
    pub teleport: f64,
    /// Margin of the squared-hinge ranking penalty.
    pub offset: f64,
    /// L2 regularization strength.
    pub lambda: f64,
}

impl WalkConfig {
    /// Construct a validated [`WalkConfig`].
    ///
    /// Parameters
    /// ----------
    /// - `source`: `usize`
    ///   Source node index; must be `< nnodes`.
    /// - `teleport`: `f64`
    ///   Restart probability; must be finite and strictly inside (0, 1).
    /// - `offset`: `f64`
    ///   Hinge margin; must be finite and non-negative.
    /// - `lambda`: `f64`
    ///   Regularization strength; must be finite and non-negative.
    /// - `nnodes`: `usize`
    ///   Number of nodes in the graph the source indexes into.
    ///
    /// Returns
    /// -------
    /// `WalkResult<WalkConfig>`
    ///   - `Ok(WalkConfig)` if all invariants hold.
    ///   - `Err(WalkError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `WalkError::SourceOutOfRange { source, nnodes }` when
    ///   `source >= nnodes`.
    /// - `WalkError::InvalidTeleport { value }` when teleport is NaN,
    ///   infinite, or outside (0, 1). The boundary values 0 and 1 are
    ///   rejected: 0 loses the restart structure and 1 pins the entire
    ///   distribution on the source.
    /// - `WalkError::InvalidOffset { value }` when the offset is NaN,
    ///   infinite, or negative.
    /// - `WalkError::InvalidLambda { value }` when lambda is NaN, infinite,
    ///   or negative.
    pub fn new(
        source: usize,
        teleport: f64,
        offset: f64,
        lambda: f64,
        nnodes: usize,
    ) -> WalkResult<WalkConfig> {
        if source >= nnodes {
            return Err(WalkError::SourceOutOfRange { source, nnodes });
        }
        if !teleport.is_finite() || teleport <= 0.0 || teleport >= 1.0 {
            return Err(WalkError::InvalidTeleport { value: teleport });
        }
        if !offset.is_finite() || offset < 0.0 {
            return Err(WalkError::InvalidOffset { value: offset });
        }
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(WalkError::InvalidLambda { value: lambda });
        }
        Ok(WalkConfig { source, teleport, offset, lambda })
    }
}

/// `Convergence` — stopping rule for the power-iteration solvers.
///
/// Purpose
/// -------
/// Carry the elementwise tolerance pair and the sweep cap shared by the
/// stationary-distribution and distribution-gradient solvers. A sweep
/// converges when every component satisfies
/// `|old_i - new_i| <= atol + rtol * |new_i|`.
///
/// Fields
/// ------
/// - `atol`: `f64`
///   Absolute tolerance; non-negative.
/// - `rtol`: `f64`
///   Relative tolerance, scaled by the new iterate; non-negative.
/// - `max_sweeps`: `usize`
///   Hard cap on sweeps; at least 1. Exhausting it is reported as
///   `WalkError::NonConvergence`, never silently accepted.
///
/// Notes
/// -----
/// - `atol == rtol == 0` is legal and demands exact agreement between
///   successive iterates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    /// Absolute tolerance; non-negative.
    pub atol: f64,
    /// Relative tolerance, scaled by the new iterate.
    pub rtol: f64,
    /// Hard cap on power-iteration sweeps.
    pub max_sweeps: usize,
}

impl Convergence {
    /// Construct a validated [`Convergence`].
    ///
    /// # Errors
    /// - `WalkError::InvalidTolerance { name, value }` when `atol` or
    ///   `rtol` is NaN, infinite, or negative; `name` identifies which.
    /// - `WalkError::ZeroMaxSweeps` when `max_sweeps == 0`.
    pub fn new(atol: f64, rtol: f64, max_sweeps: usize) -> WalkResult<Convergence> {
        if !atol.is_finite() || atol < 0.0 {
            return Err(WalkError::InvalidTolerance { name: "atol", value: atol });
        }
        if !rtol.is_finite() || rtol < 0.0 {
            return Err(WalkError::InvalidTolerance { name: "rtol", value: rtol });
        }
        if max_sweeps == 0 {
            return Err(WalkError::ZeroMaxSweeps);
        }
        Ok(Convergence { atol, rtol, max_sweeps })
    }
}

impl Default for Convergence {
    /// `atol = 1e-8`, `rtol = 1e-5`, `max_sweeps = 10_000`.
    fn default() -> Self {
        Convergence { atol: 1e-8, rtol: 1e-5, max_sweeps: 10_000 }
    }
}

/// `SRWOptions` — combined walk and optimizer configuration.
///
/// Pairs the power-iteration stopping rule with the outer L-BFGS options.
/// Both components are validated on their own constructors; this container
/// adds no further rules.
#[derive(Debug, Clone, PartialEq)]
pub struct SRWOptions {
    /// Stopping rule for the inner power iterations.
    pub convergence: Convergence,
    /// L-BFGS configuration for the outer fit.
    pub fit_opts: FitOptions,
}

impl SRWOptions {
    /// Bundle a [`Convergence`] with [`FitOptions`].
    pub fn new(convergence: Convergence, fit_opts: FitOptions) -> SRWOptions {
        SRWOptions { convergence, fit_opts }
    }
}

impl Default for SRWOptions {
    fn default() -> Self {
        SRWOptions { convergence: Convergence::default(), fit_opts: FitOptions::default() }
    }
}
