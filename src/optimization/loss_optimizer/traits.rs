//! Public API surface for loss minimization.
//!
//! - [`Loss`]: trait users implement for their objective.
//! - [`FitOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by the high-level `minimize` API.
//!
//! Convention: the solver *minimizes* the user's cost `c(θ)` directly. If an
//! analytic gradient is provided, it should be the gradient of the cost
//! (`∇c(θ)`); no sign translation happens anywhere in this layer.
use crate::optimization::{
    errors::{OptError, OptResult},
    loss_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented loss interface.
///
/// The solver minimizes `c(θ)` exactly as returned by [`Loss::value`]. If
/// you provide an analytic gradient, return the gradient of the cost
/// `∇c(θ)`; it is used as-is.
///
/// - `type Data`: per-objective data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `c(θ)`.
///   - Errors: return a descriptive `OptError` for invalid inputs or model failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇c(θ)`.
///   If not implemented, robust finite differences are used automatically.
pub trait Loss {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    /// Parse a line-search choice from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"MoreThuente"`
    /// - `"HagerZhang"`
    /// - Any case variant (e.g., `"morethuente"`, `"HAGERZHANG"`).
    ///
    /// Any other value returns `OptError::InvalidLineSearch` with a helpful message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints progress. Plain field; flip it after construction
///   when progress logging is wanted.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size; `None` means the
///   crate default of [`DEFAULT_LBFGS_MEM`](super::types::DEFAULT_LBFGS_MEM).
///
/// Constructor:
/// - `new(tols, line_searcher, lbfgs_mem) -> OptResult<Self>` — builds
///   options with `verbose = false`; numeric validation of the tolerances
///   themselves is handled in `Tolerances::new`.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 300`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None` (uses default of 7)
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl FitOptions {
    /// Create a new set of optimizer options.
    ///
    /// This constructor does not mutate values; validation of the numeric
    /// tolerance fields is performed inside [`Tolerances::new`].
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose: false, lbfgs_mem })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::new(Some(1e-6), None, Some(300)).unwrap(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<u64>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<u64>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **cost** value `c(θ̂)` as returned by the user's objective.
/// - `converged`: `true` only when the solver stopped because a tolerance was
///   met (`SolverConverged` or `TargetCostReached`). Hitting the iteration
///   cap or being interrupted does **not** count as convergence.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - Keys follow argmin's counters, e.g., cost_count, gradient_count, etc.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`; only
    ///   tolerance-driven stops count as converged.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing of `LineSearcher` names, including the rejection path.
    // - Validation rules in `Tolerances::new` and `FitOptions::new`.
    // - The convergence classification in `OptimOutcome::new`.
    //
    // They intentionally DO NOT cover:
    // - Solver construction or execution (see `builders` and `run`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `LineSearcher::from_str` is case-insensitive and rejects
    // unknown names with `InvalidLineSearch`.
    //
    // Given
    // -----
    // - The strings "morethuente", "HAGERZHANG", and "newton".
    //
    // Expect
    // ------
    // - The first two parse to their variants; the third errors and echoes
    //   the offending name.
    fn line_searcher_from_str_parses_case_insensitively() {
        assert_eq!("morethuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);

        let err = "newton".parse::<LineSearcher>().unwrap_err();
        match err {
            OptError::InvalidLineSearch { name, .. } => assert_eq!(name, "newton"),
            other => panic!("Expected InvalidLineSearch, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure `Tolerances::new` rejects the configuration in which no
    // stopping rule is present at all.
    //
    // Given
    // -----
    // - All three fields `None`.
    //
    // Expect
    // ------
    // - `Err(OptError::NoTolerancesProvided)`.
    fn tolerances_new_rejects_all_none() {
        let result = Tolerances::new(None, None, None);

        assert!(matches!(result.unwrap_err(), OptError::NoTolerancesProvided));
    }

    #[test]
    // Purpose
    // -------
    // Ensure `FitOptions::new` rejects a zero L-BFGS memory while accepting
    // `None` (crate default) and positive values.
    //
    // Given
    // -----
    // - Valid tolerances and `lbfgs_mem` of `Some(0)`, `None`, `Some(5)`.
    //
    // Expect
    // ------
    // - `Some(0)` errors with `InvalidLBFGSMem`; the other two succeed with
    //   `verbose == false`.
    fn fit_options_new_rejects_zero_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(100)).unwrap();

        let err = FitOptions::new(tols, LineSearcher::MoreThuente, Some(0)).unwrap_err();
        assert!(matches!(err, OptError::InvalidLBFGSMem { mem: 0, .. }));

        let default_mem = FitOptions::new(tols, LineSearcher::MoreThuente, None).unwrap();
        assert!(!default_mem.verbose);
        let explicit = FitOptions::new(tols, LineSearcher::HagerZhang, Some(5)).unwrap();
        assert_eq!(explicit.lbfgs_mem, Some(5));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `OptimOutcome::new` counts only tolerance-driven stops as
    // convergence.
    //
    // Given
    // -----
    // - Identical solver state finished with `SolverConverged` vs
    //   `MaxItersReached`.
    //
    // Expect
    // ------
    // - `converged == true` for the former, `false` for the latter, with
    //   the reason echoed in `status`.
    fn optim_outcome_new_classifies_termination() {
        let theta = array![1.0, 2.0];

        let good = OptimOutcome::new(
            Some(theta.clone()),
            0.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(good.converged);
        assert_eq!(good.status, "SolverConverged");

        let capped = OptimOutcome::new(
            Some(theta),
            0.5,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            300,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(!capped.converged);
        assert_eq!(capped.status, "MaxItersReached");
    }

    #[test]
    // Purpose
    // -------
    // Ensure `OptimOutcome::new` refuses a missing parameter vector.
    //
    // Given
    // -----
    // - `theta_hat_opt = None`.
    //
    // Expect
    // ------
    // - `Err(OptError::MissingThetaHat)`.
    fn optim_outcome_new_rejects_missing_theta_hat() {
        let result = OptimOutcome::new(
            None,
            0.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            1,
            FnEvalMap::new(),
            None,
        );

        assert!(matches!(result.unwrap_err(), OptError::MissingThetaHat));
    }
}
