//! High-level entry point for minimizing a user-provided `Loss`.
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the objective in an `ArgMinAdapter` (which forwards `c(θ)`
//! unchanged), and delegates the run to `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{FitOptions, LineSearcher, Loss},
    },
};

/// Minimize a cost `c(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes the cost `c(θ)`
///   to `argmin` as-is.
/// - Builds an L-BFGS solver with either **Hager–Zhang** or **More–Thuente**
///   line search based on `opts.line_searcher`.
/// - Calls `run_lbfgs`, which configures the executor (initial params,
///   max iters, optional observers) and returns an `OptimOutcome`.
///
/// # Parameters
/// - `f`: Your objective implementing [`Loss`].
/// - `theta0`: Initial parameter vector.
/// - `data`: Objective data passed through to `value`/`grad`.
/// - `opts`: Optimizer options (tolerances, line search choice, verbosity, etc.).
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors from `build_optimizer_*`.
/// - Propagates runtime errors from `run_lbfgs` (e.g., line search failures).
///
/// # Returns
/// An [`OptimOutcome`] containing `theta_hat`, best value `c(θ̂)`,
/// termination status, iteration counts, function evaluation counts, and
/// optionally the gradient norm.
///
/// # Example
/// ```rust
/// use ndarray::array;
/// use rust_linkpred::optimization::errors::OptResult;
/// use rust_linkpred::optimization::loss_optimizer::{minimize, FitOptions, Loss, Theta};
///
/// struct Quadratic;
///
/// impl Loss for Quadratic {
///     type Data = ();
///
///     fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta) + 1.0)
///     }
///
///     fn check(&self, _theta: &Theta, _data: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let theta0 = array![0.5, -0.3];
/// let out = minimize(&Quadratic, theta0, &(), &FitOptions::default())?;
/// assert!(out.value <= 1.0 + 1e-6);
/// # Ok::<(), rust_linkpred::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Loss>(
    f: &F, theta0: Theta, data: &F::Data, opts: &FitOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        loss_optimizer::{Grad, traits::Tolerances},
    };
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end L-BFGS minimization of a toy quadratic, with and without
    //   an analytic gradient.
    // - Propagation of `check` failures from the user objective.
    //
    // They intentionally DO NOT cover:
    // - The ranking loss itself (exercised in `walk::core::objective` and
    //   the pipeline integration tests).
    // -------------------------------------------------------------------------

    /// Shifted quadratic `c(θ) = θᵀθ + 1` with an analytic gradient and a
    /// check that rejects non-finite starting points.
    struct Quadratic {
        with_grad: bool,
    }

    impl Loss for Quadratic {
        type Data = ();

        fn value(&self, theta: &Theta, _data: &()) -> OptResult<f64> {
            Ok(theta.dot(theta) + 1.0)
        }

        fn check(&self, theta: &Theta, _data: &()) -> OptResult<()> {
            for (index, &value) in theta.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Starting point must be finite.",
                    });
                }
            }
            Ok(())
        }

        fn grad(&self, theta: &Theta, _data: &()) -> OptResult<Grad> {
            if self.with_grad {
                Ok(theta.mapv(|x| 2.0 * x))
            } else {
                Err(OptError::GradientNotImplemented)
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `minimize` drives a quadratic with an analytic gradient
    // to its minimum and reports convergence.
    //
    // Given
    // -----
    // - `c(θ) = θᵀθ + 1` with gradient `2θ`, starting at (0.5, -0.3).
    // - Hager–Zhang line search, `tol_grad = 1e-6`, `max_iter = 100`.
    //
    // Expect
    // ------
    // - `converged == true`, `theta_hat` within 1e-4 of the origin, and a
    //   best value within 1e-6 of 1.
    fn minimize_quadratic_with_analytic_gradient_converges() {
        // Arrange
        let objective = Quadratic { with_grad: true };
        let tols = Tolerances::new(Some(1e-6), None, Some(100)).unwrap();
        let opts = FitOptions::new(tols, LineSearcher::HagerZhang, None).unwrap();
        let theta0 = array![0.5, -0.3];

        // Act
        let out = minimize(&objective, theta0, &(), &opts)
            .expect("Quadratic minimization should succeed");

        // Assert
        assert!(out.converged, "Expected convergence, status: {}", out.status);
        assert!(out.theta_hat.iter().all(|v| v.abs() < 1e-4));
        assert!((out.value - 1.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Verify that `minimize` falls back to finite differences when the
    // objective provides no analytic gradient and still reaches the
    // minimum.
    //
    // Given
    // -----
    // - The same quadratic with `grad` returning `GradientNotImplemented`.
    // - More–Thuente line search and default tolerances.
    //
    // Expect
    // ------
    // - `converged == true` and a best value within 1e-6 of 1.
    fn minimize_quadratic_without_gradient_uses_finite_differences() {
        // Arrange
        let objective = Quadratic { with_grad: false };
        let opts = FitOptions::default();
        let theta0 = array![0.5, -0.3];

        // Act
        let out = minimize(&objective, theta0, &(), &opts)
            .expect("Finite-difference minimization should succeed");

        // Assert
        assert!(out.converged, "Expected convergence, status: {}", out.status);
        assert!((out.value - 1.0).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a failing `check` aborts the run before any solver work.
    //
    // Given
    // -----
    // - A starting point containing NaN, which the quadratic's `check`
    //   rejects.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidThetaHat { index: 1, .. })`.
    fn minimize_propagates_check_failure() {
        // Arrange
        let objective = Quadratic { with_grad: true };
        let opts = FitOptions::default();
        let theta0 = array![0.0, f64::NAN];

        // Act
        let result = minimize(&objective, theta0, &(), &opts);

        // Assert
        let err = result.expect_err("NaN starting point should be rejected by check");
        match err {
            OptError::InvalidThetaHat { index: 1, .. } => {}
            other => panic!("Expected InvalidThetaHat, got {other:?}"),
        }
    }
}
