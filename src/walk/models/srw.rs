//! Supervised random walk model: hinge objective and analytic gradient.
//!
//! This module wires a parameterized random walk to the [`Loss`] trait. Each
//! evaluation builds the teleport-blended transition matrix for the current
//! parameters, solves its stationary distribution, and scores the labeled
//! training pairs with a squared hinge; the gradient chains the transition
//! derivatives through the distribution-gradient solver.
//!
//! Key ideas:
//! - Edge strengths come from a saturating logistic of `features . beta`, so
//!   the objective is smooth in `beta` away from the hinge kink.
//! - Fitting minimizes the objective with L-BFGS through
//!   [`minimize`]; the fitted model caches the optimizer outcome and the
//!   stationary scores at the best parameters.
//! - Prediction ranks non-neighbor candidates by their cached scores, so
//!   repeated queries cost nothing beyond a sort.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loss_optimizer::{Grad, Loss, OptimOutcome, Theta, minimize},
    },
    walk::{
        core::{
            features::EdgeFeatures,
            graph::Graph,
            objective::{objective_gradient, objective_value},
            options::{SRWOptions, WalkConfig},
            sets::TrainingSets,
            solver::{stationary_distribution, uniform_start},
            transition::build_transition,
            validation::validate_beta,
        },
        errors::{GraphError, WalkError, WalkResult},
    },
};
use ndarray::Array1;
use std::collections::HashSet;

/// Supervised random walk link-prediction model.
///
/// Bundles the graph, its edge features, the walk configuration (source,
/// teleport, hinge offset, L2 weight), and solver / optimizer options.
/// After fitting, [`results`](SRWModel::results) stores the optimization
/// outcome and [`scores`](SRWModel::scores) the stationary distribution at
/// the fitted parameters.
///
/// # Notes
/// - Implements [`Loss`] so it plugs directly into the Argmin-based
///   minimizer; the analytic gradient avoids finite-difference fallbacks.
/// - Scores are cached once per fit; `predict` only sorts them.
#[derive(Debug, Clone, PartialEq)]
pub struct SRWModel {
    /// Undirected graph the walk runs on.
    pub graph: Graph,
    /// Per-edge feature vectors.
    pub features: EdgeFeatures,
    /// Source node, teleport probability, hinge offset, and L2 weight.
    pub config: WalkConfig,
    /// Solver tolerances and optimizer options.
    pub options: SRWOptions,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Stationary scores at the fitted parameters (populated after `fit`).
    pub scores: Option<Array1<f64>>,
}

impl SRWModel {
    /// Construct a new [`SRWModel`] from validated parts.
    ///
    /// # Arguments
    /// - `graph`: undirected graph; nodes dense in `0..nnodes`.
    /// - `features`: feature vectors covering exactly the graph's edges.
    /// - `config`: walk configuration; its source must index into `graph`.
    /// - `options`: convergence and fit options.
    ///
    /// # Returns
    /// An unfitted model; `results` and `scores` start empty.
    ///
    /// # Errors
    /// - `WalkError::SourceOutOfRange` when the configured source does not
    ///   index into this graph. The config validates its source against the
    ///   node count it was built with, which need not be this graph's.
    pub fn new(
        graph: Graph, features: EdgeFeatures, config: WalkConfig, options: SRWOptions,
    ) -> WalkResult<SRWModel> {
        if config.source >= graph.nnodes {
            return Err(WalkError::SourceOutOfRange {
                source: config.source,
                nnodes: graph.nnodes,
            });
        }
        Ok(SRWModel { graph, features, config, options, results: None, scores: None })
    }

    /// Fit the walk parameters by minimizing the hinge objective (consumes
    /// `beta0`) and cache results.
    ///
    /// ## Steps
    /// 1. Run L-BFGS per `options.fit_opts`, moving `beta0` into the
    ///    executor; analytic value and gradient come from the [`Loss`]
    ///    impl below.
    /// 2. Rebuild the transition at the best parameters and solve its
    ///    stationary distribution, so the cached scores correspond exactly
    ///    to `theta_hat`, not the last iterate.
    /// 3. Store the outcome and the scores together; on any failure the
    ///    model is left untouched.
    ///
    /// ## Arguments
    /// - `beta0`: initial parameter vector (owned; consumed).
    /// - `sets`: labeled positive and negative node sets.
    ///
    /// ## Returns
    /// - `Ok(())` on success; `self.results` and `self.scores` are
    ///   populated.
    ///
    /// ## Errors
    /// - Optimizer failures from [`minimize`], and walk failures from the
    ///   final scoring pass, both as [`OptError`].
    pub fn fit(&mut self, beta0: Array1<f64>, sets: &TrainingSets) -> OptResult<()> {
        let results = minimize(self, beta0, sets, &self.options.fit_opts)?;
        let trans = build_transition(
            &self.graph,
            &self.features,
            &results.theta_hat,
            self.config.source,
            self.config.teleport,
        )?;
        let dist = stationary_distribution(
            uniform_start(self.graph.nnodes).view(),
            &trans,
            &self.options.convergence,
        )?;
        self.results = Some(results);
        self.scores = Some(dist);
        Ok(())
    }

    /// Rank candidate nodes by their fitted walk scores.
    ///
    /// ## Behavior
    /// 1. Requires a fitted model (`self.scores` present).
    /// 2. Drops the source and its current neighbors; only nodes the
    ///    source could still link to are candidates.
    /// 3. Sorts by score descending, breaking ties by node index
    ///    ascending, and keeps the first `top`.
    ///
    /// ## Arguments
    /// - `top`: maximum number of candidates to return; fewer come back
    ///   when the graph has fewer candidates.
    ///
    /// ## Returns
    /// - `(node, score)` pairs in rank order.
    ///
    /// ## Errors
    /// - Returns [`WalkError::ModelNotFitted`] if called before `fit`.
    pub fn predict(&self, top: usize) -> WalkResult<Vec<(usize, f64)>> {
        let scores = self.scores.as_ref().ok_or(WalkError::ModelNotFitted)?;
        let mut exclude: HashSet<usize> =
            self.graph.neighbors(self.config.source).into_iter().collect();
        exclude.insert(self.config.source);

        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .enumerate()
            .filter(|&(node, _)| !exclude.contains(&node))
            .map(|(node, &score)| (node, score))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(top);
        Ok(ranked)
    }
}

impl Loss for SRWModel {
    type Data = TrainingSets;

    /// Objective evaluation at parameter vector `beta`.
    ///
    /// # Steps
    /// 1. Build the blended transition and solve its stationary
    ///    distribution.
    /// 2. Sum the squared-hinge penalties over the labeled pairs plus the
    ///    L2 term.
    ///
    /// # Arguments
    /// - `beta`: parameter vector (len = feature dimension).
    /// - `data`: labeled training sets.
    ///
    /// # Returns
    /// - Scalar objective value.
    ///
    /// # Errors
    /// - Walk failures surface as [`OptError`] via its conversions.
    fn value(&self, beta: &Theta, data: &Self::Data) -> OptResult<f64> {
        Ok(objective_value(
            &self.graph,
            &self.features,
            &self.config,
            &self.options.convergence,
            data,
            beta,
        )?)
    }

    /// Validate a parameter vector `beta` and the training sets.
    ///
    /// # Behavior
    /// - Checks `beta.len()` against the feature dimension.
    /// - Ensures all entries are finite.
    /// - Confirms every labeled node indexes into this model's graph; the
    ///   sets validate against the node count they were built with, which
    ///   need not be this graph's.
    ///
    /// # Arguments
    /// - `beta`: parameter vector to validate.
    /// - `data`: labeled training sets to cross-check against the graph.
    ///
    /// # Returns
    /// - `Ok(())` if valid, error otherwise.
    fn check(&self, beta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_beta(beta, self.features.dim)?;
        let nnodes = self.graph.nnodes;
        for (set, values) in [("positives", &data.positives), ("negatives", &data.negatives)] {
            for &value in values.iter() {
                if value >= nnodes {
                    return Err(GraphError::SetIndexOutOfRange { set, value, nnodes }.into());
                }
            }
        }
        Ok(())
    }

    /// Analytic gradient of the objective w.r.t. `beta`.
    ///
    /// # Steps
    /// 1. Build the transition, solve the stationary distribution, and
    ///    record the active hinge pairs.
    /// 2. Differentiate the transition per component and solve each
    ///    distribution derivative.
    /// 3. Accumulate the pair slopes and the L2 term.
    ///
    /// # Arguments
    /// - `beta`: parameter vector.
    /// - `data`: labeled training sets.
    ///
    /// # Returns
    /// - Gradient vector of the objective, one entry per component.
    ///
    /// # Errors
    /// - Walk failures surface as [`OptError`] via its conversions.
    fn grad(&self, beta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        Ok(objective_gradient(
            &self.graph,
            &self.features,
            &self.config,
            &self.options.convergence,
            data,
            beta,
        )?)
    }
}

/// One-call training entry point: build every container, fit, and return
/// the fitted parameter vector.
///
/// # Steps
/// 1. Construct [`Graph`], [`EdgeFeatures`] (dimension taken from
///    `beta0`), [`TrainingSets`], and [`WalkConfig`] from the raw inputs.
/// 2. Assemble an [`SRWModel`] under default solver and optimizer options
///    and fit from `beta0`.
/// 3. Return the fitted `theta_hat`.
///
/// # Arguments
/// - `positives` / `negatives`: labeled node sets for the source.
/// - `offset`: hinge offset; `lambda`: L2 weight.
/// - `nnodes` / `edges`: graph description.
/// - `feature_table`: one feature vector per edge, keyed by node pair.
/// - `source`: walk restart node; `teleport`: restart probability.
/// - `beta0`: initial parameter vector; its length fixes the feature
///   dimension.
///
/// # Returns
/// The fitted parameter vector.
///
/// # Errors
/// Container validation failures and optimizer failures, all as
/// [`OptError`].
#[allow(clippy::too_many_arguments)]
pub fn train_model(
    positives: Vec<usize>,
    negatives: Vec<usize>,
    offset: f64,
    lambda: f64,
    nnodes: usize,
    edges: Vec<(usize, usize)>,
    feature_table: Vec<((usize, usize), Array1<f64>)>,
    source: usize,
    teleport: f64,
    beta0: Array1<f64>,
) -> OptResult<Array1<f64>> {
    let dim = beta0.len();
    let graph = Graph::new(nnodes, edges)?;
    let features = EdgeFeatures::new(dim, feature_table, &graph)?;
    let sets = TrainingSets::new(positives, negatives, nnodes)?;
    let config = WalkConfig::new(source, teleport, offset, lambda, nnodes)?;
    let mut model = SRWModel::new(graph, features, config, SRWOptions::default())?;
    model.fit(beta0, &sets)?;
    model
        .results
        .take()
        .map(|results| results.theta_hat)
        .ok_or(OptError::MissingThetaHat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end fitting on a two-branch graph whose features separate
    //   the positive from the negative candidate.
    // - Prediction order, candidate exclusion, and truncation.
    // - The not-fitted error path and cross-container source validation.
    // - `Loss` conformance: dimension and finiteness rejection, plus the
    //   cross-container range check on the training sets.
    // - The one-call `train_model` entry point.
    //
    // These tests intentionally DO NOT cover:
    // - Gradient correctness (finite-difference checks live in
    //   `walk::core::objective`).
    // -------------------------------------------------------------------------

    /// Source 0 with two symmetric branches: 0-1-3 carries feature +1 per
    /// edge, 0-2-4 carries -1. Positive node 3, negative node 4; a positive
    /// fitted parameter routes the walk toward 3.
    fn two_branch_model() -> (SRWModel, TrainingSets) {
        let graph = Graph::new(5, vec![(0, 1), (0, 2), (1, 3), (2, 4)]).unwrap();
        let table = vec![
            ((0, 1), array![1.0]),
            ((0, 2), array![-1.0]),
            ((1, 3), array![1.0]),
            ((2, 4), array![-1.0]),
        ];
        let features = EdgeFeatures::new(1, table, &graph).unwrap();
        let config = WalkConfig::new(0, 0.2, 0.1, 0.01, 5).unwrap();
        let model = SRWModel::new(graph, features, config, SRWOptions::default()).unwrap();
        let sets = TrainingSets::new(vec![3], vec![4], 5).unwrap();
        (model, sets)
    }

    #[test]
    // Purpose
    // -------
    // Fit the two-branch model and verify the fitted parameter, the cached
    // scores, and the prediction order.
    //
    // Given
    // -----
    // - The two-branch fixture with beta0 = (0,); at zero the branches are
    //   symmetric and only the hinge offset drives the fit.
    //
    // Expect
    // ------
    // - The fit converges to a positive parameter without increasing the
    //   objective over its starting value, scores cover every node, and
    //   prediction ranks the positive candidate 3 above the negative
    //   candidate 4 with source and neighbors excluded.
    fn fit_ranks_positive_candidate_first() {
        let (mut model, sets) = two_branch_model();
        let start_value = model.value(&array![0.0], &sets).unwrap();

        model.fit(array![0.0], &sets).unwrap();

        let results = model.results.as_ref().unwrap();
        assert!(results.converged, "unexpected status: {}", results.status);
        assert!(results.value <= start_value, "fit should not increase the objective");
        assert!(results.theta_hat[0] > 0.0);
        assert_eq!(model.scores.as_ref().unwrap().len(), 5);

        let ranked = model.predict(5).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].0, 3);
        assert_eq!(ranked[1].0, 4);
        assert!(ranked[0].1 > ranked[1].1);

        let top_one = model.predict(1).unwrap();
        assert_eq!(top_one, vec![ranked[0]]);
    }

    #[test]
    // Purpose
    // -------
    // Ensure prediction before fitting is rejected.
    //
    // Given
    // -----
    // - The unfitted two-branch fixture.
    //
    // Expect
    // ------
    // - `Err(WalkError::ModelNotFitted)`.
    fn predict_requires_fit() {
        let (model, _sets) = two_branch_model();

        assert_eq!(model.predict(1).unwrap_err(), WalkError::ModelNotFitted);
    }

    #[test]
    // Purpose
    // -------
    // Verify the cross-container source check in the constructor.
    //
    // Given
    // -----
    // - A config whose source 4 is valid for the 5-node count it was built
    //   with, paired with a 3-node graph.
    //
    // Expect
    // ------
    // - `Err(WalkError::SourceOutOfRange { source: 4, nnodes: 3 })`.
    fn new_rejects_source_outside_graph() {
        let graph = Graph::new(3, vec![(0, 1), (1, 2)]).unwrap();
        let table = vec![((0, 1), array![0.0]), ((1, 2), array![0.0])];
        let features = EdgeFeatures::new(1, table, &graph).unwrap();
        let config = WalkConfig::new(4, 0.2, 0.1, 0.0, 5).unwrap();

        let result = SRWModel::new(graph, features, config, SRWOptions::default());

        assert_eq!(
            result.unwrap_err(),
            WalkError::SourceOutOfRange { source: 4, nnodes: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Check `Loss` conformance on invalid parameter vectors.
    //
    // Given
    // -----
    // - A two-entry beta against the one-dimensional fixture, then a NaN
    //   entry.
    //
    // Expect
    // ------
    // - `BetaDimMismatch` from `value`, and an error from `check`.
    fn loss_conformance_rejects_invalid_beta() {
        let (model, sets) = two_branch_model();

        assert_eq!(
            model.value(&array![0.0, 0.0], &sets).unwrap_err(),
            OptError::BetaDimMismatch { expected: 1, found: 2 }
        );
        assert!(model.check(&array![f64::NAN], &sets).is_err());
    }

    #[test]
    // Purpose
    // -------
    // Ensure `check` rejects training sets whose nodes fall outside this
    // model's graph, even when the sets validated against a larger count.
    //
    // Given
    // -----
    // - The 5-node fixture paired with sets built for a 10-node graph,
    //   labeling node 9.
    //
    // Expect
    // ------
    // - An error naming the out-of-range node rather than a later indexing
    //   panic inside the objective.
    fn check_rejects_sets_outside_graph() {
        let (model, _sets) = two_branch_model();
        let foreign = TrainingSets::new(vec![3], vec![9], 10).unwrap();

        let err = model.check(&array![0.0], &foreign).unwrap_err();

        match err {
            OptError::WalkFailure { text } => {
                assert!(text.contains('9'), "message should name the node: {text}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Exercise the one-call training entry point end to end.
    //
    // Given
    // -----
    // - The two-branch inputs passed as raw vectors.
    //
    // Expect
    // ------
    // - A finite, positive fitted parameter of length one.
    fn train_model_returns_fitted_parameters() {
        let theta_hat = train_model(
            vec![3],
            vec![4],
            0.1,
            0.01,
            5,
            vec![(0, 1), (0, 2), (1, 3), (2, 4)],
            vec![
                ((0, 1), array![1.0]),
                ((0, 2), array![-1.0]),
                ((1, 3), array![1.0]),
                ((2, 4), array![-1.0]),
            ],
            0,
            0.2,
            array![0.0],
        )
        .unwrap();

        assert_eq!(theta_hat.len(), 1);
        assert!(theta_hat[0].is_finite());
        assert!(theta_hat[0] > 0.0);
    }
}
