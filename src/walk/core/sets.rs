//! Training-set container for supervised random walk models.
//!
//! Purpose
//! -------
//! Hold the two labeled node sets a training run ranks against each other:
//! positives (nodes the source actually linked to later) and negatives
//! (nodes it did not). The hinge objective compares every negative score
//! against every positive score, so both sets must be non-empty, in range,
//! duplicate-free, and disjoint.
//!
//! Downstream usage
//! ----------------
//! - `walk::core::objective` iterates the cross product of the two sets to
//!   accumulate pairwise penalties; `walk::models::srw` threads this
//!   container through fitting as the loss data.
use std::collections::HashSet;

use crate::walk::errors::{GraphError, GraphResult};

/// `TrainingSets` — labeled positive and negative node sets for one source.
///
/// Purpose
/// -------
/// Carry the supervision signal for a single training run: which candidate
/// nodes the source connected to (positives) and which it did not
/// (negatives). Validation happens once, at construction.
///
/// Fields
/// ------
/// - `positives`: `Vec<usize>`
///   Nodes the source formed a link to; scores here should come out high.
/// - `negatives`: `Vec<usize>`
///   Nodes the source did not link to; scores here should come out low.
///
/// Invariants
/// ----------
/// - Both sets are non-empty.
/// - Every index is `< nnodes`; no index repeats within a set.
/// - The two sets are disjoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingSets {
    /// Future-link nodes; the objective pushes their scores up.
    pub positives: Vec<usize>,
    /// No-link nodes; the objective pushes their scores down.
    pub negatives: Vec<usize>,
}

impl TrainingSets {
    /// Construct validated [`TrainingSets`] for a graph with `nnodes` nodes.
    ///
    /// Parameters
    /// ----------
    /// - `positives`: `Vec<usize>`
    ///   Future-link node indices. Must be non-empty.
    /// - `negatives`: `Vec<usize>`
    ///   No-link node indices. Must be non-empty.
    /// - `nnodes`: `usize`
    ///   Number of nodes in the graph both sets index into.
    ///
    /// Returns
    /// -------
    /// `GraphResult<TrainingSets>`
    ///   - `Ok(TrainingSets)` if all invariants hold.
    ///   - `Err(GraphError)` otherwise.
    ///
    /// Errors
    /// ------
    /// - `GraphError::EmptyTrainingSet { set }` when either set is empty.
    /// - `GraphError::SetIndexOutOfRange { set, value, nnodes }` when an
    ///   index is `>= nnodes`.
    /// - `GraphError::DuplicateSetIndex { set, value }` when an index
    ///   repeats within one set.
    /// - `GraphError::OverlappingSets { node }` when a node appears in both
    ///   sets.
    ///
    /// Panics
    /// ------
    /// - Never panics. All invalid inputs are reported via `GraphError`.
    pub fn new(
        positives: Vec<usize>,
        negatives: Vec<usize>,
        nnodes: usize,
    ) -> GraphResult<TrainingSets> {
        let positive_set = Self::validate_side("positives", &positives, nnodes)?;
        let negative_set = Self::validate_side("negatives", &negatives, nnodes)?;

        for node in &positive_set {
            if negative_set.contains(node) {
                return Err(GraphError::OverlappingSets { node: *node });
            }
        }

        Ok(TrainingSets { positives, negatives })
    }

    // ---- Helper Methods ----

    /// Check one side for emptiness, range, and duplicates; return its
    /// index set for the disjointness check.
    fn validate_side(
        set: &'static str,
        values: &[usize],
        nnodes: usize,
    ) -> GraphResult<HashSet<usize>> {
        if values.is_empty() {
            return Err(GraphError::EmptyTrainingSet { set });
        }
        let mut seen = HashSet::with_capacity(values.len());
        for &value in values {
            if value >= nnodes {
                return Err(GraphError::SetIndexOutOfRange { set, value, nnodes });
            }
            if !seen.insert(value) {
                return Err(GraphError::DuplicateSetIndex { set, value });
            }
        }
        Ok(seen)
    }
}
