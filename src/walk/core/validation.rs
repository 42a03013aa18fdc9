//! Validation helpers shared across the walk layer.
//!
//! Parameter vectors arrive from user code and from the outer optimizer on
//! every cost evaluation, so the checks live in one place: length against
//! the feature dimension, and finiteness of every entry.
use ndarray::Array1;

use crate::walk::errors::{WalkError, WalkResult};

/// Validate a parameter vector against the feature dimension.
///
/// Checks:
/// - `beta.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`WalkError::DimensionMismatch`] if the length does not match `dim`.
/// - [`WalkError::NonFiniteBeta`] with the index and value of the first
///   offending element.
pub fn validate_beta(beta: &Array1<f64>, dim: usize) -> WalkResult<()> {
    if beta.len() != dim {
        return Err(WalkError::DimensionMismatch { expected: dim, found: beta.len() });
    }
    for (index, &value) in beta.iter().enumerate() {
        if !value.is_finite() {
            return Err(WalkError::NonFiniteBeta { index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Length and finiteness checks in `validate_beta`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a finite vector of the right length passes.
    //
    // Given
    // -----
    // - beta (0.5, -2.0) against dim 2.
    //
    // Expect
    // ------
    // - `Ok(())`.
    fn validate_beta_accepts_finite_vector() {
        assert!(validate_beta(&array![0.5, -2.0], 2).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure a length mismatch is reported with both sizes.
    //
    // Given
    // -----
    // - beta of length 3 against dim 2.
    //
    // Expect
    // ------
    // - `Err(WalkError::DimensionMismatch { expected: 2, found: 3 })`.
    fn validate_beta_rejects_wrong_length() {
        let result = validate_beta(&array![1.0, 2.0, 3.0], 2);

        assert_eq!(result.unwrap_err(), WalkError::DimensionMismatch { expected: 2, found: 3 });
    }

    #[test]
    // Purpose
    // -------
    // Ensure the first non-finite entry is reported by position.
    //
    // Given
    // -----
    // - beta (0.0, inf) against dim 2.
    //
    // Expect
    // ------
    // - `Err(WalkError::NonFiniteBeta { index: 1, .. })`.
    fn validate_beta_rejects_non_finite_entry() {
        let result = validate_beta(&array![0.0, f64::INFINITY], 2);

        assert_eq!(
            result.unwrap_err(),
            WalkError::NonFiniteBeta { index: 1, value: f64::INFINITY }
        );
    }
}
