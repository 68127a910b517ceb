//! Numerical health inspection for a persisted model.
//!
//! Diagnostic-only: this is the operational "should we reset this arm?" probe,
//! not part of the scoring/update hot path. Findings are reported as data —
//! the caller decides what to do with an unhealthy model; nothing here throws
//! for a merely degenerate matrix.
//!
//! Checks run in order: shape consistency, NaN/Inf presence, condition
//! number, symmetry, positive definiteness (attempted Cholesky). The
//! decomposition-based probes are skipped when non-finite entries are present
//! — factoring a NaN matrix tells you nothing the NaN flag didn't.

use crate::linalg::{
    condition_number, is_positive_definite, non_finite_flags, parse_square, parse_vector,
    symmetry_gap,
};
use crate::{ModelError, MAX_HEALTHY_CONDITION, SYMMETRY_TOL};

/// Recommendation string for a model that passes every check.
pub const RECOMMEND_HEALTHY: &str = "Model is healthy";
/// Recommendation string for a model that fails any check.
pub const RECOMMEND_RESET: &str = "Consider resetting model";

/// The full diagnostic record for one model.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ModelDiagnostics {
    pub feature_dim: usize,
    /// Ratio of extreme singular values of A; NaN when A has non-finite
    /// entries, infinite when A is numerically singular.
    pub condition_number: f64,
    pub is_symmetric: bool,
    pub is_positive_definite: bool,
    #[cfg_attr(feature = "serde", serde(rename = "hasNaN"))]
    pub has_nan: bool,
    pub has_inf: bool,
    /// No NaN/Inf, condition number under `1e10`, symmetric, and positive
    /// definite.
    pub is_healthy: bool,
    pub recommendation: String,
}

/// Inspect a model's accumulators for numerical health.
///
/// Shape mismatches are the only error path; every numeric finding is data in
/// the returned [`ModelDiagnostics`].
pub fn validate_model(
    matrix_a: &[Vec<f64>],
    vector_b: &[f64],
) -> Result<ModelDiagnostics, ModelError> {
    let a = parse_square(matrix_a)?;
    let n = a.nrows();
    let b = parse_vector("vector b", vector_b, n)?;

    let (has_nan, has_inf) = non_finite_flags(&a, &b);
    let finite = !has_nan && !has_inf;

    let condition_number = if finite {
        condition_number(&a)
    } else {
        f64::NAN
    };
    let is_symmetric = finite && symmetry_gap(&a) <= SYMMETRY_TOL;
    let is_positive_definite = finite && is_positive_definite(&a);

    let is_healthy = finite
        && condition_number < MAX_HEALTHY_CONDITION
        && is_symmetric
        && is_positive_definite;

    Ok(ModelDiagnostics {
        feature_dim: n,
        condition_number,
        is_symmetric,
        is_positive_definite,
        has_nan,
        has_inf,
        is_healthy,
        recommendation: if is_healthy {
            RECOMMEND_HEALTHY
        } else {
            RECOMMEND_RESET
        }
        .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect()
    }

    #[test]
    fn fresh_identity_model_is_healthy() {
        let d = validate_model(&identity(4), &[0.0; 4]).unwrap();
        assert!(d.is_healthy);
        assert_eq!(d.feature_dim, 4);
        assert!((d.condition_number - 1.0).abs() < 1e-9);
        assert!(d.is_symmetric);
        assert!(d.is_positive_definite);
        assert!(!d.has_nan);
        assert!(!d.has_inf);
        assert_eq!(d.recommendation, RECOMMEND_HEALTHY);
    }

    #[test]
    fn one_nan_entry_overrides_everything() {
        let mut a = identity(3);
        a[1][1] = f64::NAN;
        let d = validate_model(&a, &[0.0; 3]).unwrap();
        assert!(d.has_nan);
        assert!(!d.is_healthy);
        assert!(d.condition_number.is_nan());
        assert_eq!(d.recommendation, RECOMMEND_RESET);
    }

    #[test]
    fn inf_in_b_is_flagged_too() {
        let d = validate_model(&identity(2), &[0.0, f64::INFINITY]).unwrap();
        assert!(d.has_inf);
        assert!(!d.has_nan);
        assert!(!d.is_healthy);
    }

    #[test]
    fn asymmetry_marks_the_model_unhealthy() {
        let mut a = identity(2);
        a[0][1] = 0.5; // one-sided: A != A^T
        let d = validate_model(&a, &[0.0, 0.0]).unwrap();
        assert!(!d.is_symmetric);
        assert!(!d.is_healthy);
    }

    #[test]
    fn indefinite_matrix_fails_cholesky() {
        // Symmetric, finite, condition number 1 — but not positive definite.
        let a = vec![vec![1.0, 0.0], vec![0.0, -1.0]];
        let d = validate_model(&a, &[0.0, 0.0]).unwrap();
        assert!((d.condition_number - 1.0).abs() < 1e-9);
        assert!(d.is_symmetric);
        assert!(!d.is_positive_definite);
        assert!(!d.is_healthy);
    }

    #[test]
    fn singular_matrix_reports_infinite_condition() {
        let a = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        let d = validate_model(&a, &[0.0, 0.0]).unwrap();
        assert!(d.condition_number.is_infinite());
        assert!(!d.is_healthy);
    }

    #[test]
    fn shape_mismatch_is_an_error_not_a_finding() {
        assert!(validate_model(&identity(2), &[0.0; 3]).is_err());
        assert!(validate_model(&[vec![1.0, 0.0]], &[0.0]).is_err());
    }
}
