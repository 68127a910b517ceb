//! Dense-matrix plumbing at the API boundary.
//!
//! Inputs arrive as plain nested lists (the wire shape); everything internal
//! is `nalgebra` dense types. Shape validation happens here, once, so the
//! numeric modules can assume consistent dimensions throughout.

use nalgebra::{Cholesky, DMatrix, DVector};

use crate::{ModelError, RIDGE_EPSILON};

/// Parse a nested-list matrix, requiring it to be square.
pub(crate) fn parse_square(rows: &[Vec<f64>]) -> Result<DMatrix<f64>, ModelError> {
    let n = rows.len();
    if n == 0 {
        return Err(ModelError::EmptyMatrix);
    }
    let width = rows[0].len();
    for (i, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ModelError::RaggedRow {
                row: i,
                expected: width,
                actual: row.len(),
            });
        }
    }
    if width != n {
        return Err(ModelError::NonSquare { rows: n, cols: width });
    }
    Ok(DMatrix::from_fn(n, n, |i, j| rows[i][j]))
}

/// Parse a vector, requiring its length to match the matrix dimension `n`.
pub(crate) fn parse_vector(
    name: &'static str,
    values: &[f64],
    n: usize,
) -> Result<DVector<f64>, ModelError> {
    if values.len() != n {
        return Err(ModelError::LengthMismatch {
            name,
            expected: n,
            actual: values.len(),
        });
    }
    Ok(DVector::from_column_slice(values))
}

/// Convert back to the nested-list wire shape (row-major).
pub(crate) fn matrix_rows(m: &DMatrix<f64>) -> Vec<Vec<f64>> {
    (0..m.nrows())
        .map(|i| (0..m.ncols()).map(|j| m[(i, j)]).collect())
        .collect()
}

/// Result of an inversion attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Inversion {
    /// The computed inverse (of A, or of `A + epsilon*I` when `perturbed`).
    pub inverse: DMatrix<f64>,
    /// True when the ridge fallback was needed.
    pub perturbed: bool,
}

/// Recovery strategy for singular accumulator matrices.
///
/// The scoring and update paths prefer availability over strictness: when A
/// has no inverse, `A + epsilon*I` is inverted instead, exactly once. The
/// substitution is reported through [`Inversion::perturbed`] and a
/// warning-level `tracing` event; the call itself still succeeds. A model
/// whose A is genuinely degenerate will show up in `validate_model` (condition
/// number, positive definiteness) — that is the caller's cue to reset it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RidgePerturbation {
    /// Diagonal bump added to A before the single retry.
    pub epsilon: f64,
}

impl Default for RidgePerturbation {
    fn default() -> Self {
        Self {
            epsilon: RIDGE_EPSILON,
        }
    }
}

impl RidgePerturbation {
    /// Invert `a`, falling back to `a + epsilon*I` if it is singular.
    pub fn invert(&self, a: &DMatrix<f64>) -> Result<Inversion, ModelError> {
        if let Some(inverse) = a.clone().try_inverse() {
            return Ok(Inversion {
                inverse,
                perturbed: false,
            });
        }

        tracing::warn!(
            dim = a.nrows(),
            epsilon = self.epsilon,
            "matrix A is singular; retrying inversion with ridge perturbation"
        );

        let mut bumped = a.clone();
        for i in 0..bumped.nrows() {
            bumped[(i, i)] += self.epsilon;
        }
        match bumped.try_inverse() {
            Some(inverse) => Ok(Inversion {
                inverse,
                perturbed: true,
            }),
            None => Err(ModelError::Singular {
                epsilon: self.epsilon,
            }),
        }
    }
}

/// (has_nan, has_inf) over both accumulators.
pub(crate) fn non_finite_flags(a: &DMatrix<f64>, b: &DVector<f64>) -> (bool, bool) {
    let has_nan = a.iter().any(|v| v.is_nan()) || b.iter().any(|v| v.is_nan());
    let has_inf = a.iter().any(|v| v.is_infinite()) || b.iter().any(|v| v.is_infinite());
    (has_nan, has_inf)
}

/// Largest absolute entry of `A - A^T`.
pub(crate) fn symmetry_gap(a: &DMatrix<f64>) -> f64 {
    let n = a.nrows();
    let mut gap = 0.0_f64;
    for i in 0..n {
        for j in (i + 1)..n {
            gap = gap.max((a[(i, j)] - a[(j, i)]).abs());
        }
    }
    gap
}

/// Spectral condition number: ratio of extreme singular values.
///
/// Infinite when the smallest singular value is numerically zero.
pub(crate) fn condition_number(a: &DMatrix<f64>) -> f64 {
    let sv = a.singular_values();
    let max = sv.max();
    let min = sv.min();
    if min <= 0.0 {
        f64::INFINITY
    } else {
        max / min
    }
}

/// Positive definiteness via attempted Cholesky factorization.
pub(crate) fn is_positive_definite(a: &DMatrix<f64>) -> bool {
    Cholesky::new(a.clone()).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_square_rejects_bad_shapes() {
        assert_eq!(parse_square(&[]), Err(ModelError::EmptyMatrix));
        assert_eq!(
            parse_square(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]),
            Err(ModelError::NonSquare { rows: 3, cols: 2 })
        );
        assert_eq!(
            parse_square(&[vec![1.0, 2.0], vec![3.0]]),
            Err(ModelError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn invert_reports_no_perturbation_for_invertible_input() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 4.0]);
        let inv = RidgePerturbation::default().invert(&a).unwrap();
        assert!(!inv.perturbed);
        assert!((inv.inverse[(0, 0)] - 0.5).abs() < 1e-12);
        assert!((inv.inverse[(1, 1)] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn invert_perturbs_singular_input_once() {
        // Rank-1 matrix: exactly singular.
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let inv = RidgePerturbation::default().invert(&a).unwrap();
        assert!(inv.perturbed);
        assert!(inv.inverse.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn invert_honors_custom_epsilon() {
        let a = DMatrix::from_row_slice(1, 1, &[0.0]);
        let inv = RidgePerturbation { epsilon: 0.5 }.invert(&a).unwrap();
        assert!(inv.perturbed);
        assert!((inv.inverse[(0, 0)] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn condition_number_of_scaled_identity_is_one() {
        let a = DMatrix::from_diagonal_element(4, 4, 3.5);
        assert!((condition_number(&a) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn symmetry_gap_sees_one_sided_drift() {
        let mut a = DMatrix::identity(3, 3);
        a[(0, 2)] = 0.25;
        assert!((symmetry_gap(&a) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn cholesky_rejects_indefinite_matrix() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, -1.0]);
        assert!(!is_positive_definite(&a));
        assert!(is_positive_definite(&DMatrix::identity(2, 2)));
    }
}
