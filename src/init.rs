//! Fresh per-arm models: the regularization prior before any evidence.

use nalgebra::DMatrix;

use crate::linalg::matrix_rows;
use crate::ModelError;

/// A freshly initialized model: `A = lambda*I`, `A^{-1} = I/lambda`, `b = 0`.
///
/// The dimension and regularization are echoed back for the caller's
/// bookkeeping (the store keys models by worker, not by configuration).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct FreshModel {
    pub matrix_a: Vec<Vec<f64>>,
    pub matrix_a_inverse: Vec<Vec<f64>>,
    pub vector_b: Vec<f64>,
    pub feature_dim: usize,
    pub regularization: f64,
}

/// Produce a fresh model for a newly registered arm.
///
/// Total for `feature_dim >= 1` and finite `regularization > 0`; anything else
/// is a structured error.
pub fn initialize_model(feature_dim: usize, regularization: f64) -> Result<FreshModel, ModelError> {
    if feature_dim == 0 {
        return Err(ModelError::InvalidDimension(feature_dim));
    }
    if !regularization.is_finite() || regularization <= 0.0 {
        return Err(ModelError::InvalidRegularization(regularization));
    }

    let a = DMatrix::from_diagonal_element(feature_dim, feature_dim, regularization);
    let a_inv = DMatrix::from_diagonal_element(feature_dim, feature_dim, 1.0 / regularization);

    Ok(FreshModel {
        matrix_a: matrix_rows(&a),
        matrix_a_inverse: matrix_rows(&a_inv),
        vector_b: vec![0.0; feature_dim],
        feature_dim,
        regularization,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_scaled_identity_pair() {
        let m = initialize_model(3, 4.0).unwrap();
        assert_eq!(m.feature_dim, 3);
        assert_eq!(m.regularization, 4.0);
        assert_eq!(m.vector_b, vec![0.0; 3]);
        for i in 0..3 {
            for j in 0..3 {
                let (a, inv) = (m.matrix_a[i][j], m.matrix_a_inverse[i][j]);
                if i == j {
                    assert_eq!(a, 4.0);
                    assert_eq!(inv, 0.25);
                } else {
                    assert_eq!(a, 0.0);
                    assert_eq!(inv, 0.0);
                }
            }
        }
    }

    #[test]
    fn rejects_degenerate_configuration() {
        assert_eq!(
            initialize_model(0, 1.0),
            Err(ModelError::InvalidDimension(0))
        );
        assert!(matches!(
            initialize_model(4, 0.0),
            Err(ModelError::InvalidRegularization(_))
        ));
        assert!(matches!(
            initialize_model(4, f64::NAN),
            Err(ModelError::InvalidRegularization(_))
        ));
        assert!(matches!(
            initialize_model(4, -1.0),
            Err(ModelError::InvalidRegularization(_))
        ));
    }
}
