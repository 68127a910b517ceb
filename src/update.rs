//! Folding one observed (context, reward) pair into an arm's accumulators.
//!
//! Canonical LinUCB update:
//!
//! ```text
//! A' = A + x x^T    (rank-1 evidence accumulation)
//! b' = b + r x      (reward-weighted feature sum)
//! ```
//!
//! The returned inverse is recomputed by direct inversion of `A'` — O(d^3),
//! exact, and the reference against which the Sherman–Morrison fast path is
//! tested. At the dimensions this crate targets (d around 16) the difference
//! is microseconds; pick the fast path only when update volume demands it.
//!
//! Updates commute: both A' and b' are plain sums, so applying (x1, r1) then
//! (x2, r2) lands on the same accumulators as the opposite order or a single
//! combined rank-2 step. Concurrent observations for one arm can therefore be
//! applied in any order, provided the caller's store serializes the
//! read-modify-write cycle per arm.

use crate::linalg::{matrix_rows, parse_square, parse_vector};
use crate::{ModelError, RidgePerturbation};

/// Denominator floor for the Sherman–Morrison rank-1 step; below it the fast
/// path falls back to exact re-inversion.
const MIN_RANK1_DENOM: f64 = 1e-12;

/// The successor model produced by one update.
///
/// The caller persists all three fields as the arm's new state; nothing is
/// retained on this side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UpdatedModel {
    pub matrix_a: Vec<Vec<f64>>,
    pub matrix_a_inverse: Vec<Vec<f64>>,
    pub vector_b: Vec<f64>,
    /// True when inversion needed the ridge fallback. Audit-only; not part of
    /// the wire contract.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub perturbed: bool,
}

/// Numerically safe clamp for scalar rewards.
pub(crate) fn clamp01(r: f64) -> f64 {
    if !r.is_finite() {
        return 0.0;
    }
    r.clamp(0.0, 1.0)
}

/// Fold one observation into the model, re-inverting `A'` exactly.
pub fn update_model(
    matrix_a: &[Vec<f64>],
    vector_b: &[f64],
    context: &[f64],
    reward: f64,
) -> Result<UpdatedModel, ModelError> {
    update_model_with(matrix_a, vector_b, context, reward, RidgePerturbation::default())
}

/// Like [`update_model`], with an explicit singularity-recovery strategy.
pub fn update_model_with(
    matrix_a: &[Vec<f64>],
    vector_b: &[f64],
    context: &[f64],
    reward: f64,
    ridge: RidgePerturbation,
) -> Result<UpdatedModel, ModelError> {
    let a = parse_square(matrix_a)?;
    let n = a.nrows();
    let b = parse_vector("vector b", vector_b, n)?;
    let x = parse_vector("context", context, n)?;
    let r = clamp01(reward);

    let a_next = &a + &x * x.transpose();
    let b_next = &b + &x * r;
    let inv = ridge.invert(&a_next)?;

    Ok(UpdatedModel {
        matrix_a: matrix_rows(&a_next),
        matrix_a_inverse: matrix_rows(&inv.inverse),
        vector_b: b_next.iter().copied().collect(),
        perturbed: inv.perturbed,
    })
}

/// Sherman–Morrison fast path: O(d^2) instead of O(d^3).
///
/// Takes the previously persisted inverse alongside (A, b) and applies the
/// rank-1 identity
///
/// ```text
/// (A + x x^T)^{-1} = A^{-1} - (A^{-1} x)(A^{-1} x)^T / (1 + x^T A^{-1} x)
/// ```
///
/// When the denominator is non-finite or too small to divide by, the call
/// falls back to exact re-inversion of `A'`, so the result is always a usable
/// triple. Agrees with [`update_model`] to tight tolerance for
/// well-conditioned inputs.
pub fn update_model_incremental(
    matrix_a: &[Vec<f64>],
    matrix_a_inverse: &[Vec<f64>],
    vector_b: &[f64],
    context: &[f64],
    reward: f64,
) -> Result<UpdatedModel, ModelError> {
    let a = parse_square(matrix_a)?;
    let n = a.nrows();
    let a_inv = parse_square(matrix_a_inverse)?;
    if a_inv.nrows() != n {
        return Err(ModelError::LengthMismatch {
            name: "matrix A inverse",
            expected: n,
            actual: a_inv.nrows(),
        });
    }
    let b = parse_vector("vector b", vector_b, n)?;
    let x = parse_vector("context", context, n)?;
    let r = clamp01(reward);

    let a_next = &a + &x * x.transpose();
    let b_next = &b + &x * r;

    let ax = &a_inv * &x;
    let denom = 1.0 + ax.dot(&x);
    let (inverse, perturbed) = if denom.is_finite() && denom > MIN_RANK1_DENOM {
        (&a_inv - (&ax * ax.transpose()) / denom, false)
    } else {
        let inv = RidgePerturbation::default().invert(&a_next)?;
        (inv.inverse, inv.perturbed)
    };

    Ok(UpdatedModel {
        matrix_a: matrix_rows(&a_next),
        matrix_a_inverse: matrix_rows(&inverse),
        vector_b: b_next.iter().copied().collect(),
        perturbed,
    })
}
