//! UCB scoring for one arm: exploitation estimate plus exploration bonus.
//!
//! Given an arm's accumulators (A, b) and a context x, the score decomposes as
//!
//! ```text
//! theta            = A^{-1} b          (per-feature reward weights)
//! expected_reward  = theta^T x         (exploitation)
//! confidence_width = sqrt(x^T A^{-1} x)  (exploration)
//! ucb              = expected_reward + alpha * confidence_width
//! ```
//!
//! The radicand is clamped at zero before the square root: for well-formed
//! (symmetric PSD) accumulators it is non-negative anyway, and the clamp keeps
//! a tiny negative floating-point residue from poisoning the score.
//!
//! theta is recomputed from (A, b) on every call — it is a derived quantity,
//! never persisted, so a stored model can never drift out of sync with its own
//! point estimate.

use crate::linalg::{parse_square, parse_vector};
use crate::{ModelError, RidgePerturbation};

/// One arm's UCB decomposition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UcbScore {
    /// Final ranking score: `expected_reward + alpha * confidence_width`.
    pub ucb: f64,
    /// Exploitation term `theta^T x`.
    pub expected_reward: f64,
    /// Exploration term `sqrt(x^T A^{-1} x)`.
    pub confidence_width: f64,
    /// Point estimate `A^{-1} b` of the per-feature reward weights.
    pub theta: Vec<f64>,
    /// True when inversion needed the ridge fallback. Audit-only; not part of
    /// the wire contract.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub perturbed: bool,
}

/// Numerically safe exploration strength: non-finite or negative alpha
/// contributes no bonus.
pub(crate) fn sanitize_alpha(alpha: f64) -> f64 {
    if alpha.is_finite() && alpha >= 0.0 {
        alpha
    } else {
        0.0
    }
}

/// Compute the UCB score for one arm with the default singularity recovery.
pub fn compute_ucb(
    matrix_a: &[Vec<f64>],
    vector_b: &[f64],
    context: &[f64],
    alpha: f64,
) -> Result<UcbScore, ModelError> {
    compute_ucb_with(matrix_a, vector_b, context, alpha, RidgePerturbation::default())
}

/// Like [`compute_ucb`], with an explicit singularity-recovery strategy.
pub fn compute_ucb_with(
    matrix_a: &[Vec<f64>],
    vector_b: &[f64],
    context: &[f64],
    alpha: f64,
    ridge: RidgePerturbation,
) -> Result<UcbScore, ModelError> {
    let a = parse_square(matrix_a)?;
    let n = a.nrows();
    let b = parse_vector("vector b", vector_b, n)?;
    let x = parse_vector("context", context, n)?;
    let alpha = sanitize_alpha(alpha);

    let inv = ridge.invert(&a)?;
    let theta = &inv.inverse * &b;
    let expected_reward = theta.dot(&x);
    let variance = (&inv.inverse * &x).dot(&x).max(0.0);
    let confidence_width = variance.sqrt();

    Ok(UcbScore {
        ucb: expected_reward + alpha * confidence_width,
        expected_reward,
        confidence_width,
        theta: theta.iter().copied().collect(),
        perturbed: inv.perturbed,
    })
}
