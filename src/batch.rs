//! Fan-out scoring: one shared task context, many candidate arms.
//!
//! Each arm is scored independently, so a malformed arm poisons only its own
//! entry — partial failure is an expected outcome, not an error for the batch.
//! The per-arm computations share no state; callers that need more throughput
//! can split the lists and run chunks on separate threads without any
//! coordination here.

use crate::score::compute_ucb_with;
use crate::{ModelError, RidgePerturbation, UcbScore};

/// Score (or shape failure) for one arm of a batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct WorkerScore {
    /// Position of this arm in the input lists.
    pub worker_index: usize,
    /// The arm's score, or the failure that disqualified it.
    pub result: Result<UcbScore, ModelError>,
}

impl WorkerScore {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Batch output: one entry per arm, in input order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct BatchUcb {
    pub results: Vec<WorkerScore>,
    pub total_workers: usize,
    pub success_count: usize,
}

/// Score every arm against the shared context with the default recovery.
///
/// The two lists must pair up one-to-one; a length disagreement is a
/// whole-call error (there is no way to attribute the leftover entries).
pub fn batch_compute_ucb(
    matrix_a_list: &[Vec<Vec<f64>>],
    vector_b_list: &[Vec<f64>],
    context: &[f64],
    alpha: f64,
) -> Result<BatchUcb, ModelError> {
    batch_compute_ucb_with(
        matrix_a_list,
        vector_b_list,
        context,
        alpha,
        RidgePerturbation::default(),
    )
}

/// Like [`batch_compute_ucb`], with an explicit singularity-recovery strategy.
pub fn batch_compute_ucb_with(
    matrix_a_list: &[Vec<Vec<f64>>],
    vector_b_list: &[Vec<f64>],
    context: &[f64],
    alpha: f64,
    ridge: RidgePerturbation,
) -> Result<BatchUcb, ModelError> {
    if matrix_a_list.len() != vector_b_list.len() {
        return Err(ModelError::ArmCountMismatch {
            a_count: matrix_a_list.len(),
            b_count: vector_b_list.len(),
        });
    }

    let mut results = Vec::with_capacity(matrix_a_list.len());
    let mut success_count = 0usize;
    for (i, (a, b)) in matrix_a_list.iter().zip(vector_b_list.iter()).enumerate() {
        let result = compute_ucb_with(a, b, context, alpha, ridge);
        if result.is_ok() {
            success_count += 1;
        }
        results.push(WorkerScore {
            worker_index: i,
            result,
        });
    }

    Ok(BatchUcb {
        total_workers: results.len(),
        success_count,
        results,
    })
}
