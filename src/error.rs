//! Structured failure data for the model operations.
//!
//! Shape problems are the only failures a well-formed caller can trigger, and
//! they always name the conflicting dimensions so the caller can log the error
//! verbatim. Nothing in this crate panics on malformed-but-well-typed input.

use thiserror::Error;

/// Error kinds surfaced by the model operations.
///
/// Singularity is normally *not* an error: the scoring and update paths
/// recover with a ridge perturbation (see [`crate::RidgePerturbation`]).
/// [`ModelError::Singular`] appears only when the perturbed retry fails too.
#[derive(Debug, Clone, PartialEq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ModelError {
    /// Matrix A has no rows.
    #[error("matrix A is empty")]
    EmptyMatrix,

    /// Matrix A is rectangular.
    #[error("matrix A must be square, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },

    /// One row of matrix A disagrees with the others.
    #[error("matrix A row {row} has {actual} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A vector's length disagrees with A's dimension.
    #[error("{name} has length {actual}, expected {expected} to match matrix A ({expected}x{expected})")]
    LengthMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Batch inputs disagree on the number of arms.
    #[error("batch lists disagree: {a_count} A matrices vs {b_count} b vectors")]
    ArmCountMismatch { a_count: usize, b_count: usize },

    /// Requested feature dimension is unusable.
    #[error("feature dimension must be >= 1, got {0}")]
    InvalidDimension(usize),

    /// Requested regularization is unusable.
    #[error("regularization must be finite and > 0, got {0}")]
    InvalidRegularization(f64),

    /// A stayed singular even after the ridge retry.
    #[error("matrix A is singular even after ridge perturbation (epsilon={epsilon:e})")]
    Singular { epsilon: f64 },
}
