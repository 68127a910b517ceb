//! `linarm`: exact LinUCB scoring and update primitives for ranking candidate
//! workers against a task context.
//!
//! Designed for the "which arm for this request" problem where each arm (a
//! worker, a backend, a model version) owns a linear reward model over a
//! shared feature space: the caller keeps, per arm, the ridge-regression
//! accumulators `(A, b)`, and this crate turns them into ranking scores and
//! folds observed outcomes back in. Selection itself — argmax, softmax,
//! traffic splitting — is deliberately the caller's code.
//!
//! ## The model
//!
//! Per arm, with feature dimension `d` and regularization `lambda`:
//!
//! ```text
//! A = lambda*I + sum_i x_i x_i^T      (d x d, symmetric PSD by construction)
//! b = sum_i r_i x_i                   (d, reward-weighted feature sum)
//! theta = A^{-1} b                    (derived point estimate, never stored)
//! ```
//!
//! Scoring a context `x` produces `theta^T x + alpha * sqrt(x^T A^{-1} x)` —
//! exploitation plus an uncertainty bonus that shrinks along directions where
//! the arm has accumulated evidence. This is LinUCB (Li, Chu, Langford &
//! Schapire 2010, arXiv:1003.0146); the confidence-ellipsoid view is
//! formalized by Abbasi-Yadkori, Pál & Szepesvári 2011 (arXiv:1102.2670).
//!
//! ## Goals
//!
//! - **Caller-owned state**: every operation is a pure function over the
//!   accumulators passed in; nothing is cached or retained between calls.
//!   The external store serializes read-modify-write per arm; cross-arm calls
//!   need no coordination at all.
//! - **Exact by default**: the update path re-inverts `A'` directly (O(d^3),
//!   microseconds at d=16) and serves as the reference for the optional
//!   Sherman–Morrison O(d^2) fast path ([`update_model_incremental`]).
//! - **Availability over strictness**: a singular `A` on the scoring/update
//!   path is perturbed by `epsilon*I` and retried once ([`RidgePerturbation`])
//!   rather than failing the call; the substitution is observable (a
//!   `perturbed` flag plus a `tracing` warning). Degeneracy is surfaced
//!   operationally through [`validate_model`] instead.
//! - **Structured failure only**: shape mismatches come back as
//!   [`ModelError`] values naming the conflicting dimensions; no operation
//!   panics on malformed-but-well-typed input.
//!
//! ## Quick start
//!
//! ```rust
//! use linarm::{batch_compute_ucb, initialize_model, update_model};
//!
//! // Two workers, 2-dim features.
//! let w0 = initialize_model(2, 1.0).unwrap();
//! let w1 = initialize_model(2, 1.0).unwrap();
//! let ctx = vec![1.0, 0.0];
//!
//! let batch = batch_compute_ucb(
//!     &[w0.matrix_a.clone(), w1.matrix_a.clone()],
//!     &[w0.vector_b.clone(), w1.vector_b.clone()],
//!     &ctx,
//!     0.5,
//! )
//! .unwrap();
//! assert_eq!(batch.total_workers, 2);
//!
//! // The caller argmaxes; suppose worker 0 wins and earns reward 1.0.
//! let next = update_model(&w0.matrix_a, &w0.vector_b, &ctx, 1.0).unwrap();
//! assert_eq!(next.vector_b, vec![1.0, 0.0]);
//! ```
//!
//! ## Non-goals
//!
//! - No persistence, transport, or authentication — the [`wire`] module pins
//!   the request/response field names for the service layer that fronts this
//!   crate, nothing more.
//! - No selection policy or exploration scheduling: scores out, argmax is
//!   yours.
//! - No per-arm bookkeeping (registration, retirement): arms are whatever the
//!   caller's store says they are.

#![forbid(unsafe_code)]

/// Default feature dimension for newly initialized models.
pub const DEFAULT_FEATURE_DIM: usize = 16;

/// Default regularization (prior strength) `lambda`.
pub const DEFAULT_REGULARIZATION: f64 = 1.0;

/// Default exploration strength `alpha`.
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Diagonal bump used by the default singularity recovery
/// ([`RidgePerturbation::default`]).
pub const RIDGE_EPSILON: f64 = 1e-10;

/// Largest `|A - A^T|` entry gap at which A still counts as symmetric.
pub const SYMMETRY_TOL: f64 = 1e-8;

/// Condition numbers at or above this mark a model unhealthy.
pub const MAX_HEALTHY_CONDITION: f64 = 1e10;

mod error;
pub use error::*;

mod linalg;
pub use linalg::{Inversion, RidgePerturbation};

mod init;
pub use init::*;

mod score;
pub use score::*;

mod update;
pub use update::*;

mod batch;
pub use batch::*;

mod validate;
pub use validate::*;

pub mod wire;
