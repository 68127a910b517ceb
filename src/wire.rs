//! Request/response envelopes for the external boundary.
//!
//! The core functions speak `Result`; the transport layer that fronts this
//! crate speaks flat objects with `success`/`error` fields and camelCase
//! names. These types pin that contract — the serialized field names are
//! depended on by existing callers and must not drift. Conversions from the
//! core result types keep the (out-of-scope) HTTP shell to a few lines:
//! deserialize the request, call `evaluate`, serialize the response.
//!
//! With the `serde` feature off, the types remain plain data carriers.

use crate::{
    batch_compute_ucb, compute_ucb, initialize_model, update_model, validate_model, BatchUcb,
    FreshModel, ModelDiagnostics, ModelError, UcbScore, UpdatedModel, WorkerScore,
};
#[cfg(feature = "serde")]
use crate::{DEFAULT_ALPHA, DEFAULT_FEATURE_DIM, DEFAULT_REGULARIZATION};

#[cfg(feature = "serde")]
fn default_alpha() -> f64 {
    DEFAULT_ALPHA
}

#[cfg(feature = "serde")]
fn default_feature_dim() -> usize {
    DEFAULT_FEATURE_DIM
}

#[cfg(feature = "serde")]
fn default_regularization() -> f64 {
    DEFAULT_REGULARIZATION
}

// ============================================================================
// Requests
// ============================================================================

/// `compute_ucb` request; `alpha` defaults to 0.5 when omitted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UcbRequest {
    pub matrix_a: Vec<Vec<f64>>,
    pub vector_b: Vec<f64>,
    pub context: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default = "default_alpha"))]
    pub alpha: f64,
}

impl UcbRequest {
    pub fn evaluate(&self) -> UcbResponse {
        compute_ucb(&self.matrix_a, &self.vector_b, &self.context, self.alpha).into()
    }
}

/// `update_model` request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UpdateRequest {
    pub matrix_a: Vec<Vec<f64>>,
    pub vector_b: Vec<f64>,
    pub context: Vec<f64>,
    pub reward: f64,
}

impl UpdateRequest {
    pub fn evaluate(&self) -> UpdateResponse {
        update_model(&self.matrix_a, &self.vector_b, &self.context, self.reward).into()
    }
}

/// `batch_compute_ucb` request; `alpha` defaults to 0.5 when omitted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BatchUcbRequest {
    pub matrix_a_list: Vec<Vec<Vec<f64>>>,
    pub vector_b_list: Vec<Vec<f64>>,
    pub context: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default = "default_alpha"))]
    pub alpha: f64,
}

impl BatchUcbRequest {
    pub fn evaluate(&self) -> BatchUcbResponse {
        batch_compute_ucb(
            &self.matrix_a_list,
            &self.vector_b_list,
            &self.context,
            self.alpha,
        )
        .into()
    }
}

/// `initialize_model` request; both fields have documented defaults.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct InitializeRequest {
    #[cfg_attr(feature = "serde", serde(default = "default_feature_dim"))]
    pub feature_dim: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_regularization"))]
    pub regularization: f64,
}

impl InitializeRequest {
    pub fn evaluate(&self) -> InitializeResponse {
        initialize_model(self.feature_dim, self.regularization).into()
    }
}

/// `validate_model` request.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ValidateRequest {
    pub matrix_a: Vec<Vec<f64>>,
    pub vector_b: Vec<f64>,
}

impl ValidateRequest {
    pub fn evaluate(&self) -> ValidateResponse {
        validate_model(&self.matrix_a, &self.vector_b).into()
    }
}

// ============================================================================
// Responses
// ============================================================================

/// `compute_ucb` response envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UcbResponse {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ucb: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub expected_reward: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub confidence_width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub theta: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl From<Result<UcbScore, ModelError>> for UcbResponse {
    fn from(r: Result<UcbScore, ModelError>) -> Self {
        match r {
            Ok(s) => Self {
                success: true,
                ucb: Some(s.ucb),
                expected_reward: Some(s.expected_reward),
                confidence_width: Some(s.confidence_width),
                theta: Some(s.theta),
                error: None,
            },
            Err(e) => Self {
                success: false,
                ucb: None,
                expected_reward: None,
                confidence_width: None,
                theta: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// `update_model` response envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct UpdateResponse {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub matrix_a: Option<Vec<Vec<f64>>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub matrix_a_inverse: Option<Vec<Vec<f64>>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vector_b: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl From<Result<UpdatedModel, ModelError>> for UpdateResponse {
    fn from(r: Result<UpdatedModel, ModelError>) -> Self {
        match r {
            Ok(m) => Self {
                success: true,
                matrix_a: Some(m.matrix_a),
                matrix_a_inverse: Some(m.matrix_a_inverse),
                vector_b: Some(m.vector_b),
                error: None,
            },
            Err(e) => Self {
                success: false,
                matrix_a: None,
                matrix_a_inverse: None,
                vector_b: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// One arm's entry in a batch response.
///
/// `worker_index` is populated on failures so the caller can map the entry
/// back to its arm even after filtering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct WorkerUcbResponse {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub ucb: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub expected_reward: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub confidence_width: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub theta: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub worker_index: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl From<&WorkerScore> for WorkerUcbResponse {
    fn from(w: &WorkerScore) -> Self {
        match &w.result {
            Ok(s) => Self {
                success: true,
                ucb: Some(s.ucb),
                expected_reward: Some(s.expected_reward),
                confidence_width: Some(s.confidence_width),
                theta: Some(s.theta.clone()),
                worker_index: None,
                error: None,
            },
            Err(e) => Self {
                success: false,
                ucb: None,
                expected_reward: None,
                confidence_width: None,
                theta: None,
                worker_index: Some(w.worker_index),
                error: Some(e.to_string()),
            },
        }
    }
}

/// `batch_compute_ucb` response envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BatchUcbResponse {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub results: Option<Vec<WorkerUcbResponse>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub total_workers: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub success_count: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl From<Result<BatchUcb, ModelError>> for BatchUcbResponse {
    fn from(r: Result<BatchUcb, ModelError>) -> Self {
        match r {
            Ok(b) => Self {
                success: true,
                results: Some(b.results.iter().map(WorkerUcbResponse::from).collect()),
                total_workers: Some(b.total_workers),
                success_count: Some(b.success_count),
                error: None,
            },
            Err(e) => Self {
                success: false,
                results: None,
                total_workers: None,
                success_count: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// `initialize_model` response envelope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct InitializeResponse {
    pub success: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub matrix_a: Option<Vec<Vec<f64>>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub matrix_a_inverse: Option<Vec<Vec<f64>>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub vector_b: Option<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub feature_dim: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub regularization: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl From<Result<FreshModel, ModelError>> for InitializeResponse {
    fn from(r: Result<FreshModel, ModelError>) -> Self {
        match r {
            Ok(m) => Self {
                success: true,
                matrix_a: Some(m.matrix_a),
                matrix_a_inverse: Some(m.matrix_a_inverse),
                vector_b: Some(m.vector_b),
                feature_dim: Some(m.feature_dim),
                regularization: Some(m.regularization),
                error: None,
            },
            Err(e) => Self {
                success: false,
                matrix_a: None,
                matrix_a_inverse: None,
                vector_b: None,
                feature_dim: None,
                regularization: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// `validate_model` response envelope (tagged `valid`, not `success`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ValidateResponse {
    pub valid: bool,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub feature_dim: Option<usize>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub condition_number: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_symmetric: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_positive_definite: Option<bool>,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "hasNaN", default, skip_serializing_if = "Option::is_none")
    )]
    pub has_nan: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub has_inf: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub is_healthy: Option<bool>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub recommendation: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl From<Result<ModelDiagnostics, ModelError>> for ValidateResponse {
    fn from(r: Result<ModelDiagnostics, ModelError>) -> Self {
        match r {
            Ok(d) => Self {
                valid: true,
                feature_dim: Some(d.feature_dim),
                condition_number: Some(d.condition_number),
                is_symmetric: Some(d.is_symmetric),
                is_positive_definite: Some(d.is_positive_definite),
                has_nan: Some(d.has_nan),
                has_inf: Some(d.has_inf),
                is_healthy: Some(d.is_healthy),
                recommendation: Some(d.recommendation),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                feature_dim: None,
                condition_number: None,
                is_symmetric: None,
                is_positive_definite: None,
                has_nan: None,
                has_inf: None,
                is_healthy: None,
                recommendation: None,
                error: Some(e.to_string()),
            },
        }
    }
}
