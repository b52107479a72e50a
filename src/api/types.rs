//! JSON request and response bodies.

use serde::{Deserialize, Serialize};

use crate::recommend::Recommendation;

/// `POST /predict` body. Only `symptoms` feeds the model; the rest is accepted and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictRequest {
    pub symptoms: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub medical_history: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    pub success: bool,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub ok: bool,
    pub model_loaded: bool,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}
