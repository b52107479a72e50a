//! HTTP route handlers for Axum.

use axum::{extract::State, Json};
use tracing::{debug, info};

use crate::{
    api::types::{HealthResponse, PredictRequest, PredictResponse},
    recommend::{normalise_symptoms, recommend},
};

use super::{error::ApiError, AppState};

type ApiResult<T> = Result<Json<T>, ApiError>;

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        model_loaded: state.model_loaded(),
    })
}

pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> ApiResult<PredictResponse> {
    let text = normalise_symptoms(request.symptoms.as_deref().unwrap_or_default());
    if text.is_empty() {
        return Err(ApiError::MissingSymptoms);
    }
    let scorer = state.scorer().ok_or(ApiError::ModelNotLoaded)?;
    debug!(
        age = ?request.age,
        gender = ?request.gender,
        has_history = request.medical_history.is_some(),
        "ignoring demographic fields"
    );

    let recommendations = recommend(scorer, &text);
    info!(
        top = recommendations.first().map(|r| r.medicine.name.as_str()),
        count = recommendations.len(),
        "served prediction"
    );
    Ok(Json(PredictResponse {
        success: true,
        recommendations,
    }))
}
