//! Request failures and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::ErrorBody;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("symptoms is required")]
    MissingSymptoms,
    #[error("Model not loaded. Train first.")]
    ModelNotLoaded,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingSymptoms => StatusCode::BAD_REQUEST,
            Self::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
