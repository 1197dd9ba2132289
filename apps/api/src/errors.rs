use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Only pre-flight failures live here. Individual model-call failures never
/// become an `AppError`; the pipeline renders them inline instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please upload your CV or paste text.")]
    MissingInput,

    #[error("API key not found. Check your .env file.")]
    MissingCredential,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingInput => (StatusCode::BAD_REQUEST, "MISSING_INPUT", self.to_string()),
            AppError::MissingCredential => {
                tracing::error!("Review rejected: model API credential is not configured");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "MISSING_CREDENTIAL",
                    self.to_string(),
                )
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
