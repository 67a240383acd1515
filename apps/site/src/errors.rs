use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::careers::CareerError;

/// Application-level error type for the preview server.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<CareerError> for AppError {
    /// A missing file and a file that fails validation look the same to a
    /// visitor; only read failures surface as server errors.
    fn from(err: CareerError) -> Self {
        if err.is_missing_record() {
            AppError::NotFound(err.to_string())
        } else {
            AppError::Internal(anyhow::Error::new(err))
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => {
                tracing::debug!("Not found: {msg}");
                (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    "Career not found".to_string(),
                )
            }
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
