//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::SymptomateError;

/// Message returned for any analysis failure; details stay in the logs.
pub const ANALYSIS_FAILED_MESSAGE: &str = "Unable to process symptoms at this time";

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::InvalidInput(message) => {
                (StatusCode::BAD_REQUEST, "Invalid input", message)
            }
            ApiError::AnalysisFailed(detail) => {
                tracing::error!("Symptom analysis failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Analysis failed",
                    ANALYSIS_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = ErrorBody {
            error: error.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<SymptomateError> for ApiError {
    fn from(err: SymptomateError) -> Self {
        match err {
            SymptomateError::InvalidInput(message) => ApiError::InvalidInput(message),
            other => ApiError::AnalysisFailed(other.to_string()),
        }
    }
}
