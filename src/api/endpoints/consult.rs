//! Consultation endpoints.
//!
//! Both routes run the same pipeline; `/api/followup` exists for clients
//! that submit answers separately and may name them `answers`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::Value;
use tracing::debug;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::consult::{
    validate_symptoms, ConsultationRequest, ConsultationResponse, INVALID_ANSWERS_MESSAGE,
    INVALID_SYMPTOMS_MESSAGE,
};

/// `POST /api/analyze-symptoms`
pub async fn analyze(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ConsultationResponse>, ApiError> {
    run(&ctx, payload)
}

/// `POST /api/followup`
pub async fn followup(
    State(ctx): State<ApiContext>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ConsultationResponse>, ApiError> {
    run(&ctx, payload)
}

/// The body is checked in two steps so a 400 names the field at fault:
/// `symptoms` first, then the typed request (only answers can fail there).
fn run(
    ctx: &ApiContext,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ConsultationResponse>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::InvalidInput(INVALID_SYMPTOMS_MESSAGE.to_string())
    })?;

    validate_symptoms(body.get("symptoms"))?;
    let request: ConsultationRequest = serde_json::from_value(body).map_err(|e| {
        debug!("Rejected follow-up answers: {}", e);
        ApiError::InvalidInput(INVALID_ANSWERS_MESSAGE.to_string())
    })?;

    let response = ctx.service.consult(&request)?;
    Ok(Json(response))
}
