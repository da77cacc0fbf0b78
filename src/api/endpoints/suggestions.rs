//! Common symptom patterns for intake UIs.

use axum::Json;
use serde::Serialize;

use crate::consult::suggestions::COMMON_PATTERNS;

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: &'static [&'static str],
}

/// `GET /api/suggestions`
pub async fn list() -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse {
        suggestions: COMMON_PATTERNS,
    })
}
