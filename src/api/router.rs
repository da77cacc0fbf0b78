//! API router.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::consult::ConsultationService;

/// Build the API router.
///
/// CORS is permissive so browser front ends on any origin can call it.
pub fn api_router(service: Arc<ConsultationService>) -> Router {
    let ctx = ApiContext::new(service);

    let api = Router::new()
        .route("/analyze-symptoms", post(endpoints::consult::analyze))
        .route("/followup", post(endpoints::consult::followup))
        .route("/suggestions", get(endpoints::suggestions::list));

    Router::new()
        .route("/health", get(endpoints::health::check))
        .nest("/api", api)
        .with_state(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
