//! Symptom intake service.
//!
//! Matches free-text abdominal symptom descriptions against an ordered
//! clinical rule table and serves the result as a chat-style consultation
//! over HTTP.

pub mod api;
pub mod client;
pub mod config;
pub mod consult;
mod error;
pub mod matcher;

use std::sync::Arc;

pub use config::AppConfig;
pub use consult::{ConsultationRequest, ConsultationResponse, ConsultationService};
pub use error::SymptomateError;
pub use matcher::{AnalysisResult, RuleEngine};

/// Install the global tracing subscriber. `RUST_LOG` wins over
/// `default_filter`. Safe to call more than once.
pub fn init_tracing(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .try_init();
}

/// Load configuration and serve the API until Ctrl-C.
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.log_filter);

    let service = Arc::new(ConsultationService::from_config(&config)?);
    api::serve(&config, service).await
}
