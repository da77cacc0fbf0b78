//! HTTP client for the consultation API.
//!
//! `analyze_symptoms` never fails: any transport, status or decode error is
//! turned into an apologetic reply so a chat front end always has something
//! to show.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tracing::warn;

use crate::api::endpoints::health::HealthResponse;
use crate::consult::{ConsultationRequest, ConsultationResponse, IntakeSession, NextStep};

pub const CONNECTION_FAILURE_MESSAGE: &str = "I'm sorry, I'm having trouble connecting to the medical analysis service. Please try again later or consult a healthcare professional directly.";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ConsultationClient {
    client: reqwest::Client,
    base_url: String,
}

impl ConsultationClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("symptomate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit symptoms (and any follow-up answers) for analysis.
    pub async fn analyze_symptoms(
        &self,
        symptoms: &str,
        answers: &BTreeMap<String, String>,
    ) -> ConsultationResponse {
        let mut request = ConsultationRequest::new(symptoms);
        if !answers.is_empty() {
            request = request.with_answers(answers.clone());
        }
        self.submit(&request).await
    }

    /// Submit a prepared request, falling back to the connection-failure reply.
    pub async fn submit(&self, request: &ConsultationRequest) -> ConsultationResponse {
        match self.try_submit(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Consultation request failed: {:#}", e);
                connection_failure()
            }
        }
    }

    async fn try_submit(&self, request: &ConsultationRequest) -> Result<ConsultationResponse> {
        let url = format!("{}/api/analyze-symptoms", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "HTTP {} {} from {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                url
            );
        }

        response
            .json::<ConsultationResponse>()
            .await
            .context("Failed to decode consultation response")
    }

    /// Query `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", url))?;

        if !response.status().is_success() {
            bail!("Health check returned HTTP {}", response.status().as_u16());
        }
        response
            .json::<HealthResponse>()
            .await
            .context("Failed to decode health response")
    }

    /// Handle one chat message and return the text to show the user.
    ///
    /// While follow-up questions are outstanding, each message answers the
    /// next question and nothing is sent until the last one is answered.
    pub async fn send_message(&self, session: &mut IntakeSession, message: &str) -> String {
        match session.submit_message(message) {
            NextStep::Ask(question) => question.prompt,
            NextStep::Submit(request) => {
                let response = self.submit(&request).await;
                session.absorb(&response);
                response.analysis
            }
        }
    }
}

fn connection_failure() -> ConsultationResponse {
    ConsultationResponse {
        success: false,
        analysis: CONNECTION_FAILURE_MESSAGE.to_string(),
        followup_questions: Vec::new(),
        requires_followup: false,
        result: None,
    }
}
