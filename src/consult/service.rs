//! Consultation service: validation, follow-up handling, matching, rendering.
//!
//! Sits between a transport (HTTP handler, chat client) and the rule
//! matcher:
//! 1. Validates the symptom text
//! 2. Folds follow-up answers into the description
//! 3. Runs the matcher
//! 4. Asks follow-up questions or renders the result

use std::collections::BTreeMap;

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info};

use super::fault::FaultInjector;
use super::followup::{default_followup, fold_answers, load_followup, Questionnaire};
use super::format::{render_analysis, render_followup};
use super::types::{ConsultationRequest, ConsultationResponse};
use crate::config::AppConfig;
use crate::error::SymptomateError;
use crate::matcher::{default_rules, load_rules, RuleEngine};

/// Message returned for missing or non-string symptom text.
pub const INVALID_SYMPTOMS_MESSAGE: &str = "Symptoms must be provided as a string";

/// Message returned when follow-up answers are not a map of scalar values.
pub const INVALID_ANSWERS_MESSAGE: &str = "Follow-up answers must be strings";

/// Validate the raw `symptoms` field of a request.
///
/// Missing, `null`, non-string and empty values are rejected. Whitespace-only
/// text is accepted and simply matches no rule.
pub fn validate_symptoms(value: Option<&Value>) -> Result<&str, SymptomateError> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.as_str()),
        _ => Err(SymptomateError::InvalidInput(
            INVALID_SYMPTOMS_MESSAGE.to_string(),
        )),
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConsultationService {
    engine: RuleEngine,
    questionnaire: Questionnaire,
    faults: FaultInjector,
}

impl ConsultationService {
    pub fn new(engine: RuleEngine, questionnaire: Questionnaire, faults: FaultInjector) -> Self {
        Self {
            engine,
            questionnaire,
            faults,
        }
    }

    /// Build the service from configuration, loading custom rule and
    /// questionnaire files when configured.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let rules = match &config.rules_path {
            Some(path) => load_rules(path)?,
            None => default_rules(),
        };
        let followup = match &config.followup_path {
            Some(path) => load_followup(path)?,
            None => default_followup(),
        };
        let faults = FaultInjector::with_rate(config.fault_rate)?;

        let engine = RuleEngine::new(rules);
        info!(
            "Consultation service ready: {} rules, {} follow-up questions, fault injection {}",
            engine.rule_ids().len(),
            followup.questions.len(),
            if faults.is_enabled() { "on" } else { "off" }
        );

        Ok(Self::new(engine, Questionnaire::new(followup), faults))
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Run one consultation.
    pub fn consult(
        &self,
        request: &ConsultationRequest,
    ) -> Result<ConsultationResponse, SymptomateError> {
        let symptoms = validate_symptoms(request.symptoms.as_ref())?;
        self.faults.check()?;

        let empty = BTreeMap::new();
        let answers = request.followup_answers.as_ref().unwrap_or(&empty);
        let text = fold_answers(symptoms, answers);
        let result = self.engine.analyze(&text);

        if result.is_default {
            let questions = self.questionnaire.pending_questions(&text, answers);
            if !questions.is_empty() {
                debug!("No rule matched; asking {} follow-up questions", questions.len());
                return Ok(ConsultationResponse {
                    success: true,
                    analysis: render_followup(self.questionnaire.intro(), &questions),
                    followup_questions: questions,
                    requires_followup: true,
                    result: None,
                });
            }
        }

        info!(
            "Consultation complete: rule={}, answers={}",
            result.rule_id.as_deref().unwrap_or("<none>"),
            answers.len()
        );

        Ok(ConsultationResponse {
            success: true,
            analysis: render_analysis(&result),
            followup_questions: Vec::new(),
            requires_followup: false,
            result: Some(result),
        })
    }
}
