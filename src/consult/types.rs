//! Request/response types for consultations.
//!
//! Field names follow the JSON the chat front end already speaks
//! (`followupAnswers`, `requiresFollowup`, ...).

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::matcher::AnalysisResult;

/// Inbound consultation payload.
///
/// `symptoms` is kept as raw JSON so a non-string value can be reported as
/// an input error instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<Value>,
    /// Answers to follow-up questions, keyed by question key. Scalar answers
    /// (e.g. a numeric severity) are stored as text; `null` answers are dropped.
    #[serde(
        default,
        alias = "answers",
        deserialize_with = "deserialize_answers",
        skip_serializing_if = "Option::is_none"
    )]
    pub followup_answers: Option<BTreeMap<String, String>>,
}

impl ConsultationRequest {
    pub fn new(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: Some(Value::String(symptoms.into())),
            followup_answers: None,
        }
    }

    pub fn with_answers(mut self, answers: BTreeMap<String, String>) -> Self {
        self.followup_answers = Some(answers);
        self
    }
}

fn deserialize_answers<'de, D>(
    deserializer: D,
) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<BTreeMap<String, Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let mut answers = BTreeMap::new();
    for (key, value) in raw {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => continue,
            Value::Array(_) | Value::Object(_) => {
                return Err(D::Error::custom(format!(
                    "answer '{}' must be a string",
                    key
                )));
            }
        };
        answers.insert(key, text);
    }
    Ok(Some(answers))
}

/// A follow-up question asked when the description is too vague.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupQuestion {
    /// Answer key (e.g., "pain_location")
    pub key: String,
    /// Question text shown to the user
    pub prompt: String,
}

/// Outbound consultation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationResponse {
    pub success: bool,
    /// Display text (markdown)
    pub analysis: String,
    #[serde(default)]
    pub followup_questions: Vec<FollowupQuestion>,
    #[serde(default)]
    pub requires_followup: bool,
    /// Structured match result, absent while follow-up is pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
}
