//! Single-round follow-up questionnaire.
//!
//! When a description mentions a trigger phrase (e.g., "abdominal pain") but
//! matches no rule, the user is asked a fixed set of questions once. Their
//! answers are folded into the description for the second attempt.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::types::FollowupQuestion;

/// Default questionnaire embedded at compile time from
/// `config/followup_questions.toml`.
const DEFAULT_FOLLOWUP: &str = include_str!("../../config/followup_questions.toml");

/// Questionnaire definition loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct FollowupConfig {
    /// Line shown above the questions
    pub intro: String,
    /// Phrases that make a non-matching description worth asking about
    pub triggers: Vec<String>,
    /// Questions in the order they are asked
    pub questions: Vec<FollowupQuestion>,
}

/// Get the questionnaire embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_followup() -> FollowupConfig {
    toml::from_str(DEFAULT_FOLLOWUP).expect("embedded followup_questions.toml must be valid TOML")
}

/// Load a questionnaire from a TOML file.
pub fn load_followup(path: &Path) -> Result<FollowupConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read follow-up questions from {:?}", path))?;
    let config: FollowupConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid follow-up questions in {:?}", path))?;
    debug!(
        "Loaded {} follow-up questions from {:?}",
        config.questions.len(),
        path
    );
    Ok(config)
}

/// Decides whether a consultation needs a follow-up round.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    config: FollowupConfig,
}

impl Questionnaire {
    pub fn new(mut config: FollowupConfig) -> Self {
        config.triggers = config
            .triggers
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { config }
    }

    pub fn intro(&self) -> &str {
        &self.config.intro
    }

    /// Questions to ask for this description.
    ///
    /// Empty once any non-blank answer has been supplied: there is only one
    /// round.
    pub fn pending_questions(
        &self,
        symptom_text: &str,
        answers: &BTreeMap<String, String>,
    ) -> Vec<FollowupQuestion> {
        if answers.values().any(|a| !a.trim().is_empty()) {
            return Vec::new();
        }
        let text = symptom_text.to_lowercase();
        if self.config.triggers.iter().any(|t| text.contains(t.as_str())) {
            self.config.questions.clone()
        } else {
            Vec::new()
        }
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new(default_followup())
    }
}

/// Append non-blank answers to the description, one per line.
///
/// Phrases never span a newline, so an answer cannot combine with its
/// neighbour to satisfy a rule.
pub fn fold_answers(symptoms: &str, answers: &BTreeMap<String, String>) -> String {
    let mut text = symptoms.to_string();
    for answer in answers.values().map(|a| a.trim()).filter(|a| !a.is_empty()) {
        text.push('\n');
        text.push_str(answer);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_followup_loads() {
        let config = default_followup();
        let keys: Vec<_> = config.questions.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "pain_location",
                "pain_character",
                "pain_severity",
                "pain_duration",
                "associated_symptoms"
            ]
        );
        assert!(config.intro.starts_with("To help narrow down the diagnosis"));
    }

    #[test]
    fn test_trigger_asks_all_questions() {
        let q = Questionnaire::default();
        let pending = q.pending_questions("I have Abdominal Pain", &BTreeMap::new());
        assert_eq!(pending.len(), 5);
        assert_eq!(pending[0].key, "pain_location");
    }

    #[test]
    fn test_no_trigger_asks_nothing() {
        let q = Questionnaire::default();
        assert!(q.pending_questions("I have a headache", &BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_answers_close_the_round() {
        let q = Questionnaire::default();
        let given = answers(&[("pain_location", "lower")]);
        assert!(q.pending_questions("bloating", &given).is_empty());
    }

    #[test]
    fn test_blank_answers_keep_the_round_open() {
        let q = Questionnaire::default();
        let given = answers(&[("pain_location", "  "), ("pain_severity", "")]);
        assert_eq!(q.pending_questions("bloating", &given).len(), 5);
    }

    #[test]
    fn test_fold_answers_orders_by_key_and_skips_blank() {
        let given = answers(&[
            ("pain_severity", "7"),
            ("pain_location", "  lower left  "),
            ("pain_duration", "   "),
        ]);
        assert_eq!(fold_answers("bloating", &given), "bloating\nlower left\n7");
    }

    #[test]
    fn test_fold_answers_without_answers() {
        assert_eq!(fold_answers("bloating", &BTreeMap::new()), "bloating");
    }

    #[test]
    fn test_load_followup_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("followup.toml");
        std::fs::write(
            &path,
            r#"
            intro = "Tell me more:"
            triggers = ["Cough"]

            [[questions]]
            key = "duration"
            prompt = "How long?"
            "#,
        )
        .unwrap();

        let q = Questionnaire::new(load_followup(&path).unwrap());
        assert_eq!(q.intro(), "Tell me more:");
        let pending = q.pending_questions("a dry cough", &BTreeMap::new());
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].prompt, "How long?");
    }
}
