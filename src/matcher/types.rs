//! Type definitions for the symptom rule matcher.
//!
//! Configuration types are deserialized from TOML (the rule table); the
//! result type is serialized to JSON for API clients.

use serde::{Deserialize, Serialize};

// =============================================================================
// CONFIGURATION TYPES (loaded from TOML)
// =============================================================================

/// Root configuration loaded from symptom_rules.toml.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesConfig {
    /// Diagnostic rules in evaluation order (first match wins)
    pub rules: Vec<DiagnosticRule>,
    /// Result reported when no rule matches
    pub fallback: FallbackResult,
}

/// A single row of the rule table.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosticRule {
    /// Stable identifier (e.g., "appendicitis")
    pub id: String,
    /// Diagnosis reported when no variant applies
    pub diagnosis: String,
    /// Phrases that must be present for this rule to match
    pub criteria: Criteria,
    /// Alternative diagnosis names selected by secondary phrases
    #[serde(default)]
    pub variants: Vec<DiagnosisVariant>,
    /// Recommended tests, in display order
    pub tests: Vec<String>,
    /// Recommended treatments, in display order
    pub treatments: Vec<String>,
    /// Follow-up timing or action
    pub follow_up: String,
}

/// Substring criteria over a lower-cased description.
///
/// Every `all_of` phrase must be present, and every `any_of` group must
/// have at least one of its phrases present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Criteria {
    #[serde(default)]
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<Vec<String>>,
}

impl Criteria {
    /// True when the criteria contain no phrase at all.
    pub fn is_empty(&self) -> bool {
        self.all_of.is_empty() && self.any_of.is_empty()
    }

    /// Evaluate against `text`, which must already be lower-cased.
    pub fn matches(&self, text: &str) -> bool {
        self.all_of.iter().all(|phrase| text.contains(phrase.as_str()))
            && self
                .any_of
                .iter()
                .all(|group| group.iter().any(|phrase| text.contains(phrase.as_str())))
    }

    /// Every phrase referenced by these criteria.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.all_of
            .iter()
            .chain(self.any_of.iter().flatten())
            .map(String::as_str)
    }

    pub(crate) fn to_lowercase(&self) -> Criteria {
        Criteria {
            all_of: self.all_of.iter().map(|p| p.to_lowercase()).collect(),
            any_of: self
                .any_of
                .iter()
                .map(|group| group.iter().map(|p| p.to_lowercase()).collect())
                .collect(),
        }
    }
}

/// A diagnosis name that replaces the rule's default when its criteria hold.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnosisVariant {
    pub diagnosis: String,
    pub criteria: Criteria,
}

/// The "inconclusive" entry of the rule table.
#[derive(Debug, Clone, Deserialize)]
pub struct FallbackResult {
    /// Statement shown in place of a diagnosis
    pub message: String,
    /// Other conditions worth ruling out
    pub consider_also: Vec<String>,
    /// What the user should do next
    pub recommendation: String,
}

// =============================================================================
// OUTPUT TYPES (serialized to clients)
// =============================================================================

/// Structured outcome of matching one symptom description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Diagnosis name, or the fallback message when no rule matched
    pub diagnosis: String,
    pub tests: Vec<String>,
    pub treatments: Vec<String>,
    /// Follow-up action, or the fallback recommendation
    pub follow_up: String,
    /// Conditions to rule out (fallback only)
    #[serde(default)]
    pub consider_also: Vec<String>,
    /// Id of the rule that matched
    #[serde(default)]
    pub rule_id: Option<String>,
    /// True when no rule matched
    pub is_default: bool,
}
