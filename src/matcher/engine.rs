//! Rule evaluation engine for symptom matching.
//!
//! The `RuleEngine` walks the rule table in order and reports the first
//! rule whose criteria hold for the description.

use tracing::debug;

use super::rules::default_rules;
use super::types::*;

/// The rule evaluation engine.
///
/// Holds an immutable, case-normalized copy of the rule table. Evaluation
/// takes `&self` and has no side effects, so one engine can be shared
/// across any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RulesConfig,
}

impl RuleEngine {
    /// Create a new rule engine from the given rule table.
    ///
    /// Criteria phrases are lower-cased once here so evaluation only has to
    /// normalize the input.
    pub fn new(rules: RulesConfig) -> Self {
        let rules = RulesConfig {
            rules: rules
                .rules
                .into_iter()
                .map(|rule| DiagnosticRule {
                    criteria: rule.criteria.to_lowercase(),
                    variants: rule
                        .variants
                        .into_iter()
                        .map(|v| DiagnosisVariant {
                            criteria: v.criteria.to_lowercase(),
                            diagnosis: v.diagnosis,
                        })
                        .collect(),
                    ..rule
                })
                .collect(),
            fallback: rules.fallback,
        };
        Self { rules }
    }

    /// Match a free-text symptom description against the rule table.
    ///
    /// Returns the first matching rule's result, or the fallback result
    /// when nothing matches (including empty input).
    pub fn analyze(&self, symptom_text: &str) -> AnalysisResult {
        let text = symptom_text.to_lowercase();

        match self.matching_rule(&text) {
            Some(rule) => {
                let diagnosis = rule
                    .variants
                    .iter()
                    .find(|v| v.criteria.matches(&text))
                    .map_or(&rule.diagnosis, |v| &v.diagnosis);

                debug!(
                    "Description ({} bytes) matched rule '{}' -> {}",
                    text.len(),
                    rule.id,
                    diagnosis
                );

                AnalysisResult {
                    diagnosis: diagnosis.clone(),
                    tests: rule.tests.clone(),
                    treatments: rule.treatments.clone(),
                    follow_up: rule.follow_up.clone(),
                    consider_also: Vec::new(),
                    rule_id: Some(rule.id.clone()),
                    is_default: false,
                }
            }
            None => {
                debug!("Description ({} bytes) matched no rule", text.len());
                self.fallback_result()
            }
        }
    }

    /// First rule whose criteria hold for `text` (already lower-cased).
    fn matching_rule(&self, text: &str) -> Option<&DiagnosticRule> {
        self.rules.rules.iter().find(|r| r.criteria.matches(text))
    }

    /// The result returned when no rule matches.
    pub fn fallback_result(&self) -> AnalysisResult {
        let fallback = &self.rules.fallback;
        AnalysisResult {
            diagnosis: fallback.message.clone(),
            tests: Vec::new(),
            treatments: Vec::new(),
            follow_up: fallback.recommendation.clone(),
            consider_also: fallback.consider_also.clone(),
            rule_id: None,
            is_default: true,
        }
    }

    /// Rule ids in evaluation order.
    pub fn rule_ids(&self) -> Vec<&str> {
        self.rules.rules.iter().map(|r| r.id.as_str()).collect()
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&DiagnosticRule> {
        self.rules.rules.iter().find(|r| r.id == id)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::parse_rules;

    const GALLBLADDER: &str = "smooth, sausage-shaped mass below liver, severe RUQ pain, Murphy's sign";

    fn make_engine() -> RuleEngine {
        RuleEngine::default()
    }

    #[test]
    fn test_ibs_match() {
        let result = make_engine().analyze(
            "Intermittent lower abdominal pain, pain relieved by defecation, \
             alternating constipation and diarrhea",
        );
        assert_eq!(result.diagnosis, "Irritable Bowel Syndrome");
        assert!(result.tests.contains(&"Colonoscopy".to_string()));
        assert_eq!(result.follow_up, "As needed");
        assert_eq!(result.rule_id.as_deref(), Some("irritable_bowel_syndrome"));
        assert!(!result.is_default);
    }

    #[test]
    fn test_gallbladder_variant_selection() {
        let engine = make_engine();

        let with_fever = engine.analyze(&format!("{}, chills and low-grade fever", GALLBLADDER));
        assert_eq!(with_fever.diagnosis, "Cholecystitis");

        let without = engine.analyze(GALLBLADDER);
        assert_eq!(without.diagnosis, "Cholelithiasis");

        // Only one of the two secondary phrases keeps the base diagnosis
        let chills_only = engine.analyze(&format!("{}, chills", GALLBLADDER));
        assert_eq!(chills_only.diagnosis, "Cholelithiasis");

        assert_eq!(with_fever.tests, without.tests);
        assert_eq!(with_fever.treatments, without.treatments);
        assert_eq!(with_fever.follow_up, without.follow_up);
    }

    #[test]
    fn test_small_bowel_any_of_group() {
        let engine = make_engine();
        for sounds in ["hypoactive bowel sounds", "hyperactive bowel sounds"] {
            let result = engine.analyze(&format!("{} and colicky periumbilical pain", sounds));
            assert_eq!(result.diagnosis, "Small-bowel Obstruction");
        }
        let result = engine.analyze("colicky periumbilical pain");
        assert!(result.is_default);
    }

    #[test]
    fn test_renal_calculi_match() {
        let result =
            make_engine().analyze("severe back pain, severe colicky pain, hematuria since morning");
        assert_eq!(result.diagnosis, "Renal Calculi");
        assert_eq!(result.follow_up, "Urologic referral if chronic");
    }

    #[test]
    fn test_first_match_wins_across_overlapping_rules() {
        // Satisfies both Peritonitis and Appendicitis; Peritonitis is declared first.
        let result = make_engine().analyze(
            "dull discomfort in epigastric region, localized pain at mcburney's point, \
             rebound tenderness, sudden, severe pain worsening with movement, high-grade fever",
        );
        assert_eq!(result.rule_id.as_deref(), Some("peritonitis"));
    }

    #[test]
    fn test_empty_input_returns_fallback() {
        let engine = make_engine();
        assert_eq!(engine.analyze(""), engine.fallback_result());
        assert_eq!(engine.analyze("   \n\t"), engine.fallback_result());
    }

    #[test]
    fn test_fallback_result_shape() {
        let result = make_engine().fallback_result();
        assert!(result.is_default);
        assert!(result.rule_id.is_none());
        assert!(result.tests.is_empty());
        assert!(result.treatments.is_empty());
        assert!(result.consider_also.contains(&"perforated ulcer".to_string()));
    }

    #[test]
    fn test_mixed_case_phrases_in_custom_rules() {
        let rules = parse_rules(
            r#"
            [[rules]]
            id = "shouty"
            diagnosis = "Shouty"
            tests = ["T"]
            treatments = ["R"]
            follow_up = "F"
            [rules.criteria]
            all_of = ["Sharp PAIN"]

            [fallback]
            message = "none"
            consider_also = []
            recommendation = "r"
            "#,
        )
        .unwrap();
        let engine = RuleEngine::new(rules);
        assert_eq!(engine.analyze("a sharp pain").diagnosis, "Shouty");
        assert_eq!(engine.analyze("A SHARP PAIN").diagnosis, "Shouty");
    }

    #[test]
    fn test_rule_lookup() {
        let engine = make_engine();
        assert_eq!(engine.rule_ids().len(), 12);
        assert_eq!(engine.rule_ids()[0], "irritable_bowel_syndrome");
        assert_eq!(engine.rule("appendicitis").unwrap().diagnosis, "Appendicitis");
        assert!(engine.rule("nonexistent").is_none());
    }
}
