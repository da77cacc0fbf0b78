//! Example descriptions offered by intake UIs as one-click starting points.

/// Common symptom patterns, one per well-known rule.
pub const COMMON_PATTERNS: &[&str] = &[
    "I have intermittent lower abdominal pain, pain relieved by defecation, and alternating constipation and diarrhea",
    "I'm experiencing sudden, severe pain worsening with movement, a high-grade fever, and rebound tenderness",
    "I have dramatic abdominal distention, fecal vomiting, and high-pitched bowel sounds",
    "I feel a pulsating periumbilical mass and my doctor heard a systolic bruit over aorta",
    "I have dull discomfort in epigastric region, localized pain at McBurney's point, and rebound tenderness",
    "I'm having sharp lower abdominal pain, vaginal bleeding, and a history of amenorrhea",
    "I have severe back pain with severe colicky pain and hematuria",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::RuleEngine;

    #[test]
    fn test_every_pattern_resolves_to_a_distinct_rule() {
        let engine = RuleEngine::default();
        let mut seen = std::collections::HashSet::new();
        for pattern in COMMON_PATTERNS {
            let result = engine.analyze(pattern);
            assert!(!result.is_default, "'{}' should match a rule", pattern);
            assert!(
                seen.insert(result.rule_id.clone()),
                "'{}' duplicates another suggestion",
                pattern
            );
        }
    }
}
