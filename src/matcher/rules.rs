//! TOML rule loading for the symptom matcher.
//!
//! Provides two loading methods:
//! - `default_rules()` - Loads the rule table compiled into the binary
//! - `load_rules(path)` - Loads and validates a custom rule file

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use super::types::{Criteria, RulesConfig};
use crate::error::SymptomateError;

/// Default rules embedded in the binary at compile time.
/// These are loaded from `config/symptom_rules.toml`.
const DEFAULT_RULES: &str = include_str!("../../config/symptom_rules.toml");

/// Load rules from a TOML file at the given path.
///
/// # Returns
/// * `Ok(RulesConfig)` - Parsed and validated rules
/// * `Err` - If the file cannot be read, the TOML is invalid, or a rule is malformed
pub fn load_rules(path: &Path) -> Result<RulesConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules from {:?}", path))?;
    let config = parse_rules(&content).with_context(|| format!("Invalid rules in {:?}", path))?;
    debug!("Loaded {} rules from {:?}", config.rules.len(), path);
    Ok(config)
}

/// Parse and validate a rule table from TOML source.
pub fn parse_rules(content: &str) -> Result<RulesConfig> {
    let config: RulesConfig = toml::from_str(content)?;
    validate_rules(&config)?;
    Ok(config)
}

/// Get the rule table embedded in the binary.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_rules() -> RulesConfig {
    toml::from_str(DEFAULT_RULES).expect("embedded symptom_rules.toml must be valid TOML")
}

/// Reject rule tables that would match unconditionally or never.
pub fn validate_rules(config: &RulesConfig) -> Result<(), SymptomateError> {
    if config.rules.is_empty() {
        return Err(SymptomateError::Rules("rule table has no rules".to_string()));
    }

    let mut seen = HashSet::new();
    for rule in &config.rules {
        if rule.id.trim().is_empty() {
            return Err(SymptomateError::Rules("rule with empty id".to_string()));
        }
        if !seen.insert(rule.id.as_str()) {
            return Err(SymptomateError::Rules(format!("duplicate rule id '{}'", rule.id)));
        }
        if rule.diagnosis.trim().is_empty() {
            return Err(SymptomateError::Rules(format!(
                "rule '{}' has an empty diagnosis",
                rule.id
            )));
        }
        validate_criteria(&rule.id, &rule.criteria)?;
        for variant in &rule.variants {
            if variant.diagnosis.trim().is_empty() {
                return Err(SymptomateError::Rules(format!(
                    "rule '{}' has a variant with an empty diagnosis",
                    rule.id
                )));
            }
            validate_criteria(&rule.id, &variant.criteria)?;
        }
    }

    Ok(())
}

fn validate_criteria(rule_id: &str, criteria: &Criteria) -> Result<(), SymptomateError> {
    if criteria.is_empty() {
        return Err(SymptomateError::Rules(format!(
            "rule '{}' has no criteria",
            rule_id
        )));
    }
    if criteria.any_of.iter().any(|group| group.is_empty()) {
        return Err(SymptomateError::Rules(format!(
            "rule '{}' has an empty any_of group",
            rule_id
        )));
    }
    if criteria.phrases().any(|phrase| phrase.is_empty()) {
        return Err(SymptomateError::Rules(format!(
            "rule '{}' has an empty phrase",
            rule_id
        )));
    }
    Ok(())
}
