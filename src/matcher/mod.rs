//! Symptom-to-diagnosis rule matcher.
//!
//! This module provides a TOML-driven rule table and the engine that
//! evaluates free-text symptom descriptions against it.
//!
//! # Architecture
//!
//! - **Rules**: Loaded from TOML at startup (or the embedded defaults)
//! - **Criteria**: `all_of` phrases plus `any_of` phrase groups, matched as
//!   case-insensitive exact substrings
//! - **Evaluation**: Rules are tried in declaration order; first match wins
//! - **Fallback**: An "inconclusive" result when no rule matches
//!
//! # Example
//!
//! ```ignore
//! use symptomate::matcher::{default_rules, RuleEngine};
//!
//! let engine = RuleEngine::new(default_rules());
//! let result = engine.analyze("dull discomfort in epigastric region, \
//!     localized pain at McBurney's point, rebound tenderness");
//!
//! assert_eq!(result.diagnosis, "Appendicitis");
//! for test in &result.tests {
//!     println!("Order: {}", test);
//! }
//! ```

mod engine;
mod rules;
mod types;

pub use engine::RuleEngine;
pub use rules::{default_rules, load_rules, parse_rules, validate_rules};
pub use types::*;
