//! Consultation layer around the rule matcher.
//!
//! Turns a chat request into a chat reply: input validation, the
//! single-round follow-up questionnaire, markdown rendering, and the
//! client-side intake session that drives the conversation.

pub mod fault;
pub mod followup;
pub mod format;
mod service;
pub mod session;
pub mod suggestions;
mod types;

pub use fault::FaultInjector;
pub use followup::{default_followup, fold_answers, load_followup, FollowupConfig, Questionnaire};
pub use format::{render_analysis, render_followup};
pub use service::{
    validate_symptoms, ConsultationService, INVALID_ANSWERS_MESSAGE, INVALID_SYMPTOMS_MESSAGE,
};
pub use session::{IntakeSession, NextStep};
pub use types::*;
