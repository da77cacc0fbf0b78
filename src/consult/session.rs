//! Client-side intake state for one chat conversation.
//!
//! The first message is the symptom description. If the service asks
//! follow-up questions, they are put to the user one at a time and the
//! collected answers are submitted together with the original description.

use std::collections::{BTreeMap, VecDeque};

use super::types::{ConsultationRequest, ConsultationResponse, FollowupQuestion};

/// What the chat front end should do with a user message.
#[derive(Debug, Clone, PartialEq)]
pub enum NextStep {
    /// Send this request to the consultation service
    Submit(ConsultationRequest),
    /// Show the next follow-up question; nothing to send yet
    Ask(FollowupQuestion),
}

#[derive(Debug, Default)]
pub struct IntakeSession {
    symptoms: Option<String>,
    pending: VecDeque<FollowupQuestion>,
    answers: BTreeMap<String, String>,
}

impl IntakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The question the next message answers, if any.
    pub fn current_question(&self) -> Option<&FollowupQuestion> {
        self.pending.front()
    }

    pub fn awaiting_answers(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Feed one user message into the session.
    pub fn submit_message(&mut self, message: &str) -> NextStep {
        let Some(question) = self.pending.pop_front() else {
            self.symptoms = Some(message.to_string());
            self.answers.clear();
            return NextStep::Submit(ConsultationRequest::new(message));
        };

        self.answers.insert(question.key, message.to_string());
        if let Some(next) = self.pending.front() {
            return NextStep::Ask(next.clone());
        }

        let symptoms = self.symptoms.clone().unwrap_or_default();
        NextStep::Submit(ConsultationRequest::new(symptoms).with_answers(self.answers.clone()))
    }

    /// Record the service's reply to the last submitted request.
    pub fn absorb(&mut self, response: &ConsultationResponse) {
        if response.requires_followup && !response.followup_questions.is_empty() {
            self.pending = response.followup_questions.iter().cloned().collect();
            self.answers.clear();
        } else {
            self.pending.clear();
            self.answers.clear();
            self.symptoms = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consult::ConsultationService;

    #[test]
    fn test_first_message_is_submitted() {
        let mut session = IntakeSession::new();
        match session.submit_message("bloating") {
            NextStep::Submit(req) => {
                assert_eq!(req.symptoms, Some("bloating".into()));
                assert!(req.followup_answers.is_none());
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_full_followup_round() {
        let service = ConsultationService::default();
        let mut session = IntakeSession::new();

        let NextStep::Submit(req) = session.submit_message("I have severe abdominal pain") else {
            panic!("first message should submit");
        };
        let resp = service.consult(&req).unwrap();
        assert!(resp.requires_followup);
        session.absorb(&resp);
        assert_eq!(session.current_question().unwrap().key, "pain_location");

        let replies = [
            "lower back",
            "severe colicky pain",
            "8",
            "two days",
            "hematuria",
        ];
        let mut last = None;
        for (i, reply) in replies.iter().enumerate() {
            let step = session.submit_message(reply);
            if i + 1 < replies.len() {
                assert!(matches!(step, NextStep::Ask(_)), "step {} should ask", i);
            } else {
                last = Some(step);
            }
        }

        let Some(NextStep::Submit(req)) = last else {
            panic!("final answer should submit");
        };
        assert_eq!(req.symptoms, Some("I have severe abdominal pain".into()));
        assert_eq!(req.followup_answers.as_ref().unwrap().len(), 5);

        let resp = service.consult(&req).unwrap();
        assert_eq!(resp.result.as_ref().unwrap().diagnosis, "Renal Calculi");
        session.absorb(&resp);
        assert!(!session.awaiting_answers());
    }

    #[test]
    fn test_absorb_final_response_resets() {
        let mut session = IntakeSession::new();
        session.submit_message("headache");
        session.absorb(&ConsultationResponse {
            success: true,
            analysis: "done".to_string(),
            followup_questions: vec![],
            requires_followup: false,
            result: None,
        });
        assert!(session.current_question().is_none());
        assert!(matches!(session.submit_message("cough"), NextStep::Submit(_)));
    }
}
