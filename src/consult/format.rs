//! Markdown rendering of analysis results for chat display.

use crate::consult::types::FollowupQuestion;
use crate::matcher::AnalysisResult;

/// Render an analysis result as the chat message shown to the user.
pub fn render_analysis(result: &AnalysisResult) -> String {
    if result.is_default {
        return render_fallback(result);
    }

    let mut sections = vec![format!("**Tentative Diagnosis:** {}", result.diagnosis)];
    if !result.tests.is_empty() {
        sections.push(bulleted("**Recommended Tests:**", &result.tests));
    }
    if !result.treatments.is_empty() {
        sections.push(bulleted("**Treatment Options:**", &result.treatments));
    }
    sections.push(format!("**Follow-up:** {}", result.follow_up));
    sections.join("\n\n")
}

fn render_fallback(result: &AnalysisResult) -> String {
    let mut sections = vec![result.diagnosis.clone()];
    if !result.consider_also.is_empty() {
        sections.push(format!(
            "**Consider also:** {}.",
            result.consider_also.join(", ")
        ));
    }
    sections.push(format!("**Recommendation:** {}", result.follow_up));
    sections.join("\n\n")
}

fn bulleted(heading: &str, items: &[String]) -> String {
    let mut out = heading.to_string();
    for item in items {
        out.push_str("\n• ");
        out.push_str(item);
    }
    out
}

/// Render the follow-up prompt: the intro line, then one question per line.
pub fn render_followup(intro: &str, questions: &[FollowupQuestion]) -> String {
    let mut out = intro.to_string();
    for q in questions {
        out.push('\n');
        out.push_str(&q.prompt);
    }
    out
}
