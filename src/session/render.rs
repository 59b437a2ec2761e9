//! Render instructions emitted by the session controller.
//!
//! These are pure data payloads: the controller describes what should be
//! on screen and the view layer decides how to draw it.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which screen the view should be showing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Quiz,
    Result,
}

/// Instruction to display a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderQuestion {
    /// 1-based question number.
    pub question_number: usize,
    pub total_questions: usize,
    /// Fraction of questions completed, 0-100. Zero at the first question:
    /// progress counts questions answered, not questions seen.
    pub progress_percent: f64,
    pub prompt: String,
    /// Choice labels in original order.
    pub choice_labels: Vec<String>,
}

/// Visual state of one choice while feedback is displayed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FeedbackState {
    /// The one true answer, always highlighted.
    Correct,
    /// The chosen answer, when it was wrong.
    IncorrectSelected,
    Neutral,
}

/// One choice with its feedback state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChoiceFeedback {
    pub label: String,
    pub state: FeedbackState,
}

/// Instruction to display answer feedback for every choice of the
/// current question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderFeedback {
    pub choices: Vec<ChoiceFeedback>,
}

/// Instruction to display the final result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderResult {
    pub score: usize,
    pub total: usize,
    pub message: String,
}

/// Everything the controller asks of its environment.
///
/// `ScheduleAdvance` is the controller's only scheduling need: deliver
/// [`SessionEvent::AdvanceDue`](super::SessionEvent::AdvanceDue) once after
/// the given delay. The runtime owns the timer; tests skip it and deliver
/// the event directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScreenTransition(Screen),
    Question(RenderQuestion),
    Feedback(RenderFeedback),
    Result(RenderResult),
    ScheduleAdvance(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_payload_serialization() {
        let payload = RenderQuestion {
            question_number: 1,
            total_questions: 5,
            progress_percent: 0.0,
            prompt: "Capital of France?".to_string(),
            choice_labels: vec!["Paris".to_string(), "Berlin".to_string()],
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"question_number\":1"));
        let back: RenderQuestion = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);

        let feedback = ChoiceFeedback {
            label: "Paris".to_string(),
            state: FeedbackState::Correct,
        };
        let json = serde_json::to_string(&feedback).unwrap();
        assert!(json.contains("\"state\":\"Correct\""));
    }
}
