//! The quiz session controller.
//!
//! A single-threaded state machine driven by inbound [`SessionEvent`]s.
//! Each handled event mutates the session and returns the [`Effect`]s the
//! environment should carry out. Events that have no handler in the
//! current phase are silently dropped.

use std::fmt;
use std::time::Duration;

use crate::models::Question;

use super::render::{
    ChoiceFeedback, Effect, FeedbackState, RenderFeedback, RenderQuestion, RenderResult, Screen,
};

/// How long answer feedback stays on screen before advancing.
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1000);

/// Position in the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    AwaitingAnswer,
    ShowingFeedback,
    Finished,
}

/// Inbound events from the UI and the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    StartRequested,
    /// The user picked the choice at this index of the current question.
    AnswerSelected(usize),
    RestartRequested,
    /// The feedback delay elapsed. Delivered only by the scheduler.
    AdvanceDue,
}

/// Mutable state of one quiz attempt. Replaced wholesale on start and
/// restart so no feedback state leaks between attempts.
#[derive(Debug)]
struct SessionState {
    /// Next question to answer; equal to the question count when finished.
    current_index: usize,
    score: usize,
    /// Set while feedback is displayed, blocking resubmission.
    input_locked: bool,
    phase: Phase,
}

impl SessionState {
    fn new() -> Self {
        Self {
            current_index: 0,
            score: 0,
            input_locked: false,
            phase: Phase::NotStarted,
        }
    }
}

/// A malformed question set, rejected at construction.
#[derive(Debug)]
pub enum SessionError {
    /// The question set is empty.
    EmptyQuestionSet,
    /// A question has fewer than two choices.
    TooFewChoices { question: usize },
    /// A question does not have exactly one correct choice.
    NoSingleCorrectChoice { question: usize },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::EmptyQuestionSet => {
                write!(f, "question set must contain at least one question")
            }
            SessionError::TooFewChoices { question } => {
                write!(f, "question {} must have at least two choices", question + 1)
            }
            SessionError::NoSingleCorrectChoice { question } => {
                write!(
                    f,
                    "question {} must have exactly one correct choice",
                    question + 1
                )
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// The quiz session controller.
///
/// Owns the question set and the state of the current attempt. The view
/// layer never reads questions from it directly; everything it needs
/// arrives through emitted [`Effect`]s.
pub struct SessionController {
    questions: Vec<Question>,
    state: SessionState,
}

impl SessionController {
    /// Create a controller over a fixed question set.
    ///
    /// Rejects an empty set, and any question without at least two
    /// choices and exactly one correct one.
    pub fn new(questions: Vec<Question>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionSet);
        }
        for (index, question) in questions.iter().enumerate() {
            if question.choices.len() < 2 {
                return Err(SessionError::TooFewChoices { question: index });
            }
            if question.correct_index().is_none() {
                return Err(SessionError::NoSingleCorrectChoice { question: index });
            }
        }

        Ok(Self {
            questions,
            state: SessionState::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn score(&self) -> usize {
        self.state.score
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Handle one inbound event, returning the effects to carry out.
    ///
    /// Returns an empty vec for any event the current phase has no
    /// handler for; out-of-phase events are not errors.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        use SessionEvent::*;

        match (self.state.phase, event) {
            // Restart is equivalent to Start: a fresh attempt, nothing
            // carried over.
            (Phase::NotStarted | Phase::Finished, StartRequested | RestartRequested) => {
                self.begin()
            }
            (Phase::AwaitingAnswer, AnswerSelected(choice)) => self.submit(choice),
            // A duplicate AdvanceDue lands here as ignored: the first one
            // already left ShowingFeedback.
            (Phase::ShowingFeedback, AdvanceDue) => self.advance(),
            _ => Vec::new(),
        }
    }

    fn begin(&mut self) -> Vec<Effect> {
        self.state = SessionState {
            phase: Phase::AwaitingAnswer,
            ..SessionState::new()
        };
        vec![
            Effect::ScreenTransition(Screen::Quiz),
            Effect::Question(self.render_question()),
        ]
    }

    fn submit(&mut self, choice: usize) -> Vec<Effect> {
        if self.state.input_locked {
            return Vec::new();
        }
        let question = &self.questions[self.state.current_index];
        let Some(selected) = question.choices.get(choice) else {
            return Vec::new();
        };

        self.state.input_locked = true;
        self.state.phase = Phase::ShowingFeedback;
        if selected.is_correct {
            self.state.score += 1;
        }

        let choices = question
            .choices
            .iter()
            .enumerate()
            .map(|(index, c)| ChoiceFeedback {
                label: c.label.clone(),
                state: if c.is_correct {
                    FeedbackState::Correct
                } else if index == choice {
                    FeedbackState::IncorrectSelected
                } else {
                    FeedbackState::Neutral
                },
            })
            .collect();

        vec![
            Effect::Feedback(RenderFeedback { choices }),
            Effect::ScheduleAdvance(FEEDBACK_DELAY),
        ]
    }

    fn advance(&mut self) -> Vec<Effect> {
        self.state.current_index += 1;

        if self.state.current_index < self.questions.len() {
            self.state.phase = Phase::AwaitingAnswer;
            self.state.input_locked = false;
            vec![Effect::Question(self.render_question())]
        } else {
            self.state.phase = Phase::Finished;
            let score = self.state.score;
            let total = self.questions.len();
            vec![
                Effect::ScreenTransition(Screen::Result),
                Effect::Result(RenderResult {
                    score,
                    total,
                    message: result_message(score, total).to_string(),
                }),
            ]
        }
    }

    fn render_question(&self) -> RenderQuestion {
        let question = &self.questions[self.state.current_index];
        RenderQuestion {
            question_number: self.state.current_index + 1,
            total_questions: self.questions.len(),
            progress_percent: self.state.current_index as f64 * 100.0
                / self.questions.len() as f64,
            prompt: question.prompt.clone(),
            choice_labels: question.choices.iter().map(|c| c.label.clone()).collect(),
        }
    }
}

/// Result message tier for a final score, evaluated top-down.
pub fn result_message(score: usize, total: usize) -> &'static str {
    let percentage = score as f64 * 100.0 / total as f64;
    if score == total {
        "Perfect! You're a genius!"
    } else if percentage >= 80.0 {
        "Great job! You know your stuff!"
    } else if percentage >= 60.0 {
        "Good effort! Keep learning!"
    } else if percentage >= 40.0 {
        "Not bad! Try again to improve!"
    } else {
        "Keep studying! You'll get better!"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Choice;

    fn question(prompt: &str, choices: &[(&str, bool)]) -> Question {
        Question {
            prompt: prompt.to_string(),
            choices: choices
                .iter()
                .map(|&(label, is_correct)| Choice {
                    label: label.to_string(),
                    is_correct,
                })
                .collect(),
        }
    }

    /// N questions of four choices each, correct answer at index 1.
    fn question_set(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                question(
                    &format!("Question {}?", i + 1),
                    &[("a", false), ("b", true), ("c", false), ("d", false)],
                )
            })
            .collect()
    }

    fn started(questions: Vec<Question>) -> SessionController {
        let mut controller = SessionController::new(questions).unwrap();
        controller.handle(SessionEvent::StartRequested);
        controller
    }

    fn rendered_question(effects: &[Effect]) -> &RenderQuestion {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Question(q) => Some(q),
                _ => None,
            })
            .expect("no question rendered")
    }

    fn rendered_result(effects: &[Effect]) -> &RenderResult {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::Result(r) => Some(r),
                _ => None,
            })
            .expect("no result rendered")
    }

    fn assert_invariants(controller: &SessionController) {
        // During feedback the answered question counts as completed even
        // though the index only moves on advance.
        let completed = controller.current_index()
            + usize::from(controller.phase() == Phase::ShowingFeedback);
        assert!(controller.score() <= completed);
        assert!(controller.current_index() <= controller.total_questions());
    }

    #[test]
    fn test_rejects_malformed_question_sets() {
        assert!(matches!(
            SessionController::new(vec![]),
            Err(SessionError::EmptyQuestionSet)
        ));
        assert!(matches!(
            SessionController::new(vec![question("?", &[("only", true)])]),
            Err(SessionError::TooFewChoices { question: 0 })
        ));
        assert!(matches!(
            SessionController::new(vec![question("?", &[("a", false), ("b", false)])]),
            Err(SessionError::NoSingleCorrectChoice { question: 0 })
        ));
        assert!(matches!(
            SessionController::new(vec![
                question("?", &[("a", false), ("b", true)]),
                question("?", &[("a", true), ("b", true)]),
            ]),
            Err(SessionError::NoSingleCorrectChoice { question: 1 })
        ));
    }

    #[test]
    fn test_start_renders_first_question() {
        let mut controller = SessionController::new(question_set(5)).unwrap();
        assert_eq!(controller.phase(), Phase::NotStarted);

        let effects = controller.handle(SessionEvent::StartRequested);
        assert_eq!(effects[0], Effect::ScreenTransition(Screen::Quiz));

        let q = rendered_question(&effects);
        assert_eq!(q.question_number, 1);
        assert_eq!(q.total_questions, 5);
        assert_eq!(q.progress_percent, 0.0);
        assert_eq!(q.prompt, "Question 1?");
        assert_eq!(q.choice_labels, ["a", "b", "c", "d"]);
        assert_eq!(controller.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_all_correct_run_is_perfect() {
        let mut controller = started(question_set(5));

        for _ in 0..4 {
            controller.handle(SessionEvent::AnswerSelected(1));
            assert_invariants(&controller);
            controller.handle(SessionEvent::AdvanceDue);
            assert_invariants(&controller);
        }
        controller.handle(SessionEvent::AnswerSelected(1));
        let effects = controller.handle(SessionEvent::AdvanceDue);

        assert_eq!(controller.phase(), Phase::Finished);
        assert_eq!(effects[0], Effect::ScreenTransition(Screen::Result));
        let result = rendered_result(&effects);
        assert_eq!(result.score, 5);
        assert_eq!(result.total, 5);
        assert_eq!(result.message, "Perfect! You're a genius!");
    }

    #[test]
    fn test_all_wrong_run_scores_zero() {
        let mut controller = started(question_set(3));

        for _ in 0..3 {
            controller.handle(SessionEvent::AnswerSelected(0));
            assert_invariants(&controller);
            controller.handle(SessionEvent::AdvanceDue);
        }

        assert_eq!(controller.score(), 0);
        assert_eq!(controller.phase(), Phase::Finished);
    }

    #[test]
    fn test_submit_emits_feedback_and_schedules_advance() {
        let mut controller = started(question_set(2));

        let effects = controller.handle(SessionEvent::AnswerSelected(1));
        assert_eq!(controller.phase(), Phase::ShowingFeedback);
        assert!(effects.contains(&Effect::ScheduleAdvance(FEEDBACK_DELAY)));
        assert_eq!(FEEDBACK_DELAY, Duration::from_millis(1000));
    }

    #[test]
    fn test_double_submit_changes_score_at_most_once() {
        let mut controller = started(question_set(2));

        controller.handle(SessionEvent::AnswerSelected(1));
        assert_eq!(controller.score(), 1);

        // Second click racing the feedback timer is dropped outright.
        let effects = controller.handle(SessionEvent::AnswerSelected(1));
        assert!(effects.is_empty());
        assert_eq!(controller.score(), 1);
        assert_eq!(controller.phase(), Phase::ShowingFeedback);
    }

    #[test]
    fn test_out_of_range_choice_is_ignored() {
        let mut controller = started(question_set(2));

        let effects = controller.handle(SessionEvent::AnswerSelected(9));
        assert!(effects.is_empty());
        assert_eq!(controller.phase(), Phase::AwaitingAnswer);
        assert_eq!(controller.score(), 0);
    }

    #[test]
    fn test_duplicate_advance_is_noop() {
        let mut controller = started(question_set(2));
        controller.handle(SessionEvent::AnswerSelected(1));
        controller.handle(SessionEvent::AdvanceDue);
        assert_eq!(controller.current_index(), 1);

        let effects = controller.handle(SessionEvent::AdvanceDue);
        assert!(effects.is_empty());
        assert_eq!(controller.current_index(), 1);
        assert_eq!(controller.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_out_of_phase_events_are_ignored() {
        let mut controller = SessionController::new(question_set(2)).unwrap();
        assert!(controller.handle(SessionEvent::AnswerSelected(0)).is_empty());
        assert!(controller.handle(SessionEvent::AdvanceDue).is_empty());
        assert_eq!(controller.phase(), Phase::NotStarted);

        controller.handle(SessionEvent::StartRequested);
        assert!(controller.handle(SessionEvent::StartRequested).is_empty());
        assert!(controller.handle(SessionEvent::AdvanceDue).is_empty());
        assert_eq!(controller.phase(), Phase::AwaitingAnswer);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut controller = started(question_set(2));
        controller.handle(SessionEvent::AnswerSelected(1));
        controller.handle(SessionEvent::AdvanceDue);
        controller.handle(SessionEvent::AnswerSelected(1));
        controller.handle(SessionEvent::AdvanceDue);
        assert_eq!(controller.phase(), Phase::Finished);
        assert_eq!(controller.score(), 2);

        let effects = controller.handle(SessionEvent::RestartRequested);
        assert_eq!(controller.phase(), Phase::AwaitingAnswer);
        assert_eq!(controller.score(), 0);
        assert_eq!(controller.current_index(), 0);
        assert_eq!(effects[0], Effect::ScreenTransition(Screen::Quiz));
        assert_eq!(rendered_question(&effects).question_number, 1);
    }

    #[test]
    fn test_progress_never_full_before_final_advance() {
        let mut controller = started(question_set(4));

        let mut last_progress = 0.0;
        for _ in 0..3 {
            controller.handle(SessionEvent::AnswerSelected(1));
            let effects = controller.handle(SessionEvent::AdvanceDue);
            last_progress = rendered_question(&effects).progress_percent;
            assert!(last_progress < 100.0);
        }
        // Last question: 3 of 4 completed.
        assert_eq!(last_progress, 75.0);
    }

    #[test]
    fn test_single_question_wrong_answer_scenario() {
        let mut controller = SessionController::new(vec![question(
            "Capital of France?",
            &[("Paris", true), ("Berlin", false)],
        )])
        .unwrap();

        let effects = controller.handle(SessionEvent::StartRequested);
        let q = rendered_question(&effects);
        assert_eq!((q.question_number, q.total_questions), (1, 1));
        assert_eq!(q.progress_percent, 0.0);

        let effects = controller.handle(SessionEvent::AnswerSelected(1));
        let feedback = effects
            .iter()
            .find_map(|e| match e {
                Effect::Feedback(f) => Some(f),
                _ => None,
            })
            .unwrap();
        assert_eq!(feedback.choices[0].label, "Paris");
        assert_eq!(feedback.choices[0].state, FeedbackState::Correct);
        assert_eq!(feedback.choices[1].label, "Berlin");
        assert_eq!(feedback.choices[1].state, FeedbackState::IncorrectSelected);
        assert_eq!(controller.score(), 0);

        let effects = controller.handle(SessionEvent::AdvanceDue);
        let result = rendered_result(&effects);
        assert_eq!((result.score, result.total), (0, 1));
        assert_eq!(result.message, "Keep studying! You'll get better!");
    }

    #[test]
    fn test_feedback_marks_unchosen_choices_neutral() {
        let mut controller = started(question_set(1));

        let effects = controller.handle(SessionEvent::AnswerSelected(3));
        let feedback = effects
            .iter()
            .find_map(|e| match e {
                Effect::Feedback(f) => Some(f),
                _ => None,
            })
            .unwrap();

        let states: Vec<_> = feedback.choices.iter().map(|c| c.state).collect();
        assert_eq!(
            states,
            [
                FeedbackState::Neutral,
                FeedbackState::Correct,
                FeedbackState::Neutral,
                FeedbackState::IncorrectSelected,
            ]
        );
    }

    #[test]
    fn test_correct_choice_stays_marked_when_chosen() {
        let mut controller = started(question_set(1));

        let effects = controller.handle(SessionEvent::AnswerSelected(1));
        let feedback = effects
            .iter()
            .find_map(|e| match e {
                Effect::Feedback(f) => Some(f),
                _ => None,
            })
            .unwrap();
        assert_eq!(feedback.choices[1].state, FeedbackState::Correct);
        assert_eq!(controller.score(), 1);
    }

    #[test]
    fn test_result_message_tiers() {
        assert_eq!(result_message(5, 5), "Perfect! You're a genius!");
        // Exactly 80% hits the >= boundary.
        assert_eq!(result_message(4, 5), "Great job! You know your stuff!");
        assert_eq!(result_message(3, 5), "Good effort! Keep learning!");
        assert_eq!(result_message(2, 5), "Not bad! Try again to improve!");
        assert_eq!(result_message(1, 5), "Keep studying! You'll get better!");
        assert_eq!(result_message(0, 5), "Keep studying! You'll get better!");
        // A perfect single-question run is still perfect.
        assert_eq!(result_message(1, 1), "Perfect! You're a genius!");
    }
}
