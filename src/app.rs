use std::time::Duration;

use crate::models::Question;
use crate::session::{
    Effect, RenderFeedback, RenderQuestion, RenderResult, Screen, SessionController, SessionError,
    SessionEvent,
};

/// The running application: the session controller plus the view model
/// built from its render instructions.
///
/// The UI reads only what the controller has emitted; it never reaches
/// into the question set itself.
pub struct App {
    controller: SessionController,
    screen: Screen,
    question: Option<RenderQuestion>,
    feedback: Option<RenderFeedback>,
    result: Option<RenderResult>,
    cursor: usize,
    pending_advance: Option<Duration>,
}

impl App {
    pub fn with_questions(questions: Vec<Question>) -> Result<Self, SessionError> {
        Ok(Self {
            controller: SessionController::new(questions)?,
            screen: Screen::Welcome,
            question: None,
            feedback: None,
            result: None,
            cursor: 0,
            pending_advance: None,
        })
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn question(&self) -> Option<&RenderQuestion> {
        self.question.as_ref()
    }

    pub fn feedback(&self) -> Option<&RenderFeedback> {
        self.feedback.as_ref()
    }

    pub fn result(&self) -> Option<&RenderResult> {
        self.result.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total_questions(&self) -> usize {
        self.controller.total_questions()
    }

    /// Feed one event to the controller and apply the emitted effects to
    /// the view model.
    pub fn dispatch(&mut self, event: SessionEvent) {
        for effect in self.controller.handle(event) {
            match effect {
                Effect::ScreenTransition(screen) => self.screen = screen,
                Effect::Question(question) => {
                    self.question = Some(question);
                    self.feedback = None;
                    self.cursor = 0;
                }
                Effect::Feedback(feedback) => self.feedback = Some(feedback),
                Effect::Result(result) => self.result = Some(result),
                Effect::ScheduleAdvance(delay) => self.pending_advance = Some(delay),
            }
        }
    }

    /// Take the delay for a newly scheduled advance, if the last dispatch
    /// armed one. The event loop turns it into a timer.
    pub fn take_scheduled_advance(&mut self) -> Option<Duration> {
        self.pending_advance.take()
    }

    pub fn start(&mut self) {
        self.dispatch(SessionEvent::StartRequested);
    }

    pub fn submit_answer(&mut self) {
        self.dispatch(SessionEvent::AnswerSelected(self.cursor));
    }

    pub fn restart(&mut self) {
        self.dispatch(SessionEvent::RestartRequested);
    }

    pub fn select_next_choice(&mut self) {
        // Keep the cursor still while feedback is on screen.
        if self.feedback.is_some() {
            return;
        }
        if let Some(question) = &self.question {
            self.cursor = (self.cursor + 1) % question.choice_labels.len();
        }
    }

    pub fn select_previous_choice(&mut self) {
        if self.feedback.is_some() {
            return;
        }
        if let Some(question) = &self.question {
            let count = question.choice_labels.len();
            self.cursor = (self.cursor + count - 1) % count;
        }
    }
}
