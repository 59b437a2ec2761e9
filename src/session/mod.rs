//! The quiz session state machine and its render-instruction payloads.

mod controller;
mod render;

pub use controller::{
    result_message, Phase, SessionController, SessionError, SessionEvent, FEEDBACK_DELAY,
};
pub use render::{
    ChoiceFeedback, Effect, FeedbackState, RenderFeedback, RenderQuestion, RenderResult, Screen,
};
