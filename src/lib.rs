//! # quiz-session
//!
//! A terminal multiple-choice quiz presenter. Questions are shown one at
//! a time; each answer gets a short feedback window before the quiz
//! advances on its own; the final screen scores the attempt.
//!
//! The heart of the crate is [`SessionController`], a state machine that
//! is independent of the terminal UI: events go in, render instructions
//! come out. The library also ships the ratatui front end that drives it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_session::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // Load questions from a JSON file
//!     let quiz = Quiz::from_json("questions.json")?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::time::Instant;

pub use app::App;
pub use data::{load_questions, load_questions_from_json, LoadError};
pub use models::{Choice, Question};
pub use session::{SessionController, SessionError, SessionEvent};

use session::Screen;

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// The question set was rejected at session construction.
    Session(SessionError),
    /// IO error during quiz execution.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Session(e) => write!(f, "Invalid question set: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Session(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<SessionError> for QuizError {
    fn from(err: SessionError) -> Self {
        QuizError::Session(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from a vector of questions.
    ///
    /// Fails if the set is empty or any question does not have at least
    /// two choices with exactly one of them correct.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        Ok(Self {
            app: App::with_questions(questions)?,
        })
    }

    /// Load a quiz from a JSON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the JSON file containing questions.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_session::Quiz;
    ///
    /// let quiz = Quiz::from_json("questions.json").expect("Failed to load quiz");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        let questions = load_questions_from_json(path)?;
        Self::new(questions)
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    let mut events = EventStream::new();
    // Deadline of the one outstanding feedback timer, if any.
    let mut advance_at: Option<Instant> = None;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(delay) = app.take_scheduled_advance() {
            advance_at = Some(Instant::now() + delay);
        }

        tokio::select! {
            _ = async {
                match advance_at {
                    Some(deadline) => tokio::time::sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            } => {
                advance_at = None;
                app.dispatch(SessionEvent::AdvanceDue);
            }
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if key.kind != KeyEventKind::Press {
                            continue;
                        }
                        if handle_input(app, key.code) {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.screen() {
        Screen::Welcome => handle_welcome_input(app, key),
        Screen::Quiz => handle_quiz_input(app, key),
        Screen::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_choice();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_choice();
            false
        }
        // Ignored by the controller while feedback is locked.
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
