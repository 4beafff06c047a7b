//! # dev-quiz
//!
//! A terminal quiz on programming languages with questions generated on
//! demand by an AI backend.
//!
//! Pick a language, a difficulty and a question count; the quiz asks the
//! generator for a fresh batch, walks through it one question at a time
//! with immediate feedback and ends on a score summary.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dev_quiz::{GeneratorConfig, Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = GeneratorConfig::from_env(None, None)?;
//!     Quiz::from_config(config).run().await
//! }
//! ```

mod app;
pub mod config;
pub mod models;
pub mod session;
pub mod source;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use thiserror::Error;

pub use app::App;
pub use config::{ConfigError, GeneratorConfig};
pub use models::{Difficulty, Question, Topic};
pub use session::{SessionState, Step};
pub use source::{GeminiSource, QuestionSource, QuizGenerationError};

/// How long to wait for input before redrawing.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            app: App::new(source),
        }
    }

    /// Quiz backed by the Gemini generator.
    pub fn from_config(config: GeneratorConfig) -> Self {
        Self::new(Arc::new(GeminiSource::new(config)))
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal and returns when the user quits. Must be
    /// called from within a tokio runtime.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut guard = terminal::TerminalGuard::enter()?;
        tracing::info!("Quiz started");
        let result = run_event_loop(guard.terminal(), &mut self.app).await;
        tracing::info!("Quiz finished");
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut terminal::AppTerminal,
    app: &mut App,
) -> Result<(), QuizError> {
    while !app.should_quit() {
        app.apply_completed_fetches();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(FRAME_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        app.on_tick();
        // Let spawned fetches make progress on a single-threaded runtime.
        tokio::task::yield_now().await;
    }

    Ok(())
}
