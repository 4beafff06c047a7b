//! Question generation boundary.
//!
//! The session never talks to the network itself. It hands a
//! [`QuestionSource`] the topic, difficulty and count and gets back either a
//! validated question list or one of the two [`QuizGenerationError`] kinds.

mod gemini;
mod prompt;
mod validate;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Difficulty, Question, Topic};

pub use gemini::GeminiSource;
pub use prompt::{build_prompt, response_schema};
pub use validate::{ValidationError, parse_questions};

/// Classified failure of a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizGenerationError {
    /// The backend throttled the request.
    #[error("Rate limit exceeded. Please wait a moment.")]
    RateLimited,
    /// Anything else: transport, status, empty body or a rejected payload.
    /// `reason` is for the log, the user only sees the generic message.
    #[error("An unexpected error occurred while generating the quiz.")]
    GenerationFailed { reason: String },
}

impl QuizGenerationError {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::GenerationFailed {
            reason: reason.into(),
        }
    }
}

impl From<ValidationError> for QuizGenerationError {
    fn from(err: ValidationError) -> Self {
        Self::failed(err.to_string())
    }
}

/// Something that can produce a fresh set of questions.
///
/// Implementations make exactly one outbound request per call and never
/// retry or cache; repeating a call asks the backend again.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(
        &self,
        topic: Topic,
        difficulty: Difficulty,
        count: usize,
    ) -> Result<Vec<Question>, QuizGenerationError>;
}
