//! Session state machine.
//!
//! A session walks strictly forward through topic, difficulty, count, quiz
//! and results. Loading and error are not steps of their own: they decorate
//! whatever step the session is on while a fetch is pending or has failed,
//! which is why retry and restart reuse the count-selection fetch.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::models::{DEFAULT_QUESTION_COUNT, Difficulty, QUESTION_COUNTS, Question, Topic};
use crate::source::QuizGenerationError;

use super::arena::QuizOutcome;
use super::score::QuizResults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    ChooseTopic,
    ChooseDifficulty,
    ChooseCount,
    TakingQuiz,
    ShowResults,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::ChooseTopic => "choose-topic",
            Step::ChooseDifficulty => "choose-difficulty",
            Step::ChooseCount => "choose-count",
            Step::TakingQuiz => "taking-quiz",
            Step::ShowResults => "show-results",
        };
        f.write_str(name)
    }
}

/// Events a session accepts, used to report rejected transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    SelectTopic,
    SelectDifficulty,
    SelectCount,
    Back,
    CompleteQuiz,
    Restart,
    Retry,
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionEvent::SelectTopic => "select topic",
            SessionEvent::SelectDifficulty => "select difficulty",
            SessionEvent::SelectCount => "select count",
            SessionEvent::Back => "back",
            SessionEvent::CompleteQuiz => "complete quiz",
            SessionEvent::Restart => "restart",
            SessionEvent::Retry => "retry",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a quiz is being generated")]
    Busy,
    #[error("cannot {event} while on {step}")]
    InvalidTransition { step: Step, event: SessionEvent },
    #[error("{0} questions is not an offered quiz length")]
    UnsupportedCount(usize),
    #[error("topic and difficulty must be chosen first")]
    MissingSelection,
    #[error("quiz outcome with {answers} answers and score {score} does not fit {expected} questions")]
    InvalidOutcome {
        expected: usize,
        answers: usize,
        score: usize,
    },
}

/// Identifies one outbound fetch. Only the fetch the session is waiting on
/// can resolve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(Uuid);

impl FetchTicket {
    fn issue() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Parameters of a fetch the caller must run and report back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub count: usize,
}

/// What `resolve_fetch` did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Questions applied, the quiz can start.
    Loaded,
    /// Failure recorded, the session shows the error.
    Failed,
    /// The session was no longer waiting on this ticket; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum FetchStatus {
    #[default]
    Idle,
    Pending(FetchTicket),
    Failed(QuizGenerationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    step: Step,
    topic: Option<Topic>,
    difficulty: Option<Difficulty>,
    question_count: usize,
    questions: Vec<Question>,
    score: usize,
    user_answers: Vec<usize>,
    fetch: FetchStatus,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            step: Step::ChooseTopic,
            topic: None,
            difficulty: None,
            question_count: DEFAULT_QUESTION_COUNT,
            questions: Vec::new(),
            score: 0,
            user_answers: Vec::new(),
            fetch: FetchStatus::Idle,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn topic(&self) -> Option<Topic> {
        self.topic
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn user_answers(&self) -> &[usize] {
        &self.user_answers
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.fetch, FetchStatus::Pending(_))
    }

    pub fn error(&self) -> Option<&QuizGenerationError> {
        match &self.fetch {
            FetchStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Score summary, only once the quiz has been completed.
    pub fn results(&self) -> Option<QuizResults> {
        (self.step == Step::ShowResults)
            .then(|| QuizResults::new(self.score, self.questions.len()))
    }

    pub fn select_topic(&mut self, topic: Topic) -> Result<(), SessionError> {
        self.require_step(Step::ChooseTopic, SessionEvent::SelectTopic)?;
        self.topic = Some(topic);
        self.fetch = FetchStatus::Idle;
        self.step = Step::ChooseDifficulty;
        tracing::debug!(%topic, "Topic selected");
        Ok(())
    }

    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Result<(), SessionError> {
        self.require_step(Step::ChooseDifficulty, SessionEvent::SelectDifficulty)?;
        self.difficulty = Some(difficulty);
        self.fetch = FetchStatus::Idle;
        self.step = Step::ChooseCount;
        tracing::debug!(%difficulty, "Difficulty selected");
        Ok(())
    }

    /// Choose the quiz length and start generating questions.
    pub fn select_count(&mut self, count: usize) -> Result<FetchRequest, SessionError> {
        self.require_step(Step::ChooseCount, SessionEvent::SelectCount)?;
        if !QUESTION_COUNTS.contains(&count) {
            return Err(SessionError::UnsupportedCount(count));
        }
        self.question_count = count;
        self.begin_fetch()
    }

    pub fn back(&mut self) -> Result<(), SessionError> {
        self.ensure_idle()?;
        if self.error().is_some() {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                event: SessionEvent::Back,
            });
        }
        match self.step {
            Step::ChooseDifficulty => {
                self.topic = None;
                self.step = Step::ChooseTopic;
            }
            Step::ChooseCount => {
                self.step = Step::ChooseDifficulty;
            }
            step => {
                return Err(SessionError::InvalidTransition {
                    step,
                    event: SessionEvent::Back,
                });
            }
        }
        tracing::debug!(step = %self.step, "Went back");
        Ok(())
    }

    /// Apply the result of the fetch identified by `ticket`.
    ///
    /// Results for any other ticket, including every fetch started before a
    /// reset, are dropped.
    pub fn resolve_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Question>, QuizGenerationError>,
    ) -> Resolution {
        if self.fetch != FetchStatus::Pending(ticket) {
            tracing::debug!(%ticket, "Discarding stale fetch result");
            return Resolution::Stale;
        }

        let checked = result.and_then(|questions| {
            if questions.len() == self.question_count {
                Ok(questions)
            } else {
                Err(QuizGenerationError::failed(format!(
                    "received {} questions for a {} question quiz",
                    questions.len(),
                    self.question_count
                )))
            }
        });

        match checked {
            Ok(questions) => {
                self.questions = questions;
                self.score = 0;
                self.user_answers.clear();
                self.fetch = FetchStatus::Idle;
                self.step = Step::TakingQuiz;
                tracing::info!(count = self.questions.len(), "Quiz ready");
                Resolution::Loaded
            }
            Err(err) => {
                tracing::warn!(error = %err, step = %self.step, "Quiz generation failed");
                self.fetch = FetchStatus::Failed(err);
                Resolution::Failed
            }
        }
    }

    pub fn complete_quiz(&mut self, outcome: QuizOutcome) -> Result<(), SessionError> {
        self.require_step(Step::TakingQuiz, SessionEvent::CompleteQuiz)?;

        let expected = self.questions.len();
        let matching = self
            .questions
            .iter()
            .zip(&outcome.answers)
            .filter(|(question, answer)| question.is_correct(**answer))
            .count();
        if outcome.answers.len() != expected || outcome.score != matching {
            return Err(SessionError::InvalidOutcome {
                expected,
                answers: outcome.answers.len(),
                score: outcome.score,
            });
        }

        self.score = outcome.score;
        self.user_answers = outcome.answers;
        self.step = Step::ShowResults;
        tracing::info!(score = self.score, total = expected, "Quiz completed");
        Ok(())
    }

    /// Retake the quiz with freshly generated questions.
    pub fn restart(&mut self) -> Result<FetchRequest, SessionError> {
        self.require_step(Step::ShowResults, SessionEvent::Restart)?;
        self.begin_fetch()
    }

    /// Run the failed fetch again with the stored parameters.
    pub fn retry(&mut self) -> Result<FetchRequest, SessionError> {
        self.ensure_idle()?;
        if self.error().is_none() {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                event: SessionEvent::Retry,
            });
        }
        self.begin_fetch()
    }

    /// Throw the whole session away. Always allowed.
    pub fn reset(&mut self) {
        *self = Self::new();
        tracing::debug!("Session reset");
    }

    fn ensure_idle(&self) -> Result<(), SessionError> {
        if self.is_loading() {
            Err(SessionError::Busy)
        } else {
            Ok(())
        }
    }

    /// Reject `event` unless the session sits idle on `step` with no error showing.
    fn require_step(&self, step: Step, event: SessionEvent) -> Result<(), SessionError> {
        self.ensure_idle()?;
        if self.step != step || self.error().is_some() {
            return Err(SessionError::InvalidTransition {
                step: self.step,
                event,
            });
        }
        Ok(())
    }

    fn begin_fetch(&mut self) -> Result<FetchRequest, SessionError> {
        let (Some(topic), Some(difficulty)) = (self.topic, self.difficulty) else {
            return Err(SessionError::MissingSelection);
        };

        let ticket = FetchTicket::issue();
        self.fetch = FetchStatus::Pending(ticket);
        tracing::info!(%ticket, %topic, %difficulty, count = self.question_count, "Fetch started");

        Ok(FetchRequest {
            ticket,
            topic,
            difficulty,
            count: self.question_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample;

    fn questions(n: usize) -> Vec<Question> {
        (0..n).map(|i| sample(&format!("q{i}"), i % 4)).collect()
    }

    fn at_count() -> SessionState {
        let mut session = SessionState::new();
        session.select_topic(Topic::Python).unwrap();
        session.select_difficulty(Difficulty::Beginner).unwrap();
        session
    }

    fn in_quiz(count: usize) -> SessionState {
        let mut session = at_count();
        let request = session.select_count(count).unwrap();
        assert_eq!(
            session.resolve_fetch(request.ticket, Ok(questions(count))),
            Resolution::Loaded
        );
        session
    }

    #[test]
    fn test_initial_state() {
        let session = SessionState::new();
        assert_eq!(session.step(), Step::ChooseTopic);
        assert_eq!(session.topic(), None);
        assert_eq!(session.difficulty(), None);
        assert_eq!(session.question_count(), 10);
        assert!(session.questions().is_empty());
        assert_eq!(session.score(), 0);
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
        assert_eq!(session.results(), None);
    }

    #[test]
    fn test_forward_selection() {
        let session = at_count();
        assert_eq!(session.step(), Step::ChooseCount);
        assert_eq!(session.topic(), Some(Topic::Python));
        assert_eq!(session.difficulty(), Some(Difficulty::Beginner));
    }

    #[test]
    fn test_select_count_starts_fetch() {
        let mut session = at_count();
        let request = session.select_count(5).unwrap();

        assert_eq!(request.topic, Topic::Python);
        assert_eq!(request.difficulty, Difficulty::Beginner);
        assert_eq!(request.count, 5);
        assert_eq!(session.question_count(), 5);
        assert!(session.is_loading());
        assert_eq!(session.error(), None);
        assert_eq!(session.step(), Step::ChooseCount);
    }

    #[test]
    fn test_fetch_success_enters_quiz() {
        let session = in_quiz(5);
        assert_eq!(session.step(), Step::TakingQuiz);
        assert_eq!(session.questions().len(), 5);
        assert!(!session.is_loading());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_rate_limit_keeps_session_pre_quiz() {
        let mut session = at_count();
        let request = session.select_count(5).unwrap();

        let resolution = session.resolve_fetch(request.ticket, Err(QuizGenerationError::RateLimited));

        assert_eq!(resolution, Resolution::Failed);
        assert!(!session.is_loading());
        assert_eq!(
            session.error().map(ToString::to_string).as_deref(),
            Some("Rate limit exceeded. Please wait a moment.")
        );
        assert!(session.questions().is_empty());
        assert_eq!(session.step(), Step::ChooseCount);
    }

    #[test]
    fn test_wrong_length_result_is_failure() {
        let mut session = at_count();
        let request = session.select_count(5).unwrap();

        let resolution = session.resolve_fetch(request.ticket, Ok(questions(4)));

        assert_eq!(resolution, Resolution::Failed);
        assert!(session.questions().is_empty());
        assert!(matches!(
            session.error(),
            Some(QuizGenerationError::GenerationFailed { .. })
        ));
    }

    #[test]
    fn test_retry_reuses_stored_parameters() {
        let mut session = SessionState::new();
        session.select_topic(Topic::Java).unwrap();
        session.select_difficulty(Difficulty::Advanced).unwrap();
        let first = session.select_count(25).unwrap();
        session.resolve_fetch(first.ticket, Err(QuizGenerationError::failed("offline")));

        let retry = session.retry().unwrap();

        assert_eq!(retry.topic, Topic::Java);
        assert_eq!(retry.difficulty, Difficulty::Advanced);
        assert_eq!(retry.count, 25);
        assert_ne!(retry.ticket, first.ticket);
        assert!(session.is_loading());
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_retry_requires_error() {
        let mut session = at_count();
        assert!(matches!(
            session.retry(),
            Err(SessionError::InvalidTransition {
                event: SessionEvent::Retry,
                ..
            })
        ));
    }

    #[test]
    fn test_pending_fetch_blocks_events() {
        let mut session = at_count();
        session.select_count(10).unwrap();

        assert_eq!(session.select_count(5), Err(SessionError::Busy));
        assert_eq!(session.back(), Err(SessionError::Busy));
        assert_eq!(session.retry(), Err(SessionError::Busy));
        assert!(session.is_loading());
    }

    #[test]
    fn test_error_view_only_accepts_retry_or_reset() {
        let mut session = at_count();
        let request = session.select_count(5).unwrap();
        session.resolve_fetch(request.ticket, Err(QuizGenerationError::RateLimited));

        assert!(session.select_count(10).is_err());
        assert!(session.back().is_err());
        assert!(session.retry().is_ok());
    }

    #[test]
    fn test_unsupported_count() {
        let mut session = at_count();
        assert_eq!(session.select_count(7), Err(SessionError::UnsupportedCount(7)));
        assert!(!session.is_loading());
        assert_eq!(session.question_count(), 10);
    }

    #[test]
    fn test_out_of_order_events_rejected() {
        let mut session = SessionState::new();
        assert!(matches!(
            session.select_difficulty(Difficulty::Beginner),
            Err(SessionError::InvalidTransition {
                step: Step::ChooseTopic,
                event: SessionEvent::SelectDifficulty
            })
        ));
        assert!(session.select_count(5).is_err());
        assert!(session.back().is_err());
        assert!(session.restart().is_err());
    }

    #[test]
    fn test_back_transitions() {
        let mut session = at_count();
        session.back().unwrap();
        assert_eq!(session.step(), Step::ChooseDifficulty);
        assert_eq!(session.topic(), Some(Topic::Python));

        session.back().unwrap();
        assert_eq!(session.step(), Step::ChooseTopic);
        assert_eq!(session.topic(), None);
    }

    #[test]
    fn test_complete_quiz() {
        let mut session = in_quiz(5);
        session
            .complete_quiz(QuizOutcome {
                score: 3,
                answers: vec![0, 1, 0, 3, 1],
            })
            .unwrap();

        assert_eq!(session.step(), Step::ShowResults);
        assert_eq!(session.score(), 3);
        assert_eq!(session.user_answers().len(), 5);
        let results = session.results().unwrap();
        assert_eq!(results.percentage, 60.0);
        assert_eq!(results.total, 5);
    }

    #[test]
    fn test_complete_quiz_rejects_short_outcome() {
        let mut session = in_quiz(5);
        let err = session
            .complete_quiz(QuizOutcome {
                score: 1,
                answers: vec![0],
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidOutcome { expected: 5, .. }));
        assert_eq!(session.step(), Step::TakingQuiz);
    }

    #[test]
    fn test_complete_quiz_rejects_inflated_score() {
        let mut session = in_quiz(5);
        let err = session
            .complete_quiz(QuizOutcome {
                score: 5,
                answers: vec![3, 3, 3, 3, 3],
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidOutcome { score: 5, .. }));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_restart_refetches_and_clears_previous_run() {
        let mut session = in_quiz(5);
        session
            .complete_quiz(QuizOutcome {
                score: 5,
                answers: vec![0, 1, 2, 3, 0],
            })
            .unwrap();

        let request = session.restart().unwrap();
        assert_eq!(request.count, 5);
        assert_eq!(request.topic, Topic::Python);
        assert!(session.is_loading());
        assert_eq!(session.step(), Step::ShowResults);

        session.resolve_fetch(request.ticket, Ok(questions(5)));
        assert_eq!(session.step(), Step::TakingQuiz);
        assert_eq!(session.score(), 0);
        assert!(session.user_answers().is_empty());
    }

    #[test]
    fn test_reset_from_anywhere_restores_defaults() {
        let mut pending = at_count();
        pending.select_count(25).unwrap();

        let mut finished = in_quiz(5);
        finished
            .complete_quiz(QuizOutcome {
                score: 2,
                answers: vec![0; 5],
            })
            .unwrap();

        for mut session in [SessionState::new(), at_count(), pending, in_quiz(10), finished] {
            session.reset();
            assert_eq!(session, SessionState::new());
        }
    }

    #[test]
    fn test_late_result_after_reset_is_discarded() {
        let mut session = at_count();
        let request = session.select_count(5).unwrap();
        session.reset();

        assert_eq!(
            session.resolve_fetch(request.ticket, Ok(questions(5))),
            Resolution::Stale
        );
        assert_eq!(session, SessionState::new());
    }

    #[test]
    fn test_late_result_for_superseded_ticket_is_discarded() {
        let mut session = at_count();
        let first = session.select_count(5).unwrap();
        session.reset();
        session.select_topic(Topic::Css).unwrap();
        session.select_difficulty(Difficulty::Beginner).unwrap();
        let second = session.select_count(5).unwrap();

        assert_eq!(
            session.resolve_fetch(first.ticket, Ok(questions(5))),
            Resolution::Stale
        );
        assert!(session.is_loading());
        assert_eq!(
            session.resolve_fetch(second.ticket, Ok(questions(5))),
            Resolution::Loaded
        );
    }
}
