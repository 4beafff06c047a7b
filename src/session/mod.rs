//! Quiz session: the wizard state machine and the per-question arena.

mod arena;
mod score;
mod state;

pub use arena::{Advance, Feedback, QuizArena, QuizOutcome};
pub use score::{AnswerReview, Grade, QuizResults, percentage, review};
pub use state::{
    FetchRequest, FetchTicket, Resolution, SessionError, SessionEvent, SessionState, Step,
};
