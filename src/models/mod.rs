mod question;
mod topic;

pub use question::{Question, OPTION_COUNT};
pub use topic::{DEFAULT_QUESTION_COUNT, Difficulty, QUESTION_COUNTS, Topic};

#[cfg(test)]
pub(crate) use question::sample;
