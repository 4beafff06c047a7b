//! Turns the generator's raw JSON text into checked [`Question`] values.
//!
//! The backend is asked for a schema, but nothing guarantees it honours
//! one, so every invariant the quiz relies on is checked here. Any
//! violation rejects the whole batch.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::models::{OPTION_COUNT, Question};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("response is not a JSON question array: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected {expected} questions, got {actual}")]
    WrongCount { expected: usize, actual: usize },
    #[error("question {index} has {found} options, expected 4")]
    OptionCount { index: usize, found: usize },
    #[error("question {index} repeats an option")]
    DuplicateOption { index: usize },
    #[error("question {index} has a blank {field}")]
    BlankField { index: usize, field: &'static str },
    #[error("question {index} marks option {value} as correct")]
    AnswerOutOfRange { index: usize, value: i64 },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    id: String,
    question: String,
    #[serde(default)]
    code_snippet: Option<String>,
    options: Vec<String>,
    correct_answer_index: i64,
    explanation: String,
}

/// Parse and validate a generator response holding exactly `expected` questions.
pub fn parse_questions(text: &str, expected: usize) -> Result<Vec<Question>, ValidationError> {
    let raw: Vec<RawQuestion> = serde_json::from_str(text)?;

    if raw.len() != expected {
        return Err(ValidationError::WrongCount {
            expected,
            actual: raw.len(),
        });
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, raw)| check_question(index, raw))
        .collect()
}

fn check_question(index: usize, raw: RawQuestion) -> Result<Question, ValidationError> {
    let blank = |field| ValidationError::BlankField { index, field };

    if raw.id.trim().is_empty() {
        return Err(blank("id"));
    }
    if raw.question.trim().is_empty() {
        return Err(blank("question"));
    }
    if raw.explanation.trim().is_empty() {
        return Err(blank("explanation"));
    }
    if raw.options.iter().any(|option| option.trim().is_empty()) {
        return Err(blank("option"));
    }

    let mut seen = HashSet::new();
    if !raw.options.iter().all(|option| seen.insert(option.trim())) {
        return Err(ValidationError::DuplicateOption { index });
    }

    let found = raw.options.len();
    let options: [String; OPTION_COUNT] = raw
        .options
        .try_into()
        .map_err(|_| ValidationError::OptionCount { index, found })?;

    let correct_answer = usize::try_from(raw.correct_answer_index)
        .ok()
        .filter(|answer| *answer < OPTION_COUNT)
        .ok_or(ValidationError::AnswerOutOfRange {
            index,
            value: raw.correct_answer_index,
        })?;

    let code = raw.code_snippet.filter(|code| !code.trim().is_empty());

    Ok(Question {
        id: raw.id,
        text: raw.question,
        code,
        options,
        correct_answer,
        explanation: raw.explanation,
    })
}
