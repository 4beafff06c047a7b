//! Per-question interaction while a quiz is being taken.
//!
//! The arena is the only owner of the current question index. The session
//! hears from it once, when the last question has been answered.

use crate::models::{OPTION_COUNT, Question};

/// What the user learns after submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub chosen: usize,
    pub correct_answer: usize,
    pub is_correct: bool,
}

/// Final tally handed back to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub answers: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Nothing happened, the current answer has not been revealed yet.
    Blocked,
    /// Moved to the next question.
    Next,
    /// The last question was answered.
    Finished(QuizOutcome),
}

#[derive(Debug, Clone)]
pub struct QuizArena {
    questions: Vec<Question>,
    current_index: usize,
    selected_option: Option<usize>,
    revealed: bool,
    score: usize,
    answers: Vec<usize>,
}

impl QuizArena {
    /// Returns `None` for an empty question list.
    pub fn new(questions: Vec<Question>) -> Option<Self> {
        if questions.is_empty() {
            return None;
        }
        let capacity = questions.len();
        Some(Self {
            questions,
            current_index: 0,
            selected_option: None,
            revealed: false,
            score: 0,
            answers: Vec::with_capacity(capacity),
        })
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn current_question_number(&self) -> usize {
        self.current_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    /// Fraction of the quiz reached, counting the current question.
    pub fn progress(&self) -> f64 {
        self.current_question_number() as f64 / self.total_questions() as f64
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn answers(&self) -> &[usize] {
        &self.answers
    }

    /// Feedback for the current question once it has been submitted.
    pub fn feedback(&self) -> Option<Feedback> {
        if !self.revealed {
            return None;
        }
        let chosen = self.selected_option?;
        let question = self.current_question();
        Some(Feedback {
            chosen,
            correct_answer: question.correct_answer,
            is_correct: question.is_correct(chosen),
        })
    }

    /// Record a tentative choice. Ignored once the answer is revealed.
    pub fn select_option(&mut self, index: usize) -> bool {
        if self.revealed || index >= OPTION_COUNT {
            return false;
        }
        self.selected_option = Some(index);
        true
    }

    pub fn select_next_option(&mut self) {
        let next = match self.selected_option {
            Some(current) => (current + 1) % OPTION_COUNT,
            None => 0,
        };
        self.select_option(next);
    }

    pub fn select_previous_option(&mut self) {
        let previous = match self.selected_option {
            Some(current) => (current + OPTION_COUNT - 1) % OPTION_COUNT,
            None => OPTION_COUNT - 1,
        };
        self.select_option(previous);
    }

    /// Lock in the tentative choice and reveal the answer.
    ///
    /// Returns `None` without touching the tally when nothing is selected or
    /// the answer is already revealed.
    pub fn submit_answer(&mut self) -> Option<Feedback> {
        if self.revealed {
            return None;
        }
        let chosen = self.selected_option?;

        if self.current_question().is_correct(chosen) {
            self.score += 1;
        }
        self.answers.push(chosen);
        self.revealed = true;
        self.feedback()
    }

    pub fn advance(&mut self) -> Advance {
        if !self.revealed {
            return Advance::Blocked;
        }

        if self.is_last_question() {
            return Advance::Finished(QuizOutcome {
                score: self.score,
                answers: self.answers.clone(),
            });
        }

        self.current_index += 1;
        self.selected_option = None;
        self.revealed = false;
        Advance::Next
    }
}
