//! Application controller.
//!
//! Owns the session and the quiz arena, turns key presses into session
//! events and runs question fetches on the tokio runtime. Fetch tasks never
//! touch the session; they report back on a channel and the controller
//! applies the result on the UI loop.

use std::sync::Arc;

use crossterm::event::KeyCode;
use tokio::sync::mpsc;

use crate::models::{Difficulty, OPTION_COUNT, QUESTION_COUNTS, Question, Topic};
use crate::session::{
    Advance, FetchRequest, FetchTicket, QuizArena, Resolution, SessionError, SessionState, Step,
};
use crate::source::{QuestionSource, QuizGenerationError};

struct FetchCompletion {
    ticket: FetchTicket,
    result: Result<Vec<Question>, QuizGenerationError>,
}

pub struct App {
    session: SessionState,
    arena: Option<QuizArena>,
    cursor: usize,
    tick: usize,
    should_quit: bool,
    source: Arc<dyn QuestionSource>,
    fetch_tx: mpsc::UnboundedSender<FetchCompletion>,
    fetch_rx: mpsc::UnboundedReceiver<FetchCompletion>,
}

impl App {
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();
        Self {
            session: SessionState::new(),
            arena: None,
            cursor: 0,
            tick: 0,
            should_quit: false,
            source,
            fetch_tx,
            fetch_rx,
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// The running quiz, present only while the session is taking it.
    pub fn arena(&self) -> Option<&QuizArena> {
        self.arena.as_ref()
    }

    /// Highlighted row on menu screens, scroll offset on the results screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Apply every fetch that has finished since the last call.
    pub fn apply_completed_fetches(&mut self) {
        while let Ok(completion) = self.fetch_rx.try_recv() {
            self.apply(completion);
        }
    }

    /// Wait for the next fetch to finish and apply it.
    pub async fn wait_for_fetch(&mut self) -> Option<Resolution> {
        let completion = self.fetch_rx.recv().await?;
        Some(self.apply(completion))
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Home => {
                self.reset();
                return;
            }
            _ => {}
        }

        // Only quitting and starting over are allowed while generating.
        if self.session.is_loading() {
            return;
        }

        let outcome = if self.session.error().is_some() {
            self.handle_error_input(key)
        } else {
            match self.session.step() {
                Step::ChooseTopic => self.handle_topic_input(key),
                Step::ChooseDifficulty => self.handle_difficulty_input(key),
                Step::ChooseCount => self.handle_count_input(key),
                Step::TakingQuiz => self.handle_quiz_input(key),
                Step::ShowResults => self.handle_results_input(key),
            }
        };

        if let Err(e) = outcome {
            tracing::debug!(error = %e, ?key, "Input rejected");
        }
    }

    fn handle_error_input(&mut self, key: KeyCode) -> Result<(), SessionError> {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
                let request = self.session.retry()?;
                self.spawn_fetch(request);
            }
            KeyCode::Esc => self.reset(),
            _ => {}
        }
        Ok(())
    }

    fn handle_topic_input(&mut self, key: KeyCode) -> Result<(), SessionError> {
        let choice = match key {
            KeyCode::Char(c @ '1'..='9') => Some(digit_index(c)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.cursor),
            _ => {
                self.move_cursor(key, Topic::ALL.len());
                None
            }
        };

        if let Some(topic) = choice.and_then(|i| Topic::ALL.get(i).copied()) {
            self.session.select_topic(topic)?;
            self.sync_cursor();
        }
        Ok(())
    }

    fn handle_difficulty_input(&mut self, key: KeyCode) -> Result<(), SessionError> {
        let choice = match key {
            KeyCode::Char(c @ '1'..='3') => Some(digit_index(c)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.cursor),
            KeyCode::Esc | KeyCode::Backspace => {
                self.session.back()?;
                self.sync_cursor();
                None
            }
            _ => {
                self.move_cursor(key, Difficulty::ALL.len());
                None
            }
        };

        if let Some(difficulty) = choice.and_then(|i| Difficulty::ALL.get(i).copied()) {
            self.session.select_difficulty(difficulty)?;
            self.sync_cursor();
        }
        Ok(())
    }

    fn handle_count_input(&mut self, key: KeyCode) -> Result<(), SessionError> {
        let choice = match key {
            KeyCode::Char(c @ '1'..='3') => Some(digit_index(c)),
            KeyCode::Enter | KeyCode::Char(' ') => Some(self.cursor),
            KeyCode::Esc | KeyCode::Backspace => {
                self.session.back()?;
                self.sync_cursor();
                None
            }
            _ => {
                self.move_cursor(key, QUESTION_COUNTS.len());
                None
            }
        };

        if let Some(count) = choice.and_then(|i| QUESTION_COUNTS.get(i).copied()) {
            let request = self.session.select_count(count)?;
            self.spawn_fetch(request);
        }
        Ok(())
    }

    fn handle_quiz_input(&mut self, key: KeyCode) -> Result<(), SessionError> {
        if key == KeyCode::Esc {
            self.reset();
            return Ok(());
        }

        let Some(arena) = self.arena.as_mut() else {
            return Ok(());
        };

        let outcome = match key {
            KeyCode::Up | KeyCode::Char('k') => {
                arena.select_previous_option();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                arena.select_next_option();
                None
            }
            KeyCode::Char(c @ '1'..='4') => {
                arena.select_option(digit_index(c));
                None
            }
            KeyCode::Char(c @ ('a'..='d' | 'A'..='D')) => {
                arena.select_option(letter_index(c));
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if arena.is_revealed() {
                    match arena.advance() {
                        Advance::Finished(outcome) => Some(outcome),
                        Advance::Next | Advance::Blocked => None,
                    }
                } else {
                    arena.submit_answer();
                    None
                }
            }
            _ => None,
        };

        if let Some(outcome) = outcome {
            self.session.complete_quiz(outcome)?;
            self.arena = None;
            self.cursor = 0;
        }
        Ok(())
    }

    fn handle_results_input(&mut self, key: KeyCode) -> Result<(), SessionError> {
        match key {
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let request = self.session.restart()?;
                self.spawn_fetch(request);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max_scroll = self.session.questions().len().saturating_sub(1);
                self.cursor = (self.cursor + 1).min(max_scroll);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Esc => self.reset(),
            _ => {}
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.session.reset();
        self.arena = None;
        self.cursor = 0;
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.fetch_tx.clone();

        tokio::spawn(async move {
            let result = source
                .fetch_questions(request.topic, request.difficulty, request.count)
                .await;
            // The receiver lives as long as the app; a send error means we are shutting down.
            let _ = tx.send(FetchCompletion {
                ticket: request.ticket,
                result,
            });
        });
    }

    fn apply(&mut self, completion: FetchCompletion) -> Resolution {
        let resolution = self
            .session
            .resolve_fetch(completion.ticket, completion.result);

        if resolution == Resolution::Loaded {
            self.arena = QuizArena::new(self.session.questions().to_vec());
            self.cursor = 0;
            if self.arena.is_none() {
                tracing::error!("Loaded quiz has no questions, starting over");
                self.reset();
            }
        }
        resolution
    }

    fn move_cursor(&mut self, key: KeyCode, len: usize) {
        match key {
            KeyCode::Down | KeyCode::Char('j') => self.cursor = (self.cursor + 1) % len,
            KeyCode::Up | KeyCode::Char('k') => self.cursor = (self.cursor + len - 1) % len,
            _ => {}
        }
    }

    /// Point the cursor at the current choice of the step just entered.
    fn sync_cursor(&mut self) {
        self.cursor = match self.session.step() {
            Step::ChooseDifficulty => self
                .session
                .difficulty()
                .and_then(|d| Difficulty::ALL.iter().position(|x| *x == d))
                .unwrap_or(0),
            Step::ChooseCount => QUESTION_COUNTS
                .iter()
                .position(|c| *c == self.session.question_count())
                .unwrap_or(0),
            _ => 0,
        };
    }
}

fn digit_index(c: char) -> usize {
    c.to_digit(10).map_or(0, |d| d as usize).saturating_sub(1)
}

fn letter_index(c: char) -> usize {
    (c.to_ascii_lowercase() as usize - 'a' as usize).min(OPTION_COUNT - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_and_letter_indices() {
        assert_eq!(digit_index('1'), 0);
        assert_eq!(digit_index('4'), 3);
        assert_eq!(letter_index('a'), 0);
        assert_eq!(letter_index('D'), 3);
    }
}
