use std::io;
use std::sync::Arc;

use quiz_core::model::{AnswerVerdict, Question, SessionMode};

use super::progress::SessionProgress;
use crate::countdown::CountdownState;

/// What the console needs to show a question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionPrompt<'a> {
    pub mode: SessionMode,
    /// 1-based position among the planned questions.
    pub number: usize,
    pub total: usize,
    pub question: &'a Question,
    /// Remaining exam time, as published by the countdown.
    pub remaining: Option<&'a str>,
}

/// Presentation seam between the session engine and the terminal.
///
/// Every call may block; an error aborts the session.
pub trait QuizConsole {
    /// Render a question and its options.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    fn present(&mut self, prompt: &QuestionPrompt<'_>) -> io::Result<()>;

    /// Block until the user submits an answer line.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if input fails or is exhausted.
    fn read_answer(&mut self) -> io::Result<String>;

    /// Tell the user how the answer was graded.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    fn feedback(&mut self, verdict: &AnswerVerdict) -> io::Result<()>;

    /// Show the running progress indicator after a question.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    fn progress(&mut self, progress: &SessionProgress) -> io::Result<()>;

    /// Announce that the exam time ran out.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    fn time_expired(&mut self) -> io::Result<()>;

    /// Called once when an exam clock starts, before the first question.
    ///
    /// The state stops updating when the session ends. Does nothing by default.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the console cannot follow the clock.
    fn countdown_started(&mut self, state: Arc<CountdownState>) -> io::Result<()> {
        let _ = state;
        Ok(())
    }
}
