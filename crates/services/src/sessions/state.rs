use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Utc};
use quiz_core::model::{Question, SessionMode};

use super::plan::SessionPlan;
use super::progress::SessionProgress;

/// Lifecycle of a running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Running,
    /// Exam deadline passed before every selected question was asked.
    TimeExpired,
    /// Training queue emptied or exam selection exhausted.
    Completed,
}

/// Mutable state of one session. Only the engine writes to it.
pub struct SessionState<'q> {
    mode: SessionMode,
    queue: VecDeque<&'q Question>,
    planned: usize,
    score: u32,
    answered: usize,
    attempts: usize,
    started_at: DateTime<Utc>,
    phase: SessionPhase,
}

impl<'q> SessionState<'q> {
    #[must_use]
    pub fn new(plan: SessionPlan<'q>, started_at: DateTime<Utc>) -> Self {
        let planned = plan.total();
        Self {
            mode: plan.mode,
            queue: plan.questions.into(),
            planned,
            score: 0,
            answered: 0,
            attempts: 0,
            started_at,
            phase: SessionPhase::Running,
        }
    }

    #[must_use]
    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Questions in the plan.
    #[must_use]
    pub fn planned(&self) -> usize {
        self.planned
    }

    /// Training: questions answered correctly. Exam: questions presented.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.answered
    }

    /// Every answer given, including repeats in training.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Denominator of the final score.
    ///
    /// Training always reports the original question count; an exam reports
    /// only the questions actually presented.
    #[must_use]
    pub fn total(&self) -> usize {
        match self.mode {
            SessionMode::Training => self.planned,
            SessionMode::Exam => self.answered,
        }
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.planned,
            answered: self.answered,
            remaining: self.queue.len(),
            is_complete: self.phase != SessionPhase::Running,
        }
    }

    /// Take the next question, or mark the session completed when none is left.
    pub(crate) fn next_question(&mut self) -> Option<&'q Question> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        let next = self.queue.pop_front();
        if next.is_none() {
            self.phase = SessionPhase::Completed;
        }
        next
    }

    /// Apply a verdict for a question just taken from the queue.
    pub(crate) fn record(&mut self, question: &'q Question, correct: bool) {
        self.attempts += 1;
        if correct {
            self.score = self.score.saturating_add(1);
        }
        match self.mode {
            SessionMode::Training if correct => self.answered += 1,
            SessionMode::Training => self.queue.push_back(question),
            SessionMode::Exam => self.answered += 1,
        }
    }

    pub(crate) fn expire(&mut self) {
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::TimeExpired;
        }
    }
}

impl fmt::Debug for SessionState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionState")
            .field("mode", &self.mode)
            .field("queue_len", &self.queue.len())
            .field("planned", &self.planned)
            .field("score", &self.score)
            .field("answered", &self.answered)
            .field("attempts", &self.attempts)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}
