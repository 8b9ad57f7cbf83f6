use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::evaluator::grade;
use quiz_core::model::{ExamSettings, Question, SessionMode};
use tracing::{debug, info};

use super::console::{QuestionPrompt, QuizConsole};
use super::outcome::SessionOutcome;
use super::plan::{SessionPlan, SessionPlanner};
use super::state::SessionState;
use crate::countdown::{Countdown, DEFAULT_TICK};
use crate::error::SessionError;

/// Drives training and exam sessions against a console.
///
/// The question loop is synchronous and blocks on the console. In exam mode
/// a [`Countdown`] runs beside it; expiry is checked before every question
/// against both the countdown flag and the clock, so an exam can overrun
/// while the last answer is awaited but never starts a question late.
#[derive(Debug, Clone)]
pub struct SessionEngine {
    clock: Clock,
    exam: ExamSettings,
    tick: StdDuration,
}

impl SessionEngine {
    #[must_use]
    pub fn new(clock: Clock, exam: ExamSettings) -> Self {
        Self {
            clock,
            exam,
            tick: DEFAULT_TICK,
        }
    }

    /// Override the countdown refresh cadence.
    #[must_use]
    pub fn with_tick(mut self, tick: StdDuration) -> Self {
        self.tick = tick;
        self
    }

    /// Plan and run a session over `questions`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if there are no questions,
    /// `SessionError::Io` if the console fails,
    /// `SessionError::DeadlineOutOfRange` if the exam deadline cannot be
    /// represented, or `SessionError::Countdown` if the exam clock cannot start.
    pub fn run(
        &self,
        mode: SessionMode,
        questions: &[Question],
        console: &mut dyn QuizConsole,
    ) -> Result<SessionOutcome, SessionError> {
        let plan = SessionPlanner::new(&self.exam).build(mode, questions);
        self.run_plan(plan, console)
    }

    /// Run a session over an already built plan.
    ///
    /// # Errors
    ///
    /// Same as [`SessionEngine::run`].
    pub fn run_plan(
        &self,
        plan: SessionPlan<'_>,
        console: &mut dyn QuizConsole,
    ) -> Result<SessionOutcome, SessionError> {
        if plan.is_empty() {
            return Err(SessionError::Empty);
        }

        let available = plan.available;
        let started_at = self.clock.now();
        let mut state = SessionState::new(plan, started_at);
        info!(
            mode = %state.mode(),
            questions = state.planned(),
            pool = available,
            "session started"
        );

        match state.mode() {
            SessionMode::Training => self.run_training(&mut state, console)?,
            SessionMode::Exam => self.run_exam(&mut state, console)?,
        }

        let outcome = self.finish(&state);
        info!(
            mode = %outcome.mode,
            score = outcome.score,
            total = outcome.total,
            attempts = outcome.attempts,
            phase = ?outcome.phase,
            "session finished"
        );
        Ok(outcome)
    }

    fn run_training(
        &self,
        state: &mut SessionState<'_>,
        console: &mut dyn QuizConsole,
    ) -> Result<(), SessionError> {
        while let Some(question) = state.next_question() {
            let prompt = QuestionPrompt {
                mode: SessionMode::Training,
                number: state.answered() + 1,
                total: state.planned(),
                question,
                remaining: None,
            };
            let correct = ask(console, &prompt)?;
            state.record(question, correct);
            if !correct {
                debug!(attempts = state.attempts(), "question requeued");
            }
            console.progress(&state.progress())?;
        }
        Ok(())
    }

    fn run_exam(
        &self,
        state: &mut SessionState<'_>,
        console: &mut dyn QuizConsole,
    ) -> Result<(), SessionError> {
        let deadline = state
            .started_at()
            .checked_add_signed(self.exam.time_limit())
            .ok_or(SessionError::DeadlineOutOfRange)?;
        // Dropping the handle on an early `?` return also stops the worker.
        let countdown = Countdown::start(self.clock.clone(), deadline, self.tick)?;
        console.countdown_started(countdown.state())?;

        while let Some(question) = state.next_question() {
            if self.time_is_up(&countdown, deadline) {
                debug!(asked = state.answered(), "exam deadline reached");
                state.expire();
                console.time_expired()?;
                break;
            }

            let remaining = countdown.display();
            let prompt = QuestionPrompt {
                mode: SessionMode::Exam,
                number: state.answered() + 1,
                total: state.planned(),
                question,
                remaining: Some(&remaining),
            };
            let correct = ask(console, &prompt)?;
            state.record(question, correct);
            console.progress(&state.progress())?;
        }

        countdown.stop();
        Ok(())
    }

    /// The countdown flag may lag by one tick; the clock is authoritative.
    fn time_is_up(&self, countdown: &Countdown, deadline: DateTime<Utc>) -> bool {
        countdown.is_expired() || self.clock.now() >= deadline
    }

    fn finish(&self, state: &SessionState<'_>) -> SessionOutcome {
        let total = u32::try_from(state.total()).unwrap_or(u32::MAX);
        let passed = match state.mode() {
            SessionMode::Exam => Some(self.exam.is_pass(state.score())),
            SessionMode::Training => None,
        };
        SessionOutcome {
            mode: state.mode(),
            phase: state.phase(),
            score: state.score(),
            total,
            attempts: state.attempts(),
            started_at: state.started_at(),
            finished_at: self.clock.now(),
            passed,
        }
    }
}

/// Present one question, read the answer and report the verdict.
fn ask(console: &mut dyn QuizConsole, prompt: &QuestionPrompt<'_>) -> Result<bool, SessionError> {
    console.present(prompt)?;
    let raw = console.read_answer()?;
    let verdict = grade(prompt.question, &raw);
    console.feedback(&verdict)?;
    Ok(verdict.is_correct())
}
