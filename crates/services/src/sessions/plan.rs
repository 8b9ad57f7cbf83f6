use rand::Rng;
use rand::rng;
use rand::seq::SliceRandom;

use quiz_core::model::{ExamSettings, Question, SessionMode};

/// Questions selected for a session, in presentation order.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan<'q> {
    pub mode: SessionMode,
    pub questions: Vec<&'q Question>,
    /// Size of the pool the plan was drawn from.
    pub available: usize,
}

impl SessionPlan<'_> {
    /// Number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when no questions were selected for this session.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Picks and orders the questions of a session.
///
/// - Training takes every question, shuffled.
/// - Exam draws a uniform sample without replacement of
///   `min(question_count, available)`, in random order.
pub struct SessionPlanner<'a> {
    exam: &'a ExamSettings,
}

impl<'a> SessionPlanner<'a> {
    #[must_use]
    pub fn new(exam: &'a ExamSettings) -> Self {
        Self { exam }
    }

    /// Build a plan using the thread-local RNG.
    #[must_use]
    pub fn build<'q>(&self, mode: SessionMode, questions: &'q [Question]) -> SessionPlan<'q> {
        self.build_with_rng(mode, questions, &mut rng())
    }

    /// Build a plan with an explicit RNG, for reproducible ordering.
    pub fn build_with_rng<'q, R: Rng + ?Sized>(
        &self,
        mode: SessionMode,
        questions: &'q [Question],
        rng: &mut R,
    ) -> SessionPlan<'q> {
        let mut selected: Vec<&'q Question> = questions.iter().collect();
        selected.as_mut_slice().shuffle(rng);

        if mode == SessionMode::Exam {
            selected.truncate(self.exam.selection_size(questions.len()));
        }

        SessionPlan {
            mode,
            questions: selected,
            available: questions.len(),
        }
    }
}
