use chrono::{DateTime, Utc};
use quiz_core::model::{CourseId, ResultRecord, SessionMode, score_percent};

use super::state::SessionPhase;

/// Final result of a session, produced once the engine stops.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub mode: SessionMode,
    pub phase: SessionPhase,
    pub score: u32,
    pub total: u32,
    pub attempts: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Only set for exams.
    pub passed: Option<bool>,
}

impl SessionOutcome {
    #[must_use]
    pub fn percent(&self) -> f64 {
        score_percent(self.score, self.total)
    }

    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.phase == SessionPhase::TimeExpired
    }

    /// Log entry for this outcome.
    #[must_use]
    pub fn to_record(&self, course: CourseId) -> ResultRecord {
        ResultRecord {
            course,
            mode: self.mode,
            score: self.score,
            total: self.total,
            passed: self.passed,
            recorded_at: self.finished_at,
        }
    }
}
