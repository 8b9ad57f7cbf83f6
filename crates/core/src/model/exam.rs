use chrono::Duration;
use thiserror::Error;

/// Number of questions drawn for an exam.
pub const EXAM_QUESTIONS: usize = 45;
/// Minimum number of correct answers needed to pass.
pub const EXAM_PASS_SCORE: u32 = 38;
/// Exam time limit in seconds.
pub const EXAM_TIME_SECS: i64 = 3600;
/// Longest accepted exam time limit (one day).
pub const MAX_EXAM_TIME_SECS: i64 = 86_400;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExamSettingsError {
    #[error("exam question count must be > 0")]
    InvalidQuestionCount,

    #[error("exam time limit cannot be negative")]
    NegativeTimeLimit,

    #[error("exam time limit cannot exceed {max_secs} seconds")]
    TimeLimitTooLong { max_secs: i64 },

    #[error("pass score {pass_score} exceeds question count {question_count}")]
    PassScoreTooHigh { pass_score: u32, question_count: usize },
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Exam sizing, threshold and time limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamSettings {
    question_count: usize,
    pass_score: u32,
    time_limit: Duration,
}

impl Default for ExamSettings {
    /// 45 questions, 38 to pass, one hour.
    fn default() -> Self {
        Self {
            question_count: EXAM_QUESTIONS,
            pass_score: EXAM_PASS_SCORE,
            time_limit: Duration::seconds(EXAM_TIME_SECS),
        }
    }
}

impl ExamSettings {
    /// Creates custom exam settings.
    ///
    /// # Errors
    ///
    /// Returns `ExamSettingsError` if the question count is zero, the time limit
    /// is negative or longer than [`MAX_EXAM_TIME_SECS`], or the pass score
    /// cannot be reached.
    pub fn new(
        question_count: usize,
        pass_score: u32,
        time_limit: Duration,
    ) -> Result<Self, ExamSettingsError> {
        if question_count == 0 {
            return Err(ExamSettingsError::InvalidQuestionCount);
        }
        if time_limit < Duration::zero() {
            return Err(ExamSettingsError::NegativeTimeLimit);
        }
        if time_limit > Duration::seconds(MAX_EXAM_TIME_SECS) {
            return Err(ExamSettingsError::TimeLimitTooLong {
                max_secs: MAX_EXAM_TIME_SECS,
            });
        }
        if usize::try_from(pass_score).map_or(true, |score| score > question_count) {
            return Err(ExamSettingsError::PassScoreTooHigh {
                pass_score,
                question_count,
            });
        }
        Ok(Self {
            question_count,
            pass_score,
            time_limit,
        })
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.question_count
    }

    #[must_use]
    pub fn pass_score(&self) -> u32 {
        self.pass_score
    }

    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Number of questions an exam draws from a pool of `available`.
    #[must_use]
    pub fn selection_size(&self, available: usize) -> usize {
        self.question_count.min(available)
    }

    /// Pass/fail verdict for a score.
    #[must_use]
    pub fn is_pass(&self, score: u32) -> bool {
        score >= self.pass_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_exam_constants() {
        let settings = ExamSettings::default();
        assert_eq!(settings.question_count(), 45);
        assert_eq!(settings.pass_score(), 38);
        assert_eq!(settings.time_limit(), Duration::hours(1));
    }

    #[test]
    fn pass_threshold_is_inclusive() {
        let settings = ExamSettings::default();
        assert!(!settings.is_pass(settings.pass_score() - 1));
        assert!(settings.is_pass(settings.pass_score()));
    }

    #[test]
    fn selection_is_capped_by_available() {
        let settings = ExamSettings::default();
        assert_eq!(settings.selection_size(10), 10);
        assert_eq!(settings.selection_size(200), 45);
    }

    #[test]
    fn rejects_invalid_settings() {
        assert_eq!(
            ExamSettings::new(0, 0, Duration::seconds(1)),
            Err(ExamSettingsError::InvalidQuestionCount)
        );
        assert_eq!(
            ExamSettings::new(5, 3, Duration::seconds(-1)),
            Err(ExamSettingsError::NegativeTimeLimit)
        );
        assert!(matches!(
            ExamSettings::new(5, 6, Duration::seconds(60)),
            Err(ExamSettingsError::PassScoreTooHigh { .. })
        ));
    }

    #[test]
    fn time_limit_is_capped_at_one_day() {
        assert!(ExamSettings::new(5, 3, Duration::seconds(MAX_EXAM_TIME_SECS)).is_ok());
        assert_eq!(
            ExamSettings::new(5, 3, Duration::seconds(MAX_EXAM_TIME_SECS + 1)),
            Err(ExamSettingsError::TimeLimitTooLong {
                max_secs: MAX_EXAM_TIME_SECS
            })
        );
        assert!(ExamSettings::new(5, 3, Duration::seconds(9_000_000_000_000)).is_err());
    }
}
