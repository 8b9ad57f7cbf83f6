use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::CourseId;

/// How a quiz session is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionMode {
    /// Untimed; wrong answers are asked again until answered correctly.
    Training,
    /// Timed fixed-size sample with a pass threshold.
    Exam,
}

impl SessionMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            SessionMode::Training => "Training",
            SessionMode::Exam => "Exam",
        }
    }
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentage of correct answers; zero when nothing was asked.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_percent(score: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(score) / f64::from(total) * 100.0
}

/// One line of the result log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub course: CourseId,
    pub mode: SessionMode,
    pub score: u32,
    pub total: u32,
    /// Only set for exams.
    pub passed: Option<bool>,
    pub recorded_at: DateTime<Utc>,
}

impl ResultRecord {
    #[must_use]
    pub fn percent(&self) -> f64 {
        score_percent(self.score, self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn percent_of_zero_total_is_zero() {
        assert!(score_percent(0, 0).abs() < f64::EPSILON);
        assert!(score_percent(5, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn record_percent_uses_score_and_total() {
        let record = ResultRecord {
            course: CourseId::new("net").unwrap(),
            mode: SessionMode::Exam,
            score: 38,
            total: 45,
            passed: Some(true),
            recorded_at: fixed_now(),
        };
        assert!((record.percent() - 84.444_444).abs() < 1e-4);
    }
}
