use std::sync::Arc;

use quiz_core::model::{CourseId, ResultRecord};
use storage::repository::ResultRepository;
use tracing::info;

use crate::error::ResultError;
use crate::sessions::SessionOutcome;

/// Appends session outcomes to the result log.
#[derive(Clone)]
pub struct ResultService {
    results: Arc<dyn ResultRepository>,
}

impl ResultService {
    #[must_use]
    pub fn new(results: Arc<dyn ResultRepository>) -> Self {
        Self { results }
    }

    /// Record a finished session.
    ///
    /// Callers should treat failure as non-fatal: the score has already been shown.
    ///
    /// # Errors
    ///
    /// Returns `ResultError::Storage` if the log cannot be written.
    pub fn record(
        &self,
        course: &CourseId,
        outcome: &SessionOutcome,
    ) -> Result<ResultRecord, ResultError> {
        let record = outcome.to_record(course.clone());
        self.results.append_result(&record)?;
        info!(%course, mode = %record.mode, score = record.score, total = record.total, "result recorded");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::SessionPhase;
    use quiz_core::model::SessionMode;
    use quiz_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    #[test]
    fn records_exam_outcome_with_pass_flag() {
        let repo = InMemoryRepository::new();
        let service = ResultService::new(Arc::new(repo.clone()));
        let outcome = SessionOutcome {
            mode: SessionMode::Exam,
            phase: SessionPhase::TimeExpired,
            score: 12,
            total: 20,
            attempts: 20,
            started_at: fixed_now(),
            finished_at: fixed_now(),
            passed: Some(false),
        };

        let record = service
            .record(&CourseId::new("siem").unwrap(), &outcome)
            .unwrap();

        assert_eq!(record.total, 20);
        assert_eq!(record.passed, Some(false));
        assert_eq!(repo.results().unwrap(), vec![record]);
    }
}
