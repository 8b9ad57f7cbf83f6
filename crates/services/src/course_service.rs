use std::sync::Arc;

use quiz_core::model::{CourseId, Question};
use storage::repository::{QuestionRepository, StorageError};
use tracing::debug;

use crate::error::CourseError;

/// Course listing and question loading.
#[derive(Clone)]
pub struct CourseService {
    questions: Arc<dyn QuestionRepository>,
}

impl CourseService {
    #[must_use]
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    /// Courses that have question data, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::Storage` if repository access fails.
    pub fn list_courses(&self) -> Result<Vec<CourseId>, CourseError> {
        Ok(self.questions.list_courses()?)
    }

    /// Load every question of a course.
    ///
    /// An empty vector means the course exists but holds no questions.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::NotFound` if the course has no question data.
    /// Returns `CourseError::Storage` for other repository failures.
    pub fn load_questions(&self, course: &CourseId) -> Result<Vec<Question>, CourseError> {
        match self.questions.load_questions(course) {
            Ok(questions) => {
                debug!(%course, count = questions.len(), "course loaded");
                Ok(questions)
            }
            Err(StorageError::NotFound) => Err(CourseError::NotFound {
                course: course.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;

    #[test]
    fn missing_course_maps_to_not_found() {
        let repo = InMemoryRepository::new();
        let service = CourseService::new(Arc::new(repo));
        let err = service
            .load_questions(&CourseId::new("ghost").unwrap())
            .unwrap_err();
        assert!(matches!(err, CourseError::NotFound { course } if course == "ghost"));
    }

    #[test]
    fn lists_and_loads() {
        let repo = InMemoryRepository::new();
        let q = Question::new("Q", vec!["a".into(), "b".into()], [1]).unwrap();
        repo.insert_course(CourseId::new("net").unwrap(), vec![q])
            .unwrap();
        let service = CourseService::new(Arc::new(repo));

        let courses = service.list_courses().unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(service.load_questions(&courses[0]).unwrap().len(), 1);
    }
}
