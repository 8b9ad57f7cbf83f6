use std::fs;
use std::io::ErrorKind;

use quiz_core::model::{CourseId, Question};
use tracing::{debug, warn};

use super::{FileRepository, QUESTIONS_FILE, mapping::parse_questions};
use crate::repository::{QuestionRepository, StorageError};

impl QuestionRepository for FileRepository {
    fn list_courses(&self) -> Result<Vec<CourseId>, StorageError> {
        let entries = match fs::read_dir(self.data_dir()) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut courses = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.join(QUESTIONS_FILE).is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                warn!(path = %path.display(), "skipping course directory with non UTF-8 name");
                continue;
            };
            match CourseId::new(name) {
                Ok(id) => courses.push(id),
                Err(e) => warn!(name, error = %e, "skipping course directory"),
            }
        }
        courses.sort();
        Ok(courses)
    }

    fn load_questions(&self, course: &CourseId) -> Result<Vec<Question>, StorageError> {
        let path = self.course_file(course);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(StorageError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let questions = parse_questions(&raw)?;
        debug!(%course, count = questions.len(), "loaded questions");
        Ok(questions)
    }
}
