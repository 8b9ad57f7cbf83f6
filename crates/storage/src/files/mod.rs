use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::repository::{QuestionRepository, ResultRepository, Storage};

mod mapping;
mod question_repo;
mod result_log_repo;

pub use mapping::{QuestionRecord, format_result_line};

/// Name of the question file inside each course directory.
pub const QUESTIONS_FILE: &str = "questions.json";

/// File-system backend.
///
/// Courses live at `<data_dir>/<course>/questions.json`; results are appended
/// to a plain text log.
#[derive(Clone, Debug)]
pub struct FileRepository {
    data_dir: PathBuf,
    results_path: PathBuf,
}

impl FileRepository {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, results_path: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            results_path: results_path.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn results_path(&self) -> &Path {
        &self.results_path
    }

    fn course_file(&self, course: &quiz_core::model::CourseId) -> PathBuf {
        self.data_dir.join(course.as_str()).join(QUESTIONS_FILE)
    }
}

impl Storage {
    /// Build a `Storage` backed by course directories and a text result log.
    #[must_use]
    pub fn files(data_dir: impl Into<PathBuf>, results_path: impl Into<PathBuf>) -> Self {
        let repo = FileRepository::new(data_dir, results_path);
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let results: Arc<dyn ResultRepository> = Arc::new(repo);
        Self { questions, results }
    }
}
