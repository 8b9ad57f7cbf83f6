use quiz_core::model::{CourseId, Question, QuestionError, ResultRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("invalid question #{index}: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Question Store and course listing contract.
pub trait QuestionRepository: Send + Sync {
    /// List every course that has question data, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    fn list_courses(&self) -> Result<Vec<CourseId>, StorageError>;

    /// Load all questions of a course in stored order.
    ///
    /// An existing but empty question set is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the course has no question data,
    /// `StorageError::InvalidQuestion` if a record breaks question invariants,
    /// or other storage errors.
    fn load_questions(&self, course: &CourseId) -> Result<Vec<Question>, StorageError>;
}

/// Result Recorder contract: an append-only session log.
pub trait ResultRepository: Send + Sync {
    /// Append one session outcome; prior entries are never rewritten.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the entry cannot be written.
    fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    courses: Arc<Mutex<BTreeMap<CourseId, Vec<Question>>>>,
    results: Arc<Mutex<Vec<ResultRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the questions of a course.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_course(
        &self,
        course: CourseId,
        questions: Vec<Question>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(course, questions);
        Ok(())
    }

    /// Snapshot of every appended result, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn results(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

impl QuestionRepository for InMemoryRepository {
    fn list_courses(&self) -> Result<Vec<CourseId>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.keys().cloned().collect())
    }

    fn load_questions(&self, course: &CourseId) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .courses
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.get(course).cloned().ok_or(StorageError::NotFound)
    }
}

impl ResultRepository for InMemoryRepository {
    fn append_result(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut guard = self
            .results
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push(record.clone());
        Ok(())
    }
}

/// Aggregates question and result repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub results: Arc<dyn ResultRepository>,
}
