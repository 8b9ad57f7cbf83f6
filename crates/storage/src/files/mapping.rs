use chrono::Local;
use quiz_core::model::{Question, ResultRecord};
use serde::{Deserialize, Serialize};

use crate::repository::StorageError;

/// On-disk shape of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub question: String,
    pub options: Vec<String>,
    pub correct: Vec<usize>,
}

impl QuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            question: question.text().to_owned(),
            options: question.options().to_vec(),
            correct: question.correct().iter().copied().collect(),
        }
    }

    /// Convert the record into a validated `Question`.
    ///
    /// `index` is the record's position in the file and only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidQuestion` if the record breaks question invariants.
    pub fn into_question(self, index: usize) -> Result<Question, StorageError> {
        Question::new(self.question, self.options, self.correct)
            .map_err(|source| StorageError::InvalidQuestion { index, source })
    }
}

pub(crate) fn parse_questions(raw: &str) -> Result<Vec<Question>, StorageError> {
    let records: Vec<QuestionRecord> =
        serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))?;
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.into_question(index))
        .collect()
}

/// Render one result log line.
///
/// `2024-05-01 10:00:00 | course | Exam | 38/45 (84.4%) | PASSED`
#[must_use]
pub fn format_result_line(record: &ResultRecord) -> String {
    let timestamp = record
        .recorded_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    let status = match record.passed {
        Some(true) => " | PASSED",
        Some(false) => " | FAILED",
        None => "",
    };
    format!(
        "{timestamp} | {} | {} | {}/{} ({:.1}%){status}",
        record.course,
        record.mode,
        record.score,
        record.total,
        record.percent()
    )
}
