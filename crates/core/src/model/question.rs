use std::collections::BTreeSet;

use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question must have at least one option")]
    NoOptions,

    #[error("question must have at least one correct option")]
    NoCorrectOption,

    #[error("correct index {index} is out of range for {len} options")]
    CorrectOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice or multi-select question.
///
/// The correct set is never empty and only references existing options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct: BTreeSet<usize>,
}

impl Question {
    /// Builds a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the text is blank, there are no options,
    /// the correct set is empty, or a correct index has no matching option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct: impl IntoIterator<Item = usize>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if options.is_empty() {
            return Err(QuestionError::NoOptions);
        }

        let correct: BTreeSet<usize> = correct.into_iter().collect();
        if correct.is_empty() {
            return Err(QuestionError::NoCorrectOption);
        }
        if let Some(&index) = correct.iter().find(|&&i| i >= options.len()) {
            return Err(QuestionError::CorrectOutOfRange {
                index,
                len: options.len(),
            });
        }

        Ok(Self {
            text,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct(&self) -> &BTreeSet<usize> {
        &self.correct
    }

    /// True when more than one option must be selected.
    #[must_use]
    pub fn is_multi_select(&self) -> bool {
        self.correct.len() > 1
    }

    /// Option texts of the correct answer, in index order.
    #[must_use]
    pub fn correct_answers(&self) -> Vec<&str> {
        self.correct
            .iter()
            .filter_map(|&i| self.options.get(i).map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("option {i}")).collect()
    }

    #[test]
    fn builds_valid_question() {
        let q = Question::new("Which ports?", opts(4), [2, 0]).unwrap();
        assert!(q.is_multi_select());
        assert_eq!(q.correct_answers(), vec!["option 0", "option 2"]);
    }

    #[test]
    fn rejects_empty_correct_set() {
        let err = Question::new("Q", opts(2), []).unwrap_err();
        assert_eq!(err, QuestionError::NoCorrectOption);
    }

    #[test]
    fn rejects_out_of_range_correct_index() {
        let err = Question::new("Q", opts(2), [0, 2]).unwrap_err();
        assert_eq!(err, QuestionError::CorrectOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn rejects_blank_text_and_missing_options() {
        assert_eq!(
            Question::new("  ", opts(2), [0]).unwrap_err(),
            QuestionError::EmptyText
        );
        assert_eq!(
            Question::new("Q", Vec::new(), [0]).unwrap_err(),
            QuestionError::NoOptions
        );
    }
}
