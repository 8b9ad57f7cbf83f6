use std::collections::BTreeSet;

use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Raw answer text that could not be turned into option indices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerParseError {
    #[error("not a number: {token:?}")]
    NonNumeric { token: String },
}

//
// ─── SUBMISSION ───────────────────────────────────────────────────────────────
//

/// Option indices chosen by the user.
///
/// Indices are kept as given: negative or out-of-range values are legal and
/// simply never match a question's correct set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSubmission {
    indices: BTreeSet<i64>,
}

impl AnswerSubmission {
    #[must_use]
    pub fn new(indices: impl IntoIterator<Item = i64>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn indices(&self) -> &BTreeSet<i64> {
        &self.indices
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

//
// ─── VERDICT ──────────────────────────────────────────────────────────────────
//

/// Outcome of grading one raw answer against a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerVerdict {
    Correct,
    /// A well-formed answer that did not match; carries the expected option texts.
    Incorrect { correct_answers: Vec<String> },
    /// The input could not be parsed. Scored as incorrect.
    Malformed { token: String },
}

impl AnswerVerdict {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerVerdict::Correct)
    }
}

impl From<AnswerParseError> for AnswerVerdict {
    fn from(err: AnswerParseError) -> Self {
        match err {
            AnswerParseError::NonNumeric { token } => AnswerVerdict::Malformed { token },
        }
    }
}
