//! Answer parsing and evaluation.
//!
//! Everything here is pure: no I/O, no clock, no randomness.

use crate::model::{AnswerParseError, AnswerSubmission, AnswerVerdict, Question};

/// Delimiter between indices in a multi-select answer.
pub const ANSWER_DELIMITER: char = ',';

/// Parses raw answer text such as `"0, 2"` into a submission.
///
/// Empty tokens are skipped, so blank input yields an empty submission.
///
/// # Errors
///
/// Returns `AnswerParseError::NonNumeric` for the first token that is not an integer.
pub fn parse_answer(raw: &str) -> Result<AnswerSubmission, AnswerParseError> {
    let mut indices = Vec::new();
    for token in raw.split(ANSWER_DELIMITER).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        let value = token
            .parse::<i64>()
            .map_err(|_| AnswerParseError::NonNumeric {
                token: token.to_owned(),
            })?;
        indices.push(value);
    }
    Ok(AnswerSubmission::new(indices))
}

/// Returns true iff the submitted set equals the question's correct set.
#[must_use]
pub fn evaluate(question: &Question, submission: &AnswerSubmission) -> bool {
    let correct = question.correct();
    if submission.indices().len() != correct.len() {
        return false;
    }
    submission
        .indices()
        .iter()
        .all(|&i| usize::try_from(i).is_ok_and(|i| correct.contains(&i)))
}

/// Parses and evaluates in one step.
#[must_use]
pub fn grade(question: &Question, raw: &str) -> AnswerVerdict {
    match parse_answer(raw) {
        Err(err) => err.into(),
        Ok(submission) if evaluate(question, &submission) => AnswerVerdict::Correct,
        Ok(_) => AnswerVerdict::Incorrect {
            correct_answers: question
                .correct_answers()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        },
    }
}
