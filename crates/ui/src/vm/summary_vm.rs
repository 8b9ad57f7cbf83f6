use quiz_core::model::SessionMode;
use services::{SessionOutcome, SessionPhase};

use crate::vm::time_fmt::format_local;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SummaryTone {
    Neutral,
    Success,
    Failure,
}

/// End-of-session report shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryVm {
    pub title: String,
    pub lines: Vec<String>,
    pub verdict: Option<String>,
    pub tone: SummaryTone,
}

#[must_use]
pub fn map_summary(outcome: &SessionOutcome) -> SummaryVm {
    let mut lines = vec![
        format!("Correct: {} of {}", outcome.score, outcome.total),
        format!("Score: {:.1}%", outcome.percent()),
    ];

    match outcome.mode {
        SessionMode::Training => {
            lines.push(format!("Answers given: {}", outcome.attempts));
            if outcome.phase == SessionPhase::Completed {
                lines.push("Every question was answered correctly.".to_owned());
            }
        }
        SessionMode::Exam if outcome.timed_out() => {
            lines.push(format!(
                "Time ran out after {} questions.",
                outcome.total
            ));
        }
        SessionMode::Exam => {}
    }
    lines.push(format!("Finished: {}", format_local(outcome.finished_at)));

    let (verdict, tone) = match outcome.passed {
        Some(true) => (Some("Exam PASSED".to_owned()), SummaryTone::Success),
        Some(false) => (Some("Exam FAILED".to_owned()), SummaryTone::Failure),
        None => (None, SummaryTone::Neutral),
    };

    SummaryVm {
        title: format!("==== Summary ({}) ====", outcome.mode),
        lines,
        verdict,
        tone,
    }
}
