use std::io::{self, BufRead, Write};

use quiz_core::model::{CourseId, SessionMode};

use crate::console::TerminalConsole;

/// Pick the course to study.
///
/// A single course is chosen without asking. Otherwise the user is shown a
/// numbered list and asked until a valid number is entered. Returns `None`
/// when there is nothing to choose from.
///
/// # Errors
///
/// Returns an I/O error if the terminal fails or input is exhausted.
pub fn choose_course<R: BufRead, W: Write>(
    console: &mut TerminalConsole<R, W>,
    courses: &[CourseId],
) -> io::Result<Option<CourseId>> {
    match courses {
        [] => return Ok(None),
        [only] => {
            console.line(&format!("Course: {only}"))?;
            return Ok(Some(only.clone()));
        }
        _ => {}
    }

    console.line("Available courses:")?;
    for (idx, course) in courses.iter().enumerate() {
        console.line(&format!("   {}) {course}", idx + 1))?;
    }

    let prompt = format!("Choose a course [1-{}]: ", courses.len());
    loop {
        let raw = console.ask_line(&prompt)?;
        if let Some(course) = pick(courses, &raw) {
            return Ok(Some(course.clone()));
        }
        console.notice(&format!(
            "Please enter a number between 1 and {}.",
            courses.len()
        ))?;
    }
}

fn pick<'a>(courses: &'a [CourseId], raw: &str) -> Option<&'a CourseId> {
    let n: usize = raw.trim().parse().ok()?;
    n.checked_sub(1).and_then(|idx| courses.get(idx))
}

/// Ask for the session mode.
///
/// # Errors
///
/// Returns an I/O error if the terminal fails or input is exhausted.
pub fn choose_mode<R: BufRead, W: Write>(
    console: &mut TerminalConsole<R, W>,
) -> io::Result<SessionMode> {
    let raw = console.ask_line("Select mode (1 - training, 2 - exam): ")?;
    Ok(parse_mode(&raw))
}

/// `2` selects the exam; any other input means training.
#[must_use]
pub fn parse_mode(raw: &str) -> SessionMode {
    if raw.trim() == "2" {
        SessionMode::Exam
    } else {
        SessionMode::Training
    }
}
