//! Line-oriented terminal console.
//!
//! Reads answers from any `BufRead` and writes to any `Write`, so tests can
//! drive it with in-memory buffers. Colors and screen clearing are only
//! emitted when `styled` is set.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};
use std::thread;
use std::time::Duration as StdDuration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Stylize, style};
use crossterm::terminal::{Clear, ClearType};
use quiz_core::model::AnswerVerdict;
use services::{QuestionPrompt, QuizConsole, SessionProgress};

use crate::vm::{ProgressVm, QuestionVm, SummaryTone, SummaryVm};

pub struct TerminalConsole<R, W> {
    input: R,
    output: W,
    pause: StdDuration,
    styled: bool,
}

impl TerminalConsole<StdinLock<'static>, Stdout> {
    /// Console on the process stdin/stdout. Styling follows whether stdout is a tty.
    #[must_use]
    pub fn stdio(pause: StdDuration) -> Self {
        let styled = io::stdout().is_terminal();
        Self::new(io::stdin().lock(), io::stdout())
            .with_pause(pause)
            .with_style(styled)
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    #[must_use]
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            pause: StdDuration::ZERO,
            styled: false,
        }
    }

    /// Delay after each progress bar so feedback stays readable.
    #[must_use]
    pub fn with_pause(mut self, pause: StdDuration) -> Self {
        self.pause = pause;
        self
    }

    #[must_use]
    pub fn with_style(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Print a line without decoration.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Print a line in the warning color.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.colored_line(text, Color::Yellow)
    }

    /// Show `prompt` and read one trimmed line.
    ///
    /// # Errors
    ///
    /// Returns `UnexpectedEof` once input is exhausted.
    pub fn ask_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Render the end-of-session report.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the output cannot be written.
    pub fn show_summary(&mut self, summary: &SummaryVm) -> io::Result<()> {
        writeln!(self.output)?;
        self.colored_line(&summary.title, Color::Cyan)?;
        for line in &summary.lines {
            writeln!(self.output, "{line}")?;
        }
        if let Some(verdict) = &summary.verdict {
            let color = match summary.tone {
                SummaryTone::Success => Color::Green,
                SummaryTone::Failure => Color::Red,
                SummaryTone::Neutral => Color::Reset,
            };
            self.colored_line(verdict, color)?;
        }
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim().to_owned())
    }

    fn colored_line(&mut self, text: &str, color: Color) -> io::Result<()> {
        if self.styled {
            writeln!(self.output, "{}", style(text).with(color))
        } else {
            writeln!(self.output, "{text}")
        }
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        if self.styled {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> QuizConsole for TerminalConsole<R, W> {
    fn present(&mut self, prompt: &QuestionPrompt<'_>) -> io::Result<()> {
        let vm = QuestionVm::from(prompt);
        self.clear_screen()?;
        self.colored_line(&vm.header, Color::Cyan)?;
        if let Some(timer) = &vm.timer {
            self.colored_line(timer, Color::Yellow)?;
        }
        writeln!(self.output)?;
        writeln!(self.output, "{}", vm.text)?;
        for option in &vm.options {
            writeln!(self.output, "{option}")?;
        }
        write!(self.output, "{}", vm.hint)?;
        self.output.flush()
    }

    fn read_answer(&mut self) -> io::Result<String> {
        self.read_line()
    }

    fn feedback(&mut self, verdict: &AnswerVerdict) -> io::Result<()> {
        match verdict {
            AnswerVerdict::Correct => self.colored_line("Correct!", Color::Green),
            AnswerVerdict::Incorrect { correct_answers } => self.colored_line(
                &format!("Wrong. Correct answer: {}", correct_answers.join(", ")),
                Color::Red,
            ),
            AnswerVerdict::Malformed { token } => self.colored_line(
                &format!("Invalid input {token:?}, counted as wrong."),
                Color::Yellow,
            ),
        }
    }

    fn progress(&mut self, progress: &SessionProgress) -> io::Result<()> {
        let vm = ProgressVm::from(progress);
        writeln!(self.output, "{}", vm.label())?;
        self.output.flush()?;
        if !self.pause.is_zero() {
            thread::sleep(self.pause);
        }
        Ok(())
    }

    fn time_expired(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        self.colored_line("Time is up!", Color::Red)?;
        self.output.flush()
    }
}
