use std::fmt;
use std::path::PathBuf;

use quiz_core::Clock;
use services::{
    CourseError, CourseService, QuizConfig, RemoteSyncService, ResultService, SessionEngine,
    SyncStatus,
};
use storage::repository::Storage;
use tracing::{info, warn};
use ui::vm::map_summary;
use ui::{TerminalConsole, choose_course, choose_mode};

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyPath { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyPath { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_path(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<PathBuf, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyPath { flag });
    }
    Ok(PathBuf::from(value))
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz-trainer [--data-dir <path>] [--results <path>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir courses");
    eprintln!("  --results  results.txt");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DATA_DIR, QUIZ_RESULTS_FILE, QUIZ_EXAM_QUESTIONS, QUIZ_EXAM_PASS_SCORE,");
    eprintln!("  QUIZ_EXAM_SECONDS, QUIZ_PAUSE_MS, QUIZ_SYNC_URL, QUIZ_SYNC_IGNORE, RUST_LOG");
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    data_dir: Option<PathBuf>,
    results: Option<PathBuf>,
    offline: bool,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => parsed.data_dir = Some(require_path(&mut args, "--data-dir")?),
                "--results" => parsed.results = Some(require_path(&mut args, "--results")?),
                "--offline" => parsed.offline = true,
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    /// Flags win over the environment.
    fn apply(self, config: &mut QuizConfig) {
        if let Some(data_dir) = self.data_dir {
            config.data_dir = data_dir;
        }
        if let Some(results) = self.results {
            config.results_path = results;
        }
        if self.offline {
            config.sync = None;
        }
    }
}

fn init_tracing() {
    // stderr keeps log lines out of the interactive prompt.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Best-effort mirror of the remote question packs. Never fatal.
fn sync_courses(config: &QuizConfig) -> Option<SyncStatus> {
    let sync = config.sync.clone()?;
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            warn!(error = %err, "could not start sync runtime");
            return Some(SyncStatus::Failed {
                reason: err.to_string(),
            });
        }
    };
    let service = RemoteSyncService::new(&config.data_dir, Some(sync));
    let report = runtime.block_on(service.sync());
    for failure in &report.failures {
        warn!(path = %failure.path, reason = %failure.reason, "file not synced");
    }
    Some(report.status)
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse(std::env::args().skip(1)).inspect_err(|_| print_usage())?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let mut config = QuizConfig::from_env();
    args.apply(&mut config);
    let exam = config.exam_settings()?;

    let mut console = TerminalConsole::stdio(config.pause);
    console.line("Exam trainer")?;

    match sync_courses(&config) {
        Some(SyncStatus::Offline { .. }) => {
            console.notice("Remote unavailable, using local questions.")?;
        }
        Some(SyncStatus::Failed { reason }) => {
            console.notice(&format!("Question update skipped: {reason}"))?;
        }
        Some(SyncStatus::Online | SyncStatus::Disabled) | None => {}
    }

    let storage = Storage::files(&config.data_dir, &config.results_path);
    let courses = CourseService::new(storage.questions.clone());
    let results = ResultService::new(storage.results.clone());

    let available = courses.list_courses()?;
    let Some(course) = choose_course(&mut console, &available)? else {
        console.notice(&format!(
            "No courses found in {}.",
            config.data_dir.display()
        ))?;
        return Ok(());
    };

    let questions = match courses.load_questions(&course) {
        Ok(questions) if questions.is_empty() => {
            console.notice(&format!("Course {course} has no questions."))?;
            return Ok(());
        }
        Ok(questions) => questions,
        Err(CourseError::NotFound { course }) => {
            console.notice(&format!("No question file for course {course}."))?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    info!(%course, questions = questions.len(), "course ready");

    let mode = choose_mode(&mut console)?;
    let engine = SessionEngine::new(Clock::default_clock(), exam);
    let outcome = engine.run(mode, &questions, &mut console)?;
    console.show_summary(&map_summary(&outcome))?;

    if let Err(err) = results.record(&course, &outcome) {
        warn!(error = %err, "result not saved");
        console.notice(&format!("Could not save the result: {err}"))?;
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
