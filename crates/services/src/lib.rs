#![forbid(unsafe_code)]

pub mod config;
pub mod countdown;
pub mod course_service;
pub mod error;
pub mod remote_sync;
pub mod result_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use config::QuizConfig;
pub use countdown::{Countdown, CountdownState};
pub use course_service::CourseService;
pub use error::{ConfigError, CountdownError, CourseError, ResultError, SessionError, SyncError};
pub use remote_sync::{RemoteSyncService, SyncConfig, SyncReport, SyncStatus};
pub use result_service::ResultService;

pub use sessions::{
    QuestionPrompt, QuizConsole, SessionEngine, SessionOutcome, SessionPhase, SessionPlanner,
    SessionProgress,
};
