//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::ExamSettingsError;
use storage::repository::StorageError;

/// Errors emitted by the exam countdown.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CountdownError {
    #[error("failed to start countdown thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Errors emitted by session services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Countdown(#[from] CountdownError),
    #[error("exam deadline is outside the supported date range")]
    DeadlineOutOfRange,
}

/// Errors emitted by `CourseService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseError {
    #[error("no question data for course {course}")]
    NotFound { course: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RemoteSyncService`.
///
/// `RemoteSyncService::sync` folds these into its report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyncError {
    #[error("remote request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("remote path rejected: {0}")]
    UnsafePath(String),
    #[error("hash mismatch for {path}")]
    HashMismatch { path: String },
    #[error("invalid ignore pattern {pattern:?}: {message}")]
    IgnorePattern { pattern: String, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted while building configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    ExamSettings(#[from] ExamSettingsError),
    #[error("exam time limit of {secs} seconds is out of range")]
    ExamSecondsOutOfRange { secs: i64 },
}
