use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use chrono::Duration;
use quiz_core::model::{EXAM_PASS_SCORE, EXAM_QUESTIONS, EXAM_TIME_SECS, ExamSettings};
use tracing::warn;

use crate::error::ConfigError;
use crate::remote_sync::{DEFAULT_IGNORE, SyncConfig};

pub const DEFAULT_DATA_DIR: &str = "courses";
pub const DEFAULT_RESULTS_FILE: &str = "results.txt";
pub const DEFAULT_PAUSE_MS: u64 = 1200;

/// Runtime settings, read from `QUIZ_*` environment variables.
#[derive(Clone, Debug)]
pub struct QuizConfig {
    pub data_dir: PathBuf,
    pub results_path: PathBuf,
    pub exam_questions: usize,
    pub exam_pass_score: u32,
    pub exam_time_secs: i64,
    /// Pause after the progress indicator before the next question.
    pub pause: StdDuration,
    /// `None` disables remote sync.
    pub sync: Option<SyncConfig>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            results_path: PathBuf::from(DEFAULT_RESULTS_FILE),
            exam_questions: EXAM_QUESTIONS,
            exam_pass_score: EXAM_PASS_SCORE,
            exam_time_secs: EXAM_TIME_SECS,
            pause: StdDuration::from_millis(DEFAULT_PAUSE_MS),
            sync: None,
        }
    }
}

impl QuizConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values fall back to defaults.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = value("QUIZ_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let results_path =
            value("QUIZ_RESULTS_FILE").map_or(defaults.results_path, PathBuf::from);
        let exam_questions = parse_or(&value, "QUIZ_EXAM_QUESTIONS", defaults.exam_questions);
        let exam_pass_score = parse_or(&value, "QUIZ_EXAM_PASS_SCORE", defaults.exam_pass_score);
        let exam_time_secs = parse_or(&value, "QUIZ_EXAM_SECONDS", defaults.exam_time_secs);
        let pause_ms = parse_or(&value, "QUIZ_PAUSE_MS", DEFAULT_PAUSE_MS);

        let sync = value("QUIZ_SYNC_URL").map(|base_url| {
            let mut ignore: Vec<String> =
                DEFAULT_IGNORE.iter().map(|p| (*p).to_owned()).collect();
            if let Some(extra) = value("QUIZ_SYNC_IGNORE") {
                ignore.extend(
                    extra
                        .split(',')
                        .map(str::trim)
                        .filter(|p| !p.is_empty())
                        .map(str::to_owned),
                );
            }
            SyncConfig::new(base_url).with_ignore(ignore)
        });

        Self {
            data_dir,
            results_path,
            exam_questions,
            exam_pass_score,
            exam_time_secs,
            pause: StdDuration::from_millis(pause_ms),
            sync,
        }
    }

    /// Validated exam settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ExamSecondsOutOfRange` if the time limit cannot be
    /// represented, or `ConfigError::ExamSettings` if the exam values are
    /// inconsistent.
    pub fn exam_settings(&self) -> Result<ExamSettings, ConfigError> {
        let time_limit = Duration::try_seconds(self.exam_time_secs).ok_or(
            ConfigError::ExamSecondsOutOfRange {
                secs: self.exam_time_secs,
            },
        )?;
        Ok(ExamSettings::new(
            self.exam_questions,
            self.exam_pass_score,
            time_limit,
        )?)
    }
}

fn parse_or<T: FromStr>(value: &dyn Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    let Some(raw) = value(key) else {
        return default;
    };
    raw.trim().parse().unwrap_or_else(|_| {
        warn!(key, value = %raw, "ignoring unparseable setting");
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::ExamSettingsError;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = QuizConfig::from_lookup(lookup(&[]));
        assert_eq!(config.data_dir, PathBuf::from("courses"));
        assert_eq!(config.results_path, PathBuf::from("results.txt"));
        assert!(config.sync.is_none());

        let exam = config.exam_settings().unwrap();
        assert_eq!(exam, ExamSettings::default());
    }

    #[test]
    fn reads_overrides() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_DATA_DIR", "/srv/quiz"),
            ("QUIZ_EXAM_QUESTIONS", "20"),
            ("QUIZ_EXAM_PASS_SCORE", "15"),
            ("QUIZ_EXAM_SECONDS", "900"),
            ("QUIZ_PAUSE_MS", "0"),
        ]));
        assert_eq!(config.data_dir, PathBuf::from("/srv/quiz"));
        assert_eq!(config.pause, StdDuration::ZERO);

        let exam = config.exam_settings().unwrap();
        assert_eq!(exam.question_count(), 20);
        assert_eq!(exam.pass_score(), 15);
        assert_eq!(exam.time_limit(), Duration::minutes(15));
    }

    #[test]
    fn bad_numbers_fall_back_to_defaults() {
        let config = QuizConfig::from_lookup(lookup(&[("QUIZ_EXAM_QUESTIONS", "lots")]));
        assert_eq!(config.exam_questions, 45);
    }

    #[test]
    fn sync_url_enables_sync_with_extra_ignores() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_SYNC_URL", "https://example.org/packs"),
            ("QUIZ_SYNC_IGNORE", "drafts/**, ,notes.md"),
        ]));
        let sync = config.sync.unwrap();
        assert_eq!(sync.base_url(), "https://example.org/packs");
        assert!(sync.ignore().iter().any(|p| p == "drafts/**"));
        assert!(sync.ignore().iter().any(|p| p == "notes.md"));
        assert!(sync.ignore().iter().any(|p| p == "results.txt"));
    }

    #[test]
    fn inconsistent_exam_values_are_rejected() {
        let config = QuizConfig::from_lookup(lookup(&[
            ("QUIZ_EXAM_QUESTIONS", "10"),
            ("QUIZ_EXAM_PASS_SCORE", "38"),
        ]));
        assert!(config.exam_settings().is_err());
    }

    #[test]
    fn oversized_exam_seconds_are_errors() {
        let config = QuizConfig::from_lookup(lookup(&[("QUIZ_EXAM_SECONDS", "9000000000000")]));
        assert!(matches!(
            config.exam_settings(),
            Err(ConfigError::ExamSettings(
                ExamSettingsError::TimeLimitTooLong { .. }
            ))
        ));

        let config =
            QuizConfig::from_lookup(lookup(&[("QUIZ_EXAM_SECONDS", "10000000000000000")]));
        assert!(matches!(
            config.exam_settings(),
            Err(ConfigError::ExamSecondsOutOfRange {
                secs: 10_000_000_000_000_000
            })
        ));
    }
}
