use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for parsing a course identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseIdError {
    #[error("course id cannot be empty")]
    Empty,

    #[error("course id contains a path separator: {raw}")]
    PathSeparator { raw: String },

    #[error("course id cannot be a relative path component: {raw}")]
    RelativeComponent { raw: String },
}

/// Identifier of a course, also used as its directory name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseId(String);

impl CourseId {
    /// Creates a new `CourseId` after validating it is a single path segment.
    ///
    /// # Errors
    ///
    /// Returns `CourseIdError` if the id is blank, contains a separator, or is `.`/`..`.
    pub fn new(raw: impl Into<String>) -> Result<Self, CourseIdError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CourseIdError::Empty);
        }
        if trimmed.contains(['/', '\\']) {
            return Err(CourseIdError::PathSeparator { raw });
        }
        if trimmed == "." || trimmed == ".." {
            return Err(CourseIdError::RelativeComponent { raw });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CourseId({})", self.0)
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CourseId {
    type Err = CourseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CourseId {
    type Error = CourseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CourseId> for String {
    fn from(id: CourseId) -> Self {
        id.0
    }
}
