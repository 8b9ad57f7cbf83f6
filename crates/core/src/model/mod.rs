mod answer;
mod exam;
mod ids;
mod question;
mod session;

pub use answer::{AnswerParseError, AnswerSubmission, AnswerVerdict};
pub use exam::{
    EXAM_PASS_SCORE, EXAM_QUESTIONS, EXAM_TIME_SECS, ExamSettings, ExamSettingsError,
    MAX_EXAM_TIME_SECS,
};
pub use ids::{CourseId, CourseIdError};
pub use question::{Question, QuestionError};
pub use session::{ResultRecord, SessionMode, score_percent};
