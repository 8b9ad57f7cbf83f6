mod console;
mod engine;
mod outcome;
mod plan;
mod progress;
mod state;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use console::{QuestionPrompt, QuizConsole};
pub use engine::SessionEngine;
pub use outcome::SessionOutcome;
pub use plan::{SessionPlan, SessionPlanner};
pub use progress::SessionProgress;
pub use state::{SessionPhase, SessionState};
