mod progress_vm;
mod question_vm;
mod summary_vm;
mod time_fmt;

pub use progress_vm::{PROGRESS_WIDTH, ProgressVm};
pub use question_vm::QuestionVm;
pub use summary_vm::{SummaryTone, SummaryVm, map_summary};
pub use time_fmt::format_local;
