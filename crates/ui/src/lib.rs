#![forbid(unsafe_code)]

pub mod console;
pub mod prompts;
pub mod vm;

pub use console::TerminalConsole;
pub use prompts::{choose_course, choose_mode};
