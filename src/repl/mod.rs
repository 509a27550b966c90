//! # REPL Capability
//!
//! The input surface the orchestrator reads through. One trait, two
//! variants: the interactive rustyline-backed editor, and a scripted double
//! for tests (see `test_support`). The orchestrator only ever holds a
//! `Box<dyn Repl>`, so sessions are drivable without a terminal.

pub mod interactive;

use std::fmt;

pub use interactive::InteractiveRepl;

/// Errors from the input surface.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplError {
    /// End of input (Ctrl-D, script exhausted). Ends the session cleanly.
    Eof,
    /// The user backed out of a prompt or selection (Ctrl-C).
    Cancelled,
    /// Terminal-level failure. Fatal.
    Io(String),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplError::Eof => write!(f, "end of input"),
            ReplError::Cancelled => write!(f, "cancelled"),
            ReplError::Io(msg) => write!(f, "input error: {msg}"),
        }
    }
}

impl std::error::Error for ReplError {}

/// Minimal capability set for soliciting input.
pub trait Repl {
    /// Reads one line of raw input.
    fn read_line(&mut self, prompt: &str) -> Result<String, ReplError>;

    /// Asks the user to pick exactly one of `options`; returns its index.
    fn select_one(&mut self, prompt: &str, options: &[String]) -> Result<usize, ReplError>;
}
