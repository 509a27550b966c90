//! # Command Interpreter
//!
//! Maps raw prompt text to a typed [`Command`] or an [`UnknownCommandError`]
//! with a remediation hint. Pure mapping: no state, no I/O, same input always
//! yields the same output.
//!
//! The grammar is token-exact. A verb matches only as a whole token, so
//! `gone` is rejected rather than guessed as `go`; `go` with anything other
//! than exactly one recognized direction argument is rejected with a hint.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeDirection {
    Back,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Look,
    Go(Direction),
    Examine,
    Shift(TimeDirection),
    Quit,
    Help,
}

/// A parsed command plus the raw text it came from (kept for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub raw: String,
}

/// Input that didn't parse. `hint` is present when the verb was recognized
/// but its argument wasn't.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommandError {
    pub raw: String,
    pub hint: Option<String>,
}

impl fmt::Display for UnknownCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i did not understand :( supported verbs: look, go, examine, shift, quit")
    }
}

impl std::error::Error for UnknownCommandError {}

impl UnknownCommandError {
    fn bare(raw: &str) -> Self {
        Self { raw: raw.to_string(), hint: None }
    }

    fn with_hint(raw: &str, hint: &str) -> Self {
        Self { raw: raw.to_string(), hint: Some(hint.to_string()) }
    }
}

const GO_HINT: &str = "try 'go down' or 'go up'";
const SHIFT_HINT: &str = "try 'shift back' or 'shift forward'";

/// Parses one line of raw input. Case-sensitive, whitespace-trimmed.
pub fn parse_command(raw: &str) -> Result<Command, UnknownCommandError> {
    let tokens: Vec<&str> = raw.trim().split_whitespace().collect();

    let kind = match tokens.as_slice() {
        ["look"] => CommandKind::Look,
        ["examine"] => CommandKind::Examine,
        ["quit"] | ["q"] => CommandKind::Quit,
        ["?"] => CommandKind::Help,
        ["go", "up"] => CommandKind::Go(Direction::Up),
        ["go", "down"] => CommandKind::Go(Direction::Down),
        ["go", ..] => return Err(UnknownCommandError::with_hint(raw, GO_HINT)),
        ["shift", "back"] => CommandKind::Shift(TimeDirection::Back),
        ["shift", "forward"] => CommandKind::Shift(TimeDirection::Forward),
        ["shift", ..] => return Err(UnknownCommandError::with_hint(raw, SHIFT_HINT)),
        _ => return Err(UnknownCommandError::bare(raw)),
    };

    Ok(Command { kind, raw: raw.to_string() })
}
