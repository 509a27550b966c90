//! # Session Orchestrator
//!
//! Drives the read → parse → act → report cycle and owns the error-recovery
//! policy:
//!
//! ```text
//! loop
//! ├── refresh listing cache if invalid
//! │     NotFound      → report disorientation, reset to root, refetch there
//! │     Transport/5xx → bounded retries, then terminate
//! ├── read a line (Eof ends the session cleanly)
//! ├── parse (UnknownCommandError → message + hint, continue)
//! └── dispatch
//!       Look / Go / Examine / Shift / Quit / Help
//! ```
//!
//! Every navigation precondition failure (at root, no prior history, no
//! recorded future) is user feedback, never loop termination.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::core::command::{parse_command, CommandKind, Direction, TimeDirection};
use crate::core::state::{NavError, NavigationState};
use crate::provider::{ContentProvider, ProviderError};
use crate::render::{describe_room, RoomView};
use crate::repl::{Repl, ReplError};

const PROMPT: &str = "> ";
const HELP_TEXT: &str = "supported verbs: look, go, examine, shift, quit";

/// Why a session ended abnormally.
#[derive(Debug)]
pub enum SessionError {
    /// Provider failure that survived the retry budget.
    Provider(ProviderError),
    /// Terminal-level input failure.
    Repl(ReplError),
    /// Output stream failure.
    Io(std::io::Error),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Provider(e) => write!(f, "provider error: {e}"),
            SessionError::Repl(e) => write!(f, "input error: {e}"),
            SessionError::Io(e) => write!(f, "output error: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<std::io::Error> for SessionError {
    fn from(e: std::io::Error) -> Self {
        SessionError::Io(e)
    }
}

/// What the dispatch of one command decided about the loop.
enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    provider: Arc<dyn ContentProvider>,
    repl: Box<dyn Repl>,
    out: W,
    state: NavigationState,
    repo: String,
    max_retries: u32,
}

impl<W: Write> Session<W> {
    pub fn new(
        provider: Arc<dyn ContentProvider>,
        repl: Box<dyn Repl>,
        out: W,
        repo: String,
        start_reference: Option<String>,
        max_retries: u32,
    ) -> Self {
        Self {
            provider,
            repl,
            out,
            state: NavigationState::with_reference(start_reference),
            repo,
            max_retries,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Runs the session to completion. Returns `Ok` on quit or end of input;
    /// only exhausted-retry provider failures and terminal-level input
    /// failures are errors.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        info!("session starting for {}", self.repo);

        self.refresh_listing().await?;
        self.render_room()?;

        loop {
            if self.state.needs_refresh() {
                self.refresh_listing().await?;
            }

            let raw = match self.repl.read_line(PROMPT) {
                Ok(line) => line,
                Err(ReplError::Eof) => {
                    debug!("end of input, ending session");
                    break;
                }
                Err(ReplError::Cancelled) => continue,
                Err(e) => return Err(SessionError::Repl(e)),
            };

            let command = match parse_command(&raw) {
                Ok(cmd) => cmd,
                Err(err) => {
                    writeln!(self.out, "{err}")?;
                    if let Some(hint) = &err.hint {
                        writeln!(self.out, "hint: {hint}")?;
                    }
                    continue;
                }
            };
            debug!("command: {:?}", command.kind);

            match self.dispatch(command.kind).await? {
                Flow::Continue => {}
                Flow::Quit => break,
            }
        }

        info!("session over");
        Ok(())
    }

    async fn dispatch(&mut self, kind: CommandKind) -> Result<Flow, SessionError> {
        match kind {
            CommandKind::Look => self.render_room()?,
            CommandKind::Go(Direction::Up) => self.go_up()?,
            CommandKind::Go(Direction::Down) => return self.go_down(),
            CommandKind::Examine => return self.examine().await,
            CommandKind::Shift(TimeDirection::Back) => self.shift_back().await?,
            CommandKind::Shift(TimeDirection::Forward) => self.shift_forward()?,
            CommandKind::Quit => {
                writeln!(self.out, "see you again~")?;
                return Ok(Flow::Quit);
            }
            CommandKind::Help => writeln!(self.out, "{HELP_TEXT}")?,
        }
        Ok(Flow::Continue)
    }

    /// Fetches the listing for the current (path, reference). NotFound on a
    /// non-root path resets navigation to the root and fetches there — the
    /// vanished path is never queried again. Retryable failures get
    /// `max_retries` extra attempts; a final failure leaves the cache
    /// explicitly invalid.
    async fn refresh_listing(&mut self) -> Result<(), SessionError> {
        let mut attempts = 0;
        loop {
            let path = self.state.path().joined();
            match self
                .provider
                .list_directory(&path, self.state.reference())
                .await
            {
                Ok(listing) => {
                    self.state.set_listing(listing);
                    return Ok(());
                }
                Err(ProviderError::NotFound { .. }) if !self.state.path().is_root() => {
                    warn!("path '{}' vanished, returning to root", path);
                    writeln!(
                        self.out,
                        "\na wave of vertigo passes over you. when it clears, nothing \
                         around you is familiar.\n\nyou are back where you started."
                    )?;
                    self.state.reset_to_root();
                    attempts = 0;
                }
                Err(e) if e.is_retryable() && attempts < self.max_retries => {
                    attempts += 1;
                    warn!("listing fetch failed (attempt {}): {}", attempts, e);
                }
                Err(e) => {
                    self.state.invalidate_listing();
                    return Err(SessionError::Provider(e));
                }
            }
        }
    }

    fn render_room(&mut self) -> Result<(), SessionError> {
        // The loop refreshes before dispatch, so a listing is always present
        // here; an empty default keeps a missing one from being fatal.
        let listing = self.state.listing().cloned().unwrap_or_default();
        let view = RoomView {
            sign_label: self.state.path().leaf().unwrap_or(&self.repo),
            has_dirs: !listing.dirs.is_empty(),
            non_root: !self.state.path().is_root(),
            has_files: !listing.files.is_empty(),
        };
        writeln!(self.out, "{}", describe_room(&view))?;
        Ok(())
    }

    fn go_up(&mut self) -> Result<(), SessionError> {
        match self.state.ascend() {
            Ok(()) => writeln!(
                self.out,
                "you open the door and follow a spiral staircase up to a previous level."
            )?,
            Err(NavError::AtRoot) => writeln!(
                self.out,
                "you search the walls for a door out but can't find one."
            )?,
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }

    fn go_down(&mut self) -> Result<Flow, SessionError> {
        let dirs = self
            .state
            .listing()
            .map(|l| l.dirs.clone())
            .unwrap_or_default();
        if dirs.is_empty() {
            writeln!(self.out, "there is no door leading down from this room.")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.out, "you open the door.")?;
        writeln!(self.out, "before you is a dim, spiraling staircase going down.")?;
        writeln!(
            self.out,
            "as you descend, doors emerge from the darkness at regular intervals upon small landings."
        )?;

        let selected = match self.repl.select_one("at which door will you stop?", &dirs) {
            Ok(i) => i,
            Err(ReplError::Cancelled) => {
                writeln!(self.out, "you climb back up the way you came.")?;
                return Ok(Flow::Continue);
            }
            Err(ReplError::Eof) => return Ok(Flow::Quit),
            Err(e) => return Err(SessionError::Repl(e)),
        };

        if let Err(e) = self.state.descend(&dirs[selected]) {
            writeln!(self.out, "{e}")?;
        }
        Ok(Flow::Continue)
    }

    async fn examine(&mut self) -> Result<Flow, SessionError> {
        let files = self
            .state
            .listing()
            .map(|l| l.files.clone())
            .unwrap_or_default();
        if files.is_empty() {
            writeln!(self.out, "you don't see anything to examine in here")?;
            return Ok(Flow::Continue);
        }

        writeln!(self.out, "you gather up the papers and look at their titles.")?;

        let names: Vec<String> = files.iter().map(|f| f.name.clone()).collect();
        let selected = match self.repl.select_one("examine which paper?", &names) {
            Ok(i) => i,
            Err(ReplError::Cancelled) => {
                writeln!(self.out, "you put the papers back down.")?;
                return Ok(Flow::Continue);
            }
            Err(ReplError::Eof) => return Ok(Flow::Quit),
            Err(e) => return Err(SessionError::Repl(e)),
        };

        // Resolve the content locator now; viewing is the pager's job, which
        // this tool does not carry.
        let mut file_path = self.state.path().clone();
        let held = match file_path.push(&names[selected]) {
            Ok(()) => {
                match self
                    .provider
                    .get_file(&file_path.joined(), self.state.reference())
                    .await
                {
                    Ok(handle) => handle.name,
                    Err(e) => {
                        warn!("could not resolve '{}': {}", file_path.joined(), e);
                        names[selected].clone()
                    }
                }
            }
            Err(_) => names[selected].clone(),
        };

        writeln!(self.out, "you are holding a paper titled {held}.")?;
        Ok(Flow::Continue)
    }

    async fn shift_back(&mut self) -> Result<(), SessionError> {
        writeln!(self.out, "you close your eyes and focus on the past.")?;
        match self.state.shift_to_previous(self.provider.as_ref()).await {
            Ok(()) => {
                writeln!(self.out, "you feel as though things have changed around you.")?;
            }
            Err(ProviderError::NoPriorHistory) => {
                writeln!(
                    self.out,
                    "the past refuses to come into focus. it seems this is where things began."
                )?;
            }
            Err(e) => {
                warn!("shift back failed: {}", e);
                writeln!(self.out, "your concentration breaks. nothing happens. ({e})")?;
            }
        }
        Ok(())
    }

    fn shift_forward(&mut self) -> Result<(), SessionError> {
        writeln!(self.out, "you close your eyes and focus on the future.")?;
        match self.state.shift_to_next() {
            Ok(()) => {
                writeln!(self.out, "you feel as though things have changed around you.")?;
            }
            Err(NavError::NoForwardHistory) => {
                writeln!(
                    self.out,
                    "the future is a blur. you can only return to moments you have left."
                )?;
            }
            Err(e) => writeln!(self.out, "{e}")?,
        }
        Ok(())
    }
}
