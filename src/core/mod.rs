//! # Core Navigation Logic
//!
//! This module contains delve's business logic. It knows nothing about any
//! specific input or output technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │                         │
//!                    │  • path    (location)   │
//!                    │  • command (parsing)    │
//!                    │  • state   (machine)    │
//!                    │  • session (loop)       │
//!                    │                         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │   Repl     │      │  Provider  │      │  Renderer  │
//!     │ (rustyline │      │  (GitHub   │      │  (room     │
//!     │  or double)│      │   REST)    │      │   text)    │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`path`]: `TreePath` — where we are, as segments from the root
//! - [`command`]: raw text → typed `Command`
//! - [`state`]: the (path, reference) machine and its listing cache
//! - [`session`]: the orchestrating control loop
//! - [`config`]: settings with defaults → file → env → CLI resolution

pub mod command;
pub mod config;
pub mod path;
pub mod session;
pub mod state;
