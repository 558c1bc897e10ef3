//! # Application State
//!
//! Core business state for fina. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── session: Option<Session>     // authenticated identity (None = login view)
//! ├── transcript: Transcript       // append-only conversation
//! ├── phase: Phase                 // history-seeding lifecycle
//! ├── is_typing: bool              // a send request is outstanding
//! ├── error: Option<String>        // last send failure, user-facing text
//! ├── login_error: Option<String>  // inline login failure text
//! ├── login_pending: bool          // a login request is outstanding
//! └── status_message: String       // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::session::Session;
use crate::core::transcript::Transcript;

/// Where the chat view is in its history-seeding lifecycle.
///
/// Seeding happens at most once: `AwaitingHistory` is entered exactly once
/// (on mount), and [`Transcript::seed`] refuses a non-empty transcript, so a
/// late-arriving history can never clobber a message the user already sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Chat view not mounted yet.
    Idle,
    /// History fetch in flight, transcript not yet seeded.
    AwaitingHistory,
    /// History seeded (or discarded, or failed); the transcript is live.
    Ready,
}

pub struct App {
    pub session: Option<Session>,
    pub transcript: Transcript,
    pub phase: Phase,
    pub is_typing: bool,
    pub error: Option<String>,
    pub login_error: Option<String>,
    pub login_pending: bool,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            session: None,
            transcript: Transcript::new(),
            phase: Phase::Idle,
            is_typing: false,
            error: None,
            login_error: None,
            login_pending: false,
            status_message: String::from("Welcome to fina!"),
        }
    }
}
