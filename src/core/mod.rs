//! # Core Application Logic
//!
//! This module contains fina's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Transcript           │
//!                    │  • Session / config     │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐             ┌────────────┐
//!           │    TUI     │             │    API     │
//!           │  Adapter   │             │   client   │
//!           │ (ratatui)  │             │ (reqwest)  │
//!           └────────────┘             └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()`, the conversation controller
//! - [`transcript`]: Append-only message sequence
//! - [`session`]: Authenticated identity and claim decoding
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod session;
pub mod state;
pub mod transcript;
