//! # Remote API Client
//!
//! Talks to the advice backend over HTTP. The [`AdvisorApi`] trait is the
//! seam: the TUI event loop holds an `Arc<dyn AdvisorApi>` so tests can swap
//! in a double without a network.

pub mod client;
pub mod types;

pub use client::{AdvisorApi, ApiClient, ApiError, AuthFailure};
