//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::api::{AdvisorApi, ApiError};
use crate::api::types::LoginResponse;
use crate::core::session::{Claims, Session};
use crate::core::state::App;
use crate::core::transcript::Message;

/// A no-op API for tests that don't need real network calls.
pub struct NoopApi;

#[async_trait]
impl AdvisorApi for NoopApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse, ApiError> {
        Err(ApiError::Network("noop".to_string()))
    }

    async fn chat_history(&self, _token: &str) -> Result<Vec<Message>, ApiError> {
        Ok(Vec::new())
    }

    async fn send_message(&self, _token: &str, _text: &str) -> Result<String, ApiError> {
        Ok(String::new())
    }
}

/// Creates a fresh App in its mount-time state.
pub fn test_app() -> App {
    App::new()
}

/// A session with fixed claims, skipping token decoding.
pub fn test_session() -> Session {
    Session {
        token: "test-token".to_string(),
        email: "pat@example.com".to_string(),
        claims: Claims {
            user_id: "u1".to_string(),
            username: "pat".to_string(),
        },
    }
}
