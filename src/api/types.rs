//! Wire types for the advice backend's JSON API.

use serde::{Deserialize, Serialize};

use crate::core::transcript::Message;

/// Body of `POST /api/auth/login`.
#[derive(Serialize, Debug)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Profile object returned alongside the token. The backend may grow fields
/// here; only what the client displays is modeled.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
}

/// Successful login payload: a signed token plus the user profile.
#[derive(Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

/// Error body the backend returns on failed requests. Both fields are
/// optional because error shapes vary by endpoint.
#[derive(Deserialize, Debug, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/chat`.
#[derive(Serialize, Debug)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Successful reply from `POST /api/chat`.
#[derive(Deserialize, Debug)]
pub struct ChatResponse {
    pub response: String,
}

/// Payload of `GET /api/chat/history`.
#[derive(Deserialize, Debug)]
pub struct HistoryResponse {
    #[serde(default)]
    pub messages: Vec<Message>,
}
