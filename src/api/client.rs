//! Reqwest-backed client for the advice backend.
//!
//! Every call returns a typed [`ApiError`]; nothing here panics on a bad
//! response. The controller only ever consumes "it failed"; the variants
//! exist for logging and for the login view's inline messages.

use std::fmt;

use async_trait::async_trait;
use log::{debug, warn};

use super::types::{ChatRequest, ChatResponse, ErrorBody, HistoryResponse, LoginRequest, LoginResponse};
use crate::core::transcript::Message;

/// Why a login was rejected. Mirrors the backend's error codes so the login
/// view can show a specific inline message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    EmailNotFound,
    InvalidPassword,
    Other(String),
}

/// Errors from talking to the backend.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend returned an HTTP error outside the auth taxonomy.
    Server { status: u16, message: String },
    /// Response body did not match the expected shape.
    Parse(String),
    /// Login rejected; subtyped by the backend's error code.
    Auth(AuthFailure),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Server { status, message } => {
                write!(f, "server error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "response parse error: {msg}"),
            ApiError::Auth(AuthFailure::EmailNotFound) => write!(f, "email not registered"),
            ApiError::Auth(AuthFailure::InvalidPassword) => write!(f, "invalid password"),
            ApiError::Auth(AuthFailure::Other(msg)) => write!(f, "login failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The three calls the conversation controller and login flow need.
#[async_trait]
pub trait AdvisorApi: Send + Sync {
    /// Exchanges credentials for a token and profile.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;

    /// Fetches the stored conversation, oldest first.
    async fn chat_history(&self, token: &str) -> Result<Vec<Message>, ApiError>;

    /// Sends one user message and returns the advisor's reply text.
    async fn send_message(&self, token: &str, text: &str) -> Result<String, ApiError>;
}

/// HTTP implementation of [`AdvisorApi`].
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: std::time::Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout: {e}");
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Reads the error body of a failed response into an `ApiError::Server`.
    async fn server_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body: ErrorBody = response.json().await.unwrap_or_default();
        let message = body
            .message
            .or(body.error)
            .unwrap_or_else(|| "unknown error".to_string());
        warn!("API error: HTTP {status} - {message}");
        ApiError::Server { status, message }
    }
}

#[async_trait]
impl AdvisorApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        debug!("POST /api/auth/login for {email}");
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let failure = match body.error.as_deref() {
                Some("EMAIL_NOT_FOUND") => AuthFailure::EmailNotFound,
                Some("INVALID_PASSWORD") => AuthFailure::InvalidPassword,
                _ => AuthFailure::Other(
                    body.message
                        .unwrap_or_else(|| format!("login rejected (HTTP {status})")),
                ),
            };
            warn!("Login failed: {failure:?}");
            return Err(ApiError::Auth(failure));
        }

        response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn chat_history(&self, token: &str) -> Result<Vec<Message>, ApiError> {
        debug!("GET /api/chat/history");
        let response = self
            .client
            .get(format!("{}/api/chat/history", self.base_url))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let body: HistoryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        debug!("History fetched: {} messages", body.messages.len());
        Ok(body.messages)
    }

    async fn send_message(&self, token: &str, text: &str) -> Result<String, ApiError> {
        debug!("POST /api/chat ({} bytes)", text.len());
        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .bearer_auth(token)
            .json(&ChatRequest { message: text })
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::server_error(response).await);
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        Ok(body.response)
    }
}
