//! # Session
//!
//! The authenticated identity for this run of the client. A `Session` is an
//! explicit value held in `App` and handed to collaborators that need the
//! token; there is no process-wide global.
//!
//! The JWT payload is decoded locally (base64url, no signature check) purely
//! so the UI can show who is signed in. Claims read this way are never an
//! authorization input; the backend validates the token on every request.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Identity claims carried in the token payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub username: String,
}

/// Authenticated session: the bearer token plus the claims decoded from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub claims: Claims,
}

impl Session {
    /// Builds a session from a login response, decoding the display claims
    /// from the token payload.
    pub fn from_token(token: String, email: String) -> Result<Self, SessionError> {
        let claims = decode_claims(&token)?;
        Ok(Session {
            token,
            email,
            claims,
        })
    }
}

#[derive(Debug)]
pub enum SessionError {
    /// Token is not three dot-separated segments.
    Malformed,
    /// Payload segment is not valid base64url.
    Decode(String),
    /// Payload JSON missing the expected claims.
    Parse(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Malformed => write!(f, "token is not a well-formed JWT"),
            SessionError::Decode(msg) => write!(f, "token payload decode error: {msg}"),
            SessionError::Parse(msg) => write!(f, "token claims parse error: {msg}"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Decodes the middle (payload) segment of a JWT without verifying the
/// signature. Display-only; see the module docs.
pub fn decode_claims(token: &str) -> Result<Claims, SessionError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) => payload,
        _ => return Err(SessionError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| SessionError::Decode(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| SessionError::Parse(e.to_string()))
}
