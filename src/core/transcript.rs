//! # Transcript
//!
//! The ordered, append-only record of the conversation. The backing Vec is
//! private so the only ways in are `seed`, `push_user`, and `push_assistant`:
//! once a message is in the transcript it is never reordered or mutated.

use serde::{Deserialize, Serialize};

/// Who authored a message. Matches the backend wire format (`"user"` /
/// `"assistant"`).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn in the conversation. Content is opaque here; the view decides
/// whether to interpret it (markdown for assistant messages only).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Message {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Append-only message sequence owned by the conversation controller.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Transcript::default()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Replaces the transcript with server history, but only while it is
    /// still empty. Returns whether the seed was applied.
    ///
    /// First write wins: if the user already sent a message before the
    /// history fetch resolved, the fetched history is discarded rather than
    /// merged, so nothing the user can see is duplicated or reordered.
    pub fn seed(&mut self, history: Vec<Message>) -> bool {
        if !self.messages.is_empty() {
            return false;
        }
        self.messages = history;
        true
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }
}
