//! # Actions
//!
//! Everything that can happen in fina becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The backend replies? That's `Action::ReplyReceived(text)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` describing the I/O the caller should
//! perform. No side effects here. Network calls happen in the TUI event
//! loop's spawned tasks, which feed their outcomes back in as actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes the conversation controller testable without a terminal or a
//! server: drive `update` with a sequence of actions and assert on the
//! transcript.

use log::{debug, warn};

use crate::api::AuthFailure;
use crate::core::session::Session;
use crate::core::state::{App, Phase};
use crate::core::transcript::Message;

/// User-facing text shown when a send fails. The underlying cause is logged,
/// never displayed.
pub const SEND_FAILED_TEXT: &str =
    "We couldn't send your message. Please try again later.";

/// How a toast should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// A transient notification handed to the toast sink. Fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub auto_dismiss_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The chat view mounted; fetch history exactly once.
    ChatOpened,
    /// User submitted text from the input box.
    Submit(String),
    /// History fetch resolved.
    HistoryLoaded(Vec<Message>),
    /// History fetch failed; tolerated silently.
    HistoryFailed(String),
    /// The outstanding send resolved with the advisor's reply.
    ReplyReceived(String),
    /// The outstanding send failed.
    SendFailed(String),
    /// User submitted the login form.
    SubmitLogin { email: String, password: String },
    LoginSucceeded(Session),
    LoginFailed(AuthFailure),
    Quit,
}

/// I/O the event loop must perform after an `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Spawn the one-time history fetch.
    FetchHistory,
    /// Spawn a send request carrying this text.
    SendMessage(String),
    /// Spawn a login request.
    Login { email: String, password: String },
    /// Show a transient toast.
    Notify(Notice),
    Quit,
}

/// The conversation controller's single mutation point.
pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ChatOpened => {
            if app.phase != Phase::Idle {
                return Effect::None;
            }
            app.phase = Phase::AwaitingHistory;
            Effect::FetchHistory
        }

        Action::HistoryLoaded(messages) => {
            app.phase = Phase::Ready;
            if app.transcript.seed(messages) {
                debug!("Transcript seeded with {} messages", app.transcript.len());
            } else {
                // The user sent a message before history resolved. First
                // write wins; the fetched history is discarded.
                debug!("History arrived after local messages; discarded");
            }
            Effect::None
        }

        Action::HistoryFailed(cause) => {
            // An empty transcript is fine indefinitely; the user can still chat.
            warn!("History fetch failed: {cause}");
            app.phase = Phase::Ready;
            Effect::None
        }

        Action::Submit(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Effect::None;
            }
            if app.is_typing {
                // Sends are serialized: one outstanding request at a time,
                // so replies can't land out of order with their questions.
                app.status_message = String::from("Waiting for the advisor to reply...");
                return Effect::None;
            }

            // Optimistic append, never rolled back: the user's own words are
            // not in question, only the advisor's reply is.
            let trimmed = trimmed.to_string();
            app.transcript.push_user(trimmed.clone());
            app.is_typing = true;
            app.phase = Phase::Ready;
            Effect::SendMessage(trimmed)
        }

        Action::ReplyReceived(reply) => {
            app.is_typing = false;
            app.transcript.push_assistant(reply);
            app.error = None;
            Effect::None
        }

        Action::SendFailed(cause) => {
            warn!("Send failed: {cause}");
            app.is_typing = false;
            app.error = Some(SEND_FAILED_TEXT.to_string());
            Effect::Notify(Notice {
                title: String::from("Message Not Sent"),
                description: SEND_FAILED_TEXT.to_string(),
                severity: Severity::Error,
                auto_dismiss_ms: 5000,
            })
        }

        Action::SubmitLogin { email, password } => {
            if app.login_pending {
                return Effect::None;
            }
            app.login_error = None;
            app.login_pending = true;
            Effect::Login { email, password }
        }

        Action::LoginSucceeded(session) => {
            app.status_message = format!("Signed in as {}", session.claims.username);
            app.session = Some(session);
            app.login_pending = false;
            app.login_error = None;
            // Entering the chat view; kick off the one-time history fetch.
            update(app, Action::ChatOpened)
        }

        Action::LoginFailed(failure) => {
            app.login_pending = false;
            app.login_error = Some(login_failure_text(&failure));
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}

/// Maps an auth failure subtype to the inline message the login view shows.
fn login_failure_text(failure: &AuthFailure) -> String {
    match failure {
        AuthFailure::EmailNotFound => {
            String::from("This email is not registered. Please check your email or sign up.")
        }
        AuthFailure::InvalidPassword => String::from("Incorrect password. Please try again."),
        AuthFailure::Other(message) => message.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Role;
    use crate::test_support::{test_app, test_session};

    fn history() -> Vec<Message> {
        vec![
            Message::user("hi"),
            Message::assistant("hello, how can I help"),
        ]
    }

    #[test]
    fn test_empty_submit_is_a_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Submit(String::new())), Effect::None);
        assert_eq!(
            update(&mut app, Action::Submit("   ".to_string())),
            Effect::None
        );
        assert!(app.transcript.is_empty());
        assert!(!app.is_typing);
    }

    #[test]
    fn test_submit_appends_user_message_before_resolution() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("hello".to_string()));

        // The optimistic append is visible before any network outcome.
        assert_eq!(effect, Effect::SendMessage("hello".to_string()));
        assert_eq!(app.transcript.last(), Some(&Message::user("hello")));
        assert!(app.is_typing);
    }

    #[test]
    fn test_history_after_local_send_is_discarded() {
        let mut app = test_app();
        update(&mut app, Action::ChatOpened);
        update(&mut app, Action::Submit("budget tips".to_string()));

        update(&mut app, Action::HistoryLoaded(history()));

        // Transcript unchanged by the seed: not merged, not prepended.
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.transcript.last(), Some(&Message::user("budget tips")));
    }

    #[test]
    fn test_history_seeds_empty_transcript_in_order() {
        let mut app = test_app();
        update(&mut app, Action::ChatOpened);
        update(&mut app, Action::HistoryLoaded(history()));

        assert_eq!(app.transcript.messages(), history().as_slice());
        assert_eq!(app.phase, Phase::Ready);
        assert!(!app.is_typing);
    }

    #[test]
    fn test_reply_clears_pending_and_appends_assistant() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        assert!(app.is_typing);

        update(&mut app, Action::ReplyReceived("R".to_string()));

        assert!(!app.is_typing);
        assert_eq!(app.transcript.len(), 2);
        assert_eq!(app.transcript.last(), Some(&Message::assistant("R")));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_send_failure_preserves_user_message_and_notifies() {
        let mut app = test_app();
        update(&mut app, Action::Submit("hello".to_string()));
        let len_after_append = app.transcript.len();

        let effect = update(&mut app, Action::SendFailed("connection refused".to_string()));

        assert!(!app.is_typing);
        assert_eq!(app.transcript.len(), len_after_append);
        assert_eq!(app.error.as_deref(), Some(SEND_FAILED_TEXT));
        // The cause is not in the user-facing text.
        assert!(!app.error.as_deref().unwrap().contains("connection refused"));
        match effect {
            Effect::Notify(notice) => {
                assert_eq!(notice.severity, Severity::Error);
                assert_eq!(notice.auto_dismiss_ms, 5000);
            }
            other => panic!("expected Notify, got {other:?}"),
        }
    }

    #[test]
    fn test_next_successful_send_clears_error() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));
        update(&mut app, Action::SendFailed("boom".to_string()));
        assert!(app.error.is_some());

        update(&mut app, Action::Submit("second".to_string()));
        update(&mut app, Action::ReplyReceived("ok".to_string()));
        assert!(app.error.is_none());
    }

    #[test]
    fn test_submit_while_pending_is_rejected() {
        let mut app = test_app();
        update(&mut app, Action::Submit("first".to_string()));

        let effect = update(&mut app, Action::Submit("second".to_string()));

        assert_eq!(effect, Effect::None);
        assert_eq!(app.transcript.len(), 1);
        assert!(app.is_typing);
    }

    #[test]
    fn test_seed_then_send_scenario() {
        let mut app = test_app();
        update(&mut app, Action::ChatOpened);
        update(&mut app, Action::HistoryLoaded(history()));
        assert_eq!(app.transcript.len(), 2);
        assert!(!app.is_typing);

        update(&mut app, Action::Submit("budget tips".to_string()));
        assert_eq!(app.transcript.len(), 3);
        assert_eq!(app.transcript.last().unwrap().role, Role::User);
        assert_eq!(app.transcript.last().unwrap().content, "budget tips");
        assert!(app.is_typing);

        update(&mut app, Action::ReplyReceived("Track your spending.".to_string()));
        assert_eq!(app.transcript.len(), 4);
        assert!(!app.is_typing);
    }

    #[test]
    fn test_chat_opened_fetches_history_only_once() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ChatOpened), Effect::FetchHistory);
        assert_eq!(app.phase, Phase::AwaitingHistory);
        assert_eq!(update(&mut app, Action::ChatOpened), Effect::None);
    }

    #[test]
    fn test_history_failure_leaves_transcript_empty_and_usable() {
        let mut app = test_app();
        update(&mut app, Action::ChatOpened);
        update(&mut app, Action::HistoryFailed("timeout".to_string()));

        assert!(app.transcript.is_empty());
        assert_eq!(app.phase, Phase::Ready);
        assert!(app.error.is_none());

        // The user can still chat after a failed fetch.
        let effect = update(&mut app, Action::Submit("hello".to_string()));
        assert_eq!(effect, Effect::SendMessage("hello".to_string()));
    }

    #[test]
    fn test_login_success_stores_session_and_fetches_history() {
        let mut app = test_app();
        let effect = update(&mut app, Action::LoginSucceeded(test_session()));

        assert!(app.session.is_some());
        assert!(app.status_message.contains("Signed in as"));
        assert_eq!(effect, Effect::FetchHistory);
    }

    #[test]
    fn test_login_failure_messages_by_subtype() {
        let mut app = test_app();

        update(&mut app, Action::LoginFailed(AuthFailure::EmailNotFound));
        assert!(app.login_error.as_deref().unwrap().contains("not registered"));

        update(&mut app, Action::LoginFailed(AuthFailure::InvalidPassword));
        assert!(app.login_error.as_deref().unwrap().contains("Incorrect password"));

        update(
            &mut app,
            Action::LoginFailed(AuthFailure::Other("backend down".to_string())),
        );
        assert_eq!(app.login_error.as_deref(), Some("backend down"));
    }

    #[test]
    fn test_submit_login_dispatches_once_while_pending() {
        let mut app = test_app();
        let login = Action::SubmitLogin {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
        };
        assert!(matches!(update(&mut app, login.clone()), Effect::Login { .. }));
        assert!(app.login_pending);
        assert_eq!(update(&mut app, login), Effect::None);
    }
}
