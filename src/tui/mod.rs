//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! Everything below it (core, api) would work unchanged behind a
//! different front end.
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (typing indicator, login spinner, visible toast): draws
//!   every ~80ms so the spinner stays smooth and the toast expires promptly.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::execute;

use crate::api::{AdvisorApi, ApiClient, ApiError};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::session::Session;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{ActiveToast, InputBox, InputEvent, LoginEvent, LoginForm, TranscriptState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub transcript_view: TranscriptState,
    pub input_box: InputBox,
    pub login_form: LoginForm,
    // Active toast overlay (None = hidden)
    pub toast: Option<ActiveToast>,
}

impl TuiState {
    pub fn new(prefill_email: Option<String>) -> Self {
        Self {
            transcript_view: TranscriptState::new(),
            input_box: InputBox::new(),
            login_form: LoginForm::new(prefill_email),
            toast: None,
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api: Arc<dyn AdvisorApi> = Arc::new(ApiClient::new(
        config.base_url.clone(),
        std::time::Duration::from_secs(config.request_timeout_secs),
    ));
    let mut app = App::new();
    let mut tui = TuiState::new(config.email.clone());

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = std::time::Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    loop {
        // Drop the toast once its deadline passes
        if tui.toast.as_ref().is_some_and(|t| t.is_expired()) {
            tui.toast = None;
            needs_redraw = true;
        }

        let animating = app.is_typing || app.login_pending || tui.toast.is_some();
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            let spinner_frame = (elapsed * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for tui_event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(tui_event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits regardless of screen
            if matches!(tui_event, TuiEvent::ForceQuit) {
                if update(&mut app, Action::Quit) == Effect::Quit {
                    should_quit = true;
                }
                continue;
            }

            // Esc dismisses the toast before anything else sees it
            if matches!(tui_event, TuiEvent::Escape) && tui.toast.is_some() {
                tui.toast = None;
                continue;
            }

            if app.session.is_none() {
                // Login screen: everything goes to the form
                if let Some(LoginEvent::Submit { email, password }) =
                    tui.login_form.handle_event(&tui_event)
                {
                    let effect = update(&mut app, Action::SubmitLogin { email, password });
                    handle_effect(effect, &app, &api, &mut tui, &tx, &mut should_quit);
                }
                continue;
            }

            // Chat screen: scroll events go to the transcript, the rest to
            // the input box
            if matches!(
                tui_event,
                TuiEvent::ScrollUp
                    | TuiEvent::ScrollDown
                    | TuiEvent::ScrollPageUp
                    | TuiEvent::ScrollPageDown
            ) {
                tui.transcript_view.handle_event(&tui_event);
                continue;
            }

            // End with an empty input jumps the transcript back to the bottom
            if matches!(tui_event, TuiEvent::CursorEnd) && tui.input_box.buffer.is_empty() {
                tui.transcript_view.stick_to_bottom = true;
                continue;
            }

            if let Some(InputEvent::Submit(text)) = tui.input_box.handle_event(&tui_event) {
                let effect = update(&mut app, Action::Submit(text));
                // New content re-pins the view to the bottom
                tui.transcript_view.stick_to_bottom = true;
                handle_effect(effect, &app, &api, &mut tui, &tx, &mut should_quit);
            }
        }

        // Handle background task outcomes (login, history, replies)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let reply_arrived = matches!(action, Action::ReplyReceived(_));
            let effect = update(&mut app, action);
            if reply_arrived {
                tui.transcript_view.stick_to_bottom = true;
            }
            handle_effect(effect, &app, &api, &mut tui, &tx, &mut should_quit);
        }

        if should_quit {
            break;
        }
    }

    ratatui::restore();
    Ok(())
}

/// Performs the I/O an `update` asked for. Network effects become spawned
/// tasks whose outcomes come back through `tx` as actions.
fn handle_effect(
    effect: Effect,
    app: &App,
    api: &Arc<dyn AdvisorApi>,
    tui: &mut TuiState,
    tx: &mpsc::Sender<Action>,
    should_quit: &mut bool,
) {
    match effect {
        Effect::None => {}
        Effect::FetchHistory => {
            if let Some(session) = &app.session {
                spawn_history_fetch(api.clone(), session.token.clone(), tx.clone());
            }
        }
        Effect::SendMessage(text) => {
            if let Some(session) = &app.session {
                spawn_send(api.clone(), session.token.clone(), text, tx.clone());
            }
        }
        Effect::Login { email, password } => {
            spawn_login(api.clone(), email, password, tx.clone());
        }
        Effect::Notify(notice) => {
            tui.toast = Some(ActiveToast::new(notice));
        }
        Effect::Quit => *should_quit = true,
    }
}

/// Send helper for background tasks. A closed channel means the event loop
/// is gone (quit during an in-flight request); the outcome is dropped.
fn send_action(tx: &mpsc::Sender<Action>, action: Action) {
    if tx.send(action).is_err() {
        warn!("Event loop gone; dropping background task outcome");
    }
}

fn spawn_login(api: Arc<dyn AdvisorApi>, email: String, password: String, tx: mpsc::Sender<Action>) {
    info!("Spawning login request");
    tokio::spawn(async move {
        let action = match api.login(&email, &password).await {
            Ok(response) => {
                // Prefer the profile's email; fall back to what was typed.
                let email = response.user.email.unwrap_or(email);
                match Session::from_token(response.token, email) {
                    Ok(session) => Action::LoginSucceeded(session),
                    Err(e) => {
                        warn!("Login token unusable: {e}");
                        Action::LoginFailed(crate::api::AuthFailure::Other(
                            "Unable to sign in. Please try again later.".to_string(),
                        ))
                    }
                }
            }
            Err(ApiError::Auth(failure)) => Action::LoginFailed(failure),
            Err(e) => {
                warn!("Login request failed: {e}");
                Action::LoginFailed(crate::api::AuthFailure::Other(
                    "Unable to reach the server. Please try again.".to_string(),
                ))
            }
        };
        send_action(&tx, action);
    });
}

fn spawn_history_fetch(api: Arc<dyn AdvisorApi>, token: String, tx: mpsc::Sender<Action>) {
    info!("Spawning history fetch");
    tokio::spawn(async move {
        let action = match api.chat_history(&token).await {
            Ok(messages) => Action::HistoryLoaded(messages),
            Err(e) => Action::HistoryFailed(e.to_string()),
        };
        send_action(&tx, action);
    });
}

fn spawn_send(api: Arc<dyn AdvisorApi>, token: String, text: String, tx: mpsc::Sender<Action>) {
    info!("Spawning send request ({} bytes)", text.len());
    tokio::spawn(async move {
        let action = match api.send_message(&token, &text).await {
            Ok(reply) => Action::ReplyReceived(reply),
            Err(e) => Action::SendFailed(e.to_string()),
        };
        send_action(&tx, action);
    });
}
