//! # UI Layout
//!
//! Pure rendering: takes the current `App` and `TuiState` and draws one
//! frame. Which screen to draw is decided here from controller state
//! (no session means the login screen), never stored separately.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{LoginView, TranscriptView};

const TITLE: &str = "fina — AI Financial Advisor";

/// Height of the title bar.
const TITLE_HEIGHT: u16 = 1;
/// Height of the input box (1 text row + borders).
const INPUT_HEIGHT: u16 = 3;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    if app.session.is_none() {
        let mut login = LoginView {
            form: &mut tui.login_form,
            error: app.login_error.as_deref(),
            pending: app.login_pending,
        };
        login.render(frame, frame.area());
    } else {
        draw_chat(frame, app, tui, spinner_frame);
    }

    // Toast overlays whichever screen is up.
    if let Some(toast) = tui.toast.as_mut() {
        toast.render(frame, frame.area());
    }
}

fn draw_chat(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(TITLE_HEIGHT), Min(0), Length(INPUT_HEIGHT)])
            .areas(frame.area());

    let title = Line::from(vec![
        Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" | "),
        Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    let mut transcript = TranscriptView::new(
        &mut tui.transcript_view,
        &app.transcript,
        app.is_typing,
        app.error.as_deref(),
        spinner_frame,
    );
    transcript.render(frame, main_area);

    tui.input_box.render(frame, input_area);
}
