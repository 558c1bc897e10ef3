//! # TranscriptView Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Lay out bubbles top-to-bottom: user right-aligned, advisor left-aligned
//! - Append the typing-indicator row while a send is outstanding
//! - Show the inline error line when the last send failed
//! - Stick-to-bottom auto-scroll: pinned by default, unpinned on manual
//!   scroll up, re-pinned when the user scrolls back to the end
//!
//! ## Architecture
//!
//! `TranscriptView` is a transient component (created each frame) that wraps
//! `&'a mut TranscriptState` (persistent scroll state) and the controller's
//! data as props. The view only reads controller state; all mutations flow
//! through `core::update`.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::{Role, Transcript};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::bubble::Bubble;
use crate::tui::event::TuiEvent;

/// Spinner frames for the typing indicator.
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Height of the typing-indicator row.
const TYPING_ROW_HEIGHT: u16 = 1;
/// Height of the inline error line.
const ERROR_ROW_HEIGHT: u16 = 1;

/// Bubbles take at most this fraction of the viewport width (numerator/denominator).
const BUBBLE_WIDTH_NUM: u16 = 4;
const BUBBLE_WIDTH_DEN: u16 = 5;

/// Scroll state for the transcript. Must be persisted in the parent TuiState.
pub struct TranscriptState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content.
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames).
    pub viewport_height: u16,
    /// Total canvas height from the last render (for re-pin checks).
    pub content_height: u16,
}

impl Default for TranscriptState {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            content_height: 0,
        }
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll if the user has scrolled to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view. Created fresh each frame.
pub struct TranscriptView<'a> {
    pub state: &'a mut TranscriptState,
    pub transcript: &'a Transcript,
    pub is_typing: bool,
    pub error: Option<&'a str>,
    pub spinner_frame: usize,
}

impl<'a> TranscriptView<'a> {
    pub fn new(
        state: &'a mut TranscriptState,
        transcript: &'a Transcript,
        is_typing: bool,
        error: Option<&'a str>,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_typing,
            error,
            spinner_frame,
        }
    }

    fn typing_line(&self) -> Line<'static> {
        let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        Line::from(format!("{frame} advisor is typing..."))
            .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC))
    }
}

impl<'a> Component for TranscriptView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let bubble_width = (content_width * BUBBLE_WIDTH_NUM / BUBBLE_WIDTH_DEN).max(10);

        // Measure everything first so the scroll canvas can be sized up front.
        let heights: Vec<u16> = self
            .transcript
            .messages()
            .iter()
            .map(|m| Bubble::calculate_height(m, bubble_width))
            .collect();

        let mut total_height: u16 = heights.iter().sum();
        if self.is_typing {
            total_height += TYPING_ROW_HEIGHT;
        }
        if self.error.is_some() {
            total_height += ERROR_ROW_HEIGHT;
        }

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height.max(1)))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Always)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = 0;
        for (message, height) in self.transcript.messages().iter().zip(&heights) {
            // User bubbles hug the right edge, advisor bubbles the left.
            let x = match message.role {
                Role::User => content_width.saturating_sub(bubble_width),
                Role::Assistant => 0,
            };
            let rect = Rect::new(x, y_offset, bubble_width, *height);
            scroll_view.render_widget(Bubble::new(message), rect);
            y_offset += height;
        }

        if self.is_typing {
            let rect = Rect::new(0, y_offset, content_width, TYPING_ROW_HEIGHT);
            scroll_view.render_widget(Paragraph::new(self.typing_line()), rect);
            y_offset += TYPING_ROW_HEIGHT;
        }

        if let Some(error) = self.error {
            let rect = Rect::new(0, y_offset, content_width, ERROR_ROW_HEIGHT);
            scroll_view.render_widget(
                Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red)),
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// EventHandler lives on `TranscriptState` because event handling needs the
/// persistent scroll position while `TranscriptView` is recreated each frame.
impl EventHandler for TranscriptState {
    type Event = (); // Scrolling is handled internally

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
                None
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
                None
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(transcript: &Transcript, is_typing: bool, error: Option<&str>) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = TranscriptState::new();
        terminal
            .draw(|f| {
                let mut view = TranscriptView::new(&mut state, transcript, is_typing, error, 0);
                view.render(f, f.area());
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_renders_user_and_advisor_bubbles() {
        let mut t = Transcript::new();
        t.push_user("hi");
        t.push_assistant("hello, how can I help");
        let screen = draw(&t, false, None);
        assert!(screen.contains("hi"));
        assert!(screen.contains("hello, how can I help"));
        assert!(screen.contains("you"));
        assert!(screen.contains("advisor"));
    }

    #[test]
    fn test_typing_indicator_shown_while_pending() {
        let mut t = Transcript::new();
        t.push_user("budget tips");
        let screen = draw(&t, true, None);
        assert!(screen.contains("advisor is typing..."));
    }

    #[test]
    fn test_typing_indicator_absent_when_idle() {
        let t = Transcript::new();
        let screen = draw(&t, false, None);
        assert!(!screen.contains("advisor is typing..."));
    }

    #[test]
    fn test_error_line_rendered_inline() {
        let mut t = Transcript::new();
        t.push_user("hello");
        let screen = draw(&t, false, Some("We couldn't send your message."));
        assert!(screen.contains("We couldn't send your message."));
    }

    #[test]
    fn test_empty_transcript_renders_without_panic() {
        let t = Transcript::new();
        let screen = draw(&t, false, None);
        assert!(!screen.contains("advisor is typing"));
    }

    #[test]
    fn test_scroll_up_unpins_and_bottom_repins() {
        let mut state = TranscriptState::new();
        state.viewport_height = 10;
        state.content_height = 50;
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 40 });

        state.handle_event(&TuiEvent::ScrollUp);
        assert!(!state.stick_to_bottom);

        // Scroll back down past the end → re-pin
        state
            .scroll_state
            .set_offset(Position { x: 0, y: 39 });
        state.handle_event(&TuiEvent::ScrollDown);
        assert!(state.stick_to_bottom);
    }
}
