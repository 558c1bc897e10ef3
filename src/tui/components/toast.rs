//! # Toast Component
//!
//! Transient notification overlay. Notices come from `Effect::Notify`; the
//! event loop holds at most one `ActiveToast` and drops it when the deadline
//! passes or the user dismisses it with Esc.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::core::action::{Notice, Severity};
use crate::tui::component::Component;

const TOAST_WIDTH: u16 = 40;
const TOAST_HEIGHT: u16 = 4;

/// A notice plus its dismissal deadline.
pub struct ActiveToast {
    pub notice: Notice,
    deadline: Instant,
}

impl ActiveToast {
    pub fn new(notice: Notice) -> Self {
        let deadline = Instant::now() + Duration::from_millis(notice.auto_dismiss_ms);
        Self { notice, deadline }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.deadline
    }

    fn accent(&self) -> Color {
        match self.notice.severity {
            Severity::Info => Color::Cyan,
            Severity::Error => Color::Red,
        }
    }
}

impl Component for ActiveToast {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        // Top-right corner, inset by one cell.
        let rect = Rect::new(
            area.x + area.width.saturating_sub(width + 1),
            area.y + 1,
            width,
            height,
        );

        let accent = self.accent();
        let block = Block::bordered()
            .title(Line::from(self.notice.title.clone()).style(
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ))
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(Style::default().fg(accent));

        let body = Paragraph::new(self.notice.description.clone())
            .block(block)
            .wrap(Wrap { trim: true });

        // Clear what's underneath so the transcript doesn't bleed through.
        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}
