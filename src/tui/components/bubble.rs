use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Message, Role};
use crate::tui::markdown;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders a single chat bubble.
///
/// `Bubble` is a transient component: created fresh each frame with the
/// message it needs to render. Alignment (user right, advisor left) is the
/// parent `TranscriptView`'s concern; the bubble only draws itself into the
/// rect it is given.
///
/// Advisor content is rendered as markdown; user content is always rendered
/// as literal text, so a user message can't inject formatting directives.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub message: &'a Message,
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for this bubble given a width.
    ///
    /// User bubbles use `textwrap` with options matching Ratatui's default
    /// `Paragraph` wrapping; advisor bubbles count lines of the rendered
    /// markdown via `Paragraph::line_count`. Both predict height without
    /// rendering, so the parent can lay out the scroll canvas up front.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding. Return 1 row so the
            // bubble still occupies space in the layout.
            return 1;
        }

        match message.role {
            Role::User => {
                let content = message.content.trim();
                if content.is_empty() {
                    return VERTICAL_OVERHEAD;
                }
                let options = textwrap::Options::new(content_width as usize)
                    .break_words(true)
                    .word_separator(textwrap::WordSeparator::AsciiSpace);
                let lines = textwrap::wrap(content, options);
                (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
            }
            Role::Assistant => {
                let text = markdown::render(message.content.trim(), Color::White);
                let lines = Paragraph::new(text)
                    .wrap(Wrap { trim: false })
                    .line_count(content_width) as u16;
                lines.max(1) + VERTICAL_OVERHEAD
            }
        }
    }

    fn style(&self) -> Style {
        match self.message.role {
            Role::User => Style::default().fg(Color::Cyan),
            Role::Assistant => Style::default().fg(Color::Green),
        }
    }

    fn title(&self) -> &'static str {
        match self.message.role {
            Role::User => "you",
            Role::Assistant => "advisor",
        }
    }
}

impl<'a> Widget for Bubble<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let content = self.message.content.trim();
        match self.message.role {
            Role::User => {
                Paragraph::new(content.to_string())
                    .style(style)
                    .wrap(Wrap { trim: true })
                    .render(inner_area, buf);
            }
            Role::Assistant => {
                Paragraph::new(markdown::render(content, Color::White))
                    .wrap(Wrap { trim: false })
                    .render(inner_area, buf);
            }
        }
    }
}
