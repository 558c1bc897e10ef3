//! # LoginForm Component
//!
//! Email/password form shown whenever there is no active session. Auth
//! failures surface here as inline text (subtyped by reason), not as toasts.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Which field has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
}

/// High-level events emitted by the login form.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    Submit { email: String, password: String },
}

pub struct LoginForm {
    pub email: String,
    pub password: String,
    focus: Field,
}

impl LoginForm {
    /// `prefill_email` comes from config (`[login] email`) or `FINA_EMAIL`.
    pub fn new(prefill_email: Option<String>) -> Self {
        let email = prefill_email.unwrap_or_default();
        let focus = if email.is_empty() {
            Field::Email
        } else {
            Field::Password
        };
        Self {
            email,
            password: String::new(),
            focus,
        }
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    fn field_paragraph<'a>(label: &'a str, value: String, focused: bool) -> Paragraph<'a> {
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(value).block(
            Block::bordered()
                .title(label)
                .border_type(ratatui::widgets::BorderType::Rounded)
                .border_style(border),
        )
    }
}

/// Props for rendering: outcome state lives in `App`, not in the form.
pub struct LoginView<'a> {
    pub form: &'a mut LoginForm,
    pub error: Option<&'a str>,
    pub pending: bool,
}

impl<'a> Component for LoginView<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        // Center a fixed-size card in the available area.
        let card_width = 48.min(area.width);
        let card_height = 13.min(area.height);
        let card = Rect::new(
            area.x + (area.width.saturating_sub(card_width)) / 2,
            area.y + (area.height.saturating_sub(card_height)) / 2,
            card_width,
            card_height,
        );

        let block = Block::bordered()
            .title("Login")
            .border_type(ratatui::widgets::BorderType::Rounded);
        let inner = block.inner(card);
        frame.render_widget(block, card);

        use Constraint::Length;
        let [heading, email_area, password_area, status_area] =
            Layout::vertical([Length(2), Length(3), Length(3), Length(3)]).areas(inner);

        frame.render_widget(
            Paragraph::new("fina — AI Financial Advisor")
                .style(Style::default().add_modifier(Modifier::BOLD)),
            heading,
        );

        frame.render_widget(
            LoginForm::field_paragraph("Email", self.form.email.clone(), self.form.focus == Field::Email),
            email_area,
        );
        // Password is masked; only its length is visible.
        frame.render_widget(
            LoginForm::field_paragraph(
                "Password",
                "•".repeat(self.form.password.chars().count()),
                self.form.focus == Field::Password,
            ),
            password_area,
        );

        let status: Line = if self.pending {
            Line::from("Signing in...").style(Style::default().fg(Color::DarkGray))
        } else if let Some(error) = self.error {
            Line::from(error.to_string()).style(Style::default().fg(Color::Red))
        } else {
            Line::from("Enter to submit, Tab to switch fields")
                .style(Style::default().fg(Color::DarkGray))
        };
        frame.render_widget(Paragraph::new(status), status_area);
    }
}

impl EventHandler for LoginForm {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.active_buffer().push(*c);
                None
            }
            TuiEvent::Paste(text) => {
                let flat = text.replace(['\r', '\n'], "");
                self.active_buffer().push_str(&flat);
                None
            }
            TuiEvent::Backspace => {
                self.active_buffer().pop();
                None
            }
            TuiEvent::FocusNext => {
                self.focus = match self.focus {
                    Field::Email => Field::Password,
                    Field::Password => Field::Email,
                };
                None
            }
            TuiEvent::Submit => {
                if self.email.trim().is_empty() {
                    self.focus = Field::Email;
                    return None;
                }
                if self.password.is_empty() {
                    self.focus = Field::Password;
                    return None;
                }
                Some(LoginEvent::Submit {
                    email: self.email.trim().to_string(),
                    password: std::mem::take(&mut self.password),
                })
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

    #[test]
    fn test_prefilled_email_focuses_password() {
        let form = LoginForm::new(Some("pat@example.com".to_string()));
        assert_eq!(form.email, "pat@example.com");
        assert_eq!(form.focus, Field::Password);

        let empty = LoginForm::new(None);
        assert_eq!(empty.focus, Field::Email);
    }

    #[test]
    fn test_tab_switches_fields() {
        let mut form = LoginForm::new(None);
        form.handle_event(&TuiEvent::InputChar('a'));
        form.handle_event(&TuiEvent::FocusNext);
        form.handle_event(&TuiEvent::InputChar('p'));
        assert_eq!(form.email, "a");
        assert_eq!(form.password, "p");
    }

    #[test]
    fn test_submit_requires_both_fields() {
        let mut form = LoginForm::new(None);
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);

        form.email = "pat@example.com".to_string();
        assert_eq!(form.handle_event(&TuiEvent::Submit), None);
        assert_eq!(form.focus, Field::Password);

        form.password = "hunter2".to_string();
        let event = form.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(LoginEvent::Submit {
                email: "pat@example.com".to_string(),
                password: "hunter2".to_string(),
            })
        );
        // Password buffer is dropped after submission.
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_render_masks_password() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = LoginForm::new(Some("pat@example.com".to_string()));
        form.password = "hunter2".to_string();

        terminal
            .draw(|f| {
                let mut view = LoginView {
                    form: &mut form,
                    error: None,
                    pending: false,
                };
                view.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("pat@example.com"));
        assert!(!text.contains("hunter2"));
        assert!(text.contains("•••••••"));
    }

    #[test]
    fn test_render_shows_inline_error() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut form = LoginForm::new(None);

        terminal
            .draw(|f| {
                let mut view = LoginView {
                    form: &mut form,
                    error: Some("Incorrect password. Please try again."),
                    pending: false,
                };
                view.render(f, f.area());
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Incorrect password"));
    }
}
