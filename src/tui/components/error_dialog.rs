//! # ErrorDialog Component
//!
//! Modal popup showing a failed search's message. While it is open the parent
//! routes all events here; Enter or Esc dismisses it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Dismiss,
}

pub struct ErrorDialog {
    pub message: String,
}

impl ErrorDialog {
    pub fn new(message: String) -> Self {
        Self { message }
    }

    /// Centered rect, 60% wide (at least 30 columns) and 7 rows tall.
    fn popup_area(area: Rect) -> Rect {
        let width = (area.width * 3 / 5).max(30).min(area.width);
        let [row] = Layout::vertical([Constraint::Length(7)])
            .flex(Flex::Center)
            .areas(area);
        let [popup] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);
        popup
    }
}

impl Component for ErrorDialog {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = Self::popup_area(area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(Span::styled(
                "Error has occurred",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));

        let text = vec![
            Line::from(self.message.as_str()),
            Line::default(),
            Line::from(Span::styled(
                "[Enter] DISMISS",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, popup);
        frame.render_widget(paragraph, popup);
    }
}

impl EventHandler for ErrorDialog {
    type Event = DialogEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Submit | TuiEvent::Escape => Some(DialogEvent::Dismiss),
            _ => None,
        }
    }
}
