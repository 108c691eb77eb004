//! # TitleBar Component
//!
//! Top status bar: application name, a spinner while a search is in flight,
//! and the current status message.
//!
//! Stateless: all fields are props supplied by the parent each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub struct TitleBar {
    /// Status message (e.g. "Searching for \"HMM\"...")
    pub status_message: String,
    pub is_loading: bool,
    /// Animation frame counter, only read while loading
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(status_message: String, is_loading: bool, spinner_frame: usize) -> Self {
        Self {
            status_message,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::raw("Acronym Definitions")];
        if self.is_loading {
            let glyph = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
            spans.push(Span::styled(
                format!(" {glyph}"),
                Style::default().fg(Color::Yellow),
            ));
        }
        if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }
        frame.render_widget(Line::from(spans), area);
    }
}
