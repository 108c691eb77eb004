//! # SearchBox Component
//!
//! Single-line text input for the acronym.
//!
//! The buffer and cursor are internal state. The cursor is a byte offset
//! that always sits on a char boundary.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// User submitted the query (Enter pressed)
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    pub buffer: String,
    cursor: usize,
    /// Dims the border while a search is in flight (Prop)
    pub busy: bool,
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map_or(0, |(i, _)| i)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..].chars().next().map_or(pos, |c| pos + c.len_utf8())
}

impl SearchBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            busy: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts text at the cursor. Newlines are dropped; this is a one-line field.
    fn insert(&mut self, text: &str) -> bool {
        let cleaned: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        if cleaned.is_empty() {
            return false;
        }
        self.buffer.insert_str(self.cursor, &cleaned);
        self.cursor += cleaned.len();
        true
    }
}

impl Default for SearchBox {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.busy {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Green)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Search acronym");

        // Keep the cursor visible by scrolling horizontally
        let inner_width = area.width.saturating_sub(2);
        let cursor_col = self.buffer[..self.cursor].width() as u16;
        let scroll = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((0, scroll));
        frame.render_widget(input, area);

        frame.set_cursor_position((area.x + 1 + cursor_col - scroll, area.y + 1));
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert(c.encode_utf8(&mut tmp))
                    .then_some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => self.insert(text).then_some(SearchEvent::ContentChanged),
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                SearchEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < self.buffer.len()).then(|| {
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < self.buffer.len()).then(|| {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                SearchEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                SearchEvent::ContentChanged
            }),
            // The query stays in the box so it can be refined and resubmitted
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
