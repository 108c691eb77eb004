//! # DefinitionList Component
//!
//! Scrollable list of the long forms from the latest successful search.
//!
//! The scroll offset is internal state; everything else is a prop refreshed by
//! the parent before each render. The list is hidden while loading and after
//! an error, matching what the status bar and error dialog report.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::lookup::LongForm;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// What the list area should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ListContent {
    /// No search yet.
    Idle,
    Loading,
    Hidden,
    Results(Vec<LongForm>),
}

pub struct DefinitionList {
    pub content: ListContent,
    offset: u16,
}

impl DefinitionList {
    pub fn new() -> Self {
        Self {
            content: ListContent::Idle,
            offset: 0,
        }
    }

    /// Replaces the content, resetting the scroll position if it changed.
    pub fn set_content(&mut self, content: ListContent) {
        if self.content != content {
            self.offset = 0;
            self.content = content;
        }
    }

    pub fn offset(&self) -> u16 {
        self.offset
    }

    fn len(&self) -> u16 {
        match &self.content {
            ListContent::Results(items) => items.len().min(u16::MAX as usize) as u16,
            _ => 0,
        }
    }
}

impl Default for DefinitionList {
    fn default() -> Self {
        Self::new()
    }
}

fn long_form_line(index: usize, long_form: &LongForm) -> Line<'_> {
    let mut spans = vec![
        Span::styled(format!("{:>3}. ", index + 1), Style::default().fg(Color::DarkGray)),
        Span::styled(
            long_form.text.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if long_form.frequency > 0 || long_form.since > 0 {
        spans.push(Span::styled(
            format!("  (freq {}, since {})", long_form.frequency, long_form.since),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

impl Component for DefinitionList {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered().title("Definitions");
        let hint = |text: &'static str| {
            Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center)
        };

        let paragraph = match &self.content {
            ListContent::Idle => hint("Enter an acronym such as HMM"),
            ListContent::Loading => hint("Loading..."),
            ListContent::Hidden => Paragraph::default(),
            ListContent::Results(items) if items.is_empty() => hint("No definitions found"),
            ListContent::Results(items) => {
                let visible = area.height.saturating_sub(2);
                self.offset = self.offset.min(self.len().saturating_sub(visible));
                let lines: Vec<Line> = items
                    .iter()
                    .enumerate()
                    .map(|(i, lf)| long_form_line(i, lf))
                    .collect();
                Paragraph::new(lines).scroll((self.offset, 0))
            }
        };

        frame.render_widget(paragraph.block(block), area);
    }
}

impl EventHandler for DefinitionList {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp if self.offset > 0 => {
                self.offset -= 1;
                Some(())
            }
            TuiEvent::ScrollDown if self.offset + 1 < self.len() => {
                self.offset += 1;
                Some(())
            }
            _ => None,
        }
    }
}
