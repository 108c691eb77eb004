use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that draws itself into a region of the frame.
///
/// Inputs arrive as plain struct fields set by the caller before each draw.
/// `render` is `&mut self` because list and input widgets clamp their scroll
/// position against the area they are given.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// Turns raw `TuiEvent`s into widget-level events.
pub trait EventHandler {
    type Event;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
