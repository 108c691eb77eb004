use crate::core::request::RequestState;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ErrorDialog, ListContent, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

/// Maps the core state onto what the definition list should show.
pub fn list_content(app: &App) -> ListContent {
    if app.is_loading {
        return ListContent::Loading;
    }
    match &app.state {
        None => ListContent::Idle,
        Some(RequestState::Loading { .. }) => ListContent::Loading,
        Some(RequestState::Error { .. }) => ListContent::Hidden,
        Some(RequestState::Success { .. }) => ListContent::Results(app.long_forms().to_vec()),
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(3), Min(0)]);
    let [title_area, search_area, list_area] = layout.areas(frame.area());

    TitleBar::new(app.status_message.clone(), app.is_loading, spinner_frame)
        .render(frame, title_area);

    tui.definition_list.set_content(list_content(app));
    tui.definition_list.render(frame, list_area);

    tui.search_box.busy = app.is_loading;
    tui.search_box.render(frame, search_area);

    if let Some(ref message) = app.error_dialog {
        ErrorDialog::new(message.clone()).render(frame, frame.area());
    }
}
