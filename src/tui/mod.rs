//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the search
//! screen, and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. It talks
//! to the core through a `SearchObserver` that forwards every published state
//! into the event loop's action channel.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or published states.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::controller::{SearchController, SearchObserver};
use crate::core::request::RequestState;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{DefinitionList, DialogEvent, ErrorDialog, SearchBox, SearchEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub definition_list: DefinitionList,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            search_box: SearchBox::new(),
            definition_list: DefinitionList::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

/// Forwards controller callbacks into the event loop.
struct ChannelObserver {
    tx: mpsc::Sender<Action>,
}

impl SearchObserver for ChannelObserver {
    fn on_state_changed(&self, state: &RequestState) {
        if self.tx.send(Action::StateChanged(state.clone())).is_err() {
            warn!("Failed to forward state: receiver dropped");
        }
    }

    fn on_loading_changed(&self, is_loading: bool) {
        if self.tx.send(Action::LoadingChanged(is_loading)).is_err() {
            warn!("Failed to forward loading flag: receiver dropped");
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Performs an effect. Returns true when the app should quit.
fn apply_effect(effect: Effect, controller: &SearchController) -> bool {
    match effect {
        Effect::None => false,
        Effect::Search(query) => {
            controller.search(query);
            false
        }
        Effect::CancelSearch => {
            controller.cancel();
            false
        }
        Effect::Quit => true,
    }
}

/// Routes one terminal event. Returns the action it maps to, if any.
fn route_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    // The error dialog is modal
    if let Some(ref message) = app.error_dialog {
        let mut dialog = ErrorDialog::new(message.clone());
        return match dialog.handle_event(event) {
            Some(DialogEvent::Dismiss) => Some(Action::DismissError),
            None => None,
        };
    }

    match event {
        TuiEvent::Escape if app.is_loading => Some(Action::Cancel),
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::ScrollUp | TuiEvent::ScrollDown => {
            tui.definition_list.handle_event(event);
            None
        }
        _ => match tui.search_box.handle_event(event) {
            Some(SearchEvent::Submit(query)) => Some(Action::Submit(query)),
            _ => None,
        },
    }
}

pub fn run(controller: SearchController) -> std::io::Result<()> {
    let mut app = App::new();
    let mut tui = TuiState::new();

    // Channel for actions from the search task
    let (tx, rx) = mpsc::channel();
    let subscription = controller.subscribe(Arc::new(ChannelObserver { tx }));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading;
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = route_event(&event, &app, &mut tui) {
                let effect = update(&mut app, action);
                should_quit |= apply_effect(effect, &controller);
            }
        }

        // Handle states published by the search task
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            should_quit |= apply_effect(effect, &controller);
        }

        if should_quit {
            break;
        }
    }

    controller.cancel();
    controller.unsubscribe(subscription);
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedClient;

    #[test]
    fn test_force_quit_bypasses_dialog() {
        let mut app = App::new();
        app.error_dialog = Some("boom".to_string());
        let mut tui = TuiState::new();
        assert_eq!(route_event(&TuiEvent::ForceQuit, &app, &mut tui), Some(Action::Quit));
    }

    #[test]
    fn test_dialog_swallows_typing() {
        let mut app = App::new();
        app.error_dialog = Some("boom".to_string());
        let mut tui = TuiState::new();

        assert_eq!(route_event(&TuiEvent::InputChar('x'), &app, &mut tui), None);
        assert!(tui.search_box.buffer.is_empty());
        assert_eq!(
            route_event(&TuiEvent::Submit, &app, &mut tui),
            Some(Action::DismissError)
        );
    }

    #[test]
    fn test_typing_then_submit() {
        let app = App::new();
        let mut tui = TuiState::new();
        for c in "HMM".chars() {
            route_event(&TuiEvent::InputChar(c), &app, &mut tui);
        }
        assert_eq!(
            route_event(&TuiEvent::Submit, &app, &mut tui),
            Some(Action::Submit("HMM".to_string()))
        );
    }

    #[test]
    fn test_escape_cancels_while_loading_else_quits() {
        let mut app = App::new();
        let mut tui = TuiState::new();
        assert_eq!(route_event(&TuiEvent::Escape, &app, &mut tui), Some(Action::Quit));

        app.is_loading = true;
        assert_eq!(route_event(&TuiEvent::Escape, &app, &mut tui), Some(Action::Cancel));
    }

    #[tokio::test]
    async fn test_channel_observer_feeds_reducer() {
        let controller = SearchController::new(Arc::new(ScriptedClient::ok(
            crate::test_support::one_definition("name"),
        )));
        let (tx, rx) = mpsc::channel();
        controller.subscribe(Arc::new(ChannelObserver { tx }));

        let mut app = App::new();
        let id = apply_search(&controller, &mut app, "HMM");
        controller.wait_for_terminal(id).await.unwrap();

        while let Ok(action) = rx.try_recv() {
            update(&mut app, action);
        }
        assert!(!app.is_loading);
        assert_eq!(app.long_forms()[0].text, "name");
    }

    fn apply_search(
        controller: &SearchController,
        app: &mut App,
        query: &str,
    ) -> crate::core::SearchId {
        let Effect::Search(query) = update(app, Action::Submit(query.to_string())) else {
            panic!("submit must request a search");
        };
        controller.search(query)
    }
}
