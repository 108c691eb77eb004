//! # Actions
//!
//! Everything that can happen on the search screen becomes an `Action`.
//! User presses Enter? That's `Action::Submit(query)`.
//! The controller publishes a state? That's `Action::StateChanged(state)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter should perform. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::request::RequestState;
use crate::core::state::App;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Search for the given text, forwarded verbatim.
    Submit(String),
    StateChanged(RequestState),
    LoadingChanged(bool),
    DismissError,
    /// Abandon the in-flight search.
    Cancel,
    Quit,
}

/// Side effect requested by `update`, performed by the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Search(String),
    CancelSearch,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(query) => {
            app.error_dialog = None;
            app.last_query = Some(query.clone());
            app.status_message = format!("Searching for {query:?}...");
            Effect::Search(query)
        }
        Action::StateChanged(state) => {
            match &state {
                RequestState::Loading { .. } => {}
                RequestState::Success { definitions, .. } => {
                    let count = state.long_forms().len();
                    app.status_message = if definitions.is_empty() {
                        "No definitions found".to_string()
                    } else {
                        format!("{count} definition(s)")
                    };
                }
                RequestState::Error { cause, .. } => {
                    app.error_dialog = Some(cause.message.clone());
                    app.status_message = "Error has occurred".to_string();
                }
            }
            app.state = Some(state);
            Effect::None
        }
        Action::LoadingChanged(is_loading) => {
            app.is_loading = is_loading;
            Effect::None
        }
        Action::DismissError => {
            app.error_dialog = None;
            Effect::None
        }
        Action::Cancel => {
            if !app.is_loading {
                return Effect::None;
            }
            app.is_loading = false;
            app.state = None;
            app.status_message = "Search cancelled".to_string();
            Effect::CancelSearch
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::one_definition;

    #[test]
    fn test_submit_requests_search_verbatim() {
        let mut app = App::new();
        let effect = update(&mut app, Action::Submit(" hmm ".to_string()));
        assert_eq!(effect, Effect::Search(" hmm ".to_string()));
        assert_eq!(app.last_query.as_deref(), Some(" hmm "));
    }

    #[test]
    fn test_submit_closes_open_error() {
        let mut app = App::new();
        app.error_dialog = Some("old".to_string());
        update(&mut app, Action::Submit("HMM".to_string()));
        assert!(app.error_dialog.is_none());
    }

    #[test]
    fn test_success_then_loading_flag() {
        let mut app = App::new();
        update(&mut app, Action::StateChanged(RequestState::loading()));
        update(&mut app, Action::LoadingChanged(true));
        assert!(app.is_loading);

        update(
            &mut app,
            Action::StateChanged(RequestState::success(one_definition("name"))),
        );
        update(&mut app, Action::LoadingChanged(false));
        assert!(!app.is_loading);
        assert_eq!(app.long_forms()[0].text, "name");
        assert_eq!(app.status_message, "1 definition(s)");
    }

    #[test]
    fn test_empty_success_status() {
        let mut app = App::new();
        update(&mut app, Action::StateChanged(RequestState::success(vec![])));
        assert_eq!(app.status_message, "No definitions found");
    }

    #[test]
    fn test_error_opens_dialog_until_dismissed() {
        let mut app = App::new();
        update(
            &mut app,
            Action::StateChanged(RequestState::error("Acronym response is null")),
        );
        assert_eq!(app.error_dialog.as_deref(), Some("Acronym response is null"));

        assert_eq!(update(&mut app, Action::DismissError), Effect::None);
        assert!(app.error_dialog.is_none());
    }

    #[test]
    fn test_cancel_only_when_loading() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Cancel), Effect::None);

        app.is_loading = true;
        app.state = Some(RequestState::loading());
        assert_eq!(update(&mut app, Action::Cancel), Effect::CancelSearch);
        assert!(!app.is_loading);
        assert!(app.state.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
