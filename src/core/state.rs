//! # Application State
//!
//! What the search screen shows. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── state: Option<RequestState>   // latest state from the controller
//! ├── is_loading: bool              // derived loading flag
//! ├── last_query: Option<String>    // query of the latest search
//! ├── error_dialog: Option<String>  // error awaiting dismissal
//! └── status_message: String        // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::request::RequestState;
use crate::lookup::LongForm;

pub struct App {
    pub state: Option<RequestState>,
    pub is_loading: bool,
    pub last_query: Option<String>,
    pub error_dialog: Option<String>,
    pub status_message: String,
}

impl App {
    pub fn new() -> Self {
        Self {
            state: None,
            is_loading: false,
            last_query: None,
            error_dialog: None,
            status_message: String::from("Type an acronym and press Enter"),
        }
    }

    /// Long forms to list: the first record of the latest success.
    pub fn long_forms(&self) -> &[LongForm] {
        match &self.state {
            Some(state) => state.long_forms(),
            None => &[],
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
