//! # TUI Components
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, loading spinner, status message
//!
//! ## Stateful Components (Event-Driven)
//!
//! - `SearchBox`: one-line acronym input, emits `SearchEvent::Submit`
//! - `DefinitionList`: scrollable long forms of the latest success
//! - `ErrorDialog`: modal error popup, emits `DialogEvent::Dismiss`
//!
//! Components receive external data as props (struct fields) rather than
//! reading `App` directly, so each one can be rendered against a
//! `TestBackend` in isolation.

pub mod definition_list;
pub mod error_dialog;
pub mod search_box;
mod title_bar;

pub use definition_list::{DefinitionList, ListContent};
pub use error_dialog::{DialogEvent, ErrorDialog};
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;
