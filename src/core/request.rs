//! # Request States
//!
//! The lifecycle of one lookup, as seen by the presentation layer.
//!
//! ```text
//! Loading ──┬──▶ Success(definitions)
//!           └──▶ Error(cause)
//! ```
//!
//! Every search produces exactly one `Loading` followed by exactly one
//! terminal state.

use std::fmt;

use crate::lookup::{Definition, LongForm};

/// Shown when the service answers with a non-2xx status.
pub const RESPONSE_FAILURE_MESSAGE: &str = "Acronym definition response is a failure";
/// Shown when the service answers 2xx with nothing in the body.
pub const NULL_RESPONSE_MESSAGE: &str = "Acronym response is null";

/// A normalized failure, ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestState {
    /// The request is in flight. `flag` is always `true` when emitted.
    Loading { flag: bool },
    Success {
        definitions: Vec<Definition>,
        is_loading: bool,
    },
    Error { cause: ErrorInfo, is_loading: bool },
}

impl RequestState {
    pub fn loading() -> Self {
        RequestState::Loading { flag: true }
    }

    pub fn success(definitions: Vec<Definition>) -> Self {
        RequestState::Success {
            definitions,
            is_loading: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        RequestState::Error {
            cause: ErrorInfo::new(message),
            is_loading: false,
        }
    }

    /// The loading flag embedded in the state.
    pub fn is_loading(&self) -> bool {
        match self {
            RequestState::Loading { flag } => *flag,
            RequestState::Success { is_loading, .. } | RequestState::Error { is_loading, .. } => {
                *is_loading
            }
        }
    }

    /// True for `Success` and `Error`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestState::Loading { .. })
    }

    /// Long forms of the first record, or an empty slice.
    ///
    /// Empty for non-success states as well.
    pub fn long_forms(&self) -> &[LongForm] {
        match self {
            RequestState::Success { definitions, .. } => definitions
                .first()
                .map(|d| d.long_forms.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestState::Error { cause, .. } => Some(&cause.message),
            _ => None,
        }
    }

    /// Short label for logs and the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            RequestState::Loading { .. } => "loading",
            RequestState::Success { .. } => "success",
            RequestState::Error { .. } => "error",
        }
    }
}
