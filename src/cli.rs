//! # One-shot Mode
//!
//! `acrodef HMM` runs a single search through the same `SearchController`
//! the TUI uses and prints the outcome to stdout, without touching the
//! terminal's alternate screen.

use std::io::{self, Write};

use log::info;

use crate::core::controller::{SearchController, SearchSnapshot};
use crate::core::request::RequestState;

/// Output format for one-shot results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Renders a terminal state for stdout. `Err` carries the error message.
pub fn render(state: &RequestState, format: OutputFormat) -> Result<String, String> {
    match state {
        RequestState::Loading { .. } => Err("search did not complete".to_string()),
        RequestState::Error { cause, .. } => Err(cause.message.clone()),
        RequestState::Success { definitions, .. } => match format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(definitions).map_err(|e| e.to_string())
            }
            OutputFormat::Text => {
                let long_forms = state.long_forms();
                if long_forms.is_empty() {
                    return Ok("No definitions found".to_string());
                }
                Ok(long_forms
                    .iter()
                    .enumerate()
                    .map(|(i, lf)| format!("{:>3}. {}", i + 1, lf.text))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        },
    }
}

/// Runs one search to completion and prints the result.
///
/// Returns whether the search succeeded.
pub async fn run_once(
    controller: &SearchController,
    query: &str,
    format: OutputFormat,
) -> io::Result<bool> {
    let id = controller.search(query);
    let snapshot: Option<SearchSnapshot> = controller.wait_for_terminal(id).await;
    let state = snapshot
        .and_then(|s| s.state)
        .unwrap_or_else(RequestState::loading);

    match render(&state, format) {
        Ok(text) => {
            info!("One-shot search for {:?} succeeded", query);
            writeln!(io::stdout(), "{text}")?;
            Ok(true)
        }
        Err(message) => {
            info!("One-shot search for {:?} failed: {}", query, message);
            writeln!(io::stderr(), "Error has occurred: {message}")?;
            Ok(false)
        }
    }
}
