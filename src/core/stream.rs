//! # Request State Stream
//!
//! Turns one `LookupClient::fetch` into a lazy stream of exactly two
//! `RequestState` values: `Loading`, then `Success` or `Error`.
//!
//! Every failure mode (transport error, panic inside the client, non-2xx
//! status, missing body) is folded into the terminal `Error` state, so the
//! stream itself never fails.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_stream::stream;
use futures::{FutureExt, Stream, StreamExt};
use log::{debug, warn};

use crate::core::request::{NULL_RESPONSE_MESSAGE, RESPONSE_FAILURE_MESSAGE, RequestState};
use crate::lookup::{LookupClient, LookupError, LookupResponse};

type FetchOutcome = Result<Result<LookupResponse, LookupError>, Box<dyn Any + Send>>;

/// Builds the state stream for a single query. Nothing runs until polled.
///
/// A panic inside `fetch` becomes an `Error` state, but the process panic hook
/// still runs first. Under the TUI that hook is ratatui's, which restores the
/// terminal, so `LookupClient` implementations must not panic.
pub fn request_states(
    client: Arc<dyn LookupClient>,
    query: impl Into<String>,
) -> impl Stream<Item = RequestState> + Send + 'static {
    let query = query.into();
    stream! {
        yield RequestState::loading();

        debug!("Fetching {:?} via {}", query, client.name());
        let outcome = AssertUnwindSafe(client.fetch(&query)).catch_unwind().await;
        yield terminal_state(&query, outcome);
    }
}

/// Drains `request_states` into a vector.
pub async fn collect_states(client: Arc<dyn LookupClient>, query: &str) -> Vec<RequestState> {
    request_states(client, query).collect().await
}

fn terminal_state(query: &str, outcome: FetchOutcome) -> RequestState {
    match outcome {
        Err(panic) => {
            let message = panic_message(&*panic);
            warn!("Lookup for {:?} panicked: {}", query, message);
            RequestState::error(message)
        }
        Ok(Err(e)) => {
            warn!("Lookup for {:?} failed: {}", query, e);
            RequestState::error(e.message())
        }
        Ok(Ok(response)) if !response.is_success() => {
            warn!("Lookup for {:?} returned status {}", query, response.status);
            RequestState::error(RESPONSE_FAILURE_MESSAGE)
        }
        Ok(Ok(LookupResponse { body: None, .. })) => {
            warn!("Lookup for {:?} returned no body", query);
            RequestState::error(NULL_RESPONSE_MESSAGE)
        }
        Ok(Ok(LookupResponse {
            body: Some(definitions),
            ..
        })) => {
            debug!("Lookup for {:?} returned {} record(s)", query, definitions.len());
            RequestState::success(definitions)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "lookup client panicked".to_string()
    }
}
