//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::lookup::{Definition, LongForm, LookupClient, LookupError, LookupResponse};

/// A single record holding one long form.
pub fn one_definition(long_form: &str) -> Vec<Definition> {
    vec![Definition {
        short_form: String::new(),
        long_forms: vec![LongForm::new(long_form)],
    }]
}

/// Answers every fetch with the same canned outcome and records the queries.
pub struct ScriptedClient {
    outcome: Result<LookupResponse, LookupError>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(outcome: Result<LookupResponse, LookupError>) -> Self {
        Self {
            outcome,
            queries: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(body: Vec<Definition>) -> Self {
        Self::new(Ok(LookupResponse::ok(body)))
    }

    pub fn status(status: u16) -> Self {
        Self::new(Ok(LookupResponse { status, body: None }))
    }

    pub fn response(response: LookupResponse) -> Self {
        Self::new(Ok(response))
    }

    pub fn err(error: LookupError) -> Self {
        Self::new(Err(error))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl LookupClient for ScriptedClient {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch(&self, acronym: &str) -> Result<LookupResponse, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(acronym.to_string());
        self.outcome.clone()
    }
}

/// Never completes.
pub struct PendingClient;

#[async_trait]
impl LookupClient for PendingClient {
    fn name(&self) -> &str {
        "pending"
    }

    async fn fetch(&self, _acronym: &str) -> Result<LookupResponse, LookupError> {
        std::future::pending().await
    }
}

/// Panics inside `fetch` with the given message.
pub struct PanickingClient(pub &'static str);

#[async_trait]
impl LookupClient for PanickingClient {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn fetch(&self, _acronym: &str) -> Result<LookupResponse, LookupError> {
        panic!("{}", self.0)
    }
}

/// Succeeds with the query echoed as a long form, after a per-query delay.
pub struct DelayedClient {
    delays: HashMap<String, Duration>,
}

impl DelayedClient {
    pub fn new(delays: &[(&str, u64)]) -> Self {
        Self {
            delays: delays
                .iter()
                .map(|(q, ms)| (q.to_string(), Duration::from_millis(*ms)))
                .collect(),
        }
    }
}

#[async_trait]
impl LookupClient for DelayedClient {
    fn name(&self) -> &str {
        "delayed"
    }

    async fn fetch(&self, acronym: &str) -> Result<LookupResponse, LookupError> {
        if let Some(delay) = self.delays.get(acronym) {
            tokio::time::sleep(*delay).await;
        }
        Ok(LookupResponse::ok(one_definition(acronym)))
    }
}
