//! # Search Controller
//!
//! Owns the "current search" and republishes its states to observers.
//!
//! ```text
//! search("HMM") ──spawn──▶ request_states(client, "HMM")
//!                               │ Loading, Success/Error
//!                               ▼
//!                         publish(id, state)
//!                               │ (dropped if id is stale)
//!                 ┌─────────────┼──────────────┐
//!                 ▼             ▼              ▼
//!          SearchSnapshot   watch::Sender   SearchObserver callbacks
//! ```
//!
//! Each emission updates the state and the derived loading flag together, so
//! no reader can pair a new state with a stale flag. Observers always hear
//! `on_state_changed` before `on_loading_changed` for the same emission.
//!
//! A new search aborts the previous one and bumps the search id; anything the
//! old task still manages to emit is discarded. The latest search wins.

use std::fmt;
use std::pin::pin;
use std::sync::Arc;

use futures::StreamExt;
use log::{debug, info};
use parking_lot::{Mutex, ReentrantMutex};
use tokio::sync::watch;
use tokio::task::AbortHandle;

use crate::core::request::RequestState;
use crate::core::stream::request_states;
use crate::lookup::LookupClient;

/// Monotonic identifier handed out by `SearchController::search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchId(u64);

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The two observable slots, read together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchSnapshot {
    /// Search that produced `state`. `None` before the first emission.
    pub search_id: Option<SearchId>,
    pub query: String,
    pub state: Option<RequestState>,
    pub is_loading: bool,
}

/// Presentation-side callbacks.
///
/// Called from the search task, so implementations should hand work off
/// (channel send, flag flip) rather than block.
pub trait SearchObserver: Send + Sync {
    fn on_state_changed(&self, state: &RequestState);

    fn on_loading_changed(&self, _is_loading: bool) {}
}

struct Inner {
    snapshot: SearchSnapshot,
    latest: u64,
    active: Option<AbortHandle>,
    observers: Vec<(SubscriptionId, Arc<dyn SearchObserver>)>,
    next_subscription: u64,
}

struct Shared {
    client: Arc<dyn LookupClient>,
    inner: Mutex<Inner>,
    /// Serializes check-update-notify so observers never see two emissions
    /// interleaved. Reentrant so an observer may call `cancel`.
    publish_lock: ReentrantMutex<()>,
    tx: watch::Sender<SearchSnapshot>,
}

impl Shared {
    /// Returns false when `id` has been superseded and the caller should stop.
    fn publish(&self, id: SearchId, query: &str, state: RequestState) -> bool {
        let _publishing = self.publish_lock.lock();

        let (snapshot, observers) = {
            let mut inner = self.inner.lock();
            if inner.latest != id.0 {
                debug!("Dropping {} state from superseded search {}", state.label(), id);
                return false;
            }
            inner.snapshot = SearchSnapshot {
                search_id: Some(id),
                query: query.to_string(),
                is_loading: state.is_loading(),
                state: Some(state),
            };
            if inner.snapshot.state.as_ref().is_some_and(RequestState::is_terminal) {
                inner.active = None;
            }
            let observers: Vec<_> = inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (inner.snapshot.clone(), observers)
        };

        debug!(
            "Search {} published {} (is_loading={})",
            id,
            snapshot.state.as_ref().map_or("none", RequestState::label),
            snapshot.is_loading
        );
        self.tx.send_replace(snapshot.clone());

        if let Some(ref state) = snapshot.state {
            for observer in &observers {
                observer.on_state_changed(state);
                observer.on_loading_changed(snapshot.is_loading);
            }
        }
        true
    }
}

/// Cheap to clone; clones share the same search and observers.
#[derive(Clone)]
pub struct SearchController {
    shared: Arc<Shared>,
}

impl SearchController {
    pub fn new(client: Arc<dyn LookupClient>) -> Self {
        let (tx, _rx) = watch::channel(SearchSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                client,
                inner: Mutex::new(Inner {
                    snapshot: SearchSnapshot::default(),
                    latest: 0,
                    active: None,
                    observers: Vec::new(),
                    next_subscription: 0,
                }),
                publish_lock: ReentrantMutex::new(()),
                tx,
            }),
        }
    }

    /// Starts a lookup on a background task and returns immediately.
    ///
    /// The query is forwarded verbatim. Any search still in flight is aborted
    /// and its remaining emissions are discarded.
    ///
    /// Must be called from within a tokio runtime.
    pub fn search(&self, query: impl Into<String>) -> SearchId {
        let query = query.into();
        let mut inner = self.shared.inner.lock();
        inner.latest += 1;
        let id = SearchId(inner.latest);

        if let Some(previous) = inner.active.take() {
            debug!("Search {} supersedes an in-flight search", id);
            previous.abort();
        }

        info!("Starting search {} for {:?}", id, query);
        let shared = Arc::clone(&self.shared);
        let task = tokio::spawn(async move {
            let mut states = pin!(request_states(Arc::clone(&shared.client), query.clone()));
            while let Some(state) = states.next().await {
                if !shared.publish(id, &query, state) {
                    break;
                }
            }
        });
        inner.active = Some(task.abort_handle());
        id
    }

    /// Aborts the in-flight search, if any, and returns to the idle snapshot.
    ///
    /// Returns whether a search was running.
    pub fn cancel(&self) -> bool {
        let _publishing = self.shared.publish_lock.lock();
        let (was_active, observers) = {
            let mut inner = self.shared.inner.lock();
            let Some(handle) = inner.active.take() else {
                return false;
            };
            handle.abort();
            inner.latest += 1;
            inner.snapshot = SearchSnapshot::default();
            let observers: Vec<_> = inner.observers.iter().map(|(_, o)| Arc::clone(o)).collect();
            (true, observers)
        };

        info!("Search cancelled");
        self.shared.tx.send_replace(SearchSnapshot::default());
        for observer in &observers {
            observer.on_loading_changed(false);
        }
        was_active
    }

    /// Latest published state. `None` before the first emission or after `cancel`.
    pub fn current_state(&self) -> Option<RequestState> {
        self.shared.inner.lock().snapshot.state.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.inner.lock().snapshot.is_loading
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.shared.inner.lock().snapshot.clone()
    }

    /// A receiver that sees every published snapshot (latest value semantics).
    pub fn watch(&self) -> watch::Receiver<SearchSnapshot> {
        self.shared.tx.subscribe()
    }

    pub fn subscribe(&self, observer: Arc<dyn SearchObserver>) -> SubscriptionId {
        let mut inner = self.shared.inner.lock();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.observers.push((id, observer));
        debug!("Observer {:?} subscribed ({} total)", id, inner.observers.len());
        id
    }

    /// Returns false if the id was unknown or already removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.shared.inner.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(sub, _)| *sub != id);
        inner.observers.len() != before
    }

    /// Waits until search `id` reaches its terminal state.
    ///
    /// Returns `None` if the search is superseded or cancelled first.
    pub async fn wait_for_terminal(&self, id: SearchId) -> Option<SearchSnapshot> {
        let mut rx = self.watch();
        let shared = Arc::clone(&self.shared);
        let snapshot = rx
            .wait_for(|s| {
                let done = s.search_id == Some(id)
                    && s.state.as_ref().is_some_and(RequestState::is_terminal);
                done || shared.inner.lock().latest != id.0
            })
            .await
            .ok()?
            .clone();
        (snapshot.search_id == Some(id)).then_some(snapshot)
    }
}
