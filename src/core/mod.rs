//! # Core Application Logic
//!
//! This module contains the lookup state machine and the search screen's
//! business logic. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • RequestState         │
//!                    │  • request_states()     │
//!                    │  • SearchController     │
//!                    │  • App + update()       │
//!                    └───────────┬─────────────┘
//!                                │ SearchObserver / watch
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  One-shot  │      │   Other    │
//!     │  Adapter   │      │    CLI     │      │ front ends │
//!     │ (ratatui)  │      │  (stdout)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`request`]: `RequestState`, the closed set of states a lookup goes through
//! - [`stream`]: turns one lookup into a `Loading → terminal` stream
//! - [`controller`]: `SearchController`, the observable "current search"
//! - [`state`]: the `App` struct, the search screen's data
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: settings and their override chain

pub mod action;
pub mod config;
pub mod controller;
pub mod request;
pub mod state;
pub mod stream;

pub use controller::{SearchController, SearchId, SearchObserver, SearchSnapshot, SubscriptionId};
pub use request::{ErrorInfo, RequestState};
pub use stream::{collect_states, request_states};
