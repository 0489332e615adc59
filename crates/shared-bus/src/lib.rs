//! # Shared Bus - Ledger Event Bus
//!
//! Every mutating ledger operation emits a structured event for external
//! indexers. This crate defines that event contract and the in-process bus
//! that carries it.
//!
//! ```text
//! ┌──────────────────┐                    ┌──────────────────┐
//! │ Ownership Ledger │ ──publish()──┐     │  Complaint Log   │ ──publish()──┐
//! └──────────────────┘              │     └──────────────────┘              │
//!                                   ▼                                       ▼
//!                             ┌────────────────────────────────────────────────┐
//!                             │                   Event Bus                    │
//!                             └───────────────────────┬────────────────────────┘
//!                                                     │ subscribe()
//!                                                     ▼
//!                                       indexers / metrics router / tests
//! ```
//!
//! ## Ordering
//!
//! Components publish while holding their write lock, so the order observed
//! by a subscriber equals commit order.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, LedgerEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the slowest one lags.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
