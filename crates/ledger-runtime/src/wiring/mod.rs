//! # Event Wiring
//!
//! Consumers attached to the event bus by the runtime.

pub mod metrics_router;

pub use metrics_router::{record_event, spawn_metrics_router};
