//! # Ledger Runtime
//!
//! Assembles the device ledger: registry, clock, event bus, Ownership Ledger
//! and Complaint Log, plus the metrics router fed by the bus.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Reject the zero administrator identity
//! 3. Build components in dependency order
//! 4. Initialize telemetry (logging + metrics)
//! 5. Spawn the metrics router
//!
//! Steps 1-3 are [`LedgerNode::from_env`]; steps 4-5 are [`LedgerNode::start`].
//!
//! ```rust,ignore
//! let node = LedgerNode::from_env()?;
//! let running = node.start()?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod container;
pub mod wiring;

pub use container::{
    ConfigError, LedgerNode, NodeComplaintLog, NodeConfig, NodeLedger, RunningNode,
};
pub use wiring::{record_event, spawn_metrics_router};
