//! # Ledger Container
//!
//! Holds the component instances and their shared collaborators.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: Device Registry, Clock, Event Bus (no dependencies)
//! Level 1: Ownership Ledger (registry, clock, bus)
//! Level 2: Complaint Log (registry, ledger, clock, bus)
//! ```

pub mod config;
pub mod node;

pub use config::{ConfigError, NodeConfig};
pub use node::{LedgerNode, NodeComplaintLog, NodeLedger, RunningNode};
