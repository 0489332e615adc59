//! Ports (hexagonal architecture)
//!
//! The ledger's outbound dependencies (`DeviceRegistry`, `TimeSource`,
//! `EventPublisher`) live in the shared crates; only the driving port is
//! defined here.

pub mod inbound;

pub use inbound::OwnershipLedgerApi;
