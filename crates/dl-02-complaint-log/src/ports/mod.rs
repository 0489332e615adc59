//! Ports (hexagonal architecture)
//!
//! Outbound reads go through `DeviceRegistry` and `OwnershipReader` from
//! `shared-types`.

pub mod inbound;

pub use inbound::ComplaintLogApi;
