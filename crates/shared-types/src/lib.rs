//! # Shared Types Crate
//!
//! Identifiers, clocks and read ports shared by the Ownership Ledger and the
//! Complaint Log.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `DeviceId` and `Identity` are defined once here.
//! - **Read-Only Collaboration**: components see each other only through the
//!   read ports in [`registry`] and [`ownership`]; no port exposes a mutation.
//! - **Injected Time**: every timestamp comes from a [`TimeSource`] supplied at
//!   construction, so tests control time explicitly.

pub mod clock;
pub mod entities;
pub mod errors;
pub mod ownership;
pub mod registry;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use entities::*;
pub use errors::*;
pub use ownership::OwnershipReader;
pub use registry::{DeviceInfo, DeviceRegistry, InMemoryDeviceRegistry};
