//! # Error Types
//!
//! Errors raised by collaborators shared across components.

use crate::entities::DeviceId;
use thiserror::Error;

/// Errors returned by a [`DeviceRegistry`](crate::DeviceRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry has no record of this device.
    #[error("Unknown device: {device_id}")]
    UnknownDevice { device_id: DeviceId },

    /// The registry could not answer.
    #[error("Device registry unavailable: {reason}")]
    Unavailable { reason: String },
}
