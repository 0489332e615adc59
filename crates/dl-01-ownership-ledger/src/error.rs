//! Error types for the Ownership Ledger
//!
//! Every variant maps onto one [`LedgerErrorCode`]. Codes are the stable,
//! serializable taxonomy callers match on; variants carry diagnostics.

use serde::{Deserialize, Serialize};
use shared_types::{DeviceId, Identity, TransferIndex};
use thiserror::Error;

/// Ownership Ledger errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Registry does not know the device
    #[error("Device not registered: {device_id}")]
    NotRegistered { device_id: DeviceId },

    /// Device is known but has no current-owner record
    #[error("No ownership record for device {device_id}")]
    OwnershipNotEstablished { device_id: DeviceId },

    /// Device has no transfer history to dispute
    #[error("No transfer history for device {device_id}")]
    NoHistory { device_id: DeviceId },

    /// No dispute exists for the key
    #[error("No dispute for transfer {transfer_index} of device {device_id}")]
    DisputeNotFound {
        device_id: DeviceId,
        transfer_index: TransferIndex,
    },

    /// Device is registered but not active
    #[error("Device inactive: {device_id}")]
    InactiveDevice { device_id: DeviceId },

    /// Caller lacks the capability required for this operation
    #[error("Caller {caller} not authorized for device {device_id}")]
    NotOwner { caller: Identity, device_id: DeviceId },

    /// Transfer notes exceed the bound
    #[error("Notes too long: {length} units, max {max}")]
    InvalidNotes { length: usize, max: usize },

    /// Dispute reason exceeds the bound
    #[error("Dispute reason too long: {length} units, max {max}")]
    InvalidReason { length: usize, max: usize },

    /// Transfer index outside the device history
    #[error("Transfer index {index} out of range for history of length {length}")]
    InvalidTransferIndex { index: TransferIndex, length: usize },

    /// A dispute record already exists for the key (first dispute wins)
    #[error("Transfer {transfer_index} of device {device_id} already disputed")]
    AlreadyDisputed {
        device_id: DeviceId,
        transfer_index: TransferIndex,
    },

    /// Ownership was already established for the device
    #[error("Ownership already established for device {device_id}")]
    AlreadyEstablished { device_id: DeviceId },

    /// Appending would exceed the bounded history. Not retryable.
    #[error("Transfer history full for device {device_id}: capacity {capacity}")]
    HistoryFull { device_id: DeviceId, capacity: usize },

    /// Registry could not answer
    #[error("Device registry unavailable: {reason}")]
    RegistryUnavailable { reason: String },

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot encoding error: {reason}")]
    SnapshotEncoding { reason: String },
}

/// Serializable error code for callers and external indexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedgerErrorCode {
    NotRegistered,
    InactiveDevice,
    NotOwner,
    InvalidNotes,
    InvalidReason,
    InvalidTransferIndex,
    AlreadyDisputed,
    AlreadyEstablished,
    HistoryFull,
    RegistryUnavailable,
    SnapshotEncoding,
}

impl LedgerError {
    /// Stable error code for this error.
    pub fn code(&self) -> LedgerErrorCode {
        match self {
            Self::NotRegistered { .. }
            | Self::OwnershipNotEstablished { .. }
            | Self::NoHistory { .. }
            | Self::DisputeNotFound { .. } => LedgerErrorCode::NotRegistered,
            Self::InactiveDevice { .. } => LedgerErrorCode::InactiveDevice,
            Self::NotOwner { .. } => LedgerErrorCode::NotOwner,
            Self::InvalidNotes { .. } => LedgerErrorCode::InvalidNotes,
            Self::InvalidReason { .. } => LedgerErrorCode::InvalidReason,
            Self::InvalidTransferIndex { .. } => LedgerErrorCode::InvalidTransferIndex,
            Self::AlreadyDisputed { .. } => LedgerErrorCode::AlreadyDisputed,
            Self::AlreadyEstablished { .. } => LedgerErrorCode::AlreadyEstablished,
            Self::HistoryFull { .. } => LedgerErrorCode::HistoryFull,
            Self::RegistryUnavailable { .. } => LedgerErrorCode::RegistryUnavailable,
            Self::SnapshotEncoding { .. } => LedgerErrorCode::SnapshotEncoding,
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
