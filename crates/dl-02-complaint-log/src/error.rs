//! Error types for the Complaint Log

use crate::domain::EvidenceViolation;
use serde::{Deserialize, Serialize};
use shared_types::{ComplaintId, DeviceId, Identity};
use thiserror::Error;

/// Complaint Log errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplaintError {
    /// Registry does not know the device
    #[error("Device not registered: {device_id}")]
    DeviceNotRegistered { device_id: DeviceId },

    /// No complaint with this id for the device
    #[error("Complaint {complaint_id} not found for device {device_id}")]
    ComplaintNotFound {
        device_id: DeviceId,
        complaint_id: ComplaintId,
    },

    /// Caller is not the current owner (logging) or the complainant (escalating)
    #[error("Caller {caller} not authorized for device {device_id}")]
    NotAuthorized { caller: Identity, device_id: DeviceId },

    /// Complaint type must be positive
    #[error("Invalid complaint type: {complaint_type}")]
    InvalidType { complaint_type: u32 },

    /// Description exceeds the bound
    #[error("Description too long: {length} units, max {max}")]
    InvalidDescription { length: usize, max: usize },

    /// Evidence hash failed validation
    #[error("Invalid evidence hash: {violation}")]
    InvalidEvidence { violation: EvidenceViolation },

    /// Escalation is single-shot
    #[error("Complaint {complaint_id} of device {device_id} already escalated")]
    AlreadyEscalated {
        device_id: DeviceId,
        complaint_id: ComplaintId,
    },

    /// The device's id space is used up. Not retryable.
    #[error("Complaint ids exhausted for device {device_id}")]
    IdsExhausted { device_id: DeviceId },

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot encoding error: {reason}")]
    SnapshotEncoding { reason: String },
}

/// Serializable error code for callers and external indexers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintErrorCode {
    NotRegistered,
    NotAuthorized,
    InvalidType,
    InvalidDescription,
    InvalidEvidence,
    IdsExhausted,
    SnapshotEncoding,
}

impl ComplaintError {
    /// Stable error code for this error.
    ///
    /// A repeated escalation reports `InvalidType`.
    pub fn code(&self) -> ComplaintErrorCode {
        match self {
            Self::DeviceNotRegistered { .. } | Self::ComplaintNotFound { .. } => {
                ComplaintErrorCode::NotRegistered
            }
            Self::NotAuthorized { .. } => ComplaintErrorCode::NotAuthorized,
            Self::InvalidType { .. } | Self::AlreadyEscalated { .. } => {
                ComplaintErrorCode::InvalidType
            }
            Self::InvalidDescription { .. } => ComplaintErrorCode::InvalidDescription,
            Self::InvalidEvidence { .. } => ComplaintErrorCode::InvalidEvidence,
            Self::IdsExhausted { .. } => ComplaintErrorCode::IdsExhausted,
            Self::SnapshotEncoding { .. } => ComplaintErrorCode::SnapshotEncoding,
        }
    }
}

/// Result type for complaint log operations
pub type ComplaintResult<T> = Result<T, ComplaintError>;
