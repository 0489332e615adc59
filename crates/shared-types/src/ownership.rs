//! # Ownership Read Port
//!
//! The only view of the Ownership Ledger that other components receive.
//! Implemented by the ledger service; consumed by the Complaint Log and any
//! future resolution or incentive collaborator.

use crate::entities::{DeviceId, Identity};

/// Read-only access to current device ownership.
pub trait OwnershipReader: Send + Sync {
    /// Current owner of `device_id`, or `None` if ownership was never established.
    fn current_owner(&self, device_id: &DeviceId) -> Option<Identity>;
}
