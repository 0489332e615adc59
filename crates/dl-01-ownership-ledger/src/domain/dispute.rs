//! Dispute records
//!
//! ```text
//! [OPEN resolved=false] ──resolve(true)──→ [RESOLVED resolved=true]
//!          ↑                                        │
//!          └──────────── resolve(false) ────────────┘
//! ```
//!
//! At most one record per (device, transfer index). Records are never
//! deleted; only the `resolved` flag changes after creation.

use serde::{Deserialize, Serialize};
use shared_types::{DeviceId, Identity, TransferIndex};

/// Maximum dispute reason length in code units.
pub const MAX_REASON_LEN: usize = 256;

/// Key of a dispute record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisputeKey {
    pub device_id: DeviceId,
    pub transfer_index: TransferIndex,
}

impl DisputeKey {
    pub fn new(device_id: DeviceId, transfer_index: TransferIndex) -> Self {
        Self {
            device_id,
            transfer_index,
        }
    }
}

/// Lifecycle state of a dispute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisputeStatus {
    Open,
    Resolved,
}

/// A challenge filed against one historical transfer.
///
/// `disputer` and `reason` are fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeRecord {
    disputer: Identity,
    reason: String,
    resolved: bool,
}

impl DisputeRecord {
    /// New, unresolved dispute.
    pub fn open(disputer: Identity, reason: impl Into<String>) -> Self {
        Self {
            disputer,
            reason: reason.into(),
            resolved: false,
        }
    }

    pub fn disputer(&self) -> Identity {
        self.disputer
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_open(&self) -> bool {
        !self.resolved
    }

    pub fn status(&self) -> DisputeStatus {
        if self.resolved {
            DisputeStatus::Resolved
        } else {
            DisputeStatus::Open
        }
    }

    /// Overwrite the resolution flag. Setting `false` reopens the dispute.
    pub(crate) fn set_resolved(&mut self, resolved: bool) {
        self.resolved = resolved;
    }
}
