//! # Ledger Events
//!
//! The observable event contract. Field names and meanings are stable; the
//! encoding (serde) is free.

use serde::{Deserialize, Serialize};
use shared_types::{ComplaintId, DeviceId, Identity, TransferIndex};

/// Component identifiers used as event sources.
pub mod component_ids {
    /// Ownership Ledger.
    pub const OWNERSHIP_LEDGER: u8 = 1;
    /// Complaint Log.
    pub const COMPLAINT_LOG: u8 = 2;
}

/// All events that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    // =========================================================================
    // OWNERSHIP LEDGER
    // =========================================================================
    /// Initial owner recorded by the ledger administrator.
    OwnershipEstablished {
        device_id: DeviceId,
        owner: Identity,
    },

    /// A transfer was appended to history and the current owner updated.
    OwnershipTransferred {
        device_id: DeviceId,
        previous_owner: Identity,
        new_owner: Identity,
        notes: String,
    },

    /// A historical transfer was challenged.
    TransferDisputed {
        device_id: DeviceId,
        transfer_index: TransferIndex,
        disputer: Identity,
        reason: String,
    },

    /// The administrator set the `resolved` flag of a dispute.
    /// Emitted on every call, including ones that rewrite the same value.
    DisputeResolved {
        device_id: DeviceId,
        transfer_index: TransferIndex,
        resolved: bool,
    },

    // =========================================================================
    // COMPLAINT LOG
    // =========================================================================
    /// A complaint was stored under a freshly assigned id.
    ComplaintLogged {
        device_id: DeviceId,
        complaint_id: ComplaintId,
    },

    /// The complainant escalated a complaint (terminal state).
    ComplaintEscalated {
        device_id: DeviceId,
        complaint_id: ComplaintId,
    },
}

impl LedgerEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::OwnershipEstablished { .. } | Self::OwnershipTransferred { .. } => {
                EventTopic::Ownership
            }
            Self::TransferDisputed { .. } | Self::DisputeResolved { .. } => EventTopic::Dispute,
            Self::ComplaintLogged { .. } | Self::ComplaintEscalated { .. } => {
                EventTopic::Complaint
            }
        }
    }

    /// Device the event concerns.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        match self {
            Self::OwnershipEstablished { device_id, .. }
            | Self::OwnershipTransferred { device_id, .. }
            | Self::TransferDisputed { device_id, .. }
            | Self::DisputeResolved { device_id, .. }
            | Self::ComplaintLogged { device_id, .. }
            | Self::ComplaintEscalated { device_id, .. } => *device_id,
        }
    }

    /// Get the originating component ID.
    #[must_use]
    pub fn source_component(&self) -> u8 {
        match self.topic() {
            EventTopic::Ownership | EventTopic::Dispute => component_ids::OWNERSHIP_LEDGER,
            EventTopic::Complaint | EventTopic::All => component_ids::COMPLAINT_LOG,
        }
    }

    /// Operation kind as a stable lowercase name.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OwnershipEstablished { .. } => "ownership_established",
            Self::OwnershipTransferred { .. } => "ownership_transferred",
            Self::TransferDisputed { .. } => "transfer_disputed",
            Self::DisputeResolved { .. } => "dispute_resolved",
            Self::ComplaintLogged { .. } => "complaint_logged",
            Self::ComplaintEscalated { .. } => "complaint_escalated",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Ownership establishment and transfers.
    Ownership,
    /// Dispute lifecycle.
    Dispute,
    /// Complaint lifecycle.
    Complaint,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Devices to include. Empty means all devices.
    pub devices: Vec<DeviceId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            devices: Vec::new(),
        }
    }

    /// Create a filter for events about specific devices.
    #[must_use]
    pub fn devices(devices: Vec<DeviceId>) -> Self {
        Self {
            topics: Vec::new(),
            devices,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let device_match = self.devices.is_empty() || self.devices.contains(&event.device_id());

        topic_match && device_match
    }
}
