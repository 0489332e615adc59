//! Complaint Log state and snapshots

use crate::domain::Complaint;
use crate::error::{ComplaintError, ComplaintResult};
use serde::{Deserialize, Serialize};
use shared_types::{ComplaintId, DeviceId};
use std::collections::{BTreeMap, HashMap};

/// Mutable complaint state, guarded by the service's lock.
#[derive(Debug, Default)]
pub struct ComplaintLogState {
    /// Complaints per device, ordered by id
    pub complaints: HashMap<DeviceId, BTreeMap<ComplaintId, Complaint>>,
    /// Next id to assign per device; never decreases
    pub counters: HashMap<DeviceId, ComplaintId>,
}

impl ComplaintLogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a complaint under the device's next id and advance the counter.
    ///
    /// The counter must stay representable after the increment, so the last
    /// assignable id is `u64::MAX - 1`. Nothing is stored on failure.
    pub fn append(
        &mut self,
        device_id: DeviceId,
        complaint: Complaint,
    ) -> ComplaintResult<ComplaintId> {
        let counter = self.counters.entry(device_id).or_insert(0);
        let id = *counter;
        *counter = id
            .checked_add(1)
            .ok_or(ComplaintError::IdsExhausted { device_id })?;
        self.complaints
            .entry(device_id)
            .or_default()
            .insert(id, complaint);
        Ok(id)
    }

    pub fn get(&self, device_id: &DeviceId, complaint_id: ComplaintId) -> Option<&Complaint> {
        self.complaints.get(device_id)?.get(&complaint_id)
    }

    pub fn get_mut(
        &mut self,
        device_id: &DeviceId,
        complaint_id: ComplaintId,
    ) -> Option<&mut Complaint> {
        self.complaints.get_mut(device_id)?.get_mut(&complaint_id)
    }

    pub fn to_snapshot(&self) -> ComplaintLogSnapshot {
        let mut complaints: Vec<_> = self
            .complaints
            .iter()
            .flat_map(|(device_id, by_id)| {
                by_id
                    .iter()
                    .map(move |(id, complaint)| (*device_id, *id, complaint.clone()))
            })
            .collect();
        complaints.sort_by_key(|(device_id, id, _)| (*device_id, *id));

        let mut counters: Vec<_> = self.counters.iter().map(|(d, c)| (*d, *c)).collect();
        counters.sort_by_key(|(device_id, _)| *device_id);

        ComplaintLogSnapshot {
            complaints,
            counters,
        }
    }

    /// Rebuild state. Each counter is raised past the highest stored id so
    /// ids are never reused. A stored id of `u64::MAX` leaves no next id and
    /// is rejected.
    pub fn from_snapshot(snapshot: ComplaintLogSnapshot) -> ComplaintResult<Self> {
        let mut state = Self::new();
        for (device_id, next) in snapshot.counters {
            state.counters.insert(device_id, next);
        }
        for (device_id, id, complaint) in snapshot.complaints {
            let next = id
                .checked_add(1)
                .ok_or(ComplaintError::IdsExhausted { device_id })?;
            let counter = state.counters.entry(device_id).or_insert(next);
            *counter = (*counter).max(next);
            state
                .complaints
                .entry(device_id)
                .or_default()
                .insert(id, complaint);
        }
        Ok(state)
    }
}

/// Serializable export of the whole complaint log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintLogSnapshot {
    pub complaints: Vec<(DeviceId, ComplaintId, Complaint)>,
    pub counters: Vec<(DeviceId, ComplaintId)>,
}

impl ComplaintLogSnapshot {
    pub fn to_bytes(&self) -> ComplaintResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| ComplaintError::SnapshotEncoding {
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> ComplaintResult<Self> {
        bincode::deserialize(bytes).map_err(|e| ComplaintError::SnapshotEncoding {
            reason: e.to_string(),
        })
    }
}
