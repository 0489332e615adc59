//! Ledger state and snapshots

use crate::domain::{DisputeKey, DisputeRecord, TransferEntry, TransferHistory};
use crate::error::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use shared_types::{DeviceId, Identity};
use std::collections::HashMap;

/// Mutable ledger state, guarded by the service's lock.
#[derive(Debug, Default)]
pub struct LedgerState {
    /// Current owner per device
    pub owners: HashMap<DeviceId, Identity>,
    /// Transfer history per device; created on first transfer
    pub histories: HashMap<DeviceId, TransferHistory>,
    /// Dispute records; never removed
    pub disputes: HashMap<DisputeKey, DisputeRecord>,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic export: every list sorted by key.
    pub fn to_snapshot(&self) -> LedgerSnapshot {
        let mut owners: Vec<_> = self.owners.iter().map(|(d, o)| (*d, *o)).collect();
        owners.sort_by_key(|(device_id, _)| *device_id);

        let mut histories: Vec<_> = self
            .histories
            .iter()
            .map(|(d, h)| (*d, h.entries().to_vec()))
            .collect();
        histories.sort_by_key(|(device_id, _)| *device_id);

        let mut disputes: Vec<_> = self
            .disputes
            .iter()
            .map(|(k, r)| (*k, r.clone()))
            .collect();
        disputes.sort_by_key(|(key, _)| *key);

        LedgerSnapshot {
            owners,
            histories,
            disputes,
        }
    }

    /// Rebuild state from a snapshot.
    ///
    /// Fails if a history exceeds `capacity` or a dispute references a
    /// transfer that does not exist.
    pub fn from_snapshot(snapshot: LedgerSnapshot, capacity: usize) -> LedgerResult<Self> {
        let mut histories = HashMap::with_capacity(snapshot.histories.len());
        for (device_id, entries) in snapshot.histories {
            let history = TransferHistory::from_entries(entries, capacity)
                .map_err(|e| LedgerError::HistoryFull {
                    device_id,
                    capacity: e.capacity,
                })?;
            histories.insert(device_id, history);
        }

        let mut disputes = HashMap::with_capacity(snapshot.disputes.len());
        for (key, record) in snapshot.disputes {
            let length = histories
                .get(&key.device_id)
                .map_or(0, TransferHistory::len);
            if key.transfer_index >= length {
                return Err(LedgerError::InvalidTransferIndex {
                    index: key.transfer_index,
                    length,
                });
            }
            disputes.insert(key, record);
        }

        Ok(Self {
            owners: snapshot.owners.into_iter().collect(),
            histories,
            disputes,
        })
    }
}

/// Serializable export of the whole ledger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub owners: Vec<(DeviceId, Identity)>,
    pub histories: Vec<(DeviceId, Vec<TransferEntry>)>,
    pub disputes: Vec<(DisputeKey, DisputeRecord)>,
}

impl LedgerSnapshot {
    pub fn to_bytes(&self) -> LedgerResult<Vec<u8>> {
        bincode::serialize(self).map_err(|e| LedgerError::SnapshotEncoding {
            reason: e.to_string(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> LedgerResult<Self> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::SnapshotEncoding {
            reason: e.to_string(),
        })
    }
}
