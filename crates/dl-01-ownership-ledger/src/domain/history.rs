//! Bounded, append-only transfer history
//!
//! One history per device. Length never decreases; once the capacity is
//! reached further appends fail instead of evicting the oldest entry.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use shared_types::{Hash, Identity, Timestamp, TransferIndex};
use thiserror::Error;

/// Maximum transfer entries per device.
pub const HISTORY_CAPACITY: usize = 100;

/// Maximum transfer notes length in code units.
pub const MAX_NOTES_LEN: usize = 512;

/// Digest of an empty history.
pub const EMPTY_HISTORY_DIGEST: Hash = [0u8; 32];

/// One recorded transfer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferEntry {
    /// Owner after this transfer
    pub owner: Identity,
    /// Ledger time of the transfer
    pub transfer_time: Timestamp,
    /// Free-form notes, bounded by [`MAX_NOTES_LEN`]
    pub notes: String,
}

impl TransferEntry {
    pub fn new(owner: Identity, transfer_time: Timestamp, notes: impl Into<String>) -> Self {
        Self {
            owner,
            transfer_time,
            notes: notes.into(),
        }
    }
}

/// Append would exceed capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("history capacity {capacity} reached")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

/// Fixed-capacity ordered sequence of transfers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferHistory {
    entries: Vec<TransferEntry>,
    capacity: usize,
}

impl TransferHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Rebuild a history from stored entries.
    pub fn from_entries(
        entries: Vec<TransferEntry>,
        capacity: usize,
    ) -> Result<Self, CapacityExceeded> {
        if entries.len() > capacity {
            return Err(CapacityExceeded { capacity });
        }
        Ok(Self { entries, capacity })
    }

    /// Append an entry, returning its transfer index.
    pub fn try_push(&mut self, entry: TransferEntry) -> Result<TransferIndex, CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.entries.push(entry);
        Ok(self.entries.len() - 1)
    }

    pub fn get(&self, index: TransferIndex) -> Option<&TransferEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[TransferEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// SHA3-256 hash chain over every entry in order.
    ///
    /// `d_0 = 0^32`, `d_i = SHA3(d_{i-1} || owner || time_be || notes_len_be || notes)`.
    /// Any rewrite of an earlier entry changes every later digest.
    pub fn digest(&self) -> Hash {
        self.entries
            .iter()
            .fold(EMPTY_HISTORY_DIGEST, |previous, entry| {
                let mut hasher = Sha3_256::new();
                hasher.update(previous);
                hasher.update(entry.owner.as_bytes());
                hasher.update(entry.transfer_time.to_be_bytes());
                hasher.update((entry.notes.len() as u64).to_be_bytes());
                hasher.update(entry.notes.as_bytes());
                hasher.finalize().into()
            })
    }
}
