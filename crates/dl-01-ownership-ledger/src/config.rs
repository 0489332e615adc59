//! Ownership Ledger configuration

use crate::domain::{HISTORY_CAPACITY, MAX_NOTES_LEN, MAX_REASON_LEN};
use shared_types::Identity;

/// Ledger configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Fixed identity allowed to establish ownership and resolve disputes
    pub administrator: Identity,
    /// Maximum transfer entries per device
    pub history_capacity: usize,
    /// Maximum transfer notes length (code units)
    pub max_notes_len: usize,
    /// Maximum dispute reason length (code units)
    pub max_reason_len: usize,
}

impl LedgerConfig {
    /// Configuration with default bounds for the given administrator.
    pub fn new(administrator: Identity) -> Self {
        Self {
            administrator,
            history_capacity: HISTORY_CAPACITY,
            max_notes_len: MAX_NOTES_LEN,
            max_reason_len: MAX_REASON_LEN,
        }
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
