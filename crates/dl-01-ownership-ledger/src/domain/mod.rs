//! # Domain Layer
//!
//! Pure ownership-ledger types. No locking, no I/O; the service owns both.

pub mod dispute;
pub mod history;

pub use dispute::{DisputeKey, DisputeRecord, DisputeStatus, MAX_REASON_LEN};
pub use history::{
    CapacityExceeded, TransferEntry, TransferHistory, EMPTY_HISTORY_DIGEST, HISTORY_CAPACITY,
    MAX_NOTES_LEN,
};
