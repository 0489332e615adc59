//! # Time Sources
//!
//! Ledger time only moves forward. Services read the clock exactly once per
//! operation so every write of that operation carries the same timestamp.

use crate::entities::Timestamp;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Abstract interface for ledger time (for testability).
pub trait TimeSource: Send + Sync {
    /// Current ledger time. Never smaller than a previously returned value.
    fn now(&self) -> Timestamp;
}

/// Wall-clock seconds since the Unix epoch, clamped so it never goes backwards.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: AtomicU64,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimeSource for MonotonicClock {
    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let previous = self.last.fetch_max(wall, Ordering::SeqCst);
        previous.max(wall)
    }
}

/// Manually driven clock, typically a block height in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: AtomicU64::new(start),
        }
    }

    /// Advance by `delta` and return the new time.
    pub fn advance(&self, delta: u64) -> Timestamp {
        self.current.fetch_add(delta, Ordering::SeqCst) + delta
    }

    /// Move to `at`. Earlier values are ignored.
    pub fn set(&self, at: Timestamp) {
        self.current.fetch_max(at, Ordering::SeqCst);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> Timestamp {
        self.current.load(Ordering::SeqCst)
    }
}
