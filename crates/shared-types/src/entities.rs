//! # Core Domain Entities
//!
//! Identifier types used as keys across every ledger map.
//!
//! - **DeviceId**: 32-byte opaque device key, supplied by callers and never
//!   generated here.
//! - **Identity**: opaque principal handle. Equality is the only operation the
//!   ledger relies on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte hash (SHA3-256 digests of ledger history).
pub type Hash = [u8; 32];

/// Monotonic ledger time (block height or wall-clock seconds).
pub type Timestamp = u64;

/// Zero-based position of an entry within a device's transfer history.
pub type TransferIndex = usize;

/// Per-device sequential complaint identifier, starting at 0.
pub type ComplaintId = u64;

/// Opaque 32-byte device identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct DeviceId(pub [u8; 32]);

impl DeviceId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<[u8; 32]> for DeviceId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Opaque principal handle (account, key, or any comparable identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    /// The all-zero identity. Never a valid administrator in production.
    pub const ZERO: Identity = Identity([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(value: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(value.trim_start_matches("0x"), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Length of `text` in UTF-8 code units, the unit every bound is expressed in.
pub fn text_units(text: &str) -> usize {
    text.len()
}
