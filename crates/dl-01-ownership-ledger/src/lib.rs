//! # dl-01-ownership-ledger
//!
//! Ownership Ledger: current owner and bounded transfer history per device,
//! plus the dispute state machine over historical transfers.
//!
//! ## Overview
//!
//! - **Bounded History**: at most 100 transfers per device; overflow is an
//!   error, never eviction.
//! - **Owner-Only Transfers**: only the recorded current owner may transfer.
//! - **Public Disputes**: anyone may dispute a transfer, once per index.
//! - **Administrator Resolution**: a fixed identity set at construction
//!   resolves (or reopens) disputes and establishes initial ownership.
//!
//! ## Architecture
//!
//! ```text
//! caller ──transfer()──→ Ownership Ledger ──device_info()──→ Device Registry
//!                              │
//!                              ├── OwnershipTransferred ──→ Event Bus
//!                              │
//!                              └── current_owner() ←── Complaint Log
//! ```
//!
//! ## Dispute lifecycle
//!
//! ```text
//! [OPEN] ──resolve(true)──→ [RESOLVED]
//!    ↑                          │
//!    └──── resolve(false) ──────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use dl_01_ownership_ledger::{LedgerConfig, OwnershipLedgerApi, OwnershipLedgerService};
//!
//! let ledger = OwnershipLedgerService::new(LedgerConfig::new(admin), registry, clock, bus);
//! ledger.establish_ownership(admin, device, alice)?;
//! let index = ledger.transfer(alice, device, bob, "sale")?;
//! ledger.dispute(carol, device, index, "fraud")?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;
pub mod state;

pub use config::LedgerConfig;
pub use domain::{
    DisputeKey, DisputeRecord, DisputeStatus, TransferEntry, TransferHistory,
    EMPTY_HISTORY_DIGEST, HISTORY_CAPACITY, MAX_NOTES_LEN, MAX_REASON_LEN,
};
pub use error::{LedgerError, LedgerErrorCode, LedgerResult};
pub use ports::inbound::OwnershipLedgerApi;
pub use service::OwnershipLedgerService;
pub use state::LedgerSnapshot;
