//! # dl-02-complaint-log
//!
//! Complaint Log: complaints filed by a device's current owner, each with a
//! per-device sequential id and a one-way escalation flag.
//!
//! ## Architecture
//!
//! ```text
//! caller ──log_complaint()──→ Complaint Log ──is_registered()──→ Device Registry
//!                                   │
//!                                   ├──current_owner()──→ Ownership Ledger
//!                                   │
//!                                   └── ComplaintLogged ──→ Event Bus
//! ```
//!
//! ## Validation order (`log_complaint`)
//!
//! 1. Device registered
//! 2. Caller is the current owner
//! 3. Complaint type positive
//! 4. Description within bound
//! 5. Evidence hash, if present, within bound and prefixed
//!
//! The first failing check determines the error.

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

pub use config::ComplaintLogConfig;
pub use domain::{
    Complaint, ComplaintStatus, EvidenceViolation, EVIDENCE_PREFIX, MAX_DESCRIPTION_LEN,
    MAX_EVIDENCE_LEN,
};
pub use error::{ComplaintError, ComplaintErrorCode, ComplaintResult};
pub use ports::inbound::ComplaintLogApi;
pub use service::ComplaintLogService;
pub use state::ComplaintLogSnapshot;
