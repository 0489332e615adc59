//! Complaint records
//!
//! ```text
//! [LOGGED] ──escalate()──→ [ESCALATED]   (terminal)
//! ```

use serde::{Deserialize, Serialize};
use shared_types::{text_units, Identity, Timestamp};
use std::fmt;

/// Maximum description length in code units.
pub const MAX_DESCRIPTION_LEN: usize = 512;

/// Maximum evidence hash length in code units.
pub const MAX_EVIDENCE_LEN: usize = 46;

/// Content-addressing marker every evidence hash starts with.
pub const EVIDENCE_PREFIX: &str = "Qm";

/// A complaint logged by a device's owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub complainant: Identity,
    pub timestamp: Timestamp,
    /// Positive type code
    pub complaint_type: u32,
    pub description: String,
    pub is_in_person: bool,
    pub evidence_hash: Option<String>,
    escalated: bool,
}

impl Complaint {
    pub fn new(
        complainant: Identity,
        timestamp: Timestamp,
        complaint_type: u32,
        description: impl Into<String>,
        is_in_person: bool,
        evidence_hash: Option<String>,
    ) -> Self {
        Self {
            complainant,
            timestamp,
            complaint_type,
            description: description.into(),
            is_in_person,
            evidence_hash,
            escalated: false,
        }
    }

    pub fn is_escalated(&self) -> bool {
        self.escalated
    }

    pub fn status(&self) -> ComplaintStatus {
        if self.escalated {
            ComplaintStatus::Escalated
        } else {
            ComplaintStatus::Logged
        }
    }

    /// One-way transition. Returns `false` if already escalated.
    pub(crate) fn escalate(&mut self) -> bool {
        if self.escalated {
            return false;
        }
        self.escalated = true;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplaintStatus {
    Logged,
    Escalated,
}

/// Why an evidence hash was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvidenceViolation {
    TooLong { length: usize, max: usize },
    MissingPrefix { expected: String },
}

impl fmt::Display for EvidenceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { length, max } => write!(f, "{length} units, max {max}"),
            Self::MissingPrefix { expected } => write!(f, "must start with {expected:?}"),
        }
    }
}

/// Length bound first, then the prefix marker.
pub fn validate_evidence(evidence: &str, max: usize, prefix: &str) -> Result<(), EvidenceViolation> {
    let length = text_units(evidence);
    if length > max {
        return Err(EvidenceViolation::TooLong { length, max });
    }
    if !evidence.starts_with(prefix) {
        return Err(EvidenceViolation::MissingPrefix {
            expected: prefix.to_string(),
        });
    }
    Ok(())
}
