//! # Domain Layer

pub mod complaint;

pub use complaint::{
    validate_evidence, Complaint, ComplaintStatus, EvidenceViolation, EVIDENCE_PREFIX,
    MAX_DESCRIPTION_LEN, MAX_EVIDENCE_LEN,
};
