//! Complaint Log configuration

use crate::domain::{EVIDENCE_PREFIX, MAX_DESCRIPTION_LEN, MAX_EVIDENCE_LEN};

/// Complaint Log configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplaintLogConfig {
    /// Maximum description length (code units)
    pub max_description_len: usize,
    /// Maximum evidence hash length (code units)
    pub max_evidence_len: usize,
    /// Required evidence hash prefix
    pub evidence_prefix: String,
}

impl Default for ComplaintLogConfig {
    fn default() -> Self {
        Self {
            max_description_len: MAX_DESCRIPTION_LEN,
            max_evidence_len: MAX_EVIDENCE_LEN,
            evidence_prefix: EVIDENCE_PREFIX.to_string(),
        }
    }
}
