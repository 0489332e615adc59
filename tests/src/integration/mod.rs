//! Cross-component integration flows.

#[cfg(test)]
pub(crate) mod fixtures;

pub mod complaint_flows;
pub mod concurrency;
pub mod runtime_flows;
