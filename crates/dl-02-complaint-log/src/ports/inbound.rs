//! Driving Ports (API - Inbound)

use crate::domain::Complaint;
use crate::error::ComplaintResult;
use shared_types::{ComplaintId, DeviceId, Identity};

/// Primary Complaint Log API
pub trait ComplaintLogApi: Send + Sync {
    /// Log a complaint as the device's current owner.
    ///
    /// Returns the id assigned to the complaint. Ids start at 0 per device
    /// and are never reused.
    fn log_complaint(
        &self,
        caller: Identity,
        device_id: DeviceId,
        complaint_type: u32,
        description: &str,
        is_in_person: bool,
        evidence_hash: Option<&str>,
    ) -> ComplaintResult<ComplaintId>;

    /// Escalate a complaint. Only the complainant may escalate, once.
    fn escalate_complaint(
        &self,
        caller: Identity,
        device_id: DeviceId,
        complaint_id: ComplaintId,
    ) -> ComplaintResult<()>;

    fn get_complaint(
        &self,
        device_id: &DeviceId,
        complaint_id: ComplaintId,
    ) -> ComplaintResult<Complaint>;

    /// Number of complaints logged for the device (zero if none).
    fn complaint_count(&self, device_id: &DeviceId) -> u64;

    fn is_escalated(&self, device_id: &DeviceId, complaint_id: ComplaintId)
        -> ComplaintResult<bool>;

    /// Every complaint for the device, in id order.
    fn complaints_for_device(&self, device_id: &DeviceId) -> Vec<Complaint>;
}
