//! Driving Ports (API - Inbound)

use crate::domain::{DisputeRecord, TransferEntry};
use crate::error::LedgerResult;
use shared_types::{DeviceId, Hash, Identity, TransferIndex};

/// Primary Ownership Ledger API
///
/// Mutating operations check their preconditions in a fixed order; the first
/// failing check determines the error. Each either commits fully and emits
/// one event, or fails with no visible writes.
pub trait OwnershipLedgerApi: Send + Sync {
    /// Record the initial owner of a device. Administrator only.
    ///
    /// Does not append to transfer history.
    fn establish_ownership(
        &self,
        caller: Identity,
        device_id: DeviceId,
        owner: Identity,
    ) -> LedgerResult<()>;

    /// Transfer a device from its current owner to `new_owner`.
    ///
    /// Returns the transfer index of the appended history entry.
    fn transfer(
        &self,
        caller: Identity,
        device_id: DeviceId,
        new_owner: Identity,
        notes: &str,
    ) -> LedgerResult<TransferIndex>;

    /// Open a dispute against a historical transfer. Any caller may dispute.
    fn dispute(
        &self,
        caller: Identity,
        device_id: DeviceId,
        transfer_index: TransferIndex,
        reason: &str,
    ) -> LedgerResult<()>;

    /// Overwrite the `resolved` flag of a dispute. Administrator only.
    ///
    /// Passing `false` reopens a resolved dispute.
    fn resolve_dispute(
        &self,
        caller: Identity,
        device_id: DeviceId,
        transfer_index: TransferIndex,
        resolve: bool,
    ) -> LedgerResult<()>;

    /// Full transfer history (empty if none).
    fn get_history(&self, device_id: &DeviceId) -> Vec<TransferEntry>;

    /// Current owner of a device.
    fn get_current_owner(&self, device_id: &DeviceId) -> LedgerResult<Identity>;

    /// Whether a dispute exists for the key and is unresolved.
    fn is_dispute_open(&self, device_id: &DeviceId, transfer_index: TransferIndex) -> bool;

    /// Dispute record for the key.
    fn get_dispute(
        &self,
        device_id: &DeviceId,
        transfer_index: TransferIndex,
    ) -> LedgerResult<DisputeRecord>;

    /// Number of recorded transfers (zero if none).
    fn transfer_count(&self, device_id: &DeviceId) -> usize;

    /// Hash chain over the device's history; all zeros when empty.
    fn history_digest(&self, device_id: &DeviceId) -> Hash;

    /// The ledger administrator.
    fn administrator(&self) -> Identity;
}
