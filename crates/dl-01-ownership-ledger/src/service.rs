//! Ownership Ledger Service - Core business logic
//!
//! Every mutating operation holds the state write lock for its whole
//! read-validate-write sequence and publishes its event before releasing it.

use crate::config::LedgerConfig;
use crate::domain::{
    DisputeKey, DisputeRecord, TransferEntry, TransferHistory, EMPTY_HISTORY_DIGEST,
};
use crate::error::{LedgerError, LedgerResult};
use crate::ports::inbound::OwnershipLedgerApi;
use crate::state::{LedgerSnapshot, LedgerState};
use parking_lot::RwLock;
use shared_bus::{EventPublisher, LedgerEvent};
use shared_types::{
    text_units, DeviceId, DeviceRegistry, Hash, Identity, OwnershipReader, RegistryError,
    TimeSource, TransferIndex,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Ownership Ledger service
pub struct OwnershipLedgerService<R, C, P>
where
    R: DeviceRegistry,
    C: TimeSource,
    P: EventPublisher,
{
    config: LedgerConfig,
    state: RwLock<LedgerState>,
    registry: Arc<R>,
    clock: Arc<C>,
    publisher: Arc<P>,
}

impl<R, C, P> OwnershipLedgerService<R, C, P>
where
    R: DeviceRegistry,
    C: TimeSource,
    P: EventPublisher,
{
    pub fn new(config: LedgerConfig, registry: Arc<R>, clock: Arc<C>, publisher: Arc<P>) -> Self {
        Self {
            config,
            state: RwLock::new(LedgerState::new()),
            registry,
            clock,
            publisher,
        }
    }

    /// Rebuild a ledger from a snapshot. No events are emitted.
    pub fn restore(
        config: LedgerConfig,
        snapshot: LedgerSnapshot,
        registry: Arc<R>,
        clock: Arc<C>,
        publisher: Arc<P>,
    ) -> LedgerResult<Self> {
        let state = LedgerState::from_snapshot(snapshot, config.history_capacity)?;
        info!(
            owners = state.owners.len(),
            histories = state.histories.len(),
            disputes = state.disputes.len(),
            "[dl-01] Ledger restored from snapshot"
        );
        Ok(Self {
            config,
            state: RwLock::new(state),
            registry,
            clock,
            publisher,
        })
    }

    /// Export the whole ledger state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.read().to_snapshot()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Device must be known to the registry and active.
    fn check_device(&self, device_id: DeviceId) -> LedgerResult<()> {
        match self.registry.device_info(&device_id) {
            Ok(info) if info.active => Ok(()),
            Ok(_) => Err(LedgerError::InactiveDevice { device_id }),
            Err(RegistryError::UnknownDevice { .. }) => Err(LedgerError::NotRegistered { device_id }),
            Err(RegistryError::Unavailable { reason }) => {
                Err(LedgerError::RegistryUnavailable { reason })
            }
        }
    }

    fn check_administrator(&self, caller: Identity, device_id: DeviceId) -> LedgerResult<()> {
        if caller != self.config.administrator {
            return Err(LedgerError::NotOwner { caller, device_id });
        }
        Ok(())
    }

    fn do_establish(
        &self,
        caller: Identity,
        device_id: DeviceId,
        owner: Identity,
    ) -> LedgerResult<()> {
        let mut state = self.state.write();

        self.check_device(device_id)?;
        self.check_administrator(caller, device_id)?;
        if state.owners.contains_key(&device_id) {
            return Err(LedgerError::AlreadyEstablished { device_id });
        }

        state.owners.insert(device_id, owner);
        self.publisher
            .publish(LedgerEvent::OwnershipEstablished { device_id, owner });
        Ok(())
    }

    fn do_transfer(
        &self,
        caller: Identity,
        device_id: DeviceId,
        new_owner: Identity,
        notes: &str,
    ) -> LedgerResult<TransferIndex> {
        let mut state = self.state.write();

        self.check_device(device_id)?;
        let previous_owner = *state
            .owners
            .get(&device_id)
            .ok_or(LedgerError::OwnershipNotEstablished { device_id })?;
        if caller != previous_owner {
            return Err(LedgerError::NotOwner { caller, device_id });
        }
        let length = text_units(notes);
        if length > self.config.max_notes_len {
            return Err(LedgerError::InvalidNotes {
                length,
                max: self.config.max_notes_len,
            });
        }

        // Capacity is checked before an empty history could be inserted.
        let capacity = self.config.history_capacity;
        if state
            .histories
            .get(&device_id)
            .is_some_and(TransferHistory::is_full)
            || capacity == 0
        {
            warn!(device_id = %device_id, capacity, "[dl-01] Transfer history full");
            return Err(LedgerError::HistoryFull {
                device_id,
                capacity,
            });
        }

        let now = self.clock.now();
        let index = state
            .histories
            .entry(device_id)
            .or_insert_with(|| TransferHistory::with_capacity(capacity))
            .try_push(TransferEntry::new(new_owner, now, notes))
            .map_err(|e| LedgerError::HistoryFull {
                device_id,
                capacity: e.capacity,
            })?;
        state.owners.insert(device_id, new_owner);

        self.publisher.publish(LedgerEvent::OwnershipTransferred {
            device_id,
            previous_owner,
            new_owner,
            notes: notes.to_string(),
        });
        Ok(index)
    }

    fn do_dispute(
        &self,
        caller: Identity,
        device_id: DeviceId,
        transfer_index: TransferIndex,
        reason: &str,
    ) -> LedgerResult<()> {
        let mut state = self.state.write();

        let length = match state.histories.get(&device_id) {
            Some(history) if !history.is_empty() => history.len(),
            _ => return Err(LedgerError::NoHistory { device_id }),
        };
        if transfer_index >= length {
            return Err(LedgerError::InvalidTransferIndex {
                index: transfer_index,
                length,
            });
        }
        let key = DisputeKey::new(device_id, transfer_index);
        if state.disputes.contains_key(&key) {
            return Err(LedgerError::AlreadyDisputed {
                device_id,
                transfer_index,
            });
        }
        let reason_len = text_units(reason);
        if reason_len > self.config.max_reason_len {
            return Err(LedgerError::InvalidReason {
                length: reason_len,
                max: self.config.max_reason_len,
            });
        }

        state.disputes.insert(key, DisputeRecord::open(caller, reason));
        self.publisher.publish(LedgerEvent::TransferDisputed {
            device_id,
            transfer_index,
            disputer: caller,
            reason: reason.to_string(),
        });
        Ok(())
    }

    fn do_resolve(
        &self,
        caller: Identity,
        device_id: DeviceId,
        transfer_index: TransferIndex,
        resolve: bool,
    ) -> LedgerResult<()> {
        let mut state = self.state.write();

        let key = DisputeKey::new(device_id, transfer_index);
        if !state.disputes.contains_key(&key) {
            return Err(LedgerError::DisputeNotFound {
                device_id,
                transfer_index,
            });
        }
        self.check_administrator(caller, device_id)?;

        if let Some(record) = state.disputes.get_mut(&key) {
            record.set_resolved(resolve);
        }
        self.publisher.publish(LedgerEvent::DisputeResolved {
            device_id,
            transfer_index,
            resolved: resolve,
        });
        Ok(())
    }
}

impl<R, C, P> OwnershipLedgerApi for OwnershipLedgerService<R, C, P>
where
    R: DeviceRegistry,
    C: TimeSource,
    P: EventPublisher,
{
    fn establish_ownership(
        &self,
        caller: Identity,
        device_id: DeviceId,
        owner: Identity,
    ) -> LedgerResult<()> {
        self.do_establish(caller, device_id, owner)
            .inspect(|_| {
                info!(device_id = %device_id, owner = %owner, "[dl-01] Ownership established")
            })
            .inspect_err(|e| {
                debug!(device_id = %device_id, caller = %caller, error = %e, "[dl-01] Establish rejected")
            })
    }

    fn transfer(
        &self,
        caller: Identity,
        device_id: DeviceId,
        new_owner: Identity,
        notes: &str,
    ) -> LedgerResult<TransferIndex> {
        self.do_transfer(caller, device_id, new_owner, notes)
            .inspect(|index| {
                info!(
                    device_id = %device_id,
                    new_owner = %new_owner,
                    transfer_index = index,
                    "[dl-01] Ownership transferred"
                )
            })
            .inspect_err(|e| {
                debug!(device_id = %device_id, caller = %caller, error = %e, "[dl-01] Transfer rejected")
            })
    }

    fn dispute(
        &self,
        caller: Identity,
        device_id: DeviceId,
        transfer_index: TransferIndex,
        reason: &str,
    ) -> LedgerResult<()> {
        self.do_dispute(caller, device_id, transfer_index, reason)
            .inspect(|_| {
                info!(
                    device_id = %device_id,
                    transfer_index,
                    disputer = %caller,
                    "[dl-01] Transfer disputed"
                )
            })
            .inspect_err(|e| {
                debug!(device_id = %device_id, transfer_index, error = %e, "[dl-01] Dispute rejected")
            })
    }

    fn resolve_dispute(
        &self,
        caller: Identity,
        device_id: DeviceId,
        transfer_index: TransferIndex,
        resolve: bool,
    ) -> LedgerResult<()> {
        self.do_resolve(caller, device_id, transfer_index, resolve)
            .inspect(|_| {
                info!(
                    device_id = %device_id,
                    transfer_index,
                    resolved = resolve,
                    "[dl-01] Dispute resolution set"
                )
            })
            .inspect_err(|e| {
                debug!(device_id = %device_id, transfer_index, error = %e, "[dl-01] Resolve rejected")
            })
    }

    fn get_history(&self, device_id: &DeviceId) -> Vec<TransferEntry> {
        self.state
            .read()
            .histories
            .get(device_id)
            .map(|h| h.entries().to_vec())
            .unwrap_or_default()
    }

    fn get_current_owner(&self, device_id: &DeviceId) -> LedgerResult<Identity> {
        self.state
            .read()
            .owners
            .get(device_id)
            .copied()
            .ok_or(LedgerError::OwnershipNotEstablished {
                device_id: *device_id,
            })
    }

    fn is_dispute_open(&self, device_id: &DeviceId, transfer_index: TransferIndex) -> bool {
        self.state
            .read()
            .disputes
            .get(&DisputeKey::new(*device_id, transfer_index))
            .is_some_and(DisputeRecord::is_open)
    }

    fn get_dispute(
        &self,
        device_id: &DeviceId,
        transfer_index: TransferIndex,
    ) -> LedgerResult<DisputeRecord> {
        self.state
            .read()
            .disputes
            .get(&DisputeKey::new(*device_id, transfer_index))
            .cloned()
            .ok_or(LedgerError::DisputeNotFound {
                device_id: *device_id,
                transfer_index,
            })
    }

    fn transfer_count(&self, device_id: &DeviceId) -> usize {
        self.state
            .read()
            .histories
            .get(device_id)
            .map_or(0, TransferHistory::len)
    }

    fn history_digest(&self, device_id: &DeviceId) -> Hash {
        self.state
            .read()
            .histories
            .get(device_id)
            .map_or(EMPTY_HISTORY_DIGEST, TransferHistory::digest)
    }

    fn administrator(&self) -> Identity {
        self.config.administrator
    }
}

impl<R, C, P> OwnershipReader for OwnershipLedgerService<R, C, P>
where
    R: DeviceRegistry,
    C: TimeSource,
    P: EventPublisher,
{
    fn current_owner(&self, device_id: &DeviceId) -> Option<Identity> {
        self.state.read().owners.get(device_id).copied()
    }
}
