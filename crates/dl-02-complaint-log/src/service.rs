//! Complaint Log Service - Core business logic
//!
//! Lock order: the complaint log's write lock is taken first, then the
//! ownership ledger is read through [`OwnershipReader`]. The ledger never
//! calls back into the complaint log.

use crate::config::ComplaintLogConfig;
use crate::domain::{validate_evidence, Complaint};
use crate::error::{ComplaintError, ComplaintResult};
use crate::ports::inbound::ComplaintLogApi;
use crate::state::{ComplaintLogSnapshot, ComplaintLogState};
use parking_lot::RwLock;
use shared_bus::{EventPublisher, LedgerEvent};
use shared_types::{
    text_units, ComplaintId, DeviceId, DeviceRegistry, Identity, OwnershipReader, TimeSource,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Complaint Log service
pub struct ComplaintLogService<R, O, C, P>
where
    R: DeviceRegistry,
    O: OwnershipReader,
    C: TimeSource,
    P: EventPublisher,
{
    config: ComplaintLogConfig,
    state: RwLock<ComplaintLogState>,
    registry: Arc<R>,
    ownership: Arc<O>,
    clock: Arc<C>,
    publisher: Arc<P>,
}

impl<R, O, C, P> ComplaintLogService<R, O, C, P>
where
    R: DeviceRegistry,
    O: OwnershipReader,
    C: TimeSource,
    P: EventPublisher,
{
    pub fn new(
        config: ComplaintLogConfig,
        registry: Arc<R>,
        ownership: Arc<O>,
        clock: Arc<C>,
        publisher: Arc<P>,
    ) -> Self {
        Self {
            config,
            state: RwLock::new(ComplaintLogState::new()),
            registry,
            ownership,
            clock,
            publisher,
        }
    }

    /// Rebuild a complaint log from a snapshot. No events are emitted.
    ///
    /// Fails with `IdsExhausted` if a stored complaint holds the maximum id.
    pub fn restore(
        config: ComplaintLogConfig,
        snapshot: ComplaintLogSnapshot,
        registry: Arc<R>,
        ownership: Arc<O>,
        clock: Arc<C>,
        publisher: Arc<P>,
    ) -> ComplaintResult<Self> {
        let state = ComplaintLogState::from_snapshot(snapshot)?;
        info!(
            devices = state.complaints.len(),
            "[dl-02] Complaint log restored from snapshot"
        );
        Ok(Self {
            config,
            state: RwLock::new(state),
            registry,
            ownership,
            clock,
            publisher,
        })
    }

    pub fn snapshot(&self) -> ComplaintLogSnapshot {
        self.state.read().to_snapshot()
    }

    pub fn config(&self) -> &ComplaintLogConfig {
        &self.config
    }

    fn validate_input(
        &self,
        complaint_type: u32,
        description: &str,
        evidence_hash: Option<&str>,
    ) -> ComplaintResult<()> {
        if complaint_type == 0 {
            return Err(ComplaintError::InvalidType { complaint_type });
        }
        let length = text_units(description);
        if length > self.config.max_description_len {
            return Err(ComplaintError::InvalidDescription {
                length,
                max: self.config.max_description_len,
            });
        }
        if let Some(evidence) = evidence_hash {
            validate_evidence(
                evidence,
                self.config.max_evidence_len,
                &self.config.evidence_prefix,
            )
            .map_err(|violation| ComplaintError::InvalidEvidence { violation })?;
        }
        Ok(())
    }

    fn do_log(
        &self,
        caller: Identity,
        device_id: DeviceId,
        complaint_type: u32,
        description: &str,
        is_in_person: bool,
        evidence_hash: Option<&str>,
    ) -> ComplaintResult<ComplaintId> {
        let mut state = self.state.write();

        if !self.registry.is_registered(&device_id) {
            return Err(ComplaintError::DeviceNotRegistered { device_id });
        }
        if self.ownership.current_owner(&device_id) != Some(caller) {
            return Err(ComplaintError::NotAuthorized { caller, device_id });
        }
        self.validate_input(complaint_type, description, evidence_hash)?;

        let complaint = Complaint::new(
            caller,
            self.clock.now(),
            complaint_type,
            description,
            is_in_person,
            evidence_hash.map(str::to_string),
        );
        let complaint_id = state.append(device_id, complaint)?;

        self.publisher.publish(LedgerEvent::ComplaintLogged {
            device_id,
            complaint_id,
        });
        Ok(complaint_id)
    }

    fn do_escalate(
        &self,
        caller: Identity,
        device_id: DeviceId,
        complaint_id: ComplaintId,
    ) -> ComplaintResult<()> {
        let mut state = self.state.write();

        let complaint =
            state
                .get_mut(&device_id, complaint_id)
                .ok_or(ComplaintError::ComplaintNotFound {
                    device_id,
                    complaint_id,
                })?;
        if complaint.complainant != caller {
            return Err(ComplaintError::NotAuthorized { caller, device_id });
        }
        if !complaint.escalate() {
            return Err(ComplaintError::AlreadyEscalated {
                device_id,
                complaint_id,
            });
        }

        self.publisher.publish(LedgerEvent::ComplaintEscalated {
            device_id,
            complaint_id,
        });
        Ok(())
    }
}

impl<R, O, C, P> ComplaintLogApi for ComplaintLogService<R, O, C, P>
where
    R: DeviceRegistry,
    O: OwnershipReader,
    C: TimeSource,
    P: EventPublisher,
{
    fn log_complaint(
        &self,
        caller: Identity,
        device_id: DeviceId,
        complaint_type: u32,
        description: &str,
        is_in_person: bool,
        evidence_hash: Option<&str>,
    ) -> ComplaintResult<ComplaintId> {
        self.do_log(
            caller,
            device_id,
            complaint_type,
            description,
            is_in_person,
            evidence_hash,
        )
        .inspect(|complaint_id| {
            info!(
                device_id = %device_id,
                complaint_id,
                complaint_type,
                "[dl-02] Complaint logged"
            )
        })
        .inspect_err(|e| {
            debug!(device_id = %device_id, caller = %caller, error = %e, "[dl-02] Complaint rejected")
        })
    }

    fn escalate_complaint(
        &self,
        caller: Identity,
        device_id: DeviceId,
        complaint_id: ComplaintId,
    ) -> ComplaintResult<()> {
        self.do_escalate(caller, device_id, complaint_id)
            .inspect(|_| info!(device_id = %device_id, complaint_id, "[dl-02] Complaint escalated"))
            .inspect_err(|e| {
                debug!(device_id = %device_id, complaint_id, error = %e, "[dl-02] Escalation rejected")
            })
    }

    fn get_complaint(
        &self,
        device_id: &DeviceId,
        complaint_id: ComplaintId,
    ) -> ComplaintResult<Complaint> {
        self.state
            .read()
            .get(device_id, complaint_id)
            .cloned()
            .ok_or(ComplaintError::ComplaintNotFound {
                device_id: *device_id,
                complaint_id,
            })
    }

    fn complaint_count(&self, device_id: &DeviceId) -> u64 {
        self.state
            .read()
            .complaints
            .get(device_id)
            .map_or(0, |by_id| by_id.len() as u64)
    }

    fn is_escalated(
        &self,
        device_id: &DeviceId,
        complaint_id: ComplaintId,
    ) -> ComplaintResult<bool> {
        self.get_complaint(device_id, complaint_id)
            .map(|complaint| complaint.is_escalated())
    }

    fn complaints_for_device(&self, device_id: &DeviceId) -> Vec<Complaint> {
        self.state
            .read()
            .complaints
            .get(device_id)
            .map(|by_id| by_id.values().cloned().collect())
            .unwrap_or_default()
    }
}
