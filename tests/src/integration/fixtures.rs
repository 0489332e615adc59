//! Shared harness for integration flows.

use std::sync::Arc;

use dl_01_ownership_ledger::{LedgerConfig, OwnershipLedgerApi, OwnershipLedgerService};
use dl_02_complaint_log::{ComplaintLogConfig, ComplaintLogService};
use rand::Rng;
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};
use shared_types::{DeviceId, Identity, InMemoryDeviceRegistry, ManualClock};

pub type Ledger = OwnershipLedgerService<InMemoryDeviceRegistry, ManualClock, InMemoryEventBus>;
pub type Complaints =
    ComplaintLogService<InMemoryDeviceRegistry, Ledger, ManualClock, InMemoryEventBus>;

pub const ADMIN: Identity = Identity::new([0xAD; 32]);
pub const ALICE: Identity = Identity::new([0xA1; 32]);
pub const BOB: Identity = Identity::new([0xB0; 32]);
pub const CAROL: Identity = Identity::new([0xC0; 32]);
pub const DEVICE: DeviceId = DeviceId::new([0xD0; 32]);

/// Evidence hash of exactly `len` units with the required prefix.
pub fn evidence(len: usize) -> String {
    format!("Qm{}", "z".repeat(len.saturating_sub(2)))
}

pub fn random_identity<R: Rng>(rng: &mut R) -> Identity {
    Identity::new(rng.gen())
}

pub struct Harness {
    pub registry: Arc<InMemoryDeviceRegistry>,
    pub clock: Arc<ManualClock>,
    pub bus: Arc<InMemoryEventBus>,
    pub ledger: Arc<Ledger>,
    pub complaints: Arc<Complaints>,
}

impl Harness {
    /// Empty ledger with `DEVICE` registered and active.
    pub fn new() -> Self {
        let registry = Arc::new(InMemoryDeviceRegistry::new());
        registry.register(DEVICE);
        let clock = Arc::new(ManualClock::new(1));
        let bus = Arc::new(InMemoryEventBus::new());
        let ledger = Arc::new(OwnershipLedgerService::new(
            LedgerConfig::new(ADMIN),
            Arc::clone(&registry),
            Arc::clone(&clock),
            Arc::clone(&bus),
        ));
        let complaints = Arc::new(ComplaintLogService::new(
            ComplaintLogConfig::default(),
            Arc::clone(&registry),
            Arc::clone(&ledger),
            Arc::clone(&clock),
            Arc::clone(&bus),
        ));
        Self {
            registry,
            clock,
            bus,
            ledger,
            complaints,
        }
    }

    /// Register `device` and establish `owner` as its first owner.
    pub fn owned(&self, device: DeviceId, owner: Identity) {
        self.registry.register(device);
        self.ledger
            .establish_ownership(ADMIN, device, owner)
            .expect("establish ownership");
    }

    pub fn subscribe_all(&self) -> Subscription {
        self.bus.subscribe(EventFilter::all())
    }
}
