//! # Ledger Node
//!
//! ## Thread Safety
//!
//! - Components are wrapped in `Arc` for shared ownership
//! - Each component guards its own state with a `RwLock`
//! - The Complaint Log reads the ledger; nothing reads the Complaint Log

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;

use dl_01_ownership_ledger::OwnershipLedgerService;
use dl_02_complaint_log::ComplaintLogService;
use ledger_telemetry::{init_telemetry, log_event, LedgerMetrics, TelemetryGuard};
use shared_bus::{EventFilter, InMemoryEventBus};
use shared_types::{InMemoryDeviceRegistry, MonotonicClock};

use crate::container::config::NodeConfig;
use crate::wiring::metrics_router;

/// Concrete Ownership Ledger wired by the node.
pub type NodeLedger = OwnershipLedgerService<InMemoryDeviceRegistry, MonotonicClock, InMemoryEventBus>;

/// Concrete Complaint Log wired by the node.
pub type NodeComplaintLog =
    ComplaintLogService<InMemoryDeviceRegistry, NodeLedger, MonotonicClock, InMemoryEventBus>;

/// Handles returned by [`LedgerNode::start`].
///
/// The metrics router finishes once the node, and with it the bus, is dropped.
pub struct RunningNode {
    pub telemetry: TelemetryGuard,
    pub metrics_router: JoinHandle<u64>,
}

/// Central container holding both components.
pub struct LedgerNode {
    config: NodeConfig,
    registry: Arc<InMemoryDeviceRegistry>,
    clock: Arc<MonotonicClock>,
    bus: Arc<InMemoryEventBus>,
    ledger: Arc<NodeLedger>,
    complaints: Arc<NodeComplaintLog>,
}

impl LedgerNode {
    /// Build a node with an empty device registry.
    pub fn new(config: NodeConfig) -> Self {
        Self::with_registry(config, Arc::new(InMemoryDeviceRegistry::new()))
    }

    /// Build a node around an existing device registry.
    pub fn with_registry(config: NodeConfig, registry: Arc<InMemoryDeviceRegistry>) -> Self {
        let clock = Arc::new(MonotonicClock::new());
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.event_bus_capacity));

        let ledger = Arc::new(OwnershipLedgerService::new(
            config.ledger.clone(),
            Arc::clone(&registry),
            Arc::clone(&clock),
            Arc::clone(&bus),
        ));
        let complaints = Arc::new(ComplaintLogService::new(
            config.complaints.clone(),
            Arc::clone(&registry),
            Arc::clone(&ledger),
            Arc::clone(&clock),
            Arc::clone(&bus),
        ));

        log_event!(
            info,
            "runtime",
            "Ledger node assembled",
            administrator = %config.administrator(),
            event_bus_capacity = config.event_bus_capacity,
            history_capacity = config.ledger.history_capacity
        );

        Self {
            config,
            registry,
            clock,
            bus,
            ledger,
            complaints,
        }
    }

    /// Load configuration from the environment, reject insecure settings
    /// and build the node.
    pub fn from_env() -> Result<Self> {
        let config = NodeConfig::from_env().context("Failed to load node configuration")?;
        config
            .validate_for_production()
            .context("Node configuration rejected")?;
        Ok(Self::new(config))
    }

    /// Start a task that turns every bus event into counter updates.
    ///
    /// The task ends when the bus is dropped and returns the number of
    /// events it routed. Must be called inside a tokio runtime.
    pub fn spawn_metrics_router(&self, metrics: Arc<LedgerMetrics>) -> JoinHandle<u64> {
        metrics_router::spawn_metrics_router(self.bus.subscribe(EventFilter::all()), metrics)
    }

    /// Initialize telemetry from `config.telemetry` and attach the metrics
    /// router to the bus. Must be called inside a tokio runtime, at most once
    /// per process.
    pub fn start(&self) -> Result<RunningNode> {
        let telemetry = init_telemetry(self.config.telemetry.clone())
            .context("Failed to initialize telemetry")?;
        let metrics_router = self.spawn_metrics_router(telemetry.metrics());
        log_event!(
            info,
            "runtime",
            "Ledger node started",
            service = %telemetry.config().service_name
        );
        Ok(RunningNode {
            telemetry,
            metrics_router,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn registry(&self) -> Arc<InMemoryDeviceRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn clock(&self) -> Arc<MonotonicClock> {
        Arc::clone(&self.clock)
    }

    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    pub fn ledger(&self) -> Arc<NodeLedger> {
        Arc::clone(&self.ledger)
    }

    pub fn complaints(&self) -> Arc<NodeComplaintLog> {
        Arc::clone(&self.complaints)
    }
}
