//! Prometheus metrics for ledger activity.
//!
//! All metrics follow the naming convention: `dl_<component>_<metric>_total`.
//! Counters are fed from the event bus by the runtime, never by the core
//! services directly.

use lazy_static::lazy_static;
use parking_lot::Mutex;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Metrics registered on [`REGISTRY`], created on first registration
    static ref GLOBAL_METRICS: Mutex<Option<Arc<LedgerMetrics>>> = Mutex::new(None);
}

/// Label value for a dispute set to resolved.
pub const RESOLUTION_RESOLVED: &str = "resolved";
/// Label value for a dispute set back to open.
pub const RESOLUTION_REOPENED: &str = "reopened";

/// Ledger counters.
#[derive(Clone)]
pub struct LedgerMetrics {
    // =========================================================================
    // OWNERSHIP LEDGER
    // =========================================================================
    pub ownership_established: IntCounter,
    pub transfers: IntCounter,
    pub disputes_opened: IntCounter,
    /// Labelled `outcome`: resolved / reopened
    pub disputes_resolved: IntCounterVec,

    // =========================================================================
    // COMPLAINT LOG
    // =========================================================================
    pub complaints_logged: IntCounter,
    pub complaints_escalated: IntCounter,

    // =========================================================================
    // EVENT BUS
    // =========================================================================
    /// Labelled `event_type`
    pub events_routed: IntCounterVec,
}

impl LedgerMetrics {
    /// Create unregistered counters.
    pub fn new() -> Result<Self, TelemetryError> {
        Ok(Self {
            ownership_established: IntCounter::new(
                "dl_ledger_ownership_established_total",
                "Initial ownership records created",
            )
            .map_err(metrics_err)?,
            transfers: IntCounter::new(
                "dl_ledger_transfers_total",
                "Ownership transfers appended to history",
            )
            .map_err(metrics_err)?,
            disputes_opened: IntCounter::new(
                "dl_ledger_disputes_opened_total",
                "Disputes filed against historical transfers",
            )
            .map_err(metrics_err)?,
            disputes_resolved: IntCounterVec::new(
                Opts::new(
                    "dl_ledger_dispute_resolutions_total",
                    "Dispute resolution flag writes",
                ),
                &["outcome"],
            )
            .map_err(metrics_err)?,
            complaints_logged: IntCounter::new(
                "dl_complaints_logged_total",
                "Complaints logged by device owners",
            )
            .map_err(metrics_err)?,
            complaints_escalated: IntCounter::new(
                "dl_complaints_escalated_total",
                "Complaints escalated by their complainant",
            )
            .map_err(metrics_err)?,
            events_routed: IntCounterVec::new(
                Opts::new("dl_eventbus_events_routed_total", "Bus events consumed by the metrics router"),
                &["event_type"],
            )
            .map_err(metrics_err)?,
        })
    }

    /// Register every counter with `registry`.
    pub fn register(&self, registry: &Registry) -> Result<(), TelemetryError> {
        let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
            Box::new(self.ownership_established.clone()),
            Box::new(self.transfers.clone()),
            Box::new(self.disputes_opened.clone()),
            Box::new(self.disputes_resolved.clone()),
            Box::new(self.complaints_logged.clone()),
            Box::new(self.complaints_escalated.clone()),
            Box::new(self.events_routed.clone()),
        ];
        for collector in collectors {
            registry.register(collector).map_err(metrics_err)?;
        }
        Ok(())
    }

    /// Count a dispute resolution write.
    pub fn record_resolution(&self, resolved: bool) {
        let outcome = if resolved {
            RESOLUTION_RESOLVED
        } else {
            RESOLUTION_REOPENED
        };
        self.disputes_resolved.with_label_values(&[outcome]).inc();
    }
}

fn metrics_err(e: prometheus::Error) -> TelemetryError {
    TelemetryError::MetricsInit(e.to_string())
}

/// Register the ledger metrics with the global registry.
///
/// Idempotent: later calls return the instance created by the first.
pub fn register_metrics() -> Result<Arc<LedgerMetrics>, TelemetryError> {
    let mut global = GLOBAL_METRICS.lock();
    if let Some(metrics) = global.as_ref() {
        return Ok(Arc::clone(metrics));
    }
    let metrics = Arc::new(LedgerMetrics::new()?);
    metrics.register(&REGISTRY)?;
    *global = Some(Arc::clone(&metrics));
    Ok(metrics)
}

/// Encode a registry in the Prometheus text exposition format.
pub fn encode_registry(registry: &Registry) -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(metrics_err)?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Encode the global registry in the Prometheus text exposition format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    encode_registry(&REGISTRY)
}
