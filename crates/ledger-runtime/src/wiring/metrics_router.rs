//! # Metrics Router
//!
//! Consumes bus events and updates Prometheus counters. The core services
//! never touch metrics directly.
//!
//! ```text
//! Ownership Ledger ──┐
//!                    ├──→ Event Bus ──→ metrics router ──→ LedgerMetrics
//! Complaint Log ─────┘
//! ```

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use ledger_telemetry::{metric_inc, LedgerMetrics};
use shared_bus::{LedgerEvent, Subscription};

/// Update counters for one event.
pub fn record_event(metrics: &LedgerMetrics, event: &LedgerEvent) {
    match event {
        LedgerEvent::OwnershipEstablished { .. } => metric_inc!(metrics.ownership_established),
        LedgerEvent::OwnershipTransferred { .. } => metric_inc!(metrics.transfers),
        LedgerEvent::TransferDisputed { .. } => metric_inc!(metrics.disputes_opened),
        LedgerEvent::DisputeResolved { resolved, .. } => metrics.record_resolution(*resolved),
        LedgerEvent::ComplaintLogged { .. } => metric_inc!(metrics.complaints_logged),
        LedgerEvent::ComplaintEscalated { .. } => metric_inc!(metrics.complaints_escalated),
    }
    metric_inc!(metrics.events_routed, &[event.kind()]);
}

/// Spawn the router task.
///
/// Returns the number of events routed once the bus closes.
pub fn spawn_metrics_router(
    mut subscription: Subscription,
    metrics: Arc<LedgerMetrics>,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        info!("[runtime] Metrics router started");
        let mut routed = 0u64;
        while let Some(event) = subscription.recv().await {
            debug!(event = event.kind(), device_id = %event.device_id(), "[runtime] Routing event");
            record_event(&metrics, &event);
            routed += 1;
        }
        info!(routed, "[runtime] Event bus closed, metrics router stopped");
        routed
    })
}
