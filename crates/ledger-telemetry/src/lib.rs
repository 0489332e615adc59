//! # Ledger Telemetry
//!
//! Structured logging and Prometheus metrics for the device ledger.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ledger_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let guard = init_telemetry(TelemetryConfig::from_env())?;
//! let metrics = guard.metrics();
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DL_SERVICE_NAME` | `device-ledger` | Service name in log records |
//! | `DL_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter directive |
//! | `DL_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `DL_JSON_LOGS` | `false` (`true` in containers) | JSON log records |
//! | `DL_NETWORK` | `devnet` | Deployment label |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};
pub use metrics::{
    encode_registry, gather_metrics, register_metrics, LedgerMetrics, REGISTRY,
    RESOLUTION_REOPENED, RESOLUTION_RESOLVED,
};

use std::sync::Arc;
use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics.
///
/// Metrics are registered first so a failing subscriber install (for example
/// a second call in the same process) still leaves metrics usable through
/// [`register_metrics`].
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    if config.service_name.trim().is_empty() {
        return Err(TelemetryError::Config("service name is empty".to_string()));
    }
    let metrics = register_metrics()?;
    init_logging(&config)?;

    Ok(TelemetryGuard { config, metrics })
}

/// Keeps telemetry handles alive for the lifetime of the application.
pub struct TelemetryGuard {
    config: TelemetryConfig,
    metrics: Arc<LedgerMetrics>,
}

impl TelemetryGuard {
    pub fn metrics(&self) -> Arc<LedgerMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.config.service_name, "Shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
