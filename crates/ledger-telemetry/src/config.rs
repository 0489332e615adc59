//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log records
    pub service_name: String,

    /// Log level filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` directive such as `dl_01_ownership_ledger=debug`)
    pub log_level: String,

    /// Whether to write log records to stdout
    pub console_output: bool,

    /// Whether to emit JSON log records instead of pretty text
    pub json_logs: bool,

    /// Deployment label (devnet, testnet, mainnet)
    pub network: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "device-ledger".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            network: "devnet".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DL_SERVICE_NAME`: Service name (default: device-ledger)
    /// - `DL_LOG_LEVEL` or `RUST_LOG`: Log filter (default: info)
    /// - `DL_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `DL_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `DL_NETWORK`: Network name (default: devnet)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("DL_SERVICE_NAME").unwrap_or(defaults.service_name),

            log_level: lookup("DL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("DL_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("DL_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container),

            network: lookup("DL_NETWORK").unwrap_or(defaults.network),
        }
    }
}
