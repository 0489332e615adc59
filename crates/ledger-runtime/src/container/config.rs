//! # Node Configuration
//!
//! Unified configuration for both components and runtime parameters.
//!
//! ## Security Requirements
//!
//! - `administrator` MUST NOT be the all-zero identity in production

use dl_01_ownership_ledger::LedgerConfig;
use dl_02_complaint_log::ComplaintLogConfig;
use ledger_telemetry::TelemetryConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use shared_types::Identity;
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `DL_ADMIN_IDENTITY` is not set.
    #[error("DL_ADMIN_IDENTITY is not set")]
    MissingAdministrator,

    /// `DL_ADMIN_IDENTITY` is not 32 bytes of hex.
    #[error("DL_ADMIN_IDENTITY is not a 64-character hex identity: {reason}")]
    InvalidAdministrator { reason: String },

    /// `DL_EVENT_BUS_CAPACITY` is not a positive integer.
    #[error("DL_EVENT_BUS_CAPACITY must be a positive integer, got {value:?}")]
    InvalidBusCapacity { value: String },

    /// Administrator is the zero identity.
    #[error(
        "SECURITY VIOLATION: ledger administrator is the zero identity. \
         Set DL_ADMIN_IDENTITY to a real identity."
    )]
    InsecureAdministrator,
}

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Ledger configuration (carries the administrator identity).
    pub ledger: LedgerConfig,
    /// Complaint Log configuration.
    pub complaints: ComplaintLogConfig,
    /// Event bus buffer per subscriber.
    pub event_bus_capacity: usize,
    /// Logging and metrics configuration.
    pub telemetry: TelemetryConfig,
}

impl NodeConfig {
    /// Defaults for everything except the administrator.
    pub fn new(administrator: Identity) -> Self {
        Self {
            ledger: LedgerConfig::new(administrator),
            complaints: ComplaintLogConfig::default(),
            event_bus_capacity: DEFAULT_CHANNEL_CAPACITY,
            telemetry: TelemetryConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `DL_ADMIN_IDENTITY` (required): 64 hex characters, optional `0x`
    /// - `DL_EVENT_BUS_CAPACITY`: default 1000
    /// - telemetry variables, see [`TelemetryConfig::from_env`]
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_admin = lookup("DL_ADMIN_IDENTITY").ok_or(ConfigError::MissingAdministrator)?;
        let administrator =
            Identity::from_hex(raw_admin.trim()).map_err(|e| ConfigError::InvalidAdministrator {
                reason: e.to_string(),
            })?;

        let event_bus_capacity = match lookup("DL_EVENT_BUS_CAPACITY") {
            None => DEFAULT_CHANNEL_CAPACITY,
            Some(value) => match value.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => capacity,
                _ => return Err(ConfigError::InvalidBusCapacity { value }),
            },
        };

        Ok(Self {
            event_bus_capacity,
            telemetry: TelemetryConfig::from_lookup(&lookup),
            ..Self::new(administrator)
        })
    }

    pub fn administrator(&self) -> Identity {
        self.ledger.administrator
    }

    /// Validate configuration for production readiness.
    ///
    /// # Returns
    ///
    /// Returns `Err` if the administrator is the zero identity.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        if self.ledger.administrator == Identity::ZERO {
            return Err(ConfigError::InsecureAdministrator);
        }
        Ok(())
    }
}
