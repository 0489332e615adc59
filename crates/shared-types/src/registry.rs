//! # Device Registry Port
//!
//! The Device Registry is an external leaf dependency: the authoritative
//! existence and activity oracle for a device identifier. The ledger core only
//! reads it.

use crate::entities::DeviceId;
use crate::errors::RegistryError;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Registry answer for a known device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Whether the device is currently operable.
    pub active: bool,
}

/// Read-only interface to the Device Registry.
pub trait DeviceRegistry: Send + Sync {
    /// Registry record for `device_id`.
    ///
    /// Fails with [`RegistryError::UnknownDevice`] when the device is unknown.
    fn device_info(&self, device_id: &DeviceId) -> Result<DeviceInfo, RegistryError>;

    /// Whether the registry knows `device_id`, regardless of activity.
    fn is_registered(&self, device_id: &DeviceId) -> bool;
}

/// In-memory registry used by the runtime container and by tests.
#[derive(Default)]
pub struct InMemoryDeviceRegistry {
    devices: RwLock<HashMap<DeviceId, DeviceInfo>>,
}

impl InMemoryDeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an active device. Re-registering reactivates it.
    pub fn register(&self, device_id: DeviceId) {
        self.devices
            .write()
            .insert(device_id, DeviceInfo { active: true });
        debug!(device_id = %device_id, "Device registered");
    }

    /// Flip activity for a known device. Returns `false` if the device is unknown.
    pub fn set_active(&self, device_id: &DeviceId, active: bool) -> bool {
        match self.devices.write().get_mut(device_id) {
            Some(info) => {
                info.active = active;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }
}

impl DeviceRegistry for InMemoryDeviceRegistry {
    fn device_info(&self, device_id: &DeviceId) -> Result<DeviceInfo, RegistryError> {
        self.devices
            .read()
            .get(device_id)
            .copied()
            .ok_or(RegistryError::UnknownDevice {
                device_id: *device_id,
            })
    }

    fn is_registered(&self, device_id: &DeviceId) -> bool {
        self.devices.read().contains_key(device_id)
    }
}
