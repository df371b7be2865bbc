//! Sensor entities and the host-platform capability surface
//!
//! The host platform only needs a narrow capability set per sensor, so
//! that surface is a trait rather than a base type. [`EtaSensor`] is the
//! plain data holder behind it: an immutable descriptor plus the current
//! reading, which only the poller replaces.

use crate::config::{DeviceClass, SensorConfig, StateClass};
use crate::services::value_resolution::{Reading, StateValue};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Capability set the host platform consumes for each sensor
#[async_trait]
pub trait Entity: Send + Sync {
    /// Stable identifier
    fn unique_id(&self) -> String;

    /// Display name
    fn name(&self) -> &str;

    /// Unit of measurement, display only
    fn unit(&self) -> Option<&str>;

    /// Device class hint
    fn device_class(&self) -> Option<DeviceClass>;

    /// State class hint
    fn state_class(&self) -> Option<StateClass>;

    /// Current state, absent until the first successful poll
    async fn state(&self) -> Option<StateValue>;

    /// Extra attributes of the current reading
    async fn extra_attributes(&self) -> HashMap<String, String>;
}

/// One polled data point of the controller
pub struct EtaSensor {
    descriptor: SensorConfig,
    reading: RwLock<Reading>,
}

impl EtaSensor {
    /// Create a sensor with an absent reading
    pub fn new(descriptor: SensorConfig) -> Self {
        Self {
            descriptor,
            reading: RwLock::new(Reading::absent()),
        }
    }

    /// The immutable descriptor
    pub fn descriptor(&self) -> &SensorConfig {
        &self.descriptor
    }

    /// Snapshot of the current reading
    pub async fn reading(&self) -> Reading {
        self.reading.read().await.clone()
    }

    /// Replace the reading wholesale. Only called from the poll path on
    /// success; failures never reach this.
    pub(crate) async fn store(&self, reading: Reading) {
        *self.reading.write().await = reading;
    }
}

#[async_trait]
impl Entity for EtaSensor {
    fn unique_id(&self) -> String {
        self.descriptor.unique_id()
    }

    fn name(&self) -> &str {
        &self.descriptor.name
    }

    fn unit(&self) -> Option<&str> {
        self.descriptor.unit.as_deref()
    }

    fn device_class(&self) -> Option<DeviceClass> {
        self.descriptor.device_class
    }

    fn state_class(&self) -> Option<StateClass> {
        self.descriptor.state_class
    }

    async fn state(&self) -> Option<StateValue> {
        self.reading.read().await.state.clone()
    }

    async fn extra_attributes(&self) -> HashMap<String, String> {
        self.reading.read().await.attributes.clone()
    }
}
