//! Bridge lifecycle
//!
//! Composition root: validates configuration, builds the client and the
//! sensor set, runs the poll scheduler and exposes the single write
//! command. Setup failures propagate; a single invalid sensor descriptor
//! is skipped so the rest of the platform still comes up.

use crate::client::{EtaClient, EtaHttpClient};
use crate::config::{registry, EtaConfig};
use crate::entity::EtaSensor;
use crate::error::{EtaError, Result};
use crate::services::{PollScheduler, ValueResolver};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Bridge between one ETA controller and the host platform
pub struct EtaBridge {
    config: EtaConfig,
    client: Arc<EtaHttpClient>,
    sensors: Vec<Arc<EtaSensor>>,
    scheduler: PollScheduler,
}

impl EtaBridge {
    /// Build the bridge from validated configuration. Invalid connection
    /// parameters are fatal; invalid sensor descriptors are skipped with
    /// a warning.
    pub fn new(config: EtaConfig) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(EtaHttpClient::new(&config.connection)?);
        let resolver = Arc::new(ValueResolver::new(
            Arc::clone(&client) as Arc<dyn EtaClient>
        ));

        let descriptors = if config.sensors.is_empty() {
            debug!("no sensors configured, using the built-in registry");
            registry::DEFAULT_SENSORS.clone()
        } else {
            config.sensors.clone()
        };

        let mut sensors = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if let Err(e) = descriptor.validate() {
                warn!("skipping sensor: {e}");
                continue;
            }
            sensors.push(Arc::new(EtaSensor::new(descriptor)));
        }
        if sensors.is_empty() {
            return Err(EtaError::config("no valid sensors configured"));
        }

        let scheduler = PollScheduler::new(resolver, config.poll_interval);

        Ok(Self {
            config,
            client,
            sensors,
            scheduler,
        })
    }

    /// Probe the controller. Called once at startup; failure aborts
    /// platform initialization.
    pub async fn connect(&self) -> Result<()> {
        let version = self.client.api_version().await?;
        info!(
            "connected to {} at {}:{}, REST API v{}",
            self.config.name, self.config.connection.host, self.config.connection.port, version
        );
        Ok(())
    }

    /// Start polling all sensors
    pub fn start(&mut self) {
        for sensor in &self.sensors {
            self.scheduler.spawn(Arc::clone(sensor));
        }
        info!(
            "polling {} sensors every {:?}",
            self.sensors.len(),
            self.config.poll_interval
        );
    }

    /// Push a value to the controller. This is the registered write
    /// command: failures are returned to the invoker and never retried.
    pub async fn set_value(&self, uri: &str, value: &str) -> Result<()> {
        if uri.is_empty() || !uri.starts_with('/') {
            return Err(EtaError::invalid_input(format!(
                "uri must be an absolute path, got {uri:?}"
            )));
        }
        if value.is_empty() {
            return Err(EtaError::invalid_input("value must not be empty"));
        }

        self.client.write(uri, value).await?;
        info!("set {uri} to {value}");
        Ok(())
    }

    /// The sensor entities owned by this bridge
    pub fn sensors(&self) -> &[Arc<EtaSensor>] {
        &self.sensors
    }

    /// Display name of the bridged controller
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Stop all polling tasks
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
        info!("bridge for {} shut down", self.config.name);
    }
}
