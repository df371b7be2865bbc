//! Configuration for the ETA bridge
//!
//! Connection parameters and sensor descriptors are loaded from a TOML
//! file or from `ETA_*` environment variables. Everything here is
//! validated once at startup and never mutated afterwards.

pub mod registry;

use crate::error::{EtaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use std::{env, fs};
use url::Url;

/// Default polling interval between fetches of the same sensor
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);

fn default_port() -> u16 {
    8080
}

fn default_factor() -> f64 {
    1.0
}

fn default_poll_interval() -> Duration {
    DEFAULT_POLL_INTERVAL
}

/// Extraction strategy for a sensor value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Numeric reading; the element text is parsed and scaled
    #[default]
    Numeric,
    /// Textual status; the `strValue` attribute is taken verbatim
    Status,
}

/// Device class hint passed through to the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    Temperature,
    Power,
    Energy,
    Weight,
    Battery,
}

/// State class hint passed through to the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    Measurement,
    TotalIncreasing,
}

/// Descriptor for one controller data point of interest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// API-relative URI of the value to read, e.g. `/user/var/40/10021/0/11109/0`
    pub uri: String,

    /// Display name
    pub name: String,

    /// Unit of measurement, display only
    #[serde(default)]
    pub unit: Option<String>,

    /// Scale factor applied to the raw reading. `scale` is the legacy
    /// field name and is accepted as an alias.
    #[serde(default = "default_factor", alias = "scale")]
    pub factor: f64,

    /// Number of decimal places. Zero means the value is truncated to an
    /// integer instead of rounded.
    #[serde(default)]
    pub decimals: u32,

    /// Extraction strategy
    #[serde(default)]
    pub kind: ValueKind,

    /// Device class hint
    #[serde(default)]
    pub device_class: Option<DeviceClass>,

    /// State class hint
    #[serde(default)]
    pub state_class: Option<StateClass>,
}

impl SensorConfig {
    /// Validate the descriptor. Called once at setup; an invalid sensor
    /// is skipped there so a bad entry never reaches the read path.
    pub fn validate(&self) -> Result<()> {
        if self.uri.is_empty() || !self.uri.starts_with('/') {
            return Err(EtaError::config(format!(
                "sensor '{}': uri must be an absolute path, got {:?}",
                self.name, self.uri
            )));
        }
        if self.name.is_empty() {
            return Err(EtaError::config(format!(
                "sensor {}: name must not be empty",
                self.uri
            )));
        }
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(EtaError::config(format!(
                "sensor '{}': scale factor must be a positive number, got {}",
                self.name, self.factor
            )));
        }
        Ok(())
    }

    /// Stable entity identifier derived from the URI
    pub fn unique_id(&self) -> String {
        format!("eta{}", self.uri.replace('/', "_"))
    }
}

/// Connection parameters for one controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaConnection {
    /// Controller hostname or IP address
    pub host: String,

    /// Controller port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Username for HTTP basic auth
    #[serde(default)]
    pub username: Option<String>,

    /// Password for HTTP basic auth
    #[serde(default)]
    pub password: Option<String>,
}

impl EtaConnection {
    /// Base URL derived from host and port
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&format!("http://{}:{}", self.host, self.port))
            .map_err(|e| EtaError::config(format!("invalid host {:?}: {e}", self.host)))
    }

    /// Basic-auth credentials, present only when both parts are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Some((user, pass)),
            _ => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(EtaError::config("host must not be empty"));
        }
        self.base_url().map(|_| ())
    }
}

/// Top-level bridge configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtaConfig {
    /// Controller connection parameters
    pub connection: EtaConnection,

    /// Display name of this controller
    pub name: String,

    /// Polling interval, e.g. `"30s"` in TOML
    #[serde(with = "humantime_serde", default = "default_poll_interval")]
    pub poll_interval: Duration,

    /// Sensor descriptors. An empty list falls back to the built-in
    /// registry.
    #[serde(default)]
    pub sensors: Vec<SensorConfig>,
}

impl EtaConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EtaConfig = toml::from_str(&content)
            .map_err(|e| EtaError::config(format!("failed to parse config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from `ETA_*` environment variables. Carries
    /// connection parameters only; a sensor list needs the config file.
    pub fn from_env() -> Result<Self> {
        let host = env::var("ETA_HOST")
            .map_err(|_| EtaError::config("ETA_HOST environment variable is required"))?;
        let port = match env::var("ETA_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| EtaError::config(format!("ETA_PORT is not a valid port: {raw:?}")))?,
            Err(_) => default_port(),
        };
        let poll_interval = match env::var("ETA_POLL_INTERVAL") {
            Ok(raw) => Duration::from_secs(raw.parse::<u64>().map_err(|_| {
                EtaError::config(format!("ETA_POLL_INTERVAL is not a number of seconds: {raw:?}"))
            })?),
            Err(_) => DEFAULT_POLL_INTERVAL,
        };

        let config = EtaConfig {
            connection: EtaConnection {
                host,
                port,
                username: env::var("ETA_USERNAME").ok(),
                password: env::var("ETA_PASSWORD").ok(),
            },
            name: env::var("ETA_NAME").unwrap_or_else(|_| "ETA".to_string()),
            poll_interval,
            sensors: Vec::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate connection-level parameters. Sensor descriptors are
    /// validated individually at setup so one bad entry does not take
    /// the whole platform down.
    pub fn validate(&self) -> Result<()> {
        self.connection.validate()?;
        if self.name.is_empty() {
            return Err(EtaError::config("name must not be empty"));
        }
        if self.poll_interval.is_zero() {
            return Err(EtaError::config("poll_interval must be at least one second"));
        }
        Ok(())
    }
}
