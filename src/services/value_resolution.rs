//! Value resolution pipeline
//!
//! Single source of truth for sensor readings: fetch the raw XML behind
//! a descriptor, extract the value node, apply the conversion policy and
//! stamp the result. Every failure on this path is a tagged error the
//! poll boundary can absorb.

use crate::client::EtaClient;
use crate::config::{SensorConfig, ValueKind};
use crate::error::{EtaError, Result};
use crate::services::convert;
use crate::services::xml::{self, RawValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Resolved sensor state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    /// Truncated integer reading (`decimals == 0`)
    Integer(i64),
    /// Rounded numeric reading (`decimals > 0`)
    Number(f64),
    /// Textual status, or the fallback for unparseable numeric payloads
    Text(String),
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Integer(value) => write!(f, "{value}"),
            StateValue::Number(value) => write!(f, "{value}"),
            StateValue::Text(value) => write!(f, "{value}"),
        }
    }
}

/// Transient per-sensor reading, replaced wholesale on each poll tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Reading {
    /// Resolved state; `None` means no poll has ever succeeded
    pub state: Option<StateValue>,

    /// Attributes of the value node, minus internal keys
    pub attributes: HashMap<String, String>,

    /// Timestamp of the last successful fetch
    pub updated_at: Option<DateTime<Utc>>,
}

impl Reading {
    /// Reading of a sensor that has never been fetched
    pub fn absent() -> Self {
        Self::default()
    }

    /// Whether any poll has produced a state yet
    pub fn is_absent(&self) -> bool {
        self.state.is_none()
    }
}

/// Resolves descriptors into readings through a shared client
#[derive(Clone)]
pub struct ValueResolver {
    client: Arc<dyn EtaClient>,
}

impl ValueResolver {
    /// Create a new resolver
    pub fn new(client: Arc<dyn EtaClient>) -> Self {
        Self { client }
    }

    /// Run the full pipeline for one descriptor
    pub async fn resolve(&self, sensor: &SensorConfig) -> Result<Reading> {
        let body = self.client.fetch(&sensor.uri).await?;
        let doc = xml::parse_document(&body)?;

        let raw = xml::extract(&doc, sensor.kind).ok_or_else(|| {
            EtaError::extraction(format!("no value element in response for {}", sensor.uri))
        })?;

        let state = match raw.value {
            RawValue::Number(number) => convert::convert(number, sensor)?,
            RawValue::Text(text) => StateValue::Text(text),
        };

        Ok(Reading {
            state: Some(state),
            attributes: raw.attributes,
            updated_at: Some(Utc::now()),
        })
    }
}
