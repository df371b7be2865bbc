//! ETA heating controller bridge
//!
//! This crate polls the REST/XML API of an ETA heating controller and
//! exposes the configured data points as typed, unit-aware sensor
//! readings, plus a single write command to push a value back to the
//! controller.
//!
//! # Example
//!
//! ```rust,no_run
//! use eta_bridge::{EtaBridge, EtaConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EtaConfig::from_env()?;
//!     let mut bridge = EtaBridge::new(config)?;
//!     bridge.connect().await?;
//!     bridge.start();
//!     tokio::signal::ctrl_c().await?;
//!     bridge.shutdown();
//!     Ok(())
//! }
//! ```

pub mod bridge;
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod services;

// Re-export main types
pub use crate::{
    bridge::EtaBridge,
    config::{EtaConfig, EtaConnection, SensorConfig, ValueKind},
    entity::{Entity, EtaSensor},
    error::{EtaError, Result},
    services::{Reading, StateValue, ValueResolver},
};
