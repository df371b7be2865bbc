//! Client implementations for ETA controller communication

pub mod http_client;

pub use http_client::EtaHttpClient;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for ETA controller client implementations
#[async_trait]
pub trait EtaClient: Send + Sync {
    /// Fetch the raw XML body behind an API path
    async fn fetch(&self, path: &str) -> Result<String>;

    /// Push a value to an API path. Unlike the read path, failures here
    /// propagate to the caller.
    async fn write(&self, path: &str, value: &str) -> Result<()>;

    /// Query the REST API version advertised by the controller
    async fn api_version(&self) -> Result<String>;
}
