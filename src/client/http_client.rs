//! HTTP client implementation for ETA controller communication
//!
//! Speaks the controller's REST/XML API using basic authentication and a
//! bounded request timeout. Transport failures, non-2xx responses and
//! unreadable bodies all surface as tagged [`EtaError`] variants; nothing
//! here panics or retries.

use crate::client::EtaClient;
use crate::config::EtaConnection;
use crate::error::{EtaError, Result};
use crate::services::xml;
use async_trait::async_trait;
use base64::Engine;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request timeout for all controller calls
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the API version probe
const API_VERSION_PATH: &str = "/user/api";

/// HTTP client for one ETA controller
pub struct EtaHttpClient {
    /// HTTP client instance
    client: Client,

    /// Base URL derived from the connection parameters
    base_url: Url,
}

impl EtaHttpClient {
    /// Create a new HTTP client
    pub fn new(connection: &EtaConnection) -> Result<Self> {
        let base_url = connection.base_url()?;

        let mut client_builder = ClientBuilder::new()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(format!("eta-bridge/{}", env!("CARGO_PKG_VERSION")));

        if let Some((username, password)) = connection.credentials() {
            let auth_header = format!(
                "Basic {}",
                base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"))
            );
            let mut header_value = reqwest::header::HeaderValue::from_str(&auth_header)
                .map_err(|e| EtaError::config(format!("invalid credentials: {e}")))?;
            header_value.set_sensitive(true);
            let mut default_headers = reqwest::header::HeaderMap::new();
            default_headers.insert(reqwest::header::AUTHORIZATION, header_value);
            client_builder = client_builder.default_headers(default_headers);
        }

        let client = client_builder
            .build()
            .map_err(|e| EtaError::connection(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Build the full URL for an API path
    fn build_url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| EtaError::invalid_input(format!("invalid URL path {path:?}: {e}")))
    }

    /// Map a reqwest transport error onto the error taxonomy
    fn map_send_error(e: reqwest::Error) -> EtaError {
        if e.is_timeout() {
            EtaError::timeout(format!("request timed out: {e}"))
        } else if e.is_connect() {
            EtaError::connection(format!("connection failed: {e}"))
        } else {
            EtaError::Http(e)
        }
    }

    /// Reject non-2xx responses with a tagged status error
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(EtaError::http_status(status.as_u16(), body))
    }
}

#[async_trait]
impl EtaClient for EtaHttpClient {
    async fn fetch(&self, path: &str) -> Result<String> {
        let url = self.build_url(path)?;
        debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(Self::map_send_error)?;
        let response = Self::check_status(response).await?;

        response
            .text()
            .await
            .map_err(|e| EtaError::connection(format!("failed to read response body: {e}")))
    }

    async fn write(&self, path: &str, value: &str) -> Result<()> {
        let url = self.build_url(path)?;
        debug!("POST {url} value={value}");

        let response = self
            .client
            .post(url)
            .form(&[("value", value)])
            .send()
            .await
            .map_err(Self::map_send_error)?;
        Self::check_status(response).await?;

        debug!("set {path} to {value}");
        Ok(())
    }

    async fn api_version(&self) -> Result<String> {
        let body = self.fetch(API_VERSION_PATH).await?;
        let doc = xml::parse_document(&body)?;

        doc.descendants()
            .find(|n| n.is_element() && n.tag_name().name() == "api")
            .and_then(|n| n.attribute("version"))
            .map(str::to_string)
            .ok_or_else(|| EtaError::extraction("no api element in version response"))
    }
}
