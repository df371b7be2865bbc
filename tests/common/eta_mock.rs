//! WireMock-based ETA API mocking infrastructure
//!
//! Mock HTTP servers that simulate ETA controller REST/XML responses for
//! testing without requiring actual hardware.

use eta_bridge::EtaConnection;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mock ETA controller for testing
pub struct MockEtaServer {
    pub server: MockServer,
}

#[allow(dead_code)]
impl MockEtaServer {
    /// Start a mock controller with the API version probe mounted
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/user/api"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(
                    r#"<?xml version="1.0" encoding="utf-8"?>
<eta xmlns="http://www.eta.co.at/rest/v1" version="1.0">
  <api version="1.2" uri="/user/api"/>
</eta>"#,
                    "text/xml",
                ),
            )
            .mount(&server)
            .await;

        Self { server }
    }

    /// Connection parameters pointing at this mock
    pub fn connection(&self) -> EtaConnection {
        let uri = url::Url::parse(&self.server.uri()).expect("mock server URI");
        EtaConnection {
            host: uri.host_str().expect("mock server host").to_string(),
            port: uri.port().expect("mock server port"),
            username: None,
            password: None,
        }
    }

    /// Serve an XML document for a GET on `uri`
    pub async fn mock_value(&self, uri: &str, body: String) {
        Mock::given(method("GET"))
            .and(path(uri))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/xml"))
            .mount(&self.server)
            .await;
    }

    /// Serve an HTTP error status for a GET on `uri`
    pub async fn mock_get_error(&self, uri: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(uri))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }
}

/// Well-formed controller response carrying one value element with the
/// attribute set real firmware sends
#[allow(dead_code)]
pub fn value_document(uri: &str, text: &str, str_value: &str, unit: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<eta xmlns="http://www.eta.co.at/rest/v1" version="1.0">
  <value advTextOffset="0" unit="{unit}" uri="{uri}" strValue="{str_value}" decPlaces="0" scaleFactor="10">{text}</value>
</eta>"#
    )
}
