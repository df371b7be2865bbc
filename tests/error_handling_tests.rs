//! Tests for the error taxonomy and failure behavior at the poll and
//! write boundaries

mod common;

use common::eta_mock::{value_document, MockEtaServer};
use eta_bridge::client::{EtaClient, EtaHttpClient};
use eta_bridge::services::poller::poll_sensor;
use eta_bridge::{
    EtaBridge, EtaConfig, EtaConnection, EtaError, EtaSensor, SensorConfig, StateValue, ValueKind,
    ValueResolver,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn sensor_config(uri: &str) -> SensorConfig {
    SensorConfig {
        uri: uri.to_string(),
        name: "Test Sensor".to_string(),
        unit: None,
        factor: 10.0,
        decimals: 1,
        kind: ValueKind::Numeric,
        device_class: None,
        state_class: None,
    }
}

/// Connection parameters for a port nothing listens on
fn refused_connection() -> EtaConnection {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    EtaConnection {
        host: "127.0.0.1".to_string(),
        port,
        username: None,
        password: None,
    }
}

#[tokio::test]
async fn connection_refused_is_a_tagged_connection_error() {
    let client = EtaHttpClient::new(&refused_connection()).unwrap();

    let result = client.fetch("/user/var/1").await;
    assert!(matches!(result, Err(EtaError::Connection(_))));
}

#[tokio::test]
async fn http_500_is_a_tagged_status_error() {
    let mock = MockEtaServer::start().await;
    mock.mock_get_error("/user/var/1", 500).await;

    let client = EtaHttpClient::new(&mock.connection()).unwrap();
    let result = client.fetch("/user/var/1").await;

    match result {
        Err(EtaError::HttpStatus { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected HttpStatus error, got {other:?}"),
    }
}

#[tokio::test]
async fn truncated_xml_is_a_tagged_parse_error() {
    let mock = MockEtaServer::start().await;
    let uri = "/user/var/1";
    mock.mock_value(uri, r#"<eta><value strValue="63">6"#.to_string())
        .await;

    let client = EtaHttpClient::new(&mock.connection()).unwrap();
    let resolver = ValueResolver::new(Arc::new(client));
    let result = resolver.resolve(&sensor_config(uri)).await;

    assert!(matches!(result, Err(EtaError::Parse(_))));
}

#[tokio::test]
async fn failed_fetch_keeps_the_previous_reading() {
    let mock = MockEtaServer::start().await;
    let uri = "/user/var/40/10021/0/11109/0";

    // First poll succeeds, every later one hits a server error.
    Mock::given(method("GET"))
        .and(path(uri))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(value_document(uri, "637", "63,7", "°C"), "text/xml"),
        )
        .up_to_n_times(1)
        .mount(&mock.server)
        .await;
    mock.mock_get_error(uri, 500).await;

    let client = EtaHttpClient::new(&mock.connection()).unwrap();
    let resolver = ValueResolver::new(Arc::new(client));
    let sensor = EtaSensor::new(sensor_config(uri));

    poll_sensor(&resolver, &sensor).await;
    let first = sensor.reading().await;
    assert_eq!(first.state, Some(StateValue::Number(63.7)));

    poll_sensor(&resolver, &sensor).await;
    let second = sensor.reading().await;
    assert_eq!(second.state, first.state);
    assert_eq!(second.updated_at, first.updated_at);
}

#[tokio::test]
async fn sensor_that_never_succeeded_stays_absent() {
    let client = EtaHttpClient::new(&refused_connection()).unwrap();
    let resolver = ValueResolver::new(Arc::new(client));
    let sensor = EtaSensor::new(sensor_config("/user/var/1"));

    poll_sensor(&resolver, &sensor).await;

    assert!(sensor.reading().await.is_absent());
}

#[tokio::test]
async fn write_failure_propagates_and_is_not_retried() {
    let mock = MockEtaServer::start().await;
    let uri = "/user/var/120/10101/0/0/12080";

    // The expectation is verified on drop: exactly one POST, no retries.
    Mock::given(method("POST"))
        .and(path(uri))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock.server)
        .await;

    let bridge = EtaBridge::new(EtaConfig {
        connection: mock.connection(),
        name: "Test Boiler".to_string(),
        poll_interval: std::time::Duration::from_secs(30),
        sensors: Vec::new(),
    })
    .unwrap();

    let result = bridge.set_value(uri, "90").await;
    assert!(matches!(result, Err(EtaError::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn set_value_rejects_bad_arguments_before_any_request() {
    let mock = MockEtaServer::start().await;
    let bridge = EtaBridge::new(EtaConfig {
        connection: mock.connection(),
        name: "Test Boiler".to_string(),
        poll_interval: std::time::Duration::from_secs(30),
        sensors: Vec::new(),
    })
    .unwrap();

    let result = bridge.set_value("not-a-path", "90").await;
    assert!(matches!(result, Err(EtaError::InvalidInput(_))));

    let result = bridge.set_value("/user/var/1", "").await;
    assert!(matches!(result, Err(EtaError::InvalidInput(_))));

    // Nothing reached the controller.
    assert!(mock.server.received_requests().await.unwrap().is_empty());
}
