//! Integration tests for error classification over real HTTP responses.

mod common;

use std::net::TcpListener;
use std::time::Duration;

use common::{client_for, error_body};
use easypost::rest::resources::{Address, CarrierAccount, Parcel, Shipment};
use easypost::rest::{Params, Resource, ResourceError};
use easypost::clients::rest::Query;
use easypost::{ApiKey, BaseUrl, EasyPostConfig, HttpError, RestClient, RestError};
use serde_json::json;
use wiremock::matchers::{header_exists, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_unauthorized_is_authentication_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/carrier_accounts/ca_1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(
            "APIKEY.INACTIVE",
            "This api key is no longer active.",
            json!([]),
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = CarrierAccount::retrieve(&client, "ca_1").await.unwrap_err();

    assert!(matches!(error, ResourceError::Authentication { .. }));
    assert_eq!(error.error_code(), Some("APIKEY.INACTIVE"));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_rate_limited_carries_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/parcels"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "2")
                .set_body_json(error_body("RATE_LIMITED", "Too many requests.", json!([]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Parcel::create(&client, Params::new().with("weight", 10))
        .await
        .unwrap_err();

    match &error {
        ResourceError::RateLimited { retry_after, .. } => {
            assert_eq!(*retry_after, Some(Duration::from_secs(2)));
        }
        other => panic!("expected RateLimited, got {other:?}"),
    }
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_server_error_with_non_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Address::retrieve(&client, "adr_1").await.unwrap_err();

    assert!(matches!(error, ResourceError::Server { .. }));
    assert_eq!(error.status(), Some(502));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_conflict_is_invalid_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/addresses"))
        .respond_with(ResponseTemplate::new(409).set_body_json(error_body(
            "CONFLICT",
            "Resource was modified concurrently.",
            json!([]),
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Address::create(&client, Params::new()).await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::InvalidState {
            resource: "Address",
            operation: "create",
            response: Some(_),
            ..
        }
    ));
}

#[tokio::test]
async fn test_success_with_wrong_shape_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Address::retrieve(&client, "adr_1").await.unwrap_err();

    assert!(matches!(
        error,
        ResourceError::Decode {
            resource: "Address",
            ..
        }
    ));
}

#[tokio::test]
async fn test_success_with_html_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/shipments"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html>proxy page</html>", "text/html"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Shipment::create(&client, Params::new().with("reference", "html"))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ResourceError::Decode {
            resource: "Shipment",
            ..
        }
    ));
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_success_without_id_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let error = Address::retrieve(&client, "adr_1").await.unwrap_err();

    match error {
        ResourceError::Decode { resource, message } => {
            assert_eq!(resource, "Address");
            assert!(message.contains("no id"));
        }
        other => panic!("expected Decode, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    // Reserve a free port, then release it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}");

    let config = EasyPostConfig::builder()
        .api_key(ApiKey::new("EZTK_test").unwrap())
        .base_url(BaseUrl::new(uri).unwrap())
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let client = RestClient::new(&config).unwrap();

    let error = Address::retrieve(&client, "adr_1").await.unwrap_err();

    match &error {
        ResourceError::Transport(RestError::Http(http @ HttpError::Network(_))) => {
            assert!(http.is_connect());
        }
        other => panic!("expected a network failure, got {other:?}"),
    }
    assert!(error.is_retryable());
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_requests_carry_client_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_to"))
        .and(header_regex("user-agent", "^EasyPost Rust Client v"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::to_address()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let address = Address::retrieve(&client, "adr_to").await.unwrap();
    assert_eq!(address.id(), Some("adr_to"));
}

#[tokio::test]
async fn test_opt_in_retries_recover_from_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_to"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("Retry-After", "0")
                .set_body_json(error_body("SERVICE_UNAVAILABLE", "Try again.", json!([]))),
        )
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_to"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::to_address()))
        .mount(&server)
        .await;

    let client = client_for(&server);

    // Resource operations never retry on their own
    let error = Address::retrieve(&client, "adr_to").await.unwrap_err();
    assert!(matches!(error, ResourceError::Server { .. }));

    // The transport retries only when asked
    let response = client
        .get_with_tries("addresses/adr_to", Query::new(), 2)
        .await
        .unwrap();
    assert_eq!(response.code, 200);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}
