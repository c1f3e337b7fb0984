//! Integration tests for the pickup lifecycle: create, buy, cancel.

mod common;

use common::{client_for, error_body};
use easypost::rest::resources::{Pickup, PickupStatus};
use easypost::rest::{NoRatesReason, Params, Resource, ResourceError};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pickup(status: &str, confirmation: Option<&str>) -> Value {
    json!({
        "id": "pickup_1",
        "object": "Pickup",
        "mode": "test",
        "reference": "dock-3",
        "status": status,
        "min_datetime": "2024-01-15T10:00Z",
        "max_datetime": "2024-01-15T15:00Z",
        "is_account_address": false,
        "instructions": "Special pickup instructions",
        "confirmation": confirmation,
        "address": common::from_address(),
        "pickup_rates": [
            {"id": "pickuprate_1", "object": "PickupRate", "carrier": "USPS", "service": "NextDay", "rate": "0.00", "currency": "USD", "pickup_id": "pickup_1"}
        ],
        "messages": []
    })
}

// ============================================================================
// Lifecycle
// ============================================================================

#[tokio::test]
async fn test_pickup_create_buy_cancel() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/pickups"))
        .and(body_partial_json(json!({"pickup": {"reference": "dock-3"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(pickup("unknown", None)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_1/buy"))
        .and(body_partial_json(json!({"carrier": "USPS", "service": "NextDay"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(pickup("scheduled", Some("WTC123456"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_1/cancel"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(pickup("canceled", Some("WTC123456"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let created = Pickup::create(
        &client,
        Params::new()
            .with("reference", "dock-3")
            .with("min_datetime", "2024-01-15T10:00Z")
            .with("max_datetime", "2024-01-15T15:00Z")
            .with("shipment", json!({"id": "shp_1"})),
    )
    .await
    .unwrap();
    assert_eq!(created.status, PickupStatus::Unknown);
    assert_eq!(created.min_datetime.as_deref(), Some("2024-01-15T10:00Z"));
    assert_eq!(created.lowest_rate(&[], &[]).unwrap().service, "NextDay");

    let scheduled = assert_ok!(created.buy(&client, "USPS", "NextDay").await);
    assert_eq!(scheduled.status, PickupStatus::Scheduled);
    assert_eq!(scheduled.confirmation.as_deref(), Some("WTC123456"));

    let canceled = assert_ok!(scheduled.cancel(&client).await);
    assert_eq!(canceled.status, PickupStatus::Canceled);

    // Cancel after cancel is refused without a request
    let error = assert_err!(canceled.cancel(&client).await);
    match error {
        ResourceError::InvalidState {
            resource,
            operation,
            state,
            response,
        } => {
            assert_eq!(resource, "Pickup");
            assert_eq!(operation, "cancel");
            assert_eq!(state.as_deref(), Some("canceled"));
            assert!(response.is_none());
        }
        other => panic!("expected InvalidState, got {other:?}"),
    }

    // So is buying a canceled pickup
    let error = assert_err!(canceled.buy(&client, "USPS", "NextDay").await);
    assert!(matches!(
        error,
        ResourceError::InvalidState {
            operation: "buy",
            ..
        }
    ));
}

#[tokio::test]
async fn test_cancel_unscheduled_pickup_is_rejected_locally() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let created: Pickup = serde_json::from_value(pickup("unknown", None)).unwrap();
    let error = created.cancel(&client).await.unwrap_err();

    assert!(matches!(error, ResourceError::InvalidState { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_buy_with_unlisted_service_is_no_match() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let created: Pickup = serde_json::from_value(pickup("unknown", None)).unwrap();
    let error = created
        .buy(&client, "USPS", "SameDay")
        .await
        .unwrap_err();

    match error {
        ResourceError::NoRatesAvailable {
            reason: NoRatesReason::NoMatch { carriers, services },
        } => {
            assert_eq!(carriers, vec!["USPS".to_string()]);
            assert_eq!(services, vec!["SameDay".to_string()]);
        }
        other => panic!("expected NoRatesAvailable, got {other:?}"),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_server_rejected_cancel_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/pickups/pickup_1/cancel"))
        .respond_with(ResponseTemplate::new(422).set_body_json(error_body(
            "PICKUP.INVALID_STATUS",
            "Pickup has already been completed.",
            json!([]),
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    // Our snapshot is stale: the carrier already completed the pickup
    let stale: Pickup = serde_json::from_value(pickup("scheduled", Some("WTC123456"))).unwrap();

    let error = stale.cancel(&client).await.unwrap_err();
    assert!(matches!(
        error,
        ResourceError::InvalidState {
            response: Some(_),
            ..
        }
    ));
    assert_eq!(error.status(), Some(422));
}

#[tokio::test]
async fn test_retrieve_and_refresh_agree() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/pickups/pickup_1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(pickup("scheduled", Some("WTC123456"))),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let retrieved = Pickup::retrieve(&client, "pickup_1").await.unwrap();
    let refreshed = retrieved.refresh(&client).await.unwrap();

    assert_eq!(retrieved, refreshed);
    assert_eq!(refreshed.id(), Some("pickup_1"));
    assert_eq!(refreshed.is_account_address, Some(false));
}
