//! Integration tests for orders: multi-parcel rating and purchase.

mod common;

use common::{client_for, rate};
use easypost::rest::resources::Order;
use easypost::rest::{Params, Resource, ResourceError};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn order_shipment(id: &str, carriers: &[(&str, &str, &str)]) -> Value {
    let rates: Vec<Value> = carriers
        .iter()
        .enumerate()
        .map(|(i, (carrier, service, price))| {
            rate(&format!("rate_{id}_{i}"), carrier, service, price, id)
        })
        .collect();
    json!({
        "id": id,
        "object": "Shipment",
        "parcel": common::parcel(),
        "rates": rates,
        "messages": []
    })
}

fn rated_order() -> Value {
    json!({
        "id": "order_1",
        "object": "Order",
        "mode": "test",
        "reference": "multi-box",
        "from_address": common::from_address(),
        "to_address": common::to_address(),
        "is_return": false,
        "shipments": [
            order_shipment("shp_a", &[("USPS", "Priority", "7.58"), ("FedEx", "FEDEX_GROUND", "9.10")]),
            order_shipment("shp_b", &[("FedEx", "FEDEX_GROUND", "11.40")])
        ],
        "rates": [
            rate("rate_o_1", "USPS", "Priority", "7.58", "shp_a"),
            rate("rate_o_2", "FedEx", "FEDEX_GROUND", "20.50", "shp_a")
        ],
        "messages": [
            {"carrier": "USPS", "type": "rate_error", "message": "Package too large for Priority."}
        ]
    })
}

#[tokio::test]
async fn test_order_create_then_buy_with_mixed_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/orders"))
        .and(body_partial_json(json!({"order": {"reference": "multi-box"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(rated_order()))
        .expect(1)
        .mount(&server)
        .await;

    let mut bought = rated_order();
    bought["shipments"][0]["selected_rate"] =
        rate("rate_shp_a_0", "USPS", "Priority", "7.58", "shp_a");
    bought["shipments"][0]["postage_label"] =
        json!({"id": "pl_a", "label_url": "https://easypost-files.s3.amazonaws.com/a.png"});
    bought["shipments"][1]["messages"] = json!([
        {"carrier": "USPS", "type": "purchase_error", "message": "No USPS Priority rate for this parcel."}
    ]);

    Mock::given(method("POST"))
        .and(path("/v2/orders/order_1/buy"))
        .and(body_partial_json(json!({"carrier": "USPS", "service": "Priority"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(bought))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let order = Order::create(
        &client,
        Params::new()
            .with("reference", "multi-box")
            .with("from_address", common::from_address())
            .with("to_address", common::to_address())
            .with("shipments", json!([{"parcel": {"weight": 10}}, {"parcel": {"weight": 80}}])),
    )
    .await
    .unwrap();

    assert_eq!(order.shipments.len(), 2);
    assert_eq!(order.messages().len(), 1);
    assert_eq!(order.lowest_rate(&[], &[]).unwrap().id(), Some("rate_o_1"));
    assert_eq!(order.unpurchased_shipments().count(), 2);

    let order = order.buy(&client, "USPS", "Priority").await.unwrap();

    // Partial purchase is a successful result; the rest is reported as data
    let unpurchased: Vec<_> = order.unpurchased_shipments().collect();
    assert_eq!(unpurchased.len(), 1);
    assert_eq!(unpurchased[0].id(), Some("shp_b"));
    assert_eq!(
        unpurchased[0].messages()[0].message_type.as_deref(),
        Some("purchase_error")
    );
    assert!(order.shipments[0].is_purchased());
}

#[tokio::test]
async fn test_buy_unsaved_order_is_missing_id() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let error = Order::default()
        .buy(&client, "USPS", "Priority")
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ResourceError::MissingId {
            resource: "Order",
            operation: "buy"
        }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}
