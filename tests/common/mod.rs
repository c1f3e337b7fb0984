//! Shared helpers for integration tests against a mock EasyPost server.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use easypost::rest::PollOptions;
use easypost::{ApiKey, BaseUrl, EasyPostConfig, RestClient};
use serde_json::{json, Value};
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const TEST_API_KEY: &str = "EZTK_test_key";

/// Builds a client whose base URL points at `server`.
pub fn client_for(server: &MockServer) -> RestClient {
    let config = EasyPostConfig::builder()
        .api_key(ApiKey::new(TEST_API_KEY).unwrap())
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    RestClient::new(&config).unwrap()
}

/// Poll options fast enough for tests.
pub fn fast_poll(deadline: Duration) -> PollOptions {
    PollOptions::default()
        .interval(Duration::from_millis(10))
        .deadline(deadline)
}

/// Responds with each body in turn, repeating the last one forever.
///
/// Models a resource whose server-side state advances between refreshes.
pub struct Sequence {
    bodies: Vec<Value>,
    calls: AtomicUsize,
}

impl Sequence {
    pub fn new(bodies: Vec<Value>) -> Self {
        assert!(!bodies.is_empty(), "a sequence needs at least one body");
        Self {
            bodies,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Respond for Sequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let body = &self.bodies[call.min(self.bodies.len() - 1)];
        ResponseTemplate::new(200).set_body_json(body)
    }
}

pub fn from_address() -> Value {
    json!({
        "id": "adr_from",
        "object": "Address",
        "name": "EasyPost",
        "street1": "417 Montgomery Street",
        "street2": "5th Floor",
        "city": "San Francisco",
        "state": "CA",
        "zip": "94104",
        "country": "US",
        "phone": "4153334445"
    })
}

pub fn to_address() -> Value {
    json!({
        "id": "adr_to",
        "object": "Address",
        "name": "Dr. Steve Brule",
        "street1": "179 N Harbor Dr",
        "city": "Redondo Beach",
        "state": "CA",
        "zip": "90277",
        "country": "US",
        "residential": "true"
    })
}

pub fn parcel() -> Value {
    json!({
        "id": "prcl_1",
        "object": "Parcel",
        "length": 20.2,
        "width": 10.9,
        "height": 5,
        "weight": 65.9
    })
}

pub fn rate(id: &str, carrier: &str, service: &str, price: &str, shipment_id: &str) -> Value {
    json!({
        "id": id,
        "object": "Rate",
        "carrier": carrier,
        "service": service,
        "rate": price,
        "currency": "USD",
        "shipment_id": shipment_id
    })
}

/// An unpurchased shipment with three USPS rates.
pub fn rated_shipment(id: &str) -> Value {
    json!({
        "id": id,
        "object": "Shipment",
        "mode": "test",
        "from_address": from_address(),
        "to_address": to_address(),
        "parcel": parcel(),
        "rates": [
            rate("rate_express", "USPS", "Express", "31.25", id),
            rate("rate_priority", "USPS", "Priority", "7.58", id),
            rate("rate_ground", "USPS", "GroundAdvantage", "5.93", id)
        ],
        "messages": [],
        "postage_label": null,
        "selected_rate": null,
        "tracker": null
    })
}

/// The same shipment after buying `rate_priority`.
pub fn purchased_shipment(id: &str) -> Value {
    let mut shipment = rated_shipment(id);
    shipment["selected_rate"] = rate("rate_priority", "USPS", "Priority", "7.58", id);
    shipment["tracking_code"] = json!("9400100000000000000000");
    shipment["postage_label"] = json!({
        "id": "pl_1",
        "object": "PostageLabel",
        "label_url": "https://easypost-files.s3.amazonaws.com/label.png",
        "label_file_type": "image/png",
        "label_resolution": 300,
        "label_size": "4x6"
    });
    shipment["tracker"] = json!({
        "id": "trk_1",
        "object": "Tracker",
        "tracking_code": "9400100000000000000000",
        "carrier": "USPS",
        "status": "pre_transit",
        "shipment_id": id,
        "tracking_details": []
    });
    shipment
}

/// An error body in EasyPost's wrapped shape.
pub fn error_body(code: &str, message: &str, errors: Value) -> Value {
    json!({
        "error": {
            "code": code,
            "message": message,
            "errors": errors
        }
    })
}
