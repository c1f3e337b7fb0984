//! Order resource implementation.
//!
//! An order ships several parcels between the same two addresses. Its
//! shipments inherit the order's addresses. Buying applies one
//! (carrier, service) pair to every shipment; a shipment that cannot be
//! bought that way records [`Message`]s instead of failing the order.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Params, Resource};
//! use easypost::rest::resources::Order;
//! use serde_json::json;
//!
//! let order = Order::create(
//!     &client,
//!     Params::new()
//!         .with("from_address", from)
//!         .with("to_address", to)
//!         .with("shipments", json!([{"parcel": {"weight": 10}}, {"parcel": {"weight": 20}}])),
//! ).await?;
//!
//! let order = order.buy(&client, "USPS", "Priority").await?;
//! for shipment in &order.shipments {
//!     match &shipment.postage_label {
//!         Some(label) => println!("label: {:?}", label.label_url),
//!         None => println!("not bought: {:?}", shipment.messages()),
//!     }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{lowest_rate, Params, Resource, ResourceError, ResourceOperation, ResourcePath};

use super::address::Address;
use super::common::Message;
use super::rate::Rate;
use super::shipment::Shipment;

/// A multi-parcel shipment between two addresses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Order {
    /// The order identifier (`order_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the order was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// A caller-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Origin shared by every shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    /// Destination shared by every shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,

    /// Where returns go, if different from the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<Address>,

    /// Whether this is a return order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_return: Option<bool>,

    /// The shipments, in the order they were given.
    #[serde(default)]
    pub shipments: Vec<Shipment>,

    /// Rates for the whole order, one per (carrier, service).
    #[serde(default)]
    pub rates: Vec<Rate>,

    /// Non-fatal order-level diagnostics.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Resource for Order {
    const NAME: &'static str = "Order";
    const KEY: &'static str = "order";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "orders"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "orders/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "orders/{id}/buy",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Order {
    /// Returns the order-level messages.
    ///
    /// Per-shipment messages are on each [`Shipment`].
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the cheapest order rate matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoRatesAvailable`] if nothing matches.
    pub fn lowest_rate(&self, carriers: &[&str], services: &[&str]) -> Result<&Rate, ResourceError> {
        lowest_rate(&self.rates, carriers, services)
    }

    /// Returns the shipments that were not bought.
    ///
    /// Useful after [`buy`](Self::buy): each returned shipment carries the
    /// messages explaining why.
    pub fn unpurchased_shipments(&self) -> impl Iterator<Item = &Shipment> {
        self.shipments.iter().filter(|s| !s.is_purchased())
    }

    /// Buys every shipment with the given carrier and service.
    ///
    /// Sends a POST request to `orders/{id}/buy`. Shipments the carrier
    /// cannot serve are left unpurchased with messages; that is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the order is unsaved, or a
    /// classified [`ResourceError`] if the server rejects the whole request.
    pub async fn buy(
        &self,
        client: &RestClient,
        carrier: &str,
        service: &str,
    ) -> Result<Self, ResourceError> {
        self.perform(
            client,
            "buy",
            Params::new().with("carrier", carrier).with("service", service),
        )
        .await
    }
}
