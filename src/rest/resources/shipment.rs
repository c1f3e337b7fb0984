//! Shipment resource implementation.
//!
//! A shipment ties a from-address, a to-address and a parcel together. On
//! creation the server rates it with every enabled carrier account; carriers
//! that cannot quote add a [`Message`] instead of failing the request.
//!
//! # Resource-Specific Operations
//!
//! - [`Shipment::lowest_rate`] - Pick the cheapest rate (no request)
//! - [`Shipment::buy`] - Purchase a rate, populating the label and tracker
//! - [`Shipment::label`] - Convert the purchased label to another format
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Params, Resource};
//! use easypost::rest::resources::Shipment;
//! use serde_json::json;
//!
//! let shipment = Shipment::create(
//!     &client,
//!     Params::new()
//!         .with("to_address", json!({"street1": "601 Brasilia Ave", "zip": "64153", "country": "US"}))
//!         .with("from_address", json!({"street1": "164 Townsend St", "zip": "94107", "country": "US"}))
//!         .with("parcel", json!({"weight": 10})),
//! ).await?;
//!
//! let rate = shipment.lowest_rate(&["USPS"], &[])?.clone();
//! let shipment = shipment.buy(&client, &rate).await?;
//! assert!(shipment.tracker.is_some());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{lowest_rate, Params, Resource, ResourceError, ResourceOperation, ResourcePath};

use super::address::Address;
use super::common::{LabelFormat, Message, PostageLabel};
use super::parcel::Parcel;
use super::rate::Rate;
use super::tracker::Tracker;

/// A package movement between two addresses.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Shipment {
    /// The shipment identifier (`shp_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the shipment was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the shipment last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// A caller-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// The tracking status, once purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The carrier tracking code, once purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,

    /// Origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_address: Option<Address>,

    /// Destination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_address: Option<Address>,

    /// Where returns go, if different from the origin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_address: Option<Address>,

    /// The package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parcel: Option<Parcel>,

    /// Shipment options as sent and resolved (free-form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,

    /// Whether this is a return shipment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_return: Option<bool>,

    /// Quoted rates; may be empty if no carrier could quote.
    #[serde(default)]
    pub rates: Vec<Rate>,

    /// The purchased rate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_rate: Option<Rate>,

    /// The purchased label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postage_label: Option<PostageLabel>,

    /// The tracker created on purchase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<Tracker>,

    /// Non-fatal per-carrier diagnostics.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// The batch this shipment belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,

    /// Per-shipment status within its batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_status: Option<String>,

    /// Per-shipment message within its batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_message: Option<String>,

    /// Insured amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<String>,
}

impl Resource for Shipment {
    const NAME: &'static str = "Shipment";
    const KEY: &'static str = "shipment";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "shipments"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "shipments/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "shipments/{id}/buy",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Action("label"),
            &["id"],
            "shipments/{id}/label",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Shipment {
    /// Returns the quoted rates.
    #[must_use]
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Returns the non-fatal carrier messages.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns `true` once a rate has been bought.
    #[must_use]
    pub const fn is_purchased(&self) -> bool {
        self.postage_label.is_some() || self.selected_rate.is_some()
    }

    /// Returns the cheapest rate matching the filters.
    ///
    /// Empty filters mean "any". No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoRatesAvailable`] if nothing matches.
    pub fn lowest_rate(&self, carriers: &[&str], services: &[&str]) -> Result<&Rate, ResourceError> {
        lowest_rate(&self.rates, carriers, services)
    }

    /// Buys `rate` and returns the purchased shipment.
    ///
    /// Sends a POST request to `shipments/{id}/buy`. The returned snapshot
    /// carries the selected rate, postage label and tracker.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidState`] without a request if this
    /// snapshot is already purchased.
    /// Returns [`ResourceError::MissingId`] if the shipment or rate has no ID.
    /// Server-side rejections are returned classified and unchanged.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let rate = shipment.lowest_rate(&["USPS"], &["Priority"])?.clone();
    /// let shipment = shipment.buy(&client, &rate).await?;
    /// println!("{:?}", shipment.postage_label.and_then(|l| l.label_url));
    /// ```
    pub async fn buy(&self, client: &RestClient, rate: &Rate) -> Result<Self, ResourceError> {
        if self.is_purchased() {
            return Err(ResourceError::InvalidState {
                resource: Self::NAME,
                operation: "buy",
                state: Some("purchased".to_string()),
                response: None,
            });
        }

        let rate_id = rate.id().ok_or(ResourceError::MissingId {
            resource: Rate::NAME,
            operation: "buy",
        })?;

        self.perform(client, "buy", Params::new().with("rate", json!({ "id": rate_id })))
            .await
    }

    /// Converts the purchased label to `format`.
    ///
    /// Sends a GET request to `shipments/{id}/label?file_format=...`. The
    /// returned snapshot carries the new URL (e.g. `label_zpl_url`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidState`] without a request if the
    /// shipment has not been purchased.
    pub async fn label(&self, client: &RestClient, format: LabelFormat) -> Result<Self, ResourceError> {
        if !self.is_purchased() {
            return Err(ResourceError::InvalidState {
                resource: Self::NAME,
                operation: "label",
                state: Some("unpurchased".to_string()),
                response: None,
            });
        }

        self.perform(client, "label", Params::new().with("file_format", format.as_str()))
            .await
    }
}
