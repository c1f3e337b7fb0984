//! Rate resource implementation.
//!
//! A rate is a price quoted by one carrier account for one service. Rates
//! are created by the server when a shipment or order is rated; they can be
//! retrieved by id but not created directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{Quote, Resource, ResourceOperation, ResourcePath};

/// A priced (carrier, service) quote for a shipment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Rate {
    /// The rate identifier (`rate_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the rate was quoted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// The shipment this rate belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,

    /// Carrier name, e.g. `"USPS"`.
    #[serde(default)]
    pub carrier: String,

    /// Service name, e.g. `"Priority"`.
    #[serde(default)]
    pub service: String,

    /// The carrier account that produced the quote.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_account_id: Option<String>,

    /// The price as a decimal string.
    #[serde(default)]
    pub rate: String,

    /// ISO 4217 currency of `rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Undiscounted list price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_rate: Option<String>,

    /// Retail counter price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retail_rate: Option<String>,

    /// Estimated transit days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_days: Option<u32>,

    /// Estimated delivery date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,

    /// Whether the delivery date is guaranteed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date_guaranteed: Option<bool>,
}

impl Resource for Rate {
    const NAME: &'static str = "Rate";
    const KEY: &'static str = "rate";

    const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Retrieve,
        &["id"],
        "rates/{id}",
    )];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Quote for Rate {
    fn carrier(&self) -> &str {
        &self.carrier
    }

    fn service(&self) -> &str {
        &self.service
    }

    fn raw_price(&self) -> &str {
        &self.rate
    }
}
