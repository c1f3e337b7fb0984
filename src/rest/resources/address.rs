//! Address resource implementation.
//!
//! Addresses are created on their own or inline as part of a shipment,
//! pickup or order. The server resolves `residential` from the address data,
//! the `residential` flag, or a shipment's `options.residential_to_address`.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Params, Resource};
//! use easypost::rest::resources::Address;
//!
//! let address = Address::create(
//!     &client,
//!     Params::new()
//!         .with("name", "Airport Shipping")
//!         .with("street1", "601 Brasilia Ave")
//!         .with("city", "Kansas City")
//!         .with("state", "MO")
//!         .with("zip", "64153")
//!         .with("country", "US")
//!         .with("residential", 1),
//! ).await?;
//! assert_eq!(address.residential, Some(true));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceOperation, ResourcePath};

use super::common::lenient_bool;

/// A postal address.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Address {
    /// The address identifier (`adr_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the address was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Name of the person.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Name of the organization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// First line of the street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street1: Option<String>,

    /// Second line of the street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,

    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// ZIP or postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,

    /// ISO 3166 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Whether the address is residential, as resolved by the server.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub residential: Option<bool>,

    /// Federal tax identifier, for customs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub federal_tax_id: Option<String>,

    /// State tax identifier, for customs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_tax_id: Option<String>,

    /// Verification results, when verification was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifications: Option<serde_json::Value>,
}

impl Resource for Address {
    const NAME: &'static str = "Address";
    const KEY: &'static str = "address";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "addresses"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "addresses/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Address {
    /// Returns `true` only when the server resolved the address as residential.
    #[must_use]
    pub fn is_residential(&self) -> bool {
        self.residential.unwrap_or(false)
    }
}
