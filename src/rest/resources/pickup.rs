//! Pickup resource implementation.
//!
//! A pickup asks a carrier to collect packages from an address within a
//! time window. Creating one returns candidate [`PickupRate`]s; buying one of
//! them schedules the pickup.
//!
//! # State Machine
//!
//! ```text
//! unknown --buy--> scheduled --cancel--> canceled
//!                            \---------> completed (carrier)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Params, Resource};
//! use easypost::rest::resources::Pickup;
//! use serde_json::json;
//!
//! let pickup = Pickup::create(
//!     &client,
//!     Params::new()
//!         .with("address", from_address.reference())
//!         .with("shipment", shipment.reference())
//!         .with("reference", "internal_id_1234")
//!         .with("min_datetime", "2024-01-15T10:00Z")
//!         .with("max_datetime", "2024-01-15T16:00Z")
//!         .with("is_account_address", true),
//! ).await?;
//!
//! let pickup = pickup.buy(&client, "UPS", "Same-day Pickup").await?;
//! let pickup = pickup.cancel(&client).await?;
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{
    lowest_rate, NoRatesReason, Params, Quote, Resource, ResourceError, ResourceOperation,
    ResourcePath,
};

use super::address::Address;
use super::common::{lenient_bool, Message};

/// The scheduling status of a pickup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
    /// Bought and confirmed by the carrier.
    Scheduled,
    /// Cancelled after scheduling.
    Canceled,
    /// The carrier collected the packages.
    Completed,
    /// Created but not bought, or a status this client does not know.
    #[default]
    #[serde(other)]
    Unknown,
}

impl PickupStatus {
    /// Returns the status as the API spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Scheduled => "scheduled",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A priced pickup option.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PickupRate {
    /// The rate identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Carrier name.
    #[serde(default)]
    pub carrier: String,

    /// Service name, e.g. `"Same-day Pickup"`.
    #[serde(default)]
    pub service: String,

    /// The price as a decimal string.
    #[serde(default)]
    pub rate: String,

    /// ISO 4217 currency of `rate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// The pickup this rate belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_id: Option<String>,
}

impl Quote for PickupRate {
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

/// A carrier collection request.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Pickup {
    /// The pickup identifier (`pickup_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the pickup was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// A caller-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Current status.
    #[serde(default)]
    pub status: PickupStatus,

    /// Earliest collection time, as sent (minute precision is accepted).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_datetime: Option<String>,

    /// Latest collection time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_datetime: Option<String>,

    /// Whether the address is the account's own address.
    #[serde(
        default,
        deserialize_with = "lenient_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_account_address: Option<bool>,

    /// Instructions for the driver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,

    /// The carrier's confirmation number, once scheduled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,

    /// Where to collect from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Candidate rates.
    #[serde(default)]
    pub pickup_rates: Vec<PickupRate>,

    /// Non-fatal per-carrier diagnostics.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Resource for Pickup {
    const NAME: &'static str = "Pickup";
    const KEY: &'static str = "pickup";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "pickups"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "pickups/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "pickups/{id}/buy",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("cancel"),
            &["id"],
            "pickups/{id}/cancel",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Pickup {
    /// Returns the non-fatal carrier messages.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the cheapest pickup rate matching the filters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NoRatesAvailable`] if nothing matches.
    pub fn lowest_rate(
        &self,
        carriers: &[&str],
        services: &[&str],
    ) -> Result<&PickupRate, ResourceError> {
        lowest_rate(&self.pickup_rates, carriers, services)
    }

    /// Schedules the pickup with the rate matching `carrier` and `service`.
    ///
    /// Sends a POST request to `pickups/{id}/buy`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidState`] without a request unless the
    /// pickup's status is `unknown`.
    /// Returns [`ResourceError::NoRatesAvailable`] without a request if the
    /// snapshot lists rates and none matches.
    pub async fn buy(
        &self,
        client: &RestClient,
        carrier: &str,
        service: &str,
    ) -> Result<Self, ResourceError> {
        self.require_status(PickupStatus::Unknown, "buy")?;

        let listed = !self.pickup_rates.is_empty();
        let matched = self.pickup_rates.iter().any(|rate| {
            rate.carrier.eq_ignore_ascii_case(carrier) && rate.service.eq_ignore_ascii_case(service)
        });
        if listed && !matched {
            return Err(ResourceError::NoRatesAvailable {
                reason: NoRatesReason::NoMatch {
                    carriers: vec![carrier.to_string()],
                    services: vec![service.to_string()],
                },
            });
        }

        self.perform(
            client,
            "buy",
            Params::new().with("carrier", carrier).with("service", service),
        )
        .await
    }

    /// Cancels a scheduled pickup.
    ///
    /// Sends a POST request to `pickups/{id}/cancel`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidState`] without a request unless the
    /// pickup's status is `scheduled`.
    pub async fn cancel(&self, client: &RestClient) -> Result<Self, ResourceError> {
        self.require_status(PickupStatus::Scheduled, "cancel")?;
        self.perform(client, "cancel", Params::new()).await
    }

    fn require_status(
        &self,
        expected: PickupStatus,
        operation: &'static str,
    ) -> Result<(), ResourceError> {
        if self.status == expected {
            Ok(())
        } else {
            Err(ResourceError::InvalidState {
                resource: Self::NAME,
                operation,
                state: Some(self.status.to_string()),
                response: None,
            })
        }
    }
}
