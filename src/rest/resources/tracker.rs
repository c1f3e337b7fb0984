//! Tracker resource implementation.
//!
//! A tracker follows one package through a carrier's network. Its
//! `tracking_details` grow over time in ascending datetime order; entries
//! already returned are never rewritten, which [`Tracker::extends`] checks.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Params, Resource};
//! use easypost::rest::resources::Tracker;
//!
//! let tracker = Tracker::create(
//!     &client,
//!     Params::new().with("tracking_code", "EZ2000000002").with("carrier", "USPS"),
//! ).await?;
//!
//! let later = tracker.refresh(&client).await?;
//! assert!(later.extends(&tracker));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceOperation, ResourcePath};

/// The delivery status of a tracked package.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackerStatus {
    /// The label exists but the carrier has not received the package.
    PreTransit,
    /// The package is moving through the network.
    InTransit,
    /// The package is on the vehicle for final delivery.
    OutForDelivery,
    /// The package was delivered.
    Delivered,
    /// The package is held for collection.
    AvailableForPickup,
    /// The package is being returned.
    ReturnToSender,
    /// Delivery failed.
    Failure,
    /// The shipment was cancelled.
    Cancelled,
    /// The carrier reported an error.
    Error,
    /// No scan has been recorded, or the status is not recognized.
    #[default]
    #[serde(other)]
    Unknown,
}

impl TrackerStatus {
    /// Returns the status as the API spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::PreTransit => "pre_transit",
            Self::InTransit => "in_transit",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::AvailableForPickup => "available_for_pickup",
            Self::ReturnToSender => "return_to_sender",
            Self::Failure => "failure",
            Self::Cancelled => "cancelled",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for TrackerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a tracking event happened. Any field may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
pub struct TrackingLocation {
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Country.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    /// ZIP or postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

/// One scan event in a tracker's history.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TrackingDetail {
    /// When the event happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<DateTime<Utc>>,

    /// The carrier's description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Additional description, when the carrier provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// The status this event moved the package to.
    #[serde(default)]
    pub status: TrackerStatus,

    /// A finer-grained status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,

    /// Who reported the event, e.g. `"USPS"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Where the event happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_location: Option<TrackingLocation>,
}

impl TrackingDetail {
    /// Returns `true` if both entries describe the same event.
    ///
    /// Events are identified by datetime, status and location; wording may
    /// change between retrievals.
    #[must_use]
    pub fn same_event(&self, other: &Self) -> bool {
        self.datetime == other.datetime
            && self.status == other.status
            && self.tracking_location == other.tracking_location
    }
}

/// Tracking status for one package.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tracker {
    /// The tracker identifier (`trk_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the tracker was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the tracker last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// The carrier tracking code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,

    /// The carrier name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// Current status.
    #[serde(default)]
    pub status: TrackerStatus,

    /// A finer-grained status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_detail: Option<String>,

    /// Who signed for the package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed_by: Option<String>,

    /// Estimated delivery date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub est_delivery_date: Option<DateTime<Utc>>,

    /// The shipment this tracker was created for, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,

    /// A public tracking page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,

    /// Scan history, oldest first.
    #[serde(default)]
    pub tracking_details: Vec<TrackingDetail>,
}

impl Resource for Tracker {
    const NAME: &'static str = "Tracker";
    const KEY: &'static str = "tracker";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "trackers"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "trackers/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Tracker {
    /// Returns `true` if this snapshot is a continuation of `earlier`.
    ///
    /// Both must be the same tracker, and every detail in `earlier` must
    /// appear at the same position here. New details may follow.
    #[must_use]
    pub fn extends(&self, earlier: &Self) -> bool {
        if self.id != earlier.id {
            return false;
        }
        if earlier.tracking_details.len() > self.tracking_details.len() {
            return false;
        }

        earlier
            .tracking_details
            .iter()
            .zip(&self.tracking_details)
            .all(|(old, new)| old.same_event(new))
    }

    /// Returns the most recent tracking event.
    #[must_use]
    pub fn latest_detail(&self) -> Option<&TrackingDetail> {
        self.tracking_details.last()
    }
}
