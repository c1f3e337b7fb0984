//! Parcel resource implementation.
//!
//! A parcel is described either by its dimensions or by a carrier
//! `predefined_package` such as `"FlatRateEnvelope"`. Weight is in ounces,
//! dimensions in inches.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceOperation, ResourcePath};

/// A package to be shipped.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Parcel {
    /// The parcel identifier (`prcl_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the parcel was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Length in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,

    /// Width in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Height in inches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Weight in ounces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// A carrier package name used instead of dimensions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predefined_package: Option<String>,
}

impl Resource for Parcel {
    const NAME: &'static str = "Parcel";
    const KEY: &'static str = "parcel";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "parcels"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "parcels/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
