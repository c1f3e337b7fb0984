//! ScanForm resource implementation.
//!
//! A scan form (manifest) lets a carrier accept many packages with a single
//! scan. It is generated for purchased shipments, either directly or through
//! [`Batch::create_scan_form`](super::Batch::create_scan_form).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceOperation, ResourcePath};

use super::address::Address;

/// A manifest document for a set of purchased shipments.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScanForm {
    /// The scan form identifier (`sf_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the scan form was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// `"creating"`, `"created"` or `"failed"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Why generation failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// The origin address shared by the shipments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    /// Tracking codes included in the manifest.
    #[serde(default)]
    pub tracking_codes: Vec<String>,

    /// URL of the generated document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,

    /// File type of the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_file_type: Option<String>,

    /// The batch the form was generated for, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
}

impl Resource for ScanForm {
    const NAME: &'static str = "ScanForm";
    const KEY: &'static str = "scan_form";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "scan_forms"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "scan_forms/{id}",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}
