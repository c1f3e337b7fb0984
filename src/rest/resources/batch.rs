//! Batch resource implementation.
//!
//! A batch groups shipments that are bought, labelled and manifested
//! together. The platform processes batch actions asynchronously: `buy` and
//! `create_scan_form` return while the batch is still working, and callers
//! wait for the outcome with [`Batch::wait_until_state`] or
//! [`Batch::wait_for_scan_form`].
//!
//! # State Machine
//!
//! ```text
//! creating -> created -> queued_for_purchase -> purchasing -> purchased
//!                                                          \-> purchase_failed
//! purchased -> label_generating -> label_generated
//! scan form:  absent -> creating_scan_form -> present
//! ```
//!
//! Shipments can only be added or removed while the batch is `created`.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Params, PollOptions, Resource};
//! use easypost::rest::resources::{Batch, BatchState};
//! use serde_json::json;
//!
//! let batch = Batch::create(&client, Params::new().with("shipments", json!([shipment_params]))).await?;
//! let options = PollOptions::default();
//!
//! let batch = batch.wait_until_state(&client, BatchState::Created, &options).await?;
//! let batch = batch.buy(&client).await?;
//! let batch = batch.wait_until_state(&client, BatchState::Purchased, &options).await?;
//! assert_eq!(batch.state.as_str(), "purchased");
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, RestClient};
use crate::rest::{
    wait_until, Params, PollError, PollOptions, Resource, ResourceError, ResourceOperation,
    ResourcePath,
};

use super::common::LabelFormat;
use super::scan_form::ScanForm;
use super::shipment::Shipment;

/// The processing state of a batch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// The batch is being created.
    Creating,
    /// Creation failed.
    CreationFailed,
    /// Ready; shipments may be added or removed.
    Created,
    /// Waiting for purchase to start.
    QueuedForPurchase,
    /// Purchase is in progress.
    Purchasing,
    /// Every shipment was purchased.
    Purchased,
    /// Purchase failed for at least one shipment.
    PurchaseFailed,
    /// A consolidated label is being generated.
    LabelGenerating,
    /// The consolidated label is ready.
    LabelGenerated,
    /// A scan form is being generated.
    CreatingScanForm,
    /// A state this client does not recognize.
    #[default]
    #[serde(other)]
    Unknown,
}

impl BatchState {
    /// Returns the state as the API spells it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Creating => "creating",
            Self::CreationFailed => "creation_failed",
            Self::Created => "created",
            Self::QueuedForPurchase => "queued_for_purchase",
            Self::Purchasing => "purchasing",
            Self::Purchased => "purchased",
            Self::PurchaseFailed => "purchase_failed",
            Self::LabelGenerating => "label_generating",
            Self::LabelGenerated => "label_generated",
            Self::CreatingScanForm => "creating_scan_form",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shipment as listed inside a batch.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BatchShipment {
    /// The shipment identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The shipment's reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Tracking code, once purchased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,

    /// Per-shipment status, e.g. `"postage_purchased"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_status: Option<String>,

    /// Why the shipment failed, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_message: Option<String>,
}

/// A group of shipments processed together.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Batch {
    /// The batch identifier (`batch_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the batch was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the batch last changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// A caller-supplied reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Current processing state.
    #[serde(default)]
    pub state: BatchState,

    /// Number of shipments in the batch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_shipments: Option<u32>,

    /// Shipment counts per per-shipment status.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub status: HashMap<String, u32>,

    /// The shipments in the batch.
    #[serde(default)]
    pub shipments: Vec<BatchShipment>,

    /// URL of the consolidated label, once generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_url: Option<String>,

    /// The scan form, once generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_form: Option<ScanForm>,

    /// A pickup scheduled for the batch (free-form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup: Option<Value>,
}

impl Resource for Batch {
    const NAME: &'static str = "Batch";
    const KEY: &'static str = "batch";

    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "batches"),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Retrieve,
            &["id"],
            "batches/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("buy"),
            &["id"],
            "batches/{id}/buy",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("add_shipments"),
            &["id"],
            "batches/{id}/add_shipments",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("remove_shipments"),
            &["id"],
            "batches/{id}/remove_shipments",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("create_scan_form"),
            &["id"],
            "batches/{id}/scan_form",
        ),
        ResourcePath::new(
            HttpMethod::Post,
            ResourceOperation::Action("label"),
            &["id"],
            "batches/{id}/label",
        ),
    ];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Batch {
    /// Adds shipments to the batch.
    ///
    /// Sends a POST request to `batches/{id}/add_shipments`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidState`] without a request unless the
    /// batch is `created`.
    /// Returns [`ResourceError::MissingId`] if any shipment is unsaved.
    pub async fn add_shipments(
        &self,
        client: &RestClient,
        shipments: &[Shipment],
    ) -> Result<Self, ResourceError> {
        self.change_shipments(client, "add_shipments", shipments).await
    }

    /// Removes shipments from the batch.
    ///
    /// Sends a POST request to `batches/{id}/remove_shipments`.
    ///
    /// # Errors
    ///
    /// Same as [`add_shipments`](Self::add_shipments).
    pub async fn remove_shipments(
        &self,
        client: &RestClient,
        shipments: &[Shipment],
    ) -> Result<Self, ResourceError> {
        self.change_shipments(client, "remove_shipments", shipments)
            .await
    }

    async fn change_shipments(
        &self,
        client: &RestClient,
        action: &'static str,
        shipments: &[Shipment],
    ) -> Result<Self, ResourceError> {
        if self.state != BatchState::Created {
            return Err(ResourceError::InvalidState {
                resource: Self::NAME,
                operation: action,
                state: Some(self.state.to_string()),
                response: None,
            });
        }

        let references = shipments
            .iter()
            .map(|shipment| {
                shipment.reference().ok_or(ResourceError::MissingId {
                    resource: Shipment::NAME,
                    operation: action,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.perform(client, action, Params::new().with("shipments", references))
            .await
    }

    /// Starts purchasing every shipment in the batch.
    ///
    /// Sends a POST request to `batches/{id}/buy`. Purchase continues on the
    /// server after this returns; wait for [`BatchState::Purchased`].
    ///
    /// # Errors
    ///
    /// Calling `buy` on an already-purchased batch is rejected by the server
    /// and returned as [`ResourceError::InvalidState`] or
    /// [`ResourceError::Validation`], unchanged.
    pub async fn buy(&self, client: &RestClient) -> Result<Self, ResourceError> {
        self.perform(client, "buy", Params::new()).await
    }

    /// Starts generating a scan form for the batch.
    ///
    /// Sends a POST request to `batches/{id}/scan_form`. Use
    /// [`wait_for_scan_form`](Self::wait_for_scan_form) to wait for the result.
    ///
    /// # Errors
    ///
    /// Returns any classified [`ResourceError`] from the server.
    pub async fn create_scan_form(&self, client: &RestClient) -> Result<Self, ResourceError> {
        self.perform(client, "create_scan_form", Params::new()).await
    }

    /// Starts generating one consolidated label for every shipment.
    ///
    /// Sends a POST request to `batches/{id}/label`.
    ///
    /// # Errors
    ///
    /// Returns any classified [`ResourceError`] from the server.
    pub async fn label(&self, client: &RestClient, format: LabelFormat) -> Result<Self, ResourceError> {
        self.perform(
            client,
            "label",
            Params::new().with("file_format", format.as_str()),
        )
        .await
    }

    /// Polls until the batch reaches `state`.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Timeout`] with the last snapshot if the deadline
    /// in `options` passes first.
    pub async fn wait_until_state(
        &self,
        client: &RestClient,
        state: BatchState,
        options: &PollOptions,
    ) -> Result<Self, PollError<Self>> {
        wait_until(client, self, options, |batch: &Self| batch.state == state).await
    }

    /// Polls until the batch has a scan form.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::Timeout`] with the last snapshot if the deadline
    /// in `options` passes first.
    pub async fn wait_for_scan_form(
        &self,
        client: &RestClient,
        options: &PollOptions,
    ) -> Result<Self, PollError<Self>> {
        wait_until(client, self, options, |batch: &Self| batch.scan_form.is_some()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiKey, BaseUrl, EasyPostConfig};
    use crate::rest::get_path;
    use serde_json::json;

    fn offline_client() -> RestClient {
        let config = EasyPostConfig::builder()
            .api_key(ApiKey::new("EZTK_test").unwrap())
            .base_url(BaseUrl::new("http://127.0.0.1:9").unwrap())
            .build()
            .unwrap();
        RestClient::new(&config).unwrap()
    }

    #[test]
    fn test_batch_state_round_trips_api_strings() {
        for state in [
            BatchState::Created,
            BatchState::QueuedForPurchase,
            BatchState::Purchased,
            BatchState::PurchaseFailed,
            BatchState::CreatingScanForm,
        ] {
            let parsed: BatchState = serde_json::from_value(json!(state.as_str())).unwrap();
            assert_eq!(parsed, state);
        }
    }

    #[test]
    fn test_unrecognized_state_maps_to_unknown() {
        let batch: Batch =
            serde_json::from_value(json!({"id": "batch_1", "state": "archived"})).unwrap();
        assert_eq!(batch.state, BatchState::Unknown);
    }

    #[test]
    fn test_batch_deserialization() {
        let batch: Batch = serde_json::from_value(json!({
            "id": "batch_123",
            "object": "Batch",
            "state": "purchased",
            "num_shipments": 1,
            "status": {"created": 0, "postage_purchased": 1},
            "shipments": [
                {"id": "shp_1", "batch_status": "postage_purchased", "tracking_code": "9400"}
            ],
            "scan_form": null,
            "label_url": null
        }))
        .unwrap();

        assert_eq!(batch.state, BatchState::Purchased);
        assert_eq!(batch.status.get("postage_purchased"), Some(&1));
        assert_eq!(batch.shipments[0].id.as_deref(), Some("shp_1"));
        assert!(batch.scan_form.is_none());
    }

    #[tokio::test]
    async fn test_add_shipments_outside_created_fails_locally() {
        let client = offline_client();
        let batch = Batch {
            id: Some("batch_1".to_string()),
            state: BatchState::Purchased,
            ..Default::default()
        };
        let shipment = Shipment {
            id: Some("shp_1".to_string()),
            ..Default::default()
        };

        let result = batch.add_shipments(&client, &[shipment]).await;
        match result {
            Err(ResourceError::InvalidState {
                operation, state, ..
            }) => {
                assert_eq!(operation, "add_shipments");
                assert_eq!(state.as_deref(), Some("purchased"));
            }
            other => panic!("Expected InvalidState, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_shipments_requires_saved_shipments() {
        let client = offline_client();
        let batch = Batch {
            id: Some("batch_1".to_string()),
            state: BatchState::Created,
            ..Default::default()
        };

        let result = batch.remove_shipments(&client, &[Shipment::default()]).await;
        assert!(matches!(
            result,
            Err(ResourceError::MissingId {
                resource: "Shipment",
                operation: "remove_shipments"
            })
        ));
    }

    #[test]
    fn test_batch_action_paths() {
        let scan = get_path(
            Batch::PATHS,
            ResourceOperation::Action("create_scan_form"),
            &["id"],
        )
        .unwrap();
        assert_eq!(scan.template, "batches/{id}/scan_form");

        let remove = get_path(
            Batch::PATHS,
            ResourceOperation::Action("remove_shipments"),
            &["id"],
        )
        .unwrap();
        assert_eq!(remove.template, "batches/{id}/remove_shipments");
    }
}
