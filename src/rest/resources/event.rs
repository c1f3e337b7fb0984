//! Event resource implementation.
//!
//! Events record changes to other resources (`tracker.updated`,
//! `batch.updated`, ...). They are delivered to webhooks and can also be
//! retrieved by id. The changed resource is carried in `result`; decode it
//! with [`Event::result_as`].

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::{Resource, ResourceError, ResourceOperation, ResourcePath};

/// A change notification.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Event {
    /// The event identifier (`evt_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// `"test"` or `"production"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// When the event was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// What happened, e.g. `"tracker.updated"`.
    #[serde(default)]
    pub description: String,

    /// Delivery status of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The resource after the change.
    #[serde(default)]
    pub result: Value,

    /// Fields that changed, with their previous values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_attributes: Option<Value>,

    /// Webhook URLs still to be notified.
    #[serde(default)]
    pub pending_urls: Vec<String>,

    /// Webhook URLs already notified.
    #[serde(default)]
    pub completed_urls: Vec<String>,
}

impl Resource for Event {
    const NAME: &'static str = "Event";
    const KEY: &'static str = "event";

    const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Retrieve,
        &["id"],
        "events/{id}",
    )];

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Event {
    /// Decodes `result` as a specific resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Decode`] if `result` does not have the shape
    /// of `R`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// if event.description == "tracker.updated" {
    ///     let tracker: Tracker = event.result_as()?;
    ///     println!("{}", tracker.status);
    /// }
    /// ```
    pub fn result_as<R: Resource + DeserializeOwned>(&self) -> Result<R, ResourceError> {
        serde_json::from_value(self.result.clone()).map_err(|e| ResourceError::Decode {
            resource: R::NAME,
            message: e.to_string(),
        })
    }
}
