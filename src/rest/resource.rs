//! The resource trait shared by every EasyPost object.
//!
//! This module defines the [`Resource`] trait. Implementors describe their
//! shape (a serde struct), their request-body key and a static path table;
//! in return they get `create()`, `retrieve()` and `refresh()`, plus
//! [`perform`](Resource::perform) for variant-specific actions such as
//! `buy` or `cancel`.
//!
//! Every operation returns a *new* snapshot. Nothing is mutated in place:
//! callers rebind the value they hold.
//!
//! # Implementing a Resource
//!
//! ```rust,ignore
//! use easypost::rest::{Resource, ResourcePath, ResourceOperation};
//! use easypost::HttpMethod;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct Insurance {
//!     pub id: Option<String>,
//!     pub amount: Option<String>,
//! }
//!
//! impl Resource for Insurance {
//!     const NAME: &'static str = "Insurance";
//!     const KEY: &'static str = "insurance";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "insurances"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Retrieve, &["id"], "insurances/{id}"),
//!     ];
//!
//!     fn id(&self) -> Option<&str> {
//!         self.id.as_deref()
//!     }
//! }
//!
//! let insurance = Insurance::retrieve(&client, "ins_123").await?;
//! let insurance = insurance.refresh(&client).await?;
//! ```

use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::clients::{HttpMethod, HttpResponse, RestClient};
use crate::rest::{build_path, get_path, Params, ResourceError, ResourceOperation, ResourcePath};

/// A remote EasyPost object mirrored locally as an immutable snapshot.
///
/// # Associated Constants
///
/// - `NAME`: The type name used in errors and logs (e.g., "Shipment")
/// - `KEY`: The key create bodies are wrapped in (e.g., "shipment")
/// - `PATHS`: Available paths for each supported operation
///
/// # Required Bounds
///
/// Resources must be serializable, deserializable, cloneable, and thread-safe.
/// Response decoding ignores unknown fields; implementors should use
/// `#[serde(default)]` so absent fields map to empty values.
#[allow(async_fn_in_trait)]
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The type name of the resource.
    const NAME: &'static str;

    /// The key that wraps create parameters in the request body.
    const KEY: &'static str;

    /// Available paths for this resource.
    const PATHS: &'static [ResourcePath];

    /// Returns the server-assigned identifier, if the snapshot has one.
    fn id(&self) -> Option<&str>;

    /// Returns `{"id": ...}` for embedding this snapshot in another request.
    ///
    /// Returns `None` for a snapshot that was never saved.
    #[must_use]
    fn reference(&self) -> Option<Value> {
        self.id().map(|id| json!({ "id": id }))
    }

    /// Creates a new resource from a parameter mapping.
    ///
    /// The parameters are sent as `{KEY: params}`.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ResourceError`] for any non-2xx response,
    /// [`ResourceError::Transport`] when no response is received, and
    /// [`ResourceError::Decode`] when the body does not match `Self`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let parcel = Parcel::create(
    ///     &client,
    ///     Params::new().with("weight", 10).with("predefined_package", "Pak"),
    /// ).await?;
    /// ```
    async fn create(client: &RestClient, params: Params) -> Result<Self, ResourceError> {
        let operation = ResourceOperation::Create;
        let path = resolve::<Self>(operation, None)?;
        let body = params.wrapped(Self::KEY);

        tracing::debug!(resource = Self::NAME, "creating resource");
        let response = dispatch(client, path.0, &path.1, Some(body), None).await?;
        decode::<Self>(&response, Self::NAME, operation, None).and_then(require_id)
    }

    /// Fetches a resource by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] if the identifier does not exist,
    /// or any other classified [`ResourceError`].
    async fn retrieve(client: &RestClient, id: &str) -> Result<Self, ResourceError> {
        let operation = ResourceOperation::Retrieve;
        let path = resolve::<Self>(operation, Some(id))?;

        tracing::debug!(resource = Self::NAME, id, "retrieving resource");
        let response = dispatch(client, path.0, &path.1, None, None).await?;
        decode::<Self>(&response, Self::NAME, operation, Some(id)).and_then(require_id)
    }

    /// Re-fetches this resource and returns a fresh snapshot.
    ///
    /// The receiver is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the snapshot was never saved,
    /// or any error [`retrieve`](Self::retrieve) can return.
    async fn refresh(&self, client: &RestClient) -> Result<Self, ResourceError> {
        let id = self.id().ok_or(ResourceError::MissingId {
            resource: Self::NAME,
            operation: "refresh",
        })?;
        Self::retrieve(client, id).await
    }

    /// Invokes a variant-specific action on this resource.
    ///
    /// The action's path and method come from `PATHS`. For POST/PUT actions
    /// `params` is the JSON body; for GET actions its scalar values become
    /// query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::MissingId`] if the snapshot was never saved,
    /// [`ResourceError::PathResolutionFailed`] if the action is not declared,
    /// or a classified [`ResourceError`] from the response.
    async fn perform(
        &self,
        client: &RestClient,
        action: &'static str,
        params: Params,
    ) -> Result<Self, ResourceError> {
        self.perform_as::<Self>(client, action, params)
            .await
            .and_then(require_id)
    }

    /// Like [`perform`](Self::perform), decoding the response as `T`.
    ///
    /// # Errors
    ///
    /// Same as [`perform`](Self::perform).
    async fn perform_as<T: DeserializeOwned>(
        &self,
        client: &RestClient,
        action: &'static str,
        params: Params,
    ) -> Result<T, ResourceError> {
        let id = self.id().ok_or(ResourceError::MissingId {
            resource: Self::NAME,
            operation: action,
        })?;
        let operation = ResourceOperation::Action(action);
        let (method, url) = resolve::<Self>(operation, Some(id))?;

        tracing::debug!(resource = Self::NAME, id, action, "performing action");
        let response = match method {
            HttpMethod::Get | HttpMethod::Delete => {
                dispatch(client, method, &url, None, Some(to_query(&params))).await?
            }
            HttpMethod::Post | HttpMethod::Put => {
                dispatch(client, method, &url, Some(params.into_value()), None).await?
            }
        };
        decode::<T>(&response, Self::NAME, operation, Some(id))
    }
}

/// Looks up and interpolates the path for an operation.
fn resolve<R: Resource>(
    operation: ResourceOperation,
    id: Option<&str>,
) -> Result<(HttpMethod, String), ResourceError> {
    let mut ids: HashMap<&str, &str> = HashMap::new();
    if let Some(id) = id {
        ids.insert("id", id);
    }

    let available_ids: Vec<&str> = ids.keys().copied().collect();
    let path = get_path(R::PATHS, operation, &available_ids).ok_or(
        ResourceError::PathResolutionFailed {
            resource: R::NAME,
            operation: operation.as_str(),
        },
    )?;

    Ok((path.http_method, build_path(path.template, &ids)))
}

async fn dispatch(
    client: &RestClient,
    method: HttpMethod,
    url: &str,
    body: Option<Value>,
    query: Option<HashMap<String, String>>,
) -> Result<HttpResponse, ResourceError> {
    Ok(client
        .send(method, url, body, query.unwrap_or_default())
        .await?)
}

/// Classifies error statuses and decodes 2xx bodies.
fn decode<T: DeserializeOwned>(
    response: &HttpResponse,
    resource: &'static str,
    operation: ResourceOperation,
    id: Option<&str>,
) -> Result<T, ResourceError> {
    if !response.is_ok() {
        return Err(ResourceError::from_http_response(
            response,
            resource,
            operation.as_str(),
            id,
        ));
    }

    if let Some(raw) = response.raw_body() {
        return Err(ResourceError::Decode {
            resource,
            message: format!("expected a JSON object, got {} bytes of text", raw.len()),
        });
    }
    if !response.body.is_object() {
        return Err(ResourceError::Decode {
            resource,
            message: format!("expected a JSON object, got {}", response.body),
        });
    }

    serde_json::from_value(response.body.clone()).map_err(|e| ResourceError::Decode {
        resource,
        message: e.to_string(),
    })
}

/// Rejects a decoded snapshot the server did not identify.
fn require_id<R: Resource>(snapshot: R) -> Result<R, ResourceError> {
    if snapshot.id().is_some() {
        Ok(snapshot)
    } else {
        Err(ResourceError::Decode {
            resource: R::NAME,
            message: "response has no id".to_string(),
        })
    }
}

/// Flattens scalar parameters into query parameters.
fn to_query(params: &Params) -> HashMap<String, String> {
    let mut query = HashMap::new();

    if let Value::Object(map) = params.clone().into_value() {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(_) | Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct MockLabel {
        id: Option<String>,
        label_url: Option<String>,
    }

    impl Resource for MockLabel {
        const NAME: &'static str = "MockLabel";
        const KEY: &'static str = "mock_label";
        const PATHS: &'static [ResourcePath] = &[
            ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "labels"),
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::Retrieve,
                &["id"],
                "labels/{id}",
            ),
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::Action("convert"),
                &["id"],
                "labels/{id}/convert",
            ),
        ];

        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }
    }

    fn ok(body: Value) -> HttpResponse {
        HttpResponse::new(200, HashMap::new(), body)
    }

    #[test]
    fn test_resolve_interpolates_id() {
        let (method, url) =
            resolve::<MockLabel>(ResourceOperation::Retrieve, Some("lbl_1")).unwrap();
        assert_eq!(method, HttpMethod::Get);
        assert_eq!(url, "labels/lbl_1");
    }

    #[test]
    fn test_resolve_fails_for_undeclared_action() {
        let result = resolve::<MockLabel>(ResourceOperation::Action("void"), Some("lbl_1"));
        assert!(matches!(
            result,
            Err(ResourceError::PathResolutionFailed {
                resource: "MockLabel",
                operation: "void"
            })
        ));
    }

    #[test]
    fn test_decode_ignores_unknown_and_defaults_absent_fields() {
        let response = ok(json!({"id": "lbl_1", "object": "PostageLabel", "brand_new": [1]}));
        let label: MockLabel =
            decode(&response, "MockLabel", ResourceOperation::Retrieve, Some("lbl_1")).unwrap();

        assert_eq!(label.id.as_deref(), Some("lbl_1"));
        assert!(label.label_url.is_none());
    }

    #[test]
    fn test_decode_reports_shape_mismatch() {
        let response = ok(json!({"id": 42}));
        let result: Result<MockLabel, _> =
            decode(&response, "MockLabel", ResourceOperation::Retrieve, None);
        assert!(matches!(
            result,
            Err(ResourceError::Decode { resource: "MockLabel", .. })
        ));
    }

    #[test]
    fn test_decode_classifies_error_status() {
        let response = HttpResponse::new(
            404,
            HashMap::new(),
            json!({"error": {"code": "NOT_FOUND", "message": "missing"}}),
        );
        let result: Result<MockLabel, _> =
            decode(&response, "MockLabel", ResourceOperation::Retrieve, Some("lbl_9"));
        assert!(matches!(
            result,
            Err(ResourceError::NotFound { id, .. }) if id == "lbl_9"
        ));
    }

    #[test]
    fn test_reference_requires_id() {
        let unsaved = MockLabel::default();
        assert!(unsaved.reference().is_none());

        let saved = MockLabel {
            id: Some("lbl_1".to_string()),
            ..Default::default()
        };
        assert_eq!(saved.reference(), Some(json!({"id": "lbl_1"})));
    }

    #[test]
    fn test_to_query_flattens_scalars() {
        let params = Params::new()
            .with("file_format", "ZPL")
            .with("page", 2)
            .with("skip", Value::Null);

        let query = to_query(&params);
        assert_eq!(query.get("file_format"), Some(&"ZPL".to_string()));
        assert_eq!(query.get("page"), Some(&"2".to_string()));
        assert!(!query.contains_key("skip"));
    }

    #[tokio::test]
    async fn test_refresh_without_id_fails_locally() {
        use crate::config::{ApiKey, EasyPostConfig};

        let config = EasyPostConfig::builder()
            .api_key(ApiKey::new("EZTK_test").unwrap())
            .build()
            .unwrap();
        let client = RestClient::new(&config).unwrap();

        let result = MockLabel::default().refresh(&client).await;
        assert!(matches!(
            result,
            Err(ResourceError::MissingId {
                resource: "MockLabel",
                operation: "refresh"
            })
        ));
    }
}
