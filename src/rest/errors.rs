//! Resource-specific error types for REST API operations.
//!
//! This module classifies API responses into semantic error variants so that
//! callers can decide what to do without inspecting status codes:
//!
//! - **401/403**: [`ResourceError::Authentication`] - fatal for the credentials
//! - **404**: [`ResourceError::NotFound`] - the identifier does not exist
//! - **409**, or an error code naming an invalid state:
//!   [`ResourceError::InvalidState`] - the resource's state forbids the action
//! - **429**: [`ResourceError::RateLimited`] - retry after backoff
//! - **5xx**: [`ResourceError::Server`] - retry later
//! - **Other 4xx**: [`ResourceError::Validation`] - fix the input
//!
//! Network failures arrive as [`ResourceError::Transport`]. Some conditions are
//! raised locally without a request: [`ResourceError::InvalidState`] from a
//! snapshot guard, [`ResourceError::NoRatesAvailable`] from rate selection, and
//! [`ResourceError::MissingId`] for unsaved snapshots.
//!
//! Every server-reported error keeps the original status, structured payload
//! and request ID in an [`ApiErrorResponse`].
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{Resource, ResourceError};
//!
//! match Shipment::retrieve(&client, "shp_123").await {
//!     Ok(shipment) => println!("Found: {:?}", shipment.id),
//!     Err(ResourceError::NotFound { resource, id, .. }) => {
//!         println!("{resource} {id} does not exist");
//!     }
//!     Err(ResourceError::Validation { response, .. }) => {
//!         for field in &response.payload.errors {
//!             println!("{}: {}", field.field, field.message);
//!         }
//!     }
//!     Err(e) if e.is_retryable() => println!("try again later: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::clients::{HttpError, HttpResponse, RestError};

/// A single per-field validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field, e.g. `shipment.to_address.zip`.
    #[serde(default)]
    pub field: String,
    /// What is wrong with it.
    #[serde(default)]
    pub message: String,
}

/// The structured error body returned with 4xx/5xx responses.
///
/// EasyPost wraps it as `{"error": {"code", "message", "errors"}}`; a bare
/// `{"code", "message", "errors"}` object is accepted too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Machine-readable error code, e.g. `PARAMETER.REQUIRED`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Per-field errors, possibly empty.
    pub errors: Vec<FieldError>,
}

impl ErrorPayload {
    /// Parses an error payload from a response body.
    ///
    /// Missing fields become empty strings. A `message` that is not a string
    /// (some endpoints return a list) is joined with `", "`. `errors` entries
    /// may be `{field, message}` objects or plain strings.
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        let inner = match body.get("error") {
            Some(error @ Value::Object(_)) => error,
            Some(Value::String(message)) => {
                return Self {
                    message: message.clone(),
                    ..Self::default()
                }
            }
            _ => body,
        };

        let code = inner
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let message = match inner.get("message") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Array(parts)) => parts
                .iter()
                .map(|p| p.as_str().map_or_else(|| p.to_string(), ToString::to_string))
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let errors = match inner.get("errors") {
            Some(Value::Array(entries)) => entries.iter().filter_map(parse_field_error).collect(),
            _ => Vec::new(),
        };

        Self {
            code,
            message,
            errors,
        }
    }
}

fn parse_field_error(entry: &Value) -> Option<FieldError> {
    match entry {
        Value::Object(_) => serde_json::from_value(entry.clone()).ok(),
        Value::String(message) => Some(FieldError {
            field: String::new(),
            message: message.clone(),
        }),
        _ => None,
    }
}

/// A server-reported error, preserved unchanged for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The structured error payload.
    pub payload: ErrorPayload,
    /// The `X-Ep-Request-Uuid` header value, if present.
    pub request_id: Option<String>,
}

impl ApiErrorResponse {
    /// Builds an `ApiErrorResponse` from a received response.
    #[must_use]
    pub fn from_http_response(response: &HttpResponse) -> Self {
        Self {
            status: response.code,
            payload: ErrorPayload::from_body(&response.body),
            request_id: response.request_id().map(ToString::to_string),
        }
    }
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if !self.payload.code.is_empty() {
            write!(f, " {}", self.payload.code)?;
        }
        if !self.payload.message.is_empty() {
            write!(f, ": {}", self.payload.message)?;
        }
        Ok(())
    }
}

/// Why rate selection found nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoRatesReason {
    /// The rate list was empty before any filter was applied.
    EmptyRateList,
    /// Rates existed, but none matched the carrier/service filters.
    NoMatch {
        /// The carrier filter that was applied (empty = any).
        carriers: Vec<String>,
        /// The service filter that was applied (empty = any).
        services: Vec<String>,
    },
}

impl fmt::Display for NoRatesReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRateList => f.write_str("no rates were quoted"),
            Self::NoMatch { carriers, services } => write!(
                f,
                "no rate matched carriers {carriers:?} and services {services:?}"
            ),
        }
    }
}

/// Error type for REST resource operations.
///
/// # Example
///
/// ```rust
/// use easypost::rest::{NoRatesReason, ResourceError};
///
/// let error = ResourceError::NoRatesAvailable {
///     reason: NoRatesReason::EmptyRateList,
/// };
/// assert!(error.to_string().contains("no rates"));
///
/// let error = ResourceError::InvalidState {
///     resource: "Pickup",
///     operation: "cancel",
///     state: Some("unknown".to_string()),
///     response: None,
/// };
/// assert!(error.to_string().contains("unknown"));
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The request was rejected as invalid (4xx with field errors).
    #[error("{resource} request rejected: {response}")]
    Validation {
        /// The resource type name.
        resource: &'static str,
        /// The server's error response.
        response: ApiErrorResponse,
    },

    /// The resource was not found (HTTP 404).
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The resource type name (e.g., "Shipment").
        resource: &'static str,
        /// The ID that was requested.
        id: String,
        /// The server's error response.
        response: ApiErrorResponse,
    },

    /// The credentials were rejected (HTTP 401/403).
    #[error("Authentication failed: {response}")]
    Authentication {
        /// The server's error response.
        response: ApiErrorResponse,
    },

    /// Too many requests (HTTP 429).
    #[error("Rate limited: {response}")]
    RateLimited {
        /// How long the server asked callers to wait, if it said.
        retry_after: Option<Duration>,
        /// The server's error response.
        response: ApiErrorResponse,
    },

    /// The server failed (HTTP 5xx), or answered with a status the API
    /// never uses on success or failure (1xx, 3xx).
    #[error("Server error: {response}")]
    Server {
        /// The server's error response.
        response: ApiErrorResponse,
    },

    /// The resource's current state forbids the operation.
    ///
    /// `response` is `None` when the condition was detected locally from the
    /// snapshot, without a request being sent.
    #[error("{resource} cannot {operation}: {}", invalid_state_detail(.state.as_deref(), .response.as_ref()))]
    InvalidState {
        /// The resource type name.
        resource: &'static str,
        /// The operation that was attempted.
        operation: &'static str,
        /// The state observed on the snapshot, when known.
        state: Option<String>,
        /// The server's error response, when server-raised.
        response: Option<ApiErrorResponse>,
    },

    /// Rate selection found no candidate.
    #[error("No rates available: {reason}")]
    NoRatesAvailable {
        /// Whether the list was empty or the filters excluded everything.
        reason: NoRatesReason,
    },

    /// The operation needs an identifier, but the snapshot has none.
    #[error("{resource}::{operation} requires a saved resource with an id")]
    MissingId {
        /// The resource type name.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// No path is declared for the operation.
    #[error("Cannot resolve path for {resource}::{operation} with provided IDs")]
    PathResolutionFailed {
        /// The resource type name.
        resource: &'static str,
        /// The operation being attempted.
        operation: &'static str,
    },

    /// A 2xx response body did not match the resource's shape.
    #[error("Failed to decode {resource} response: {message}")]
    Decode {
        /// The resource type name.
        resource: &'static str,
        /// The decoder's message.
        message: String,
    },

    /// No response was received (connection, timeout) or the request was malformed.
    #[error(transparent)]
    Transport(#[from] RestError),
}

fn invalid_state_detail(state: Option<&str>, response: Option<&ApiErrorResponse>) -> String {
    match (state, response) {
        (_, Some(response)) => response.to_string(),
        (Some(state), None) => format!("current state is '{state}'"),
        (None, None) => "current state does not allow it".to_string(),
    }
}

impl From<HttpError> for ResourceError {
    fn from(error: HttpError) -> Self {
        Self::Transport(RestError::Http(error))
    }
}

impl ResourceError {
    /// Classifies a non-2xx HTTP response.
    ///
    /// Redirects are followed by the transport, so a 1xx or 3xx status that
    /// still arrives here is unexpected and reported as [`Self::Server`].
    ///
    /// # Arguments
    ///
    /// * `response` - The received response
    /// * `resource` - The resource type name (e.g., "Batch")
    /// * `operation` - The operation that was attempted (e.g., "buy")
    /// * `id` - The resource ID, if the request targeted one
    ///
    /// # Example
    ///
    /// ```rust
    /// use easypost::clients::HttpResponse;
    /// use easypost::rest::ResourceError;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let response = HttpResponse::new(
    ///     404,
    ///     HashMap::new(),
    ///     json!({"error": {"code": "NOT_FOUND", "message": "not found", "errors": []}}),
    /// );
    /// let error = ResourceError::from_http_response(&response, "Tracker", "retrieve", Some("trk_1"));
    /// assert!(matches!(error, ResourceError::NotFound { .. }));
    /// ```
    #[must_use]
    pub fn from_http_response(
        response: &HttpResponse,
        resource: &'static str,
        operation: &'static str,
        id: Option<&str>,
    ) -> Self {
        let api = ApiErrorResponse::from_http_response(response);
        match response.code {
            401 | 403 => Self::Authentication { response: api },
            404 => Self::NotFound {
                resource,
                id: id.unwrap_or("unknown").to_string(),
                response: api,
            },
            429 => Self::RateLimited {
                retry_after: response.retry_after(),
                response: api,
            },
            code if code >= 500 || code < 400 => Self::Server { response: api },
            code if code == 409 || names_invalid_state(&api.payload.code) => Self::InvalidState {
                resource,
                operation,
                state: None,
                response: Some(api),
            },
            _ => Self::Validation {
                resource,
                response: api,
            },
        }
    }

    /// Returns the server's error response, for server-reported errors.
    #[must_use]
    pub const fn api_response(&self) -> Option<&ApiErrorResponse> {
        match self {
            Self::Validation { response, .. }
            | Self::NotFound { response, .. }
            | Self::Authentication { response }
            | Self::RateLimited { response, .. }
            | Self::Server { response } => Some(response),
            Self::InvalidState { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Returns the HTTP status code, for server-reported errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.api_response().map(|r| r.status)
    }

    /// Returns the platform error code, for server-reported errors.
    #[must_use]
    pub fn error_code(&self) -> Option<&str> {
        self.api_response()
            .map(|r| r.payload.code.as_str())
            .filter(|code| !code.is_empty())
    }

    /// Returns the request ID if available.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.api_response().and_then(|r| r.request_id.as_deref())
    }

    /// Returns `true` if the same request may succeed when retried later.
    ///
    /// This covers rate limiting, server errors and network failures.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        if let Self::Server { response } = self {
            return response.status >= 500;
        }
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::Transport(RestError::Http(HttpError::Network(_)))
        )
    }
}

fn names_invalid_state(code: &str) -> bool {
    let code = code.to_ascii_uppercase();
    code.contains("INVALID_STATE") || code.contains("INVALID_STATUS")
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
