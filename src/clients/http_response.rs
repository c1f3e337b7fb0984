//! HTTP response types for the EasyPost API client.
//!
//! This module provides the [`HttpResponse`] type for accessing the status,
//! headers and decoded body of an API response.

use std::collections::HashMap;
use std::time::Duration;

/// Header carrying the platform's request identifier.
pub const HEADER_REQUEST_ID: &str = "x-ep-request-uuid";

/// Key under which a body that is not JSON is kept verbatim.
pub const RAW_BODY_KEY: &str = "raw_body";

/// An HTTP response from the EasyPost API.
///
/// Responses are returned for every status code; whether a non-2xx status is
/// an error is decided by the caller.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    ///
    /// `{}` when the body was empty; `{"raw_body": text}` when it was not JSON.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing the `Retry-After` header.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0);

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `X-Ep-Request-Uuid` header value, if present.
    ///
    /// Include this ID when reporting a problem to EasyPost support.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header(HEADER_REQUEST_ID)
    }

    /// Returns the body text if the server answered with something other
    /// than JSON.
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        self.body.get(RAW_BODY_KEY).and_then(serde_json::Value::as_str)
    }

    /// Returns the `Retry-After` delay, if the server sent one.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_request_after.map(Duration::from_secs_f64)
    }

    /// Returns the `Deprecation` header value, if the endpoint is deprecated.
    #[must_use]
    pub fn deprecation(&self) -> Option<&str> {
        self.header("deprecation")
    }
}
