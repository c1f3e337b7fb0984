//! Outgoing request description.
//!
//! EasyPost accepts JSON bodies on `POST` and `PUT`, and reads parameters
//! of `GET` and `DELETE` from the query string. [`HttpRequest`] enforces that
//! split when it is built, so a malformed request never reaches the network.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the EasyPost API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Reads a resource.
    Get,
    /// Creates a resource or invokes an action on one.
    Post,
    /// Replaces a resource's attributes.
    Put,
    /// Deletes a resource.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` if requests with this method carry a JSON body.
    ///
    /// The other methods send their parameters as a query string.
    #[must_use]
    pub const fn sends_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated request, ready for [`HttpClient::request`](crate::clients::HttpClient::request).
///
/// # Example
///
/// ```rust
/// use easypost::clients::{HttpMethod, HttpRequest};
/// use serde_json::json;
///
/// let label = HttpRequest::builder(HttpMethod::Get, "shipments/shp_123/label")
///     .query_param("file_format", "ZPL")
///     .build()
///     .unwrap();
/// assert_eq!(label.query, vec![("file_format".to_string(), "ZPL".to_string())]);
///
/// let buy = HttpRequest::builder(HttpMethod::Post, "shipments/shp_123/buy")
///     .body(json!({"rate": {"id": "rate_456"}}))
///     .build()
///     .unwrap();
/// assert!(buy.body.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub http_method: HttpMethod,
    /// Path relative to the versioned base URL, e.g. `batches/batch_1/buy`.
    pub path: String,
    /// JSON body; present exactly when the method sends one.
    pub body: Option<Value>,
    /// Query parameters, sorted by key so URLs are reproducible.
    pub query: Vec<(String, String)>,
    /// Headers added to the client's defaults, overriding on conflict.
    pub headers: HashMap<String, String>,
    /// Attempts allowed for 429/5xx responses; at least 1.
    pub tries: u32,
}

impl HttpRequest {
    /// Starts building a request.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder {
            http_method: method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            headers: HashMap::new(),
            tries: 1,
        }
    }

    /// Checks that the body matches the method.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::MissingBody`] for a `POST` or `PUT`
    /// without a body, and [`InvalidHttpRequestError::UnexpectedBody`] for a
    /// `GET` or `DELETE` with one.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        match (self.http_method.sends_body(), self.body.is_some()) {
            (true, false) => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method,
            }),
            (false, true) => Err(InvalidHttpRequestError::UnexpectedBody {
                method: self.http_method,
            }),
            _ => Ok(()),
        }
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    body: Option<Value>,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    tries: u32,
}

impl HttpRequestBuilder {
    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Value>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds every entry of `query`.
    #[must_use]
    pub fn query(self, query: HashMap<String, String>) -> Self {
        query
            .into_iter()
            .fold(self, |builder, (key, value)| builder.query_param(key, value))
    }

    /// Adds one query parameter, replacing an earlier value for `key`.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.query.retain(|(existing, _)| *existing != key);
        self.query.push((key, value.into()));
        self
    }

    /// Adds one header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Allows up to `tries` attempts when the server answers 429 or 5xx.
    ///
    /// Resource operations always send a single attempt; raising this is a
    /// caller decision.
    #[must_use]
    pub const fn tries(mut self, tries: u32) -> Self {
        self.tries = tries;
        self
    }

    /// Validates and returns the request.
    ///
    /// # Errors
    ///
    /// See [`HttpRequest::verify`].
    pub fn build(mut self) -> Result<HttpRequest, InvalidHttpRequestError> {
        self.query.sort();

        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            body: self.body,
            query: self.query,
            headers: self.headers,
            tries: self.tries.max(1),
        };
        request.verify()?;
        Ok(request)
    }
}
