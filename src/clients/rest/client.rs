//! REST client implementation for the EasyPost API.

use std::collections::HashMap;

use serde_json::{json, Value};

use crate::clients::rest::RestError;
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ApiVersion, EasyPostConfig};
use crate::error::ConfigError;

/// Parameters sent as the query string of a `GET` or `DELETE`.
pub type Query = HashMap<String, String>;

/// REST API client for the EasyPost API.
///
/// Every resource operation goes through [`send`](Self::send). Non-2xx
/// responses come back as [`HttpResponse`] values; resource types classify
/// them into [`ResourceError`](crate::rest::ResourceError)s.
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync`. Share one instance (behind an `Arc` if
/// needed) across tasks; it pools connections.
///
/// # Example
///
/// ```rust,ignore
/// use easypost::{ApiKey, EasyPostConfig, HttpMethod, RestClient};
/// use easypost::clients::rest::Query;
/// use serde_json::json;
///
/// let config = EasyPostConfig::builder()
///     .api_key(ApiKey::new("EZTK_test")?)
///     .build()?;
/// let client = RestClient::new(&config)?;
///
/// let response = client
///     .send(HttpMethod::Post, "parcels", Some(json!({"parcel": {"weight": 10}})), Query::new())
///     .await?;
/// ```
#[derive(Debug)]
pub struct RestClient {
    http_client: HttpClient,
    api_version: ApiVersion,
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a new REST client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientInit`] if the HTTP client cannot be built.
    pub fn new(config: &EasyPostConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(
            base_uri = http_client.base_uri(),
            "constructed EasyPost REST client"
        );

        Ok(Self {
            http_client,
            api_version: config.api_version().clone(),
        })
    }

    /// Returns the API version being used by this client.
    #[must_use]
    pub const fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// Returns the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Sends one request and returns whatever the server answered.
    ///
    /// `body` is used by `POST` and `PUT` only, defaulting to `{}`; `query`
    /// is appended for every method.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::InvalidPath`] if `path` is not a relative API path.
    /// Returns [`RestError::Http`] if no response could be received.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Query,
    ) -> Result<HttpResponse, RestError> {
        self.send_with_tries(method, path, body, query, 1).await
    }

    /// Like [`send`](Self::send), retrying 429 and 5xx answers up to `tries`
    /// attempts in total.
    ///
    /// Only use this for requests that are safe to repeat.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_with_tries(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: Query,
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        let path = normalize_path(path)?;

        let mut builder = HttpRequest::builder(method, path)
            .query(query)
            .tries(tries);
        if method.sends_body() {
            builder = builder.body(body.unwrap_or_else(|| json!({})));
        }

        let request = builder.build().map_err(|e| RestError::Http(e.into()))?;
        Ok(self.http_client.request(request).await?)
    }

    /// Sends a `GET` for `path`.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn get(&self, path: &str, query: Query) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Get, path, None, query).await
    }

    /// Sends a `GET`, retrying 429 and 5xx answers.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn get_with_tries(
        &self,
        path: &str,
        query: Query,
        tries: u32,
    ) -> Result<HttpResponse, RestError> {
        self.send_with_tries(HttpMethod::Get, path, None, query, tries)
            .await
    }

    /// Sends a `POST` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn post(&self, path: &str, body: Value) -> Result<HttpResponse, RestError> {
        self.send(HttpMethod::Post, path, Some(body), Query::new())
            .await
    }
}

/// Normalizes a REST API path.
///
/// Strips surrounding `/` characters. The result must be a relative path
/// without a query string; query parameters travel separately.
fn normalize_path(path: &str) -> Result<String, RestError> {
    let trimmed = path.trim().trim_matches('/');

    let reason = if trimmed.is_empty() {
        Some("path is empty")
    } else if trimmed.contains("://") {
        Some("expected a path relative to the API base URL")
    } else if trimmed.contains(['?', '#']) {
        Some("query parameters go in the query map")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(RestError::InvalidPath {
            path: path.to_string(),
            reason,
        }),
        None => Ok(trimmed.to_string()),
    }
}
