//! HTTP client types for EasyPost API communication.
//!
//! This module provides the transport layer for making authenticated
//! requests to the EasyPost API. It handles request/response processing,
//! credentials, timeouts and opt-in retries.
//!
//! # Overview
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A parsed response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`rest::RestClient`]: Higher-level REST API client used by resources
//! - [`rest::RestError`]: REST-specific error types
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::{ApiKey, EasyPostConfig};
//! use easypost::clients::{HttpClient, HttpRequest, HttpMethod};
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK_test")?)
//!     .build()?;
//! let client = HttpClient::new(&config)?;
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "trackers/trk_123").build()?;
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The default `tries` is 1, meaning no automatic retries. When raised via
//! [`HttpRequestBuilder::tries`]:
//!
//! - **429 (Rate Limited)**: Retries using `Retry-After`, or 1 second if absent
//! - **5xx (Server Error)**: Retries with a fixed 1-second delay
//! - **Other statuses**: Returned immediately
//!
//! Once attempts are exhausted the last response is returned as-is.

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::{HttpResponse, HEADER_REQUEST_ID, RAW_BODY_KEY};

pub use rest::{RestClient, RestError};
