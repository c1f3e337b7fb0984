//! REST API client for the EasyPost API.
//!
//! This module provides a higher-level REST API client built on top of the
//! [`HttpClient`](crate::clients::HttpClient). Resource types in
//! [`crate::rest`] drive all of their requests through it.
//!
//! # Overview
//!
//! - [`RestClient`]: `send()` for any method, plus `get()` and `post()` shorthands
//! - [`RestError`]: Error type for REST API operations
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::{ApiKey, EasyPostConfig, RestClient};
//! use easypost::clients::rest::Query;
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK_test")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let response = client.get("trackers/trk_123", Query::new()).await?;
//! println!("Tracker: {}", response.body);
//! ```
//!
//! # Path Normalization
//!
//! - Leading slashes are stripped: `/shipments` -> `shipments`
//! - Trailing slashes are stripped: `shipments/` -> `shipments`
//! - Empty paths, absolute URLs and paths with a query string are rejected
//!   with [`RestError::InvalidPath`]

mod client;
mod errors;

pub use client::{Query, RestClient};
pub use errors::RestError;
