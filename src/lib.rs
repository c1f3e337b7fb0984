//! # EasyPost API Rust Client
//!
//! An async Rust client for the EasyPost shipping API, modelling remote
//! resources (addresses, parcels, shipments, rates, trackers, batches,
//! pickups, orders) as typed snapshots.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`EasyPostConfig`] and [`EasyPostConfigBuilder`]
//! - An async HTTP transport with Basic authentication
//! - The [`Resource`](rest::Resource) trait: `create`, `retrieve`, `refresh`
//!   and actions, each returning a new snapshot
//! - Cheapest-rate selection with carrier/service filters
//! - A cancellable poller for asynchronous workflows (batch purchase,
//!   scan forms) with an optional deadline
//! - A classified error taxonomy ([`ResourceError`](rest::ResourceError))
//! - Webhook signature verification
//!
//! ## Quick Start
//!
//! ```rust
//! use easypost::{ApiKey, EasyPostConfig};
//!
//! let config = EasyPostConfig::builder()
//!     .api_key(ApiKey::new("EZTK_your_test_key").unwrap())
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Buying a Shipment
//!
//! ```rust,ignore
//! use easypost::{ApiKey, EasyPostConfig, RestClient};
//! use easypost::rest::{Params, Resource};
//! use easypost::rest::resources::Shipment;
//! use serde_json::json;
//!
//! let client = RestClient::new(&config)?;
//!
//! let shipment = Shipment::create(
//!     &client,
//!     Params::new()
//!         .with("to_address", json!({"street1": "601 Brasilia Ave", "city": "Kansas City", "state": "MO", "zip": "64153", "country": "US"}))
//!         .with("from_address", json!({"street1": "164 Townsend St", "city": "San Francisco", "state": "CA", "zip": "94107", "country": "US"}))
//!         .with("parcel", json!({"length": 10.8, "width": 8.3, "height": 6, "weight": 10})),
//! ).await?;
//!
//! // Carriers that could not quote leave messages, not errors
//! for message in shipment.messages() {
//!     println!("{:?}: {}", message.carrier, message.message);
//! }
//!
//! let rate = shipment.lowest_rate(&["USPS"], &[])?.clone();
//! let shipment = shipment.buy(&client, &rate).await?;
//! ```
//!
//! ## Waiting for a Batch
//!
//! ```rust,ignore
//! use easypost::rest::{PollError, PollOptions};
//! use easypost::rest::resources::BatchState;
//! use std::time::Duration;
//!
//! let batch = batch.buy(&client).await?;
//! let options = PollOptions::default().deadline(Duration::from_secs(300));
//!
//! match batch.wait_until_state(&client, BatchState::Purchased, &options).await {
//!     Ok(batch) => println!("{} shipments purchased", batch.shipments.len()),
//!     Err(PollError::Timeout { last, .. }) => println!("still {}", last.state),
//!     Err(PollError::Resource(e)) => eprintln!("refresh failed: {e}"),
//! }
//! ```
//!
//! ## Design Principles
//!
//! - **Snapshots, not handles**: every operation returns a new value; rebind it
//! - **Messages are data**: per-carrier failures are exposed via accessors
//! - **No hidden retries**: classified errors tell the caller what to retry
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio runtime

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

// Re-export public types at crate root for convenience
pub use config::{ApiKey, ApiVersion, BaseUrl, EasyPostConfig, EasyPostConfigBuilder, WebhookSecret};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, RestClient, RestError,
};
