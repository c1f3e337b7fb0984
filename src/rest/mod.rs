//! REST resource infrastructure for the EasyPost API.
//!
//! This module provides the resource client core:
//!
//! - **[`Resource`] trait**: `create`, `retrieve`, `refresh` and actions,
//!   each returning a new snapshot
//! - **[`Params`]**: the nested parameter mapping sent with create/action calls
//! - **Path building**: a static path table per resource
//! - **[`lowest_rate`]**: cheapest-quote selection with carrier/service filters
//! - **[`wait_until`]**: a cancellable poller with an optional deadline
//! - **[`ResourceError`]**: the classified error taxonomy
//!
//! Individual resources (Shipment, Batch, Pickup, ...) live in the
//! [`resources`] submodule.
//!
//! # Example
//!
//! ```rust,ignore
//! use easypost::rest::{lowest_rate, Params, Resource};
//! use easypost::rest::resources::Shipment;
//! use serde_json::json;
//!
//! let shipment = Shipment::create(
//!     &client,
//!     Params::new()
//!         .with("to_address", json!({"street1": "601 Brasilia Ave", "zip": "64153"}))
//!         .with("from_address", json!({"street1": "164 Townsend St", "zip": "94107"}))
//!         .with("parcel", json!({"weight": 10})),
//! ).await?;
//!
//! for message in shipment.messages() {
//!     println!("{}: {}", message.carrier, message.message);
//! }
//!
//! let rate = shipment.lowest_rate(&["USPS"], &[])?.clone();
//! let shipment = shipment.buy(&client, &rate).await?;
//! ```

mod errors;
mod params;
mod path;
mod poll;
mod resource;
mod selection;

pub mod resources;

// Public exports
pub use errors::{ApiErrorResponse, ErrorPayload, FieldError, NoRatesReason, ResourceError};
pub use params::Params;
pub use path::{build_path, get_path, ResourceOperation, ResourcePath};
pub use poll::{wait_until, PollError, PollOptions, DEFAULT_POLL_INTERVAL};
pub use resource::Resource;
pub use selection::{lowest_rate, Quote};
