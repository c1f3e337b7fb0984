//! EasyPost resource implementations.
//!
//! Each resource is a plain serde struct implementing
//! [`Resource`](crate::rest::Resource), plus its own actions.
//!
//! # Available Resources
//!
//! | Resource | Create | Actions |
//! |----------|--------|---------|
//! | [`Address`] | yes | |
//! | [`Parcel`] | yes | |
//! | [`Rate`] | no | |
//! | [`Shipment`] | yes | `buy`, `label`, `lowest_rate` |
//! | [`Tracker`] | yes | |
//! | [`Batch`] | yes | `add_shipments`, `remove_shipments`, `buy`, `create_scan_form`, `label` |
//! | [`ScanForm`] | yes | |
//! | [`Pickup`] | yes | `buy`, `cancel`, `lowest_rate` |
//! | [`Order`] | yes | `buy`, `lowest_rate` |
//! | [`CarrierAccount`] | yes | |
//! | [`Event`] | no | |
//!
//! Every resource supports `retrieve` and `refresh`.
//!
//! # Nested Types
//!
//! [`PostageLabel`], [`Message`], [`TrackingDetail`], [`TrackingLocation`],
//! [`PickupRate`] and [`BatchShipment`] only appear inside other resources.

mod address;
mod batch;
mod carrier_account;
mod common;
mod event;
mod order;
mod parcel;
mod pickup;
mod rate;
mod scan_form;
mod shipment;
mod tracker;

pub use address::Address;
pub use batch::{Batch, BatchShipment, BatchState};
pub use carrier_account::CarrierAccount;
pub use common::{LabelFormat, Message, PostageLabel};
pub use event::Event;
pub use order::Order;
pub use parcel::Parcel;
pub use pickup::{Pickup, PickupRate, PickupStatus};
pub use rate::Rate;
pub use scan_form::ScanForm;
pub use shipment::Shipment;
pub use tracker::{Tracker, TrackerStatus, TrackingDetail, TrackingLocation};
