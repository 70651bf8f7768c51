//! Shipment lifecycle engine and shipping ID generation.

pub mod service;
pub mod shipping_id;

pub use service::{CreateShipmentRequest, ShipmentDetail, ShipmentService};
