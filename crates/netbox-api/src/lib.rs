//! netbox-api: Shared NetBox REST types
//!
//! Contains the request bodies, list/response payloads, and status values
//! used by the client, the inventory tooling, and the CLI.

pub mod requests;
pub mod responses;
pub mod status;

pub use status::{DeviceStatus, ParseStatusError};
