//! Request bodies for object creation

use serde::{Deserialize, Serialize};

use crate::status::DeviceStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManufacturer {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceType {
    pub manufacturer: u64,
    pub model: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeviceRole {
    pub name: String,
    pub slug: String,
    /// Hex colour without the leading `#`
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSite {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRack {
    pub name: String,
    pub site: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDevice {
    pub name: String,
    pub site: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rack: Option<u64>,
    pub status: DeviceStatus,
    pub role: u64,
    pub device_type: u64,
}
