//! Inventory type definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use netbox_api::responses::Device;

/// Site label for devices without a site
pub const UNKNOWN_SITE: &str = "Unknown";

/// Rack label for devices without a rack
pub const NO_RACK: &str = "No Rack";

// ============================================================================
// Device records
// ============================================================================

/// Flattened device view used for filtering and reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    /// NetBox object id
    pub id: u64,
    /// Device name
    pub name: String,
    /// Status value (`active`, `planned`, ...)
    pub status: String,
    /// Site name, if assigned
    pub site: Option<String>,
    /// Rack name, if assigned
    pub rack: Option<String>,
}

impl DeviceRecord {
    /// Create a record with no site or rack
    pub fn new(id: u64, name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: status.into(),
            site: None,
            rack: None,
        }
    }

    /// Assign a site
    #[must_use]
    pub fn in_site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Assign a rack
    #[must_use]
    pub fn in_rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = Some(rack.into());
        self
    }

    /// Site name or the `"Unknown"` fallback
    #[must_use]
    pub fn site_label(&self) -> &str {
        self.site.as_deref().unwrap_or(UNKNOWN_SITE)
    }

    /// Rack name or the `"No Rack"` fallback
    #[must_use]
    pub fn rack_label(&self) -> &str {
        self.rack.as_deref().unwrap_or(NO_RACK)
    }
}

impl From<Device> for DeviceRecord {
    fn from(device: Device) -> Self {
        let status = device.status_value().to_string();
        let name = device
            .name
            .unwrap_or_else(|| format!("Unnamed device #{}", device.id));
        Self {
            id: device.id,
            name,
            status,
            site: device.site.map(|s| s.name),
            rack: device.rack.map(|r| r.name),
        }
    }
}

// ============================================================================
// Grouping
// ============================================================================

/// Device names grouped by site, then rack
///
/// Sites, racks within a site, and devices within a rack all keep the order
/// in which they were first pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceGrouping(IndexMap<String, IndexMap<String, Vec<String>>>);

impl DeviceGrouping {
    /// Create an empty grouping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Group devices in iteration order
    pub fn from_devices<'a>(devices: impl IntoIterator<Item = &'a DeviceRecord>) -> Self {
        let mut grouping = Self::new();
        for device in devices {
            grouping.push(device);
        }
        grouping
    }

    /// Append a device to its (site, rack) bucket, creating either level on first use
    pub fn push(&mut self, device: &DeviceRecord) {
        self.0
            .entry(device.site_label().to_string())
            .or_default()
            .entry(device.rack_label().to_string())
            .or_default()
            .push(device.name.clone());
    }

    /// Site names in first-seen order
    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Rack buckets of one site
    #[must_use]
    pub fn racks(&self, site: &str) -> Option<&IndexMap<String, Vec<String>>> {
        self.0.get(site)
    }

    /// Device names of one (site, rack) bucket
    #[must_use]
    pub fn devices(&self, site: &str, rack: &str) -> Option<&[String]> {
        self.0.get(site)?.get(rack).map(Vec::as_slice)
    }

    /// Number of devices across all buckets
    #[must_use]
    pub fn device_count(&self) -> usize {
        self.0
            .values()
            .flat_map(|racks| racks.values())
            .map(Vec::len)
            .sum()
    }

    /// Render as block-style YAML, keys in insertion order, non-ASCII kept as is
    ///
    /// # Errors
    /// Returns an error if the YAML emitter fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Parse a grouping back from YAML
    ///
    /// # Errors
    /// Returns an error if the text is not a site → rack → names mapping.
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}

impl From<IndexMap<String, IndexMap<String, Vec<String>>>> for DeviceGrouping {
    fn from(map: IndexMap<String, IndexMap<String, Vec<String>>>) -> Self {
        Self(map)
    }
}
