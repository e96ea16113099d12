//! Device counts by status

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{error, info, instrument};

use netbox_api::responses::Device;
use netbox_client::NetboxClient;

/// Result of a device count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeviceCount {
    /// Devices with one status
    Total { status: String, count: usize },
    /// Devices per status value, in first-seen order
    ByStatus(IndexMap<String, usize>),
}

impl DeviceCount {
    /// Tally devices per status; devices without one count as `"unknown"`
    #[must_use]
    pub fn by_status(devices: &[Device]) -> Self {
        let mut counts = IndexMap::new();
        for device in devices {
            *counts.entry(device.status_value().to_string()).or_insert(0) += 1;
        }
        DeviceCount::ByStatus(counts)
    }

    /// Number of devices counted
    #[must_use]
    pub fn total(&self) -> usize {
        match self {
            DeviceCount::Total { count, .. } => *count,
            DeviceCount::ByStatus(counts) => counts.values().sum(),
        }
    }

    /// Count for one status value
    #[must_use]
    pub fn get(&self, status: &str) -> Option<usize> {
        match self {
            DeviceCount::Total { status: s, count } => (s == status).then_some(*count),
            DeviceCount::ByStatus(counts) => counts.get(status).copied(),
        }
    }

    /// Text printed for the operator
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            DeviceCount::Total { status, count } => {
                format!("Total devices with status '{status}': {count}")
            }
            DeviceCount::ByStatus(counts) => {
                let json = serde_json::to_string_pretty(counts).unwrap_or_else(|_| "{}".to_string());
                format!("Device count by status:\n{json}")
            }
        }
    }
}

impl fmt::Display for DeviceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Count devices, optionally for one status
///
/// Returns `None` when NetBox cannot be reached or answers with an error;
/// the failure is logged, never propagated.
#[instrument(skip(client))]
pub async fn count_devices(client: &NetboxClient, status: Option<&str>) -> Option<DeviceCount> {
    let mut request = client.list_devices();
    if let Some(status) = status {
        request = request.status(status);
    }

    let devices = match request.send().await {
        Ok(devices) => devices,
        Err(e) if e.is_connectivity() => {
            error!(error = %e, status = ?e.status(), "error connecting to NetBox");
            return None;
        }
        Err(e) => {
            error!(error = %e, "unreadable device list from NetBox");
            return None;
        }
    };

    let count = match status {
        Some(status) => DeviceCount::Total {
            status: status.to_string(),
            count: devices.len(),
        },
        None => DeviceCount::by_status(&devices),
    };
    info!(total = count.total(), "counted devices");
    Some(count)
}
