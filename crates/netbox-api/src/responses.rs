//! Response types returned by the NetBox API

use serde::{Deserialize, Serialize};

/// Paginated list envelope (`GET /api/<app>/<model>/`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    /// Missing `results` is treated as an empty page
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Choice field as rendered by NetBox (`{"value": "active", "label": "Active"}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceValue {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Brief nested representation of a related object (site, rack, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedRef {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Device as returned by `dcim/devices/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<ChoiceValue>,
    #[serde(default)]
    pub site: Option<NestedRef>,
    #[serde(default)]
    pub rack: Option<NestedRef>,
}

impl Device {
    /// Status value, or `"unknown"` when the device has none
    #[must_use]
    pub fn status_value(&self) -> &str {
        self.status
            .as_ref()
            .map_or(crate::status::UNKNOWN_STATUS, |s| s.value.as_str())
    }
}

/// Minimal body of a `201 Created` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Created {
    pub id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_results_is_empty() {
        let page: Paginated<Device> = serde_json::from_str("{}").unwrap();
        assert!(page.results.is_empty());
        assert!(page.next.is_none());
    }

    #[test]
    fn test_device_with_nulls() {
        let json = r#"{"id": 7, "name": null, "status": null, "site": null, "rack": null}"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.id, 7);
        assert!(device.name.is_none());
        assert_eq!(device.status_value(), "unknown");
    }

    #[test]
    fn test_device_full() {
        let json = r#"{
            "id": 1,
            "name": "Device 1",
            "status": {"value": "active", "label": "Active"},
            "site": {"id": 3, "name": "Site A", "slug": "site-a"},
            "rack": {"id": 9, "name": "Rack 1"},
            "serial": "ignored"
        }"#;
        let device: Device = serde_json::from_str(json).unwrap();
        assert_eq!(device.status_value(), "active");
        assert_eq!(device.site.as_ref().map(|s| s.name.as_str()), Some("Site A"));
        assert_eq!(device.rack.as_ref().and_then(|r| r.slug.clone()), None);
    }
}
