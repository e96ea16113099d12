//! Device status values

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status label used when a device carries no status at all
pub const UNKNOWN_STATUS: &str = "unknown";

/// Device lifecycle states a report can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceStatus {
    /// In service
    Active,
    /// Not yet deployed
    Planned,
    /// Removed from service
    Decommissioned,
}

impl DeviceStatus {
    /// All selectable statuses, in display order
    pub const ALL: [DeviceStatus; 3] = [
        DeviceStatus::Active,
        DeviceStatus::Planned,
        DeviceStatus::Decommissioned,
    ];

    /// API value (`active`, `planned`, ...)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Planned => "planned",
            DeviceStatus::Decommissioned => "decommissioned",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the selectable statuses
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid device status '{0}' (expected one of: active, planned, decommissioned)")]
pub struct ParseStatusError(pub String);

impl FromStr for DeviceStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeviceStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        assert_eq!("active".parse::<DeviceStatus>(), Ok(DeviceStatus::Active));
        assert_eq!("Planned".parse::<DeviceStatus>(), Ok(DeviceStatus::Planned));
        assert_eq!(
            " decommissioned ".parse::<DeviceStatus>(),
            Ok(DeviceStatus::Decommissioned)
        );
    }

    #[test]
    fn test_parse_invalid_status() {
        let err = "offline".parse::<DeviceStatus>().unwrap_err();
        assert_eq!(err, ParseStatusError("offline".to_string()));
        assert!(err.to_string().contains("offline"));
    }

    #[test]
    fn test_display_matches_api_value() {
        for status in DeviceStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
        }
    }
}
