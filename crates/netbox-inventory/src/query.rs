//! Device filter builder

use std::fmt;

use netbox_api::DeviceStatus;

use crate::types::DeviceRecord;

/// Device filter: status, then site if set, then rack if set
///
/// Filters combine with AND, applied in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceQuery {
    status: DeviceStatus,
    site: Option<String>,
    rack: Option<String>,
}

impl DeviceQuery {
    /// Create a query for one status
    #[must_use]
    pub fn new(status: DeviceStatus) -> Self {
        Self {
            status,
            site: None,
            rack: None,
        }
    }

    /// Narrow to a site by name
    #[must_use]
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    /// Narrow to a rack by name
    #[must_use]
    pub fn rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = Some(rack.into());
        self
    }

    #[must_use]
    pub fn status_filter(&self) -> DeviceStatus {
        self.status
    }

    #[must_use]
    pub fn site_filter(&self) -> Option<&str> {
        self.site.as_deref()
    }

    #[must_use]
    pub fn rack_filter(&self) -> Option<&str> {
        self.rack.as_deref()
    }

    /// Whether a site or rack narrows the query beyond status
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        self.site.is_some() || self.rack.is_some()
    }

    /// Check a record against every filter
    #[must_use]
    pub fn matches(&self, device: &DeviceRecord) -> bool {
        if device.status != self.status.as_str() {
            return false;
        }
        if let Some(site) = &self.site
            && device.site.as_deref() != Some(site.as_str())
        {
            return false;
        }
        if let Some(rack) = &self.rack
            && device.rack.as_deref() != Some(rack.as_str())
        {
            return false;
        }
        true
    }

    /// Apply the filters to an in-memory collection, keeping order
    pub fn apply<I>(&self, devices: I) -> Vec<DeviceRecord>
    where
        I: IntoIterator<Item = DeviceRecord>,
    {
        devices.into_iter().filter(|d| self.matches(d)).collect()
    }
}

impl fmt::Display for DeviceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status={}", self.status)?;
        if let Some(site) = &self.site {
            write!(f, " site={site}")?;
        }
        if let Some(rack) = &self.rack {
            write!(f, " rack={rack}")?;
        }
        Ok(())
    }
}
