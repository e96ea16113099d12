//! Device report: devices of one status grouped by site and rack, as YAML

use async_trait::async_trait;
use tracing::{debug, instrument};

use netbox_api::DeviceStatus;

use crate::error::InventoryError;
use crate::query::DeviceQuery;
use crate::script::{Script, ScriptLog, ScriptMeta};
use crate::source::DeviceSource;
use crate::types::DeviceGrouping;

/// Logged and returned when neither site nor rack is given
pub const MISSING_FILTER_MESSAGE: &str = "At least one additional filter (Site or Rack) must be selected.";

/// Returned when the filters match nothing
pub const NO_DEVICES_MESSAGE: &str = "No devices found.";

/// Parameters the host passes to the report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportParams {
    /// Required status filter
    pub status: DeviceStatus,
    /// Site name
    pub site: Option<String>,
    /// Rack name
    pub rack: Option<String>,
}

impl ReportParams {
    #[must_use]
    pub fn new(status: DeviceStatus) -> Self {
        Self {
            status,
            site: None,
            rack: None,
        }
    }

    #[must_use]
    pub fn site(mut self, site: impl Into<String>) -> Self {
        self.site = Some(site.into());
        self
    }

    #[must_use]
    pub fn rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = Some(rack.into());
        self
    }

    /// Build the device query, or reject a status-only filter set
    ///
    /// # Errors
    /// Returns [`InventoryError::Validation`] if neither site nor rack is set.
    pub fn query(&self) -> Result<DeviceQuery, InventoryError> {
        let mut query = DeviceQuery::new(self.status);
        if let Some(site) = &self.site {
            query = query.site(site.clone());
        }
        if let Some(rack) = &self.rack {
            query = query.rack(rack.clone());
        }
        if !query.is_narrowed() {
            return Err(InventoryError::Validation(MISSING_FILTER_MESSAGE.to_string()));
        }
        Ok(query)
    }
}

/// Every way a report run can end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Rendered YAML report
    Success(String),
    /// Filters matched no device
    NoResults(String),
    /// Filters rejected: neither site nor rack given, or a rack name that
    /// needs a site to pick one rack. No device query ran.
    ValidationError(String),
    /// Query or rendering failed; the detail was logged as a failure
    UnexpectedError(String),
}

impl ReportOutcome {
    /// Text handed back to the host; `None` when the run failed unexpectedly
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self {
            ReportOutcome::Success(yaml) => Some(yaml.clone()),
            ReportOutcome::NoResults(message) => Some(message.clone()),
            ReportOutcome::ValidationError(message) => Some(format!("Error: {message}")),
            ReportOutcome::UnexpectedError(_) => None,
        }
    }
}

/// Report generator over any [`DeviceSource`]
pub struct DeviceReport<S> {
    source: S,
}

impl<S: DeviceSource> DeviceReport<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Query and group; failures surface as `InventoryError`
    async fn build(&self, query: &DeviceQuery) -> Result<Option<DeviceGrouping>, InventoryError> {
        let devices = self.source.devices(query).await?;
        if devices.is_empty() {
            return Ok(None);
        }
        debug!(count = devices.len(), "grouping devices");
        Ok(Some(DeviceGrouping::from_devices(&devices)))
    }

    /// Run the report against `log`
    #[instrument(skip(self, log))]
    pub async fn generate(&self, params: &ReportParams, log: &dyn ScriptLog) -> ReportOutcome {
        let query = match params.query() {
            Ok(query) => query,
            Err(_) => {
                log.log_failure(MISSING_FILTER_MESSAGE);
                return ReportOutcome::ValidationError(MISSING_FILTER_MESSAGE.to_string());
            }
        };

        let rendered = match self.build(&query).await {
            Ok(None) => {
                log.log_warning("No devices found matching the filters.");
                return ReportOutcome::NoResults(NO_DEVICES_MESSAGE.to_string());
            }
            Ok(Some(grouping)) => grouping.to_yaml().map_err(InventoryError::from),
            Err(e) => Err(e),
        };

        match rendered {
            Ok(yaml) => {
                log.log_success("YAML report generated successfully.");
                log.log_info(&yaml);
                ReportOutcome::Success(yaml)
            }
            Err(InventoryError::Validation(message)) => {
                log.log_failure(&message);
                ReportOutcome::ValidationError(message)
            }
            Err(e) => {
                let message = format!("Error generating device report: {e}");
                log.log_failure(&message);
                ReportOutcome::UnexpectedError(message)
            }
        }
    }
}

#[async_trait]
impl<S: DeviceSource> Script for DeviceReport<S> {
    type Params = ReportParams;
    type Output = ReportOutcome;

    fn meta(&self) -> ScriptMeta {
        ScriptMeta {
            name: "Device Report",
            description: "Generates a YAML report of devices filtered by Site, Rack, and Status",
        }
    }

    async fn run(&self, params: &ReportParams, log: &dyn ScriptLog) -> ReportOutcome {
        self.generate(params, log).await
    }
}
