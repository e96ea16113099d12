//! Where report devices come from

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::{debug, instrument};

use netbox_client::NetboxClient;

use crate::error::InventoryError;
use crate::query::DeviceQuery;
use crate::types::DeviceRecord;

/// Device store queried by the report
#[async_trait]
pub trait DeviceSource: Send + Sync {
    /// Devices matching `query`, in store order
    async fn devices(&self, query: &DeviceQuery) -> Result<Vec<DeviceRecord>, InventoryError>;
}

/// A rack name that matches several racks and no site to tell them apart
fn ambiguous_rack(rack: &str, matches: usize) -> InventoryError {
    InventoryError::Validation(format!(
        "Rack '{rack}' matches {matches} racks; select a Site as well."
    ))
}

/// Devices fetched from the NetBox REST API
///
/// Site and rack names are resolved to ids first, then every filter is
/// applied by NetBox. A site or rack that does not exist yields no devices.
#[derive(Debug, Clone)]
pub struct ApiDeviceSource {
    client: NetboxClient,
}

impl ApiDeviceSource {
    #[must_use]
    pub fn new(client: NetboxClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DeviceSource for ApiDeviceSource {
    #[instrument(skip_all, fields(query = %query))]
    async fn devices(&self, query: &DeviceQuery) -> Result<Vec<DeviceRecord>, InventoryError> {
        let mut request = self
            .client
            .list_devices()
            .status(query.status_filter().as_str());

        let site_id = match query.site_filter() {
            Some(name) => {
                let Some(site) = self.client.find_site(name).await? else {
                    debug!(site = name, "site not found");
                    return Ok(Vec::new());
                };
                request = request.site_id(site.id);
                Some(site.id)
            }
            None => None,
        };

        if let Some(name) = query.rack_filter() {
            let racks = self.client.find_racks(name, site_id).await?;
            let rack_id = match racks.as_slice() {
                [] => {
                    debug!(rack = name, "rack not found");
                    return Ok(Vec::new());
                }
                [rack] => rack.id,
                _ => return Err(ambiguous_rack(name, racks.len())),
            };
            request = request.rack_id(rack_id);
        }

        let devices: Vec<DeviceRecord> = request
            .send()
            .await?
            .into_iter()
            .map(DeviceRecord::from)
            .collect();
        debug!(count = devices.len(), "listed devices");
        Ok(devices)
    }
}

/// Devices held in memory
///
/// A rack is identified by site and name, as in NetBox: a rack filter
/// without a site is rejected when that name exists in several sites.
#[derive(Debug, Clone, Default)]
pub struct StaticDeviceSource {
    devices: Vec<DeviceRecord>,
}

impl StaticDeviceSource {
    #[must_use]
    pub fn new(devices: Vec<DeviceRecord>) -> Self {
        Self { devices }
    }
}

#[async_trait]
impl DeviceSource for StaticDeviceSource {
    async fn devices(&self, query: &DeviceQuery) -> Result<Vec<DeviceRecord>, InventoryError> {
        if let Some(rack) = query.rack_filter() {
            let sites: HashSet<Option<&str>> = self
                .devices
                .iter()
                .filter(|d| d.rack.as_deref() == Some(rack))
                .filter(|d| query.site_filter().is_none_or(|site| d.site.as_deref() == Some(site)))
                .map(|d| d.site.as_deref())
                .collect();
            if sites.len() > 1 {
                return Err(ambiguous_rack(rack, sites.len()));
            }
        }
        Ok(query.apply(self.devices.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbox_api::DeviceStatus;

    #[tokio::test]
    async fn test_static_source_filters_in_order() {
        let source = StaticDeviceSource::new(vec![
            DeviceRecord::new(1, "b", "active").in_site("S1"),
            DeviceRecord::new(2, "x", "planned").in_site("S1"),
            DeviceRecord::new(3, "a", "active").in_site("S1"),
        ]);

        let query = DeviceQuery::new(DeviceStatus::Active).site("S1");
        let names: Vec<String> = source
            .devices(&query)
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_static_source_rack_name_in_two_sites() {
        let source = StaticDeviceSource::new(vec![
            DeviceRecord::new(1, "a", "active").in_site("Site 1").in_rack("R1"),
            DeviceRecord::new(2, "b", "active").in_site("Site 2").in_rack("R1"),
        ]);

        let err = source
            .devices(&DeviceQuery::new(DeviceStatus::Active).rack("R1"))
            .await
            .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(ref m) if m.contains("'R1' matches 2 racks")));

        let scoped = source
            .devices(&DeviceQuery::new(DeviceStatus::Active).site("Site 2").rack("R1"))
            .await
            .unwrap();
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].name, "b");
    }
}
