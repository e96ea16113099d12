//! Demo topology seeding
//!
//! Creates one manufacturer, three device types and roles, two sites with
//! two racks each, and ten active devices per site in the site's first rack.
//! Every object must come back `201 Created`; the first failure aborts.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{error, info, instrument};

use netbox_api::DeviceStatus;
use netbox_api::requests::{
    CreateDevice, CreateDeviceRole, CreateDeviceType, CreateManufacturer, CreateRack, CreateSite,
};
use netbox_client::NetboxClient;

use crate::error::SeedError;

/// Device kinds used for both types and roles, in role-assignment order
pub const DEVICE_KINDS: [&str; 3] = ["Switch", "Router", "Firewall"];

const MANUFACTURER: &str = "Cisco";
const ROLE_COLOR: &str = "ff0000";
const SITE_COUNT: usize = 2;
const RACKS_PER_SITE: usize = 2;
const DEVICES_PER_SITE: usize = 10;

/// Ids of everything the seeder created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub manufacturer: u64,
    /// Device type id per kind
    pub device_types: IndexMap<String, u64>,
    /// Device role id per kind
    pub device_roles: IndexMap<String, u64>,
    pub sites: Vec<u64>,
    pub racks: Vec<u64>,
    pub devices: Vec<u64>,
}

impl SeedSummary {
    /// Total number of objects created
    #[must_use]
    pub fn object_count(&self) -> usize {
        1 + self.device_types.len()
            + self.device_roles.len()
            + self.sites.len()
            + self.racks.len()
            + self.devices.len()
    }
}

/// Kind of the device placed at 1-based position `index` within a site
#[must_use]
pub fn kind_for_device(index: usize) -> &'static str {
    DEVICE_KINDS[index % DEVICE_KINDS.len()]
}

/// Seeds the demo topology through one client
pub struct Seeder<'a> {
    client: &'a NetboxClient,
}

impl<'a> Seeder<'a> {
    #[must_use]
    pub fn new(client: &'a NetboxClient) -> Self {
        Self { client }
    }

    /// Create one object, logging the outcome
    async fn create<B: Serialize>(
        &self,
        endpoint: &str,
        kind: &'static str,
        name: &str,
        body: &B,
    ) -> Result<u64, SeedError> {
        match self.client.create(endpoint, body).await {
            Ok(id) => {
                info!(kind, name, id, "created {kind}");
                Ok(id)
            }
            Err(source) => {
                error!(kind, name, error = %source, "error creating {kind}");
                Err(SeedError::Create {
                    kind,
                    name: name.to_string(),
                    source,
                })
            }
        }
    }

    /// Run the whole seeding sequence
    ///
    /// # Errors
    /// Returns an error if NetBox is unreachable or any object is not
    /// created; nothing after the failing step is attempted.
    #[instrument(skip(self), fields(base_url = %self.client.base_url()))]
    pub async fn run(&self) -> Result<SeedSummary, SeedError> {
        if let Err(e) = self.client.check_connectivity().await {
            error!(error = %e, "failed to connect to NetBox");
            return Err(SeedError::Unreachable(e));
        }
        info!("NetBox API is reachable");

        let mut summary = SeedSummary::default();

        summary.manufacturer = self
            .create(
                "dcim/manufacturers",
                "manufacturer",
                MANUFACTURER,
                &CreateManufacturer {
                    name: MANUFACTURER.to_string(),
                    slug: MANUFACTURER.to_lowercase(),
                },
            )
            .await?;

        for kind in DEVICE_KINDS {
            let body = CreateDeviceType {
                manufacturer: summary.manufacturer,
                model: format!("{MANUFACTURER} {kind} Model"),
                slug: format!("{}-{}", MANUFACTURER.to_lowercase(), kind.to_lowercase()),
            };
            let id = self
                .create("dcim/device-types", "device type", &body.model, &body)
                .await?;
            summary.device_types.insert(kind.to_string(), id);
        }

        for kind in DEVICE_KINDS {
            let body = CreateDeviceRole {
                name: kind.to_string(),
                slug: kind.to_lowercase(),
                color: ROLE_COLOR.to_string(),
            };
            let id = self
                .create("dcim/device-roles", "device role", &body.name, &body)
                .await?;
            summary.device_roles.insert(kind.to_string(), id);
        }

        for i in 1..=SITE_COUNT {
            let body = CreateSite {
                name: format!("Site {i}"),
                slug: format!("site-{i}"),
            };
            let id = self.create("dcim/sites", "site", &body.name, &body).await?;
            summary.sites.push(id);
        }

        let mut rack_number = 1;
        for &site in &summary.sites {
            for _ in 0..RACKS_PER_SITE {
                let body = CreateRack {
                    name: format!("Rack {rack_number}"),
                    site,
                };
                let id = self.create("dcim/racks", "rack", &body.name, &body).await?;
                summary.racks.push(id);
                rack_number += 1;
            }
        }

        for (site_index, &site) in summary.sites.iter().enumerate() {
            let rack = summary.racks.get(site_index * RACKS_PER_SITE).copied();
            for j in 1..=DEVICES_PER_SITE {
                let kind = kind_for_device(j);
                let body = CreateDevice {
                    name: format!("Device {j} - Site {}", site_index + 1),
                    site,
                    rack,
                    status: DeviceStatus::Active,
                    role: summary.device_roles[kind],
                    device_type: summary.device_types[kind],
                };
                let id = self.create("dcim/devices", "device", &body.name, &body).await?;
                summary.devices.push(id);
            }
        }

        info!(objects = summary.object_count(), "data successfully added to NetBox");
        Ok(summary)
    }
}
