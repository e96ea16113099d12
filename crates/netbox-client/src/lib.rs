//! netbox-client: HTTP client library for the NetBox REST API
//!
//! Every call takes its settings from an explicit [`NetboxConfig`], so a
//! client lives exactly as long as the invocation that built it.
//!
//! # Examples
//!
//! ```no_run
//! use netbox_client::{NetboxClient, NetboxConfig};
//! use netbox_api::requests::CreateSite;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = NetboxConfig::new("http://localhost:8000/api").with_token("0123abcd");
//! let client = NetboxClient::new(&config)?;
//!
//! // Reachability probe
//! client.check_connectivity().await?;
//!
//! // List devices, all pages
//! let devices = client.list_devices().status("active").send().await?;
//! println!("{} active devices", devices.len());
//!
//! // Create a site
//! let site = CreateSite { name: "Site 1".into(), slug: "site-1".into() };
//! let id = client.create("dcim/sites", &site).await?;
//! println!("created site #{id}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;

pub use config::NetboxConfig;
pub use error::{ClientError, Result};
pub use http::{ListDevicesBuilder, NetboxClient};
