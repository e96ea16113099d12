//! netbox-inventory: operator tooling on top of the NetBox API
//!
//! - [`count`]: device counts by status
//! - [`seed`]: demo topology seeding
//! - [`report`]: devices grouped by site and rack, rendered as YAML, run
//!   through the [`script`] host capability against a [`source::DeviceSource`]

pub mod count;
pub mod error;
pub mod query;
pub mod report;
pub mod script;
pub mod seed;
pub mod source;
pub mod types;

pub use count::{DeviceCount, count_devices};
pub use error::{InventoryError, SeedError};
pub use query::DeviceQuery;
pub use report::{DeviceReport, ReportOutcome, ReportParams};
pub use script::{LogLevel, RecordingLog, Script, ScriptLog, ScriptMeta, TracingLog};
pub use seed::{SeedSummary, Seeder};
pub use source::{ApiDeviceSource, DeviceSource, StaticDeviceSource};
pub use types::{DeviceGrouping, DeviceRecord};
