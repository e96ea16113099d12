//! Error types for netbox-inventory

use netbox_client::ClientError;
use thiserror::Error;

/// Errors that can occur while querying or reporting on devices
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The NetBox API call failed
    #[error("NetBox request failed: {0}")]
    Client(#[from] ClientError),

    /// Report could not be rendered
    #[error("serialization failed: {0}")]
    Serialize(String),

    /// Filter combination rejected before querying
    #[error("invalid filters: {0}")]
    Validation(String),
}

impl From<serde_yaml::Error> for InventoryError {
    fn from(err: serde_yaml::Error) -> Self {
        InventoryError::Serialize(err.to_string())
    }
}

/// Errors that abort a seeding run
#[derive(Error, Debug)]
pub enum SeedError {
    /// Reachability probe failed before anything was created
    #[error("failed to connect to NetBox: {0}")]
    Unreachable(#[source] ClientError),

    /// An object could not be created
    #[error("error creating {kind} '{name}': {source}")]
    Create {
        /// Object kind (`manufacturer`, `device`, ...)
        kind: &'static str,
        /// Name or model of the object
        name: String,
        /// Underlying client error
        #[source]
        source: ClientError,
    },
}
