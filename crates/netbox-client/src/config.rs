//! Connection settings for a NetBox instance

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API root used when nothing else is configured
pub const DEFAULT_URL: &str = "http://localhost:8000/api";

/// Connection settings, built once per invocation and handed to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetboxConfig {
    /// API root, e.g. `https://netbox.example.com/api`
    #[serde(default = "default_url")]
    pub url: String,
    /// API token sent as `Authorization: Token <token>`
    #[serde(default)]
    pub token: Option<String>,
    /// Per-request timeout in seconds; `0` disables the timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NetboxConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl NetboxConfig {
    /// Create a config for the given API root
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the API token
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Request timeout, `None` when disabled
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetboxConfig::default();
        assert_eq!(config.url, "http://localhost:8000/api");
        assert!(config.token.is_none());
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_builder() {
        let config = NetboxConfig::new("https://netbox.example.com/api").with_token("abc");
        assert_eq!(config.url, "https://netbox.example.com/api");
        assert_eq!(config.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_zero_timeout_disables_timeout() {
        let config = NetboxConfig {
            timeout_secs: 0,
            ..NetboxConfig::default()
        };
        assert_eq!(config.timeout(), None);
    }
}
