//! Configuration loading
//!
//! Defaults, then an optional `netbox.toml`, then environment and flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use netbox_client::NetboxConfig;

/// Contents of `netbox.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Connection settings
    #[serde(default)]
    pub netbox: NetboxConfig,
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from an explicit path, or from default paths, or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn load_default(explicit: Option<&Path>) -> eyre::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let mut paths = vec![PathBuf::from("netbox.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("netbox-ops/netbox.toml"));
        }

        for path in paths {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                return Self::load(&path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }

    /// Apply values from the environment or command line on top of the file
    #[must_use]
    pub fn resolve(self, url: Option<String>, token: Option<String>) -> NetboxConfig {
        let mut netbox = self.netbox;
        if let Some(url) = url {
            netbox.url = url;
        }
        if token.is_some() {
            netbox.token = token;
        }
        netbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [netbox]
            url = "https://netbox.example.com/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.netbox.url, "https://netbox.example.com/api");
        assert!(config.netbox.token.is_none());
        assert_eq!(config.netbox.timeout_secs, 30);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_file() {
        let config: Config = toml::from_str(
            r#"
            [netbox]
            url = "https://file.example.com/api"
            token = "from-file"
            timeout_secs = 5
            "#,
        )
        .unwrap();

        let netbox = config.resolve(Some("http://flag:8000/api".to_string()), None);
        assert_eq!(netbox.url, "http://flag:8000/api");
        assert_eq!(netbox.token.as_deref(), Some("from-file"));
        assert_eq!(netbox.timeout_secs, 5);
    }

    #[test]
    fn test_zero_timeout_means_no_timeout() {
        let config: Config = toml::from_str(
            r#"
            [netbox]
            timeout_secs = 0
            "#,
        )
        .unwrap();

        let netbox = config.resolve(None, None);
        assert_eq!(netbox.timeout(), None);
        assert!(netbox_client::NetboxClient::new(&netbox).is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load_default(Some(Path::new("/nonexistent/netbox.toml")));
        assert!(result.is_err());
    }
}
