// Configuration Management Module
// Handles vitals.toml loading, defaults, env overrides, and validation

use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::{Result, Context};
use tracing::{info, warn};

/// Environment variable overriding the credential bundle path
pub const CREDENTIALS_ENV: &str = "FIREBASE_CREDENTIALS";

/// Environment variable overriding the simulated device identifier
pub const DEVICE_ID_ENV: &str = "DEVICE_ID";

/// Main vital-feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsConfig {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Identifier the readings are keyed under
    #[serde(default = "default_device_id")]
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Service-account bundle; relative paths resolve next to the executable
    #[serde(default = "default_credentials")]
    pub credentials: String,

    /// Realtime database root; empty = derive from the bundle's project id
    #[serde(default)]
    pub database_url: String,

    /// Optional legacy database secret, sent as the auth query parameter
    #[serde(default)]
    pub auth_token: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Seconds between readings
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

// Default value functions
fn default_device_id() -> String { "QW999".to_string() }
fn default_credentials() -> String { "service-account.json".to_string() }
fn default_request_timeout() -> u64 { 10 }
fn default_interval() -> u64 { 1 }

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            id: default_device_id(),
        }
    }
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            credentials: default_credentials(),
            database_url: String::new(),
            auth_token: None,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
        }
    }
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            sink: SinkConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl VitalsConfig {
    /// Load configuration from file or use defaults, then apply env overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config: VitalsConfig = if path.exists() {
            info!("Loading configuration from {}", path.display());
            let contents = std::fs::read_to_string(path)
                .context("Failed to read configuration file")?;

            toml::from_str(&contents)
                .context("Failed to parse configuration file")?
        } else {
            warn!("Configuration file not found, using defaults");
            info!("Create {} to customize configuration", path.display());
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// FIREBASE_CREDENTIALS and DEVICE_ID take precedence over the file
    fn apply_env_overrides(&mut self) {
        if let Ok(credentials) = std::env::var(CREDENTIALS_ENV) {
            if !credentials.is_empty() {
                self.sink.credentials = credentials;
            }
        }

        if let Ok(device_id) = std::env::var(DEVICE_ID_ENV) {
            if !device_id.is_empty() {
                self.device.id = device_id;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.device.id.trim().is_empty() {
            anyhow::bail!("Device id cannot be empty");
        }

        if self.sink.credentials.trim().is_empty() {
            anyhow::bail!("Credential bundle path cannot be empty");
        }

        if !self.sink.database_url.is_empty()
            && !self.sink.database_url.starts_with("http://")
            && !self.sink.database_url.starts_with("https://")
        {
            anyhow::bail!("Database URL must be an http(s) URL");
        }

        if self.feed.interval_secs == 0 {
            anyhow::bail!("Feed interval must be at least 1 second");
        }

        if self.sink.request_timeout_secs == 0 {
            anyhow::bail!("Request timeout must be at least 1 second");
        }

        Ok(())
    }
}

impl DeviceConfig {
    /// Database path the display reads from
    pub fn readings_path(&self) -> String {
        format!("devices/{}/readings", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VitalsConfig::default();
        assert_eq!(config.device.id, "QW999");
        assert_eq!(config.feed.interval_secs, 1);
        assert_eq!(config.sink.credentials, "service-account.json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_readings_path() {
        let config = VitalsConfig::default();
        assert_eq!(config.device.readings_path(), "devices/QW999/readings");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = VitalsConfig::default();
        config.feed.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_database_url_rejected() {
        let mut config = VitalsConfig::default();
        config.sink.database_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_device_id_rejected() {
        let mut config = VitalsConfig::default();
        config.device.id = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: VitalsConfig = toml::from_str(
            r#"
            [device]
            id = "WARD07"
            "#,
        )
        .unwrap();

        assert_eq!(config.device.id, "WARD07");
        assert_eq!(config.feed.interval_secs, 1);
        assert_eq!(config.sink.request_timeout_secs, 10);
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        std::env::set_var(DEVICE_ID_ENV, "ENV42");
        std::env::set_var(CREDENTIALS_ENV, "/tmp/override.json");

        let mut config = VitalsConfig::default();
        config.apply_env_overrides();

        std::env::remove_var(DEVICE_ID_ENV);
        std::env::remove_var(CREDENTIALS_ENV);

        assert_eq!(config.device.id, "ENV42");
        assert_eq!(config.sink.credentials, "/tmp/override.json");
    }
}
