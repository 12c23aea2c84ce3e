//! Configuration management for Leadbell
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file, with serde-supplied defaults for every field so a
//! missing file yields a usable default client.

use crate::error::{LeadbellError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Leadbell
///
/// Holds everything the client needs: where the CRM backend lives, how the
/// notification feed behaves, and where the session record is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Notification feed settings
    #[serde(default)]
    pub feed: FeedConfig,

    /// Local storage settings
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the CRM backend API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Page size for notification list requests
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    20
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

/// Notification feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Seconds between scheduled feed refreshes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: default_poll_interval(),
        }
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Override for the session file location
    ///
    /// When unset, the session lives in the per-user data directory. The
    /// `LEADBELL_SESSION_FILE` environment variable takes precedence over
    /// both.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: the default configuration is
    /// returned so the CLI works out of the box against a local backend.
    ///
    /// # Errors
    ///
    /// Returns [`LeadbellError::Yaml`] if the file exists but cannot be
    /// parsed, or [`LeadbellError::Io`] if it cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(LeadbellError::Io)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(LeadbellError::Yaml)?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`LeadbellError::Config`] if the base URL does not parse or
    /// any numeric setting is zero.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            LeadbellError::Config(format!("invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(LeadbellError::Config("api.timeout_seconds must be non-zero".into()).into());
        }
        if self.api.page_size == 0 {
            return Err(LeadbellError::Config("api.page_size must be non-zero".into()).into());
        }
        if self.feed.poll_interval_seconds == 0 {
            return Err(
                LeadbellError::Config("feed.poll_interval_seconds must be non-zero".into()).into(),
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.page_size, 20);
        assert_eq!(config.feed.poll_interval_seconds, 30);
        assert!(config.storage.session_file.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let config = Config::load("definitely/not/a/real/config.yaml").unwrap();
        assert_eq!(config.api.base_url, default_base_url());
    }

    #[test]
    fn test_load_partial_yaml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "api:\n  base_url: https://crm.example.com/api\nfeed:\n  poll_interval_seconds: 10\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api.base_url, "https://crm.example.com/api");
        assert_eq!(config.api.timeout_seconds, default_timeout());
        assert_eq!(config.api.page_size, default_page_size());
        assert_eq!(config.feed.poll_interval_seconds, 10);
    }

    #[test]
    fn test_load_invalid_yaml_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api: [not, a, mapping").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.api.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let mut config = Config::default();
        config.feed.poll_interval_seconds = 0;
        assert!(config.validate().is_err());
    }
}
