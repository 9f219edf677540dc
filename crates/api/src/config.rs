//! Record access configuration via `recordgate.toml`
//!
//! Every setting has a default, so an empty file (or no file) is a valid
//! configuration. A default `recordgate.toml` with comments can be written
//! next to the host application on first start.

use recordgate_adapters::{DEFAULT_IDENTITY_FIELD, DEFAULT_MOCK_DELAY};
use recordgate_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Config file name looked up by hosts
pub const CONFIG_FILE_NAME: &str = "recordgate.toml";

/// Connection settings for the HTTP entity store.
///
/// Persisted under the `[store]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// Web API service root (e.g. "https://org.example.com/api/data/v9.2")
    pub endpoint: String,
    /// Optional bearer token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Request timeout in milliseconds (default: 30000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl StoreConfig {
    /// Request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Record access configuration loaded from `recordgate.toml`.
///
/// # Example
///
/// ```toml
/// mock_delay_ms = 500
/// identity_field = "id"
/// cache_metadata = false
///
/// [identity_aliases]
/// widgets = "widget_id"
///
/// # [store]
/// # endpoint = "https://org.example.com/api/data/v9.2"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessConfig {
    /// Artificial latency of the mock adapter, in milliseconds.
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,
    /// Name of the identity field on every collection.
    #[serde(default = "default_identity_field")]
    pub identity_field: String,
    /// Memoize resolved entity-set names for the lifetime of the façade.
    #[serde(default)]
    pub cache_metadata: bool,
    /// Per-collection identity alias overrides of the store's primary key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub identity_aliases: BTreeMap<String, String>,
    /// Optional HTTP store connection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,
}

fn default_mock_delay_ms() -> u64 {
    DEFAULT_MOCK_DELAY.as_millis() as u64
}

fn default_identity_field() -> String {
    DEFAULT_IDENTITY_FIELD.to_string()
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            mock_delay_ms: default_mock_delay_ms(),
            identity_field: default_identity_field(),
            cache_metadata: false,
            identity_aliases: BTreeMap::new(),
            store: None,
        }
    }
}

impl AccessConfig {
    /// Mock adapter latency as a duration
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    /// Configured identity alias of `collection`
    ///
    /// `None` means the alias is the collection's primary-key attribute as
    /// reported by the live store.
    pub fn identity_alias(&self, collection: &str) -> Option<&str> {
        self.identity_aliases.get(collection).map(String::as_str)
    }

    /// Check the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns a config error if the mock delay is one second or more, or
    /// the identity field is empty.
    pub fn validate(&self) -> Result<()> {
        if self.mock_delay_ms >= 1000 {
            return Err(Error::config(format!(
                "mock_delay_ms must be below 1000, got {}",
                self.mock_delay_ms
            )));
        }
        if self.identity_field.trim().is_empty() {
            return Err(Error::config("identity_field must not be empty"));
        }
        if let Some(store) = &self.store {
            if store.endpoint.trim().is_empty() {
                return Err(Error::config("[store] endpoint must not be empty"));
            }
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# recordgate configuration
#
# Artificial latency of the offline mock adapter, in milliseconds.
# Must stay below 1000.
mock_delay_ms = 500

# Identity field present on every collection.
identity_field = "id"

# Memoize resolved entity-set names (default: false).
cache_metadata = false

# Identity alias per collection, stripped from update payloads.
# Defaults to the primary-key attribute reported by the store.
# [identity_aliases]
# widgets = "widget_id"

# Live store connection. Without it every call is served by the mock.
# [store]
# endpoint = "https://org.example.com/api/data/v9.2"
# token = "bearer-token"        # optional
# timeout_ms = 30000             # optional, default 30000
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: AccessConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
