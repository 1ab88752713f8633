//! Configuration management for the application.
//!
//! This module handles loading and validating application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{APP_NAME, MY_PHOTOS_CATEGORY};

/// Connection settings for the display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Secure websocket port of the art channel
    pub port: u16,
    /// Plain HTTP port of the REST device-info endpoint
    pub rest_port: u16,
    /// Client name shown on the TV when pairing
    pub client_name: String,
    /// Seconds to wait for the artwork list (large libraries are slow)
    pub list_timeout_secs: u64,
    /// Seconds to wait for any other reply
    pub request_timeout_secs: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            port: 8002,
            rest_port: 8001,
            client_name: APP_NAME.to_string(),
            list_timeout_secs: 10,
            request_timeout_secs: 5,
        }
    }
}

impl DeviceConfig {
    /// Timeout for the artwork list request.
    #[must_use]
    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    /// Timeout for every other request.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathConfig {
    /// Pairing token file (defaults to `token_file.txt` in the config directory)
    pub token_file: Option<PathBuf>,
}

/// Which part of the art library a run touches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Category listed unless `--all` is given
    pub category: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            category: MY_PHOTOS_CATEGORY.to_string(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/MatteSync/config.toml`
/// - macOS: `~/Library/Application Support/MatteSync/config.toml`
/// - Windows: `%APPDATA%\MatteSync\config.toml`
///
/// # Validation
///
/// - ports must be non-zero
/// - timeouts must be at least one second
/// - the library category must not be empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Display connection settings
    pub device: DeviceConfig,
    /// File system paths
    pub paths: PathConfig,
    /// Library selection
    pub library: LibraryConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/MatteSync/`
    /// - macOS: `~/Library/Application Support/MatteSync/`
    /// - Windows: `%APPDATA%\MatteSync\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.device.port == 0 || self.device.rest_port == 0 {
            anyhow::bail!("Device ports must be non-zero");
        }
        if self.device.list_timeout_secs == 0 || self.device.request_timeout_secs == 0 {
            anyhow::bail!("Device timeouts must be at least one second");
        }
        if self.device.client_name.trim().is_empty() {
            anyhow::bail!("Client name must not be empty");
        }
        if self.library.category.trim().is_empty() {
            anyhow::bail!("Library category must not be empty");
        }
        Ok(())
    }

    /// Resolves the token file: explicit override, then config, then the config directory.
    pub fn token_file_path(&self, override_path: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = override_path {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.paths.token_file {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("token_file.txt"))
    }
}
