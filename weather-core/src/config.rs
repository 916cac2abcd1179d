use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};

use crate::provider::Dataset;

/// Delays inserted between requests to stay under the provider's rate limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThrottleConfig {
    pub success_delay_ms: u64,
    pub failure_delay_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { success_delay_ms: 200, failure_delay_ms: 500 }
    }
}

impl ThrottleConfig {
    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.success_delay_ms)
    }

    pub fn failure_delay(&self) -> Duration {
        Duration::from_millis(self.failure_delay_ms)
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// dataset = "era5"
/// timeout_secs = 30
///
/// [throttle]
/// success_delay_ms = 200
/// failure_delay_ms = 500
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Dataset name, e.g. "era5" or "archive".
    pub dataset: Option<String>,

    /// Overrides the dataset endpoint, mostly useful for proxies.
    pub base_url: Option<String>,

    pub timeout_secs: u64,

    pub throttle: ThrottleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self { dataset: None, base_url: None, timeout_secs: 30, throttle: ThrottleConfig::default() }
    }
}

impl Config {
    /// Return the configured dataset, defaulting to ERA5.
    pub fn dataset(&self) -> Result<Dataset> {
        match self.dataset.as_deref() {
            Some(s) => Dataset::try_from(s),
            None => Ok(Dataset::default()),
        }
    }

    /// Endpoint for requests: the explicit override or the dataset's URL.
    pub fn endpoint(&self) -> Result<String> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None => Ok(self.dataset()?.url().to_string()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from the platform config directory, or return defaults if
    /// it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "city-weather", "city-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
