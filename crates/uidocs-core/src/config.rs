//! Configuration for the documentation fetcher.
//!
//! Configuration is stored in TOML format in the platform config
//! directory and loaded lazily: a missing file yields defaults, a
//! malformed file is an error.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [fetch]
//! base_url = "https://ui.shadcn.com"
//! direct_suffix = ".md"
//! timeout_secs = 10
//! browser_enabled = true
//!
//! [cache]
//! ttl_hours = 168
//! memory_capacity = 128
//! sweep_interval_secs = 3600
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Top-level configuration.
///
/// ## File Location
///
/// - Linux: `~/.config/uidocs/config.toml`
/// - macOS: `~/Library/Application Support/dev.uidocs/config.toml`
/// - Windows: `%APPDATA%\uidocs\config\config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Fetching behavior.
    pub fetch: FetchConfig,
    /// Cache sizing and lifetime.
    pub cache: CacheConfig,
}

/// Settings controlling how pages are fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL of the documentation site.
    pub base_url: String,

    /// Suffix appended to a page URL to reach its lightweight document
    /// variant.
    pub direct_suffix: String,

    /// Per-request timeout for plain HTTP fetches, in seconds.
    pub timeout_secs: u64,

    /// Whether the headless browser render strategy may run at all.
    ///
    /// When disabled, pages in client-rendered sections fall straight
    /// through to the HTML scrape.
    pub browser_enabled: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://ui.shadcn.com".into(),
            direct_suffix: ".md".into(),
            timeout_secs: 10,
            browser_enabled: true,
        }
    }
}

/// Settings controlling the two-tier result cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Entry lifetime in hours. Applies to both tiers.
    pub ttl_hours: u32,

    /// Maximum number of entries held in the in-process fast tier.
    pub memory_capacity: usize,

    /// Interval between periodic sweeps of expired persistent entries,
    /// in seconds.
    pub sweep_interval_secs: u64,

    /// Root directory for the persistent tier. Defaults to the platform
    /// data directory when absent.
    pub root: Option<PathBuf>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24 * 7,
            memory_capacity: 128,
            sweep_interval_secs: 3600,
            root: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location or create with
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or
    /// if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
        } else {
            Ok(Self::default())
        }
    }

    /// Save the configuration to the default location, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined or
    /// the file cannot be written.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let parent = config_path
            .parent()
            .ok_or_else(|| Error::Config("Invalid config path".into()))?;

        fs::create_dir_all(parent)
            .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, content)
            .map_err(|e| Error::Config(format!("Failed to write config: {e}")))?;

        Ok(())
    }

    /// Resolve the persistent cache root: the configured override, or the
    /// platform data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no override is set and the platform data
    /// directory cannot be determined.
    pub fn cache_root(&self) -> Result<PathBuf> {
        if let Some(root) = &self.cache.root {
            return Ok(root.clone());
        }
        let project_dirs = Self::project_dirs()?;
        Ok(project_dirs.data_dir().to_path_buf())
    }

    fn config_path() -> Result<PathBuf> {
        let project_dirs = Self::project_dirs()?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    fn project_dirs() -> Result<directories::ProjectDirs> {
        directories::ProjectDirs::from("dev", "uidocs", "uidocs")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))
    }
}

impl CacheConfig {
    /// TTL as a `chrono` duration for freshness checks.
    #[must_use]
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.ttl_hours))
    }

    /// Sweep interval as a std duration for the background task.
    #[must_use]
    pub const fn sweep_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.sweep_interval_secs)
    }
}

impl FetchConfig {
    /// Per-request timeout as a std duration.
    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.fetch.base_url, "https://ui.shadcn.com");
        assert_eq!(config.fetch.direct_suffix, ".md");
        assert_eq!(config.cache.ttl_hours, 168);
        assert!(config.fetch.browser_enabled);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [cache]
            ttl_hours = 48
            "#,
        )
        .unwrap();
        assert_eq!(config.cache.ttl_hours, 48);
        assert_eq!(config.cache.memory_capacity, 128);
        assert_eq!(config.fetch.base_url, "https://ui.shadcn.com");
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 30;
        config.cache.root = Some(PathBuf::from("/tmp/uidocs-cache"));

        let serialized = toml::to_string_pretty(&config).unwrap();
        let restored: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.fetch.timeout_secs, 30);
        assert_eq!(restored.cache.root.as_deref(), Some(std::path::Path::new("/tmp/uidocs-cache")));
    }

    #[test]
    fn ttl_conversion() {
        let cache = CacheConfig { ttl_hours: 48, ..CacheConfig::default() };
        assert_eq!(cache.ttl(), chrono::Duration::hours(48));
    }
}
