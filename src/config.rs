//! Application configuration.
//!
//! Configuration is a TOML file in the platform config directory. Every
//! field is defaulted, so a missing file or a partial file both load
//! cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::DataDirPolicy;

const CONFIG_DIR: &str = "muezzin";
const CONFIG_FILE: &str = "config.toml";

/// Storage layer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Absolute data directory override. When unset, the platform data
    /// directory joined with `subpath` is used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Path of the data directory relative to the platform data dir.
    #[serde(default = "default_subpath")]
    pub subpath: String,
    /// What to do when the data directory fails to resolve.
    #[serde(default)]
    pub dir_policy: DataDirPolicy,
}

fn default_subpath() -> String {
    "muezzin/data".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            subpath: default_subpath(),
            dir_policy: DataDirPolicy::default(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Directory holding the configuration file, if one can be determined.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

/// Full path of the configuration file, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the configuration from the platform config directory.
///
/// Falls back to defaults when no config directory or file exists.
pub fn load() -> color_eyre::Result<AppConfig> {
    let Some(path) = config_path() else {
        debug!("No config directory found, using defaults");
        return Ok(AppConfig::default());
    };
    load_from(&path)
}

/// Load the configuration from an explicit path.
pub fn load_from(path: &Path) -> color_eyre::Result<AppConfig> {
    if !path.exists() {
        debug!("Config file not found at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save the configuration to the platform config directory.
pub fn save(config: &AppConfig) -> color_eyre::Result<()> {
    let Some(dir) = config_dir() else {
        debug!("Could not determine config directory, not saving");
        return Ok(());
    };
    save_to(config, &dir.join(CONFIG_FILE))
}

/// Save the configuration to an explicit path.
pub fn save_to(config: &AppConfig, path: &Path) -> color_eyre::Result<()> {
    if let Some(dir) = path.parent()
        && !dir.exists()
    {
        fs::create_dir_all(dir)?;
    }

    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    debug!("Saved config to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_from(&tmp.path().join("missing.toml")).unwrap();

        assert_eq!(config.storage.data_dir, None);
        assert_eq!(config.storage.subpath, "muezzin/data");
        assert_eq!(config.storage.dir_policy, DataDirPolicy::RetryOnFailure);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let mut config = AppConfig::default();
        config.storage.data_dir = Some(PathBuf::from("/tmp/muezzin-data"));
        config.storage.dir_policy = DataDirPolicy::CacheAtStartup;

        save_to(&config, &path).unwrap();
        let loaded = load_from(&path).unwrap();

        assert_eq!(loaded.storage.data_dir, config.storage.data_dir);
        assert_eq!(loaded.storage.dir_policy, DataDirPolicy::CacheAtStartup);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[storage]\ndir_policy = \"cache-at-startup\"\n").unwrap();

        let config = load_from(&path).unwrap();
        assert_eq!(config.storage.dir_policy, DataDirPolicy::CacheAtStartup);
        assert_eq!(config.storage.subpath, "muezzin/data");
    }
}
