use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::provider::DEFAULT_BASE_URL;

/// Used when neither the command line nor the config file names a location.
pub const DEFAULT_LOCATION: &str = "London,uk";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// app_id = "..."
/// default_location = "Glasgow,uk"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// OpenWeatherMap APPID.
    pub app_id: Option<String>,

    /// Location queried when none is given, e.g. "Airdrie,uk".
    pub default_location: Option<String>,

    /// Provider base URL override, mostly useful for testing against a mock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Response cache directory override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Configured cache directory, or the platform cache directory.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        match &self.cache_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::project_dirs()?.cache_dir().to_path_buf()),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Command-line value wins over the configured default.
    pub fn resolve_location(&self, flag: Option<&str>) -> String {
        flag.filter(|s| !s.trim().is_empty())
            .or(self.default_location.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or(DEFAULT_LOCATION)
            .to_string()
    }

    /// Command-line (or environment) value wins over the configured key.
    pub fn resolve_app_id(&self, flag: Option<&str>) -> Result<String> {
        flag.filter(|s| !s.is_empty())
            .or(self.app_id.as_deref().filter(|s| !s.is_empty()))
            .map(str::to_owned)
            .ok_or_else(|| {
                anyhow!(
                    "No OpenWeatherMap APPID configured.\n\
                     Hint: run `weather configure`, pass --appid or set OPEN_WEATHER_MAP_APPID."
                )
            })
    }
}
