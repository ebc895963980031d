use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_LOCATION_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";
pub const DEFAULT_TIME_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Process-wide settings, built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// OpenWeather key used by geocoding and current weather.
    pub api_key: String,
    /// Current weather endpoint.
    pub api_url: String,
    /// Geocoding endpoint.
    pub location_url: String,
    /// Daily archive endpoint.
    pub time_url: String,
}

impl AppConfig {
    /// Build from the config file (if any) overlaid with environment variables.
    pub fn load() -> Result<Self> {
        let file = ConfigFile::load()?;
        Self::resolve(file, |key| env::var(key).ok())
    }

    /// Build from defaults overlaid with whatever `lookup` returns for
    /// `API_KEY`, `API_URL`, `LOCATION_URL` and `TIME_URL`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::resolve(ConfigFile::default(), lookup)
    }

    fn resolve<F>(file: ConfigFile, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |key: &str, from_file: Option<String>, default: &str| -> String {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .or(from_file.filter(|v| !v.trim().is_empty()))
                .unwrap_or_else(|| default.to_string())
        };

        let api_key = pick("API_KEY", file.api_key, "");
        if api_key.trim().is_empty() {
            return Err(anyhow!(
                "No API key configured.\n\
                 Hint: set API_KEY or run `cityweather configure` first."
            ));
        }

        Ok(Self {
            api_key,
            api_url: pick("API_URL", file.api_url, DEFAULT_API_URL),
            location_url: pick("LOCATION_URL", file.location_url, DEFAULT_LOCATION_URL),
            time_url: pick("TIME_URL", file.time_url, DEFAULT_TIME_URL),
        })
    }
}

/// On-disk form of the settings. Every field is optional so that a partial
/// file can be completed from the environment.
///
/// Example TOML:
/// api_key = "..."
/// time_url = "https://archive-api.open-meteo.com/v1/archive"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub location_url: Option<String>,
    pub time_url: Option<String>,
}

impl ConfigFile {
    /// Load from disk, or return an empty file if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
