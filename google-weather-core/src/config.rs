use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{
    client::{ClientOptions, DEFAULT_BASE_URL, DEFAULT_LANGUAGE_CODE, DEFAULT_TIMEOUT},
    location::Coordinates,
    units::UnitsSystem,
};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// language_code = "en"
/// units_system = "METRIC"
/// timeout_secs = 10
///
/// [location]
/// latitude = 37.422
/// longitude = -122.0841
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub language_code: String,
    pub units_system: UnitsSystem,
    pub referrer: Option<String>,
    pub timeout_secs: u64,
    /// Only set when pointing at a proxy or a test server.
    pub base_url: Option<String>,
    /// Default location for lookups.
    pub location: Option<Coordinates>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            units_system: UnitsSystem::default(),
            referrer: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            base_url: None,
            location: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        anyhow::ensure!(
            cfg.timeout_secs > 0,
            "Invalid config file {}: timeout_secs must be at least 1",
            path.display()
        );

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "google-weather", "gweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// The key to authenticate with: `override_key` (flag or environment) wins over the file.
    /// Blank keys count as missing at either level.
    pub fn resolve_api_key(&self, override_key: Option<&str>) -> Result<String> {
        fn usable(key: Option<&str>) -> Option<&str> {
            key.map(str::trim).filter(|key| !key.is_empty())
        }

        usable(override_key)
            .or_else(|| usable(self.api_key.as_deref()))
            .map(str::to_owned)
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `gweather configure` or set GOOGLE_WEATHER_API_KEY."
                )
            })
    }

    /// `explicit` wins over the configured default location.
    pub fn resolve_location(&self, explicit: Option<Coordinates>) -> Result<Coordinates> {
        explicit.or(self.location).ok_or_else(|| {
            anyhow!(
                "No location given and no default location configured.\n\
                 Hint: pass `--location LAT,LON` or run `gweather configure`."
            )
        })
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            language_code: self.language_code.clone(),
            units_system: self.units_system,
            referrer: self.referrer.clone(),
            timeout: match self.timeout_secs {
                0 => DEFAULT_TIMEOUT,
                secs => Duration::from_secs(secs),
            },
        }
    }
}
