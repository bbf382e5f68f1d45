//! Configuration module for pinmark
//!
//! Manages application configuration: where the place database lives,
//! which background tile provider the map surface should use, and the
//! default quiet flag. Configuration is stored as TOML in the user's
//! config directory.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Background tile provider for the map surface
///
/// The map contract supports two interchangeable providers selectable
/// by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TileProvider {
    /// OpenStreetMap street tiles
    #[default]
    Osm,
    /// Esri world imagery (satellite)
    Satellite,
}

impl TileProvider {
    /// String form used in the config file and CLI
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Osm => "osm",
            Self::Satellite => "satellite",
        }
    }
}

impl fmt::Display for TileProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PinmarkConfig {
    /// Directory holding the place database; defaults to the user data dir
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Background tile provider for the map surface
    #[serde(default)]
    pub tile_provider: TileProvider,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl PinmarkConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be
    /// determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("pinmark").join("config.toml"))
    }

    /// Load configuration from file, creating a default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed,
    /// or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(config_path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created,
    /// the configuration cannot be serialized to TOML, or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))
    }

    /// Resolve the database directory: the configured one, or
    /// `<data_dir>/pinmark/places` under the user data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no directory is configured and the
    /// system data directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("pinmark").join("places"))
    }
}
