//! Configuration management for Mosaic Tags.
//!
//! This module covers the per-editor configuration, its declarative
//! attribute form, and the application settings file.

mod dataset;
mod editor;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use dataset::{config_from_dataset, dataset_from_config, split_list, MARKER_ATTRIBUTE};
pub use editor::{TagEditorConfig, DEFAULT_FIELD_NAME, DEFAULT_PLACEHOLDER, DEFAULT_VARIANT};
pub use settings::{FieldSettings, Settings, DEFAULT_TICK_RATE_MS};

/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV: &str = "MOSAIC_TAGS_CONFIG";

/// Errors that can occur while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The settings file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file could not be written.
    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Settings could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// The configuration is well-formed but semantically invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Path of the settings file.
///
/// `MOSAIC_TAGS_CONFIG` wins when set; otherwise the platform config
/// directory with `mosaic-tags/config.toml` appended.
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("mosaic-tags").join("config.toml"))
}

impl Settings {
    /// Load settings from the default location.
    ///
    /// A missing file yields the default settings.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    /// Load settings from a specific file.
    ///
    /// A missing file yields the default settings. The loaded settings are
    /// validated before being returned.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let settings: Settings = toml::from_str(&contents)?;
        settings.validate()?;

        info!(path = %path.display(), fields = settings.fields.len(), "Loaded settings");
        Ok(settings)
    }

    /// Write settings to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }
        let contents = self.to_toml()?;
        fs::write(path, contents).map_err(ConfigError::WriteError)?;
        debug!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
