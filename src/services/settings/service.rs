use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use crate::models::settings::LayoutSettings;

pub const SETTINGS_FILE_NAME: &str = "layout.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Default settings location, e.g. `~/.config/schedule-layout/layout.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "Ken24T", "schedule-layout")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config directory, if one can be resolved.
    pub fn from_default_location() -> Option<Self> {
        default_settings_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load and validate settings. A missing file yields the defaults.
    pub fn load(&self) -> Result<LayoutSettings, SettingsError> {
        if !self.path.exists() {
            log::info!(
                "No layout settings at {}; using defaults",
                self.path.display()
            );
            return Ok(LayoutSettings::default());
        }

        let contents = std::fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let settings = parse_settings(&contents)?;
        log::debug!("Loaded layout settings from {}", self.path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is unreadable or
    /// invalid.
    pub fn load_or_default(&self) -> LayoutSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{}; falling back to default layout settings", err);
                LayoutSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &LayoutSettings) -> Result<(), SettingsError> {
        settings.validate().map_err(SettingsError::Invalid)?;
        let contents = toml::to_string_pretty(settings)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, contents).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// Parse TOML settings and validate them.
pub fn parse_settings(contents: &str) -> Result<LayoutSettings, SettingsError> {
    let settings: LayoutSettings = toml::from_str(contents)?;
    settings.validate().map_err(SettingsError::Invalid)?;
    Ok(settings)
}
