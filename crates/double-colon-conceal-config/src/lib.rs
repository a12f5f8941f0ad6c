use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Glyph shown in place of `::` when nothing else is configured.
pub const DEFAULT_REPLACEMENT: &str = ":";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User settings for both concealment surfaces.
///
/// Keys missing from the file fall back to [`Settings::default`]. An empty
/// replacement is valid and hides the separator completely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Conceal in the editing view. Off by default.
    pub edit_mode: bool,
    /// Replacement for `::` in the reading view.
    pub read_replacement: String,
    /// Replacement for `::` in the editing view.
    pub edit_replacement: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            edit_mode: false,
            read_replacement: DEFAULT_REPLACEMENT.to_string(),
            edit_replacement: DEFAULT_REPLACEMENT.to_string(),
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(settings))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    /// Loads the settings file, or the defaults when there is none.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        Ok(Self::load()?.unwrap_or_default())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/double-colon-conceal");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Normalises an optional replacement: absent means "hide entirely".
    pub fn replacement_or_empty(value: Option<String>) -> String {
        value.unwrap_or_default()
    }
}
