// Configuration management
//
// Front-end settings persisted as TOML: window, display palette, input
// channel sizing and log level. Every section falls back to its defaults
// when missing from the file.

use crate::backend::DEFAULT_COMMAND_BUFFER;
use crate::display::{Palette, WindowConfig, MAX_SCALE};
use log::{info, warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Default configuration file path
pub const CONFIG_FILE: &str = "chip8_frontend.toml";

/// Errors that can occur while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Input settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// Capacity of the key command channel to the backend
    pub command_buffer: usize,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level written to the log (`RUST_LOG` takes precedence)
    pub level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
        }
    }
}

/// Complete front-end configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Colors and scaling of the display
    pub display: Palette,
    /// Input settings
    pub input: InputSettings,
    /// Logging settings
    pub log: LogSettings,
}

impl FrontendConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: FrontendConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Load configuration from file, or fall back to defaults
    ///
    /// A missing file is created with the default configuration. A file
    /// that exists but fails to load is left untouched.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        match Self::load_from_file(path) {
            Ok(config) => {
                info!("configuration loaded from '{}'", path.display());
                config
            }
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                match config.save_to_file(path) {
                    Ok(()) => info!("created default configuration '{}'", path.display()),
                    Err(e) => warn!("could not save default configuration: {}", e),
                }
                config
            }
            Err(e) => {
                warn!(
                    "could not load configuration '{}' ({}), using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Check value ranges
    ///
    /// Identical foreground and background colors are allowed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SCALE).contains(&self.window.scale) {
            return Err(ConfigError::Invalid(format!(
                "window.scale must be between 1 and {}, got {}",
                MAX_SCALE, self.window.scale
            )));
        }

        if self.input.command_buffer == 0 {
            return Err(ConfigError::Invalid(
                "input.command_buffer must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Color, RenderingMode};

    #[test]
    fn test_default_config() {
        let config = FrontendConfig::default();
        assert_eq!(config.window.scale, 10);
        assert_eq!(config.display.foreground_color, Color::GREEN);
        assert_eq!(config.input.command_buffer, 128);
        assert_eq!(config.log.level, LevelFilter::Info);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = FrontendConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        assert!(toml_str.contains("[display]"));

        let deserialized = FrontendConfig::from_toml(&toml_str).expect("Failed to deserialize");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = FrontendConfig::from_toml(
            r#"
            [display]
            color = "rgb(255 255 255)"

            [log]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.display.foreground_color, Color::WHITE);
        assert_eq!(config.display.background_color, Color::BLACK);
        assert_eq!(config.display.rendering_mode, RenderingMode::Pixelated);
        assert_eq!(config.log.level, LevelFilter::Debug);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let result = FrontendConfig::from_toml("[window]\nscale = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = FrontendConfig::from_toml("[input]\ncommand_buffer = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let result = FrontendConfig::from_toml("[display]\nrendering = \"smooth\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_same_colors_allowed() {
        let config = FrontendConfig::from_toml(
            "[display]\nforeground_color = \"#000000\"\nbackground_color = \"#000000\"\n",
        )
        .unwrap();
        assert!(!config.display.has_distinct_colors());
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = FrontendConfig::default();
        config.window.scale = 6;
        config.save_to_file(&path).unwrap();

        let loaded = FrontendConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.window.scale, 6);
    }

    #[test]
    fn test_load_or_default_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let config = FrontendConfig::load_or_default(&path);
        assert_eq!(config, FrontendConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_load_or_default_keeps_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "not = [valid").unwrap();

        let config = FrontendConfig::load_or_default(&path);
        assert_eq!(config, FrontendConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "not = [valid");
    }
}
