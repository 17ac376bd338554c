//! Loading and validation of [`KioskConfig`].
//!
//! The kiosk reads at most one TOML file. [`ConfigLoader::load_or_default`]
//! falls back to [`KioskConfig::default`] when no path is given or the file
//! does not exist; any other read failure is an error.

use std::fs;
use std::path::Path;

use crate::config::KioskConfig;
use crate::error::{ConfigError, CoreError};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Namespace for the configuration loading functions.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads, parses and validates the configuration at `path`.
    ///
    /// An empty file yields the default configuration.
    pub fn load_from_path(path: &Path) -> Result<KioskConfig, CoreError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: KioskConfig = if content.trim().is_empty() {
            KioskConfig::default()
        } else {
            toml::from_str(&content).map_err(ConfigError::ParseError)?
        };

        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Loads from `path` when one is given and exists, otherwise returns the
    /// validated defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<KioskConfig, CoreError> {
        match path {
            Some(path) if path.exists() => Self::load_from_path(path),
            missing => {
                if let Some(path) = missing {
                    tracing::info!(path = %path.display(), "Configuration file not found, using defaults");
                }
                let mut config = KioskConfig::default();
                Self::validate_config(&mut config)?;
                Ok(config)
            }
        }
    }

    /// Normalizes the log level and format to lowercase and rejects values the
    /// kiosk cannot act on.
    fn validate_config(config: &mut KioskConfig) -> Result<(), CoreError> {
        config.logging.level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: '{}'. Must be one of: {}.",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ))
            .into());
        }

        config.logging.format = config.logging.format.to_lowercase();
        if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log format: '{}'. Must be one of: {}.",
                config.logging.format,
                LOG_FORMATS.join(", ")
            ))
            .into());
        }

        if let Some(path) = &config.logging.file_path {
            if path.file_name().is_none() {
                return Err(ConfigError::ValidationError(format!(
                    "Log file path {:?} does not name a file.",
                    path
                ))
                .into());
            }
        }

        if config.cursor.size == 0 {
            return Err(ConfigError::ValidationError(
                "Cursor size must be greater than zero.".to_string(),
            )
            .into());
        }

        if config.cursor.default_image.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Cursor default_image must not be empty.".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
