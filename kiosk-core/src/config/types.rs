//! Configuration data structures.
//!
//! The structs are populated by deserializing a TOML file. Missing fields take
//! the values from [`super::defaults`]; unknown fields are rejected through
//! `#[serde(deny_unknown_fields)]`.

use super::defaults;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// # Examples
///
/// ```
/// use kiosk_core::config::LoggingConfig;
/// use std::path::PathBuf;
///
/// let toml_str = r#"
/// level = "debug"
/// file_path = "/var/log/kiosk.log"
/// format = "json"
/// "#;
/// let log_config: LoggingConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, Some(PathBuf::from("/var/log/kiosk.log")));
/// assert_eq!(log_config.format, "json");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level, one of "trace", "debug", "info", "warn", "error"
    /// (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional file receiving a copy of the log. Rotated daily.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// How a display mode is chosen among the modes an output advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModePolicy {
    /// The last mode in the advertised ordering.
    #[default]
    Last,
    /// The mode the output flags as preferred, or the last one if none is
    /// flagged.
    Preferred,
}

/// Settings applied to the kiosk's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "defaults::default_mode_policy")]
    pub mode_policy: ModePolicy,
    /// Clear color of every frame.
    #[serde(default = "defaults::default_background")]
    pub background: Color,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode_policy: defaults::default_mode_policy(),
            background: defaults::default_background(),
        }
    }
}

/// Pointer cursor settings used when an output is attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CursorConfig {
    /// XCursor theme name. `None` selects the platform default theme.
    #[serde(default = "defaults::default_cursor_theme")]
    pub theme: Option<String>,
    /// Base cursor size in logical pixels, before output scaling.
    #[serde(default = "defaults::default_cursor_size")]
    pub size: u32,
    /// Image shown before any client sets a cursor.
    #[serde(default = "defaults::default_cursor_image")]
    pub default_image: String,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            theme: defaults::default_cursor_theme(),
            size: defaults::default_cursor_size(),
            default_image: defaults::default_cursor_image(),
        }
    }
}

/// Root configuration of the kiosk.
///
/// # Examples
///
/// ```
/// use kiosk_core::config::{KioskConfig, ModePolicy};
///
/// let toml_str = r#"
/// [output]
/// mode_policy = "preferred"
///
/// [cursor]
/// size = 32
/// "#;
/// let config: KioskConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.output.mode_policy, ModePolicy::Preferred);
/// assert_eq!(config.cursor.size, 32);
/// assert_eq!(config.cursor.default_image, "left_ptr");
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct KioskConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_output_config")]
    pub output: OutputConfig,
    #[serde(default = "defaults::default_cursor_config")]
    pub cursor: CursorConfig,
}
