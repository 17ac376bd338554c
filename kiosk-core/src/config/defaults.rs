//! Default configuration values.
//!
//! These functions are referenced by `serde`'s `default` attribute in the
//! configuration structures.

use super::types::{CursorConfig, LoggingConfig, ModePolicy, OutputConfig};
use crate::types::Color;
use std::path::PathBuf;

pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig::default()
}

pub(super) fn default_output_config() -> OutputConfig {
    OutputConfig::default()
}

pub(super) fn default_cursor_config() -> CursorConfig {
    CursorConfig::default()
}

/// `"info"`
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file.
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// `"text"`
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

pub(super) fn default_mode_policy() -> ModePolicy {
    ModePolicy::Last
}

/// Neutral grey shown wherever no view covers the output.
pub(super) fn default_background() -> Color {
    Color::new(0.3, 0.3, 0.3, 1.0)
}

pub(super) fn default_cursor_theme() -> Option<String> {
    None
}

pub(super) fn default_cursor_size() -> u32 {
    24
}

pub(super) fn default_cursor_image() -> String {
    "left_ptr".to_string()
}
