//! Kiosk configuration.
//!
//! - [`types`]: the deserializable configuration structures.
//! - `defaults`: default values referenced by serde.
//! - [`loader`]: [`ConfigLoader`], which reads and validates a TOML file.

mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CursorConfig, KioskConfig, LoggingConfig, ModePolicy, OutputConfig};
