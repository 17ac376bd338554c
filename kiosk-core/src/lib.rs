//! # Kiosk Core Library (`kiosk-core`)
//!
//! Foundational pieces shared by the kiosk compositor crates:
//!
//! - **Error Handling**: [`CoreError`] and its specific [`ConfigError`] and
//!   [`LoggingError`].
//! - **Core Data Types**: geometry ([`Point`], [`Size`], [`Rect`]) and
//!   [`Color`].
//! - **Configuration**: TOML loading and validation through [`ConfigLoader`].
//! - **Logging**: `tracing` setup with console and optional file output.
//!
//! ```rust,ignore
//! use kiosk_core::config::ConfigLoader;
//! use kiosk_core::logging::init_logging;
//!
//! fn main() -> Result<(), kiosk_core::CoreError> {
//!     let config = ConfigLoader::load_or_default(None)?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("kiosk core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::{ConfigLoader, KioskConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use types::{Color, Point, Rect, Size};
