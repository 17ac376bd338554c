//! Core data types shared by the kiosk crates.

pub mod color;
pub mod geometry;

pub use color::{Color, ColorParseError};
pub use geometry::{Point, Rect, Size};
