//! RGBA colors.
//!
//! [`Color`] stores normalized `f32` components, which is what the renderer's
//! clear call consumes. In configuration files a color is written as a hex
//! string (`"#RGB"`, `"#RGBA"`, `"#RRGGBB"` or `"#RRGGBBAA"`).
//!
//! # Examples
//!
//! ```
//! use kiosk_core::types::Color;
//!
//! let grey = Color::from_hex("#4d4d4dff").unwrap();
//! assert_eq!(grey.to_hex_with_alpha(), "#4d4d4dff");
//! assert_eq!(Color::rgb(1.0, 0.0, 0.0).to_array(), [1.0, 0.0, 0.0, 1.0]);
//! ```

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// Error type for color parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    #[error("Invalid hex color string format: '{0}'. Expected #RGB, #RGBA, #RRGGBB, or #RRGGBBAA.")]
    InvalidHexFormat(String),

    /// A component contains a non-hexadecimal digit.
    #[error("Invalid hex digit in '{input_str}': {source}")]
    InvalidHexDigit {
        input_str: String,
        #[source]
        source: ParseIntError,
    },

    /// The digit count after `#` is not 3, 4, 6 or 8.
    #[error("Invalid hex color string length: '{0}'. Expected 3, 4, 6, or 8 hex digits.")]
    InvalidHexLength(String),
}

/// A color with red, green, blue and alpha components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// `0.0` is fully transparent, `1.0` is fully opaque.
    pub a: f32,
}

impl Color {
    /// Creates a new `Color`. Components outside `[0.0, 1.0]` are clamped.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    /// Creates a new opaque `Color`.
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Color::new(r, g, b, 1.0)
    }

    /// Creates a new `Color` from 8-bit components.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parses a hexadecimal color string.
    ///
    /// Shorthand forms expand each digit (`#F00` equals `#FF0000`). A missing
    /// alpha component means fully opaque. Hex digits are case-insensitive.
    pub fn from_hex(hex_str: &str) -> Result<Self, ColorParseError> {
        let input = hex_str
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::InvalidHexFormat(hex_str.to_string()))?;

        let component = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|e| ColorParseError::InvalidHexDigit {
                input_str: s.to_string(),
                source: e,
            })
        };
        let short = |s: &str| component(s).map(|v| (v << 4) | v);

        if !input.is_ascii() {
            return Err(ColorParseError::InvalidHexFormat(hex_str.to_string()));
        }

        match input.len() {
            3 => Ok(Color::from_rgba8(
                short(&input[0..1])?,
                short(&input[1..2])?,
                short(&input[2..3])?,
                0xff,
            )),
            4 => Ok(Color::from_rgba8(
                short(&input[0..1])?,
                short(&input[1..2])?,
                short(&input[2..3])?,
                short(&input[3..4])?,
            )),
            6 => Ok(Color::from_rgba8(
                component(&input[0..2])?,
                component(&input[2..4])?,
                component(&input[4..6])?,
                0xff,
            )),
            8 => Ok(Color::from_rgba8(
                component(&input[0..2])?,
                component(&input[2..4])?,
                component(&input[4..6])?,
                component(&input[6..8])?,
            )),
            _ => Err(ColorParseError::InvalidHexLength(hex_str.to_string())),
        }
    }

    /// Converts this color to 8-bit components, rounding to nearest.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        )
    }

    /// Formats as `"#rrggbbaa"`.
    pub fn to_hex_with_alpha(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    /// Returns the components as `[r, g, b, a]`, the layout renderers expect
    /// for clear colors.
    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex_with_alpha())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(SerdeError::custom)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s.trim())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_with_alpha())
    }
}
