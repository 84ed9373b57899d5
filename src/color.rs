//! Hex color values used by the settings records.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use palette::rgb::FromHexError;
use resvg::tiny_skia::Color;
use serde::{Deserialize, Serialize};

/// An opaque sRGB color written as `#rrggbb`.
///
/// Parsing accepts `#rrggbb` and `#rgb`, with or without the leading `#`.
/// Serializes back to lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Creates a color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    /// Returns the channels as an `(r, g, b)` tuple.
    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }

    /// Converts to a tiny-skia color with the given alpha (clamped to 0..=1).
    pub fn to_skia(&self, alpha: f32) -> Color {
        let mut color = Color::from_rgba8(self.0.red, self.0.green, self.0.blue, 255);
        color.set_alpha(if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 1.0 });
        color
    }
}

impl FromStr for HexColor {
    type Err = FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim()).map(Self)
    }
}

impl TryFrom<String> for HexColor {
    type Error = FromHexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0.red, self.0.green, self.0.blue)
    }
}
