//! Settings snapshot for a render, serializable to JSON.
//!
//! An [`IconSettings`] value captures every layer's parameters. It is the sole
//! input to a render besides the loaded artwork, and it is treated as an
//! immutable value: UI controls produce a new snapshot through the `with_*`
//! builders instead of mutating one in place.
//!
//! # Example
//!
//! ```
//! use icon_composer::{IconSettings, BackgroundSettings, HexColor};
//!
//! let settings = IconSettings::default().with_background(BackgroundSettings {
//!     gradient_enabled: false,
//!     color1: HexColor::rgb(0x1a, 0x1a, 0x1a),
//!     ..BackgroundSettings::default()
//! });
//!
//! let json = settings.to_json().unwrap();
//! let restored = IconSettings::from_json(&json).unwrap();
//! assert_eq!(settings, restored);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::Result;
use crate::layer::paint::{BlendMode, GradientDirection};

// ============================================================================
// Layer Settings
// ============================================================================

/// The squircle background shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundSettings {
    pub enabled: bool,

    /// Share of the canvas the shape occupies before the border is removed (0-100).
    pub size_percent: f32,

    /// Corner radius in pixels, clamped to half the shape's side at render time.
    pub corner_radius: f32,

    /// Fill with a two-stop gradient instead of the flat `color1`.
    pub gradient_enabled: bool,

    pub color1: HexColor,
    pub color2: HexColor,
    pub gradient_direction: GradientDirection,

    /// Compositing operator used when the shape is filled.
    pub blend_mode: BlendMode,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            size_percent: 90.0,
            corner_radius: 180.0,
            gradient_enabled: true,
            color1: HexColor::rgb(0x1a, 0x1a, 0x1a),
            color2: HexColor::rgb(0x2d, 0x2d, 0x2d),
            gradient_direction: GradientDirection::TopBottom,
            blend_mode: BlendMode::Normal,
        }
    }
}

/// Drop shadow cast by the background shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowSettings {
    pub enabled: bool,
    pub offset_x: f32,
    pub offset_y: f32,

    /// Blur radius in pixels (>= 0).
    pub blur: f32,

    /// Grows (positive) or shrinks (negative) the shadow shape on every side.
    pub spread: f32,

    pub color: HexColor,

    /// Shadow opacity (0-100).
    pub opacity_percent: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            offset_x: 0.0,
            offset_y: 20.0,
            blur: 40.0,
            spread: 0.0,
            color: HexColor::BLACK,
            opacity_percent: 25.0,
        }
    }
}

/// Placement of the imported artwork. The bitmap itself is held by the composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtworkSettings {
    /// Artwork edge as a share of the canvas (0-100).
    pub size_percent: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl Default for ArtworkSettings {
    fn default() -> Self {
        Self {
            size_percent: 65.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

/// Which edge of the shape the highlight band hugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightPosition {
    #[default]
    Top,
    Bottom,
}

/// Soft white sheen over part of the shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightSettings {
    pub enabled: bool,

    /// Highlight strength (0-50).
    pub opacity_percent: f32,

    pub position: HighlightPosition,
}

impl Default for HighlightSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity_percent: 15.0,
            position: HighlightPosition::Top,
        }
    }
}

/// Colored halo behind the artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlowSettings {
    pub enabled: bool,
    pub color: HexColor,

    /// Blur radius in pixels (>= 0).
    pub blur: f32,

    /// Halo opacity (0-100).
    pub opacity_percent: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            color: HexColor::rgb(0x00, 0xd4, 0xff),
            blur: 20.0,
            opacity_percent: 50.0,
        }
    }
}

/// Transparent margin around the whole composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BorderSettings {
    /// Margin as a share of the canvas (0-15).
    pub size_percent: f32,
}

impl Default for BorderSettings {
    fn default() -> Self {
        Self { size_percent: 5.0 }
    }
}

// ============================================================================
// IconSettings
// ============================================================================

/// A complete settings snapshot.
///
/// # JSON Format
///
/// ```json
/// {
///   "background": { "enabled": true, "sizePercent": 90.0, "cornerRadius": 180.0,
///                   "gradientEnabled": true, "color1": "#1a1a1a", "color2": "#2d2d2d",
///                   "gradientDirection": "top-bottom", "blendMode": "normal" },
///   "shadow": { "enabled": true, "offsetX": 0.0, "offsetY": 20.0, "blur": 40.0,
///               "spread": 0.0, "color": "#000000", "opacityPercent": 25.0 },
///   "artwork": { "sizePercent": 65.0, "offsetX": 0.0, "offsetY": 0.0 },
///   "highlight": { "enabled": true, "opacityPercent": 15.0, "position": "top" },
///   "glow": { "enabled": false, "color": "#00d4ff", "blur": 20.0, "opacityPercent": 50.0 },
///   "border": { "sizePercent": 5.0 }
/// }
/// ```
///
/// Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct IconSettings {
    pub background: BackgroundSettings,
    pub shadow: ShadowSettings,
    pub artwork: ArtworkSettings,
    pub highlight: HighlightSettings,
    pub glow: GlowSettings,
    pub border: BorderSettings,
}

impl IconSettings {
    /// Creates a snapshot with the default look.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the background settings.
    pub fn with_background(mut self, background: BackgroundSettings) -> Self {
        self.background = background;
        self
    }

    /// Replaces the shadow settings.
    pub fn with_shadow(mut self, shadow: ShadowSettings) -> Self {
        self.shadow = shadow;
        self
    }

    /// Replaces the artwork placement.
    pub fn with_artwork(mut self, artwork: ArtworkSettings) -> Self {
        self.artwork = artwork;
        self
    }

    /// Replaces the highlight settings.
    pub fn with_highlight(mut self, highlight: HighlightSettings) -> Self {
        self.highlight = highlight;
        self
    }

    /// Replaces the glow settings.
    pub fn with_glow(mut self, glow: GlowSettings) -> Self {
        self.glow = glow;
        self
    }

    /// Replaces the border settings.
    pub fn with_border(mut self, border: BorderSettings) -> Self {
        self.border = border;
        self
    }

    /// Returns a copy with every numeric field forced into its valid range.
    ///
    /// Non-finite values fall back to the field's default. Renders always go
    /// through this, so callers never need to pre-validate.
    pub fn sanitized(&self) -> Self {
        let bg_default = BackgroundSettings::default();
        let shadow_default = ShadowSettings::default();
        let artwork_default = ArtworkSettings::default();
        let highlight_default = HighlightSettings::default();
        let glow_default = GlowSettings::default();
        let border_default = BorderSettings::default();

        Self {
            background: BackgroundSettings {
                size_percent: clamp_or(self.background.size_percent, 0.0, 100.0, bg_default.size_percent),
                corner_radius: at_least(self.background.corner_radius, 0.0, bg_default.corner_radius),
                ..self.background.clone()
            },
            shadow: ShadowSettings {
                offset_x: finite_or(self.shadow.offset_x, shadow_default.offset_x),
                offset_y: finite_or(self.shadow.offset_y, shadow_default.offset_y),
                blur: at_least(self.shadow.blur, 0.0, shadow_default.blur),
                spread: finite_or(self.shadow.spread, shadow_default.spread),
                opacity_percent: clamp_or(self.shadow.opacity_percent, 0.0, 100.0, shadow_default.opacity_percent),
                ..self.shadow.clone()
            },
            artwork: ArtworkSettings {
                size_percent: clamp_or(self.artwork.size_percent, 0.0, 100.0, artwork_default.size_percent),
                offset_x: finite_or(self.artwork.offset_x, artwork_default.offset_x),
                offset_y: finite_or(self.artwork.offset_y, artwork_default.offset_y),
            },
            highlight: HighlightSettings {
                opacity_percent: clamp_or(
                    self.highlight.opacity_percent,
                    0.0,
                    50.0,
                    highlight_default.opacity_percent,
                ),
                ..self.highlight.clone()
            },
            glow: GlowSettings {
                blur: at_least(self.glow.blur, 0.0, glow_default.blur),
                opacity_percent: clamp_or(self.glow.opacity_percent, 0.0, 100.0, glow_default.opacity_percent),
                ..self.glow.clone()
            },
            border: BorderSettings {
                size_percent: clamp_or(self.border.size_percent, 0.0, 15.0, border_default.size_percent),
            },
        }
    }

    /// Serializes the settings to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the settings to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Writes settings to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    finite_or(value, fallback).clamp(min, max)
}

fn at_least(value: f32, min: f32, fallback: f32) -> f32 {
    finite_or(value, fallback).max(min)
}

// ============================================================================
// Tests
// ============================================================================
