//! Gradient and blend-mode resolution for the background fill.

use resvg::tiny_skia::{
    self, GradientStop, LinearGradient, Point, RadialGradient, Rect, Shader, SpreadMode, Transform,
};
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

// ============================================================================
// GradientDirection
// ============================================================================

/// Direction of the two-stop background gradient.
///
/// Unknown names parse as [`GradientDirection::TopBottom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum GradientDirection {
    #[default]
    TopBottom,
    BottomTop,
    LeftRight,
    RightLeft,
    /// Top-left to bottom-right.
    DiagonalTl,
    /// Top-right to bottom-left.
    DiagonalTr,
    /// Bottom-left to top-right.
    DiagonalBl,
    /// Bottom-right to top-left.
    DiagonalBr,
    /// `color1` at the center fading to `color2` at the edge.
    Radial,
    /// `color1` at the edge fading to `color2` at the center.
    RadialOuter,
}

impl GradientDirection {
    pub const ALL: [Self; 10] = [
        Self::TopBottom,
        Self::BottomTop,
        Self::LeftRight,
        Self::RightLeft,
        Self::DiagonalTl,
        Self::DiagonalTr,
        Self::DiagonalBl,
        Self::DiagonalBr,
        Self::Radial,
        Self::RadialOuter,
    ];

    /// Parses a kebab-case name, falling back to top-bottom.
    pub fn from_name(name: &str) -> Self {
        match name {
            "bottom-top" => Self::BottomTop,
            "left-right" => Self::LeftRight,
            "right-left" => Self::RightLeft,
            "diagonal-tl" => Self::DiagonalTl,
            "diagonal-tr" => Self::DiagonalTr,
            "diagonal-bl" => Self::DiagonalBl,
            "diagonal-br" => Self::DiagonalBr,
            "radial" => Self::Radial,
            "radial-outer" => Self::RadialOuter,
            _ => Self::TopBottom,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TopBottom => "top-bottom",
            Self::BottomTop => "bottom-top",
            Self::LeftRight => "left-right",
            Self::RightLeft => "right-left",
            Self::DiagonalTl => "diagonal-tl",
            Self::DiagonalTr => "diagonal-tr",
            Self::DiagonalBl => "diagonal-bl",
            Self::DiagonalBr => "diagonal-br",
            Self::Radial => "radial",
            Self::RadialOuter => "radial-outer",
        }
    }
}

impl From<String> for GradientDirection {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

// ============================================================================
// BlendMode
// ============================================================================

/// Compositing operator for the background fill.
///
/// Unknown names parse as [`BlendMode::Normal`] (source-over).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    SoftLight,
    HardLight,
    ColorDodge,
    ColorBurn,
    Difference,
    Exclusion,
}

impl BlendMode {
    /// Parses a kebab-case name, failing closed to `Normal`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "multiply" => Self::Multiply,
            "screen" => Self::Screen,
            "overlay" => Self::Overlay,
            "soft-light" => Self::SoftLight,
            "hard-light" => Self::HardLight,
            "color-dodge" => Self::ColorDodge,
            "color-burn" => Self::ColorBurn,
            "difference" => Self::Difference,
            "exclusion" => Self::Exclusion,
            _ => Self::Normal,
        }
    }

    /// Maps to the tiny-skia operator.
    pub fn to_skia(self) -> tiny_skia::BlendMode {
        match self {
            Self::Normal => tiny_skia::BlendMode::SourceOver,
            Self::Multiply => tiny_skia::BlendMode::Multiply,
            Self::Screen => tiny_skia::BlendMode::Screen,
            Self::Overlay => tiny_skia::BlendMode::Overlay,
            Self::SoftLight => tiny_skia::BlendMode::SoftLight,
            Self::HardLight => tiny_skia::BlendMode::HardLight,
            Self::ColorDodge => tiny_skia::BlendMode::ColorDodge,
            Self::ColorBurn => tiny_skia::BlendMode::ColorBurn,
            Self::Difference => tiny_skia::BlendMode::Difference,
            Self::Exclusion => tiny_skia::BlendMode::Exclusion,
        }
    }
}

impl From<String> for BlendMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

/// Resolves a blend-mode name straight to the compositing operator.
pub fn resolve_blend_mode(name: &str) -> tiny_skia::BlendMode {
    BlendMode::from_name(name).to_skia()
}

// ============================================================================
// Gradients
// ============================================================================

/// Anchor geometry of a resolved gradient, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradientGeometry {
    /// `color1` at `start`, `color2` at `end`.
    Linear { start: Point, end: Point },

    /// Circle around `center`. When `reversed`, `color1` sits on the rim and
    /// `color2` at the center.
    Radial {
        center: Point,
        radius: f32,
        reversed: bool,
    },
}

/// A two-stop gradient resolved against the shape's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedGradient {
    pub geometry: GradientGeometry,
    pub color1: HexColor,
    pub color2: HexColor,
}

impl ResolvedGradient {
    /// Anchors `direction` to `bounds`.
    pub fn new(direction: GradientDirection, bounds: Rect, color1: HexColor, color2: HexColor) -> Self {
        let (left, top, right, bottom) = (bounds.left(), bounds.top(), bounds.right(), bounds.bottom());
        let cx = left + bounds.width() / 2.0;
        let cy = top + bounds.height() / 2.0;

        let linear = |sx: f32, sy: f32, ex: f32, ey: f32| GradientGeometry::Linear {
            start: Point::from_xy(sx, sy),
            end: Point::from_xy(ex, ey),
        };
        let radial = |reversed: bool| GradientGeometry::Radial {
            center: Point::from_xy(cx, cy),
            radius: bounds.width() / 2.0,
            reversed,
        };

        let geometry = match direction {
            GradientDirection::TopBottom => linear(cx, top, cx, bottom),
            GradientDirection::BottomTop => linear(cx, bottom, cx, top),
            GradientDirection::LeftRight => linear(left, cy, right, cy),
            GradientDirection::RightLeft => linear(right, cy, left, cy),
            GradientDirection::DiagonalTl => linear(left, top, right, bottom),
            GradientDirection::DiagonalTr => linear(right, top, left, bottom),
            GradientDirection::DiagonalBl => linear(left, bottom, right, top),
            GradientDirection::DiagonalBr => linear(right, bottom, left, top),
            GradientDirection::Radial => radial(false),
            GradientDirection::RadialOuter => radial(true),
        };

        Self {
            geometry,
            color1,
            color2,
        }
    }

    /// Position on the `color1 -> color2` ramp for a canvas point, in `0..=1`.
    pub fn fraction_at(&self, x: f32, y: f32) -> f32 {
        let t = match self.geometry {
            GradientGeometry::Linear { start, end } => {
                let (dx, dy) = (end.x - start.x, end.y - start.y);
                let len_sq = dx * dx + dy * dy;
                if len_sq <= f32::EPSILON {
                    return 0.0;
                }
                ((x - start.x) * dx + (y - start.y) * dy) / len_sq
            }
            GradientGeometry::Radial {
                center,
                radius,
                reversed,
            } => {
                if radius <= f32::EPSILON {
                    return 0.0;
                }
                let s = ((x - center.x).powi(2) + (y - center.y).powi(2)).sqrt() / radius;
                if reversed { 1.0 - s.min(1.0) } else { s }
            }
        };
        t.clamp(0.0, 1.0)
    }

    /// Builds the tiny-skia shader, or `None` for degenerate anchors.
    pub fn shader(&self) -> Option<Shader<'static>> {
        let c1 = self.color1.to_skia(1.0);
        let c2 = self.color2.to_skia(1.0);

        match self.geometry {
            GradientGeometry::Linear { start, end } => LinearGradient::new(
                start,
                end,
                vec![GradientStop::new(0.0, c1), GradientStop::new(1.0, c2)],
                SpreadMode::Pad,
                Transform::identity(),
            ),
            GradientGeometry::Radial {
                center,
                radius,
                reversed,
            } => {
                // A reversed ramp runs rim -> center, which is the same as an
                // ordinary center -> rim ramp with the stops swapped.
                let (inner, outer) = if reversed { (c2, c1) } else { (c1, c2) };
                RadialGradient::new(
                    center,
                    center,
                    radius,
                    vec![GradientStop::new(0.0, inner), GradientStop::new(1.0, outer)],
                    SpreadMode::Pad,
                    Transform::identity(),
                )
            }
        }
    }
}

/// Resolves a gradient direction into a paint shader for `bounds`.
pub fn resolve_gradient(
    direction: GradientDirection,
    bounds: Rect,
    color1: HexColor,
    color2: HexColor,
) -> Option<Shader<'static>> {
    ResolvedGradient::new(direction, bounds, color1, color2).shader()
}
