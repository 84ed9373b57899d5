//! Geometry engine: canvas layout and the squircle boundary path.
//!
//! All user-facing sizes are percentages of the canvas edge. This module maps
//! them to absolute pixel geometry and builds the rounded-square outline that
//! the background, shadow and highlight layers share.

use resvg::tiny_skia::{Path, PathBuilder, Rect};

use crate::error::{Error, Result};

/// Largest supported canvas edge in pixels.
pub const MAX_CANVAS_SIZE: u32 = 8192;

/// Cubic Bézier control-point factor for a quarter circle.
const KAPPA: f32 = 0.552_284_8;

// ============================================================================
// CanvasSpec
// ============================================================================

/// The square canvas a render targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasSpec {
    size: u32,
}

impl CanvasSpec {
    /// Edge length of the 1024px master icon.
    pub const DEFAULT_SIZE: u32 = 1024;

    /// Creates a canvas, rejecting zero or oversized edges.
    pub fn new(size: u32) -> Result<Self> {
        if size == 0 || size > MAX_CANVAS_SIZE {
            return Err(Error::InvalidCanvas(size));
        }
        Ok(Self { size })
    }

    /// Edge length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Edge length as a float for geometry math.
    pub fn size_f32(&self) -> f32 {
        self.size as f32
    }
}

impl Default for CanvasSpec {
    fn default() -> Self {
        Self {
            size: Self::DEFAULT_SIZE,
        }
    }
}

// ============================================================================
// Layout
// ============================================================================

/// Absolute placement of the background shape on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Transparent margin reserved on every side, in pixels.
    pub border: f32,
    /// Edge length of the (always square) background shape.
    pub shape_size: f32,
    /// Left edge of the shape.
    pub shape_x: f32,
    /// Top edge of the shape.
    pub shape_y: f32,
}

impl Layout {
    /// Returns true when the shape has no area.
    pub fn is_degenerate(&self) -> bool {
        !(self.shape_size > 0.0)
    }

    /// The shape's bounding box, or `None` when degenerate.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_degenerate() {
            return None;
        }
        Rect::from_xywh(self.shape_x, self.shape_y, self.shape_size, self.shape_size)
    }

    /// Clamps a corner radius so it never exceeds half the shape's side.
    pub fn clamp_corner_radius(&self, corner_radius: f32) -> f32 {
        clamp_corner_radius(corner_radius, self.shape_size, self.shape_size)
    }

    /// Builds the squircle outline for this layout.
    pub fn squircle(&self, corner_radius: f32) -> Option<Path> {
        squircle_path(
            self.shape_x,
            self.shape_y,
            self.shape_size,
            self.shape_size,
            corner_radius,
        )
    }
}

/// Computes where the background shape sits on the canvas.
///
/// `border = border% * canvas`, `shape = size% * canvas - 2 * border`, and the
/// shape is centered. A negative shape size is clamped to zero.
pub fn compute_layout(canvas_size: f32, border_percent: f32, background_size_percent: f32) -> Layout {
    let border = (border_percent / 100.0) * canvas_size;
    let raw = (background_size_percent / 100.0) * canvas_size - 2.0 * border;
    let shape_size = if raw.is_finite() { raw.max(0.0) } else { 0.0 };
    let offset = (canvas_size - shape_size) / 2.0;

    Layout {
        border,
        shape_size,
        shape_x: offset,
        shape_y: offset,
    }
}

/// Places the artwork on the canvas.
///
/// The artwork is centered on the canvas (not on the background shape) and
/// then shifted by the offsets, so it may sit partly outside the shape.
/// Returns `None` for a zero-sized artwork.
pub fn artwork_rect(canvas_size: f32, size_percent: f32, offset_x: f32, offset_y: f32) -> Option<Rect> {
    let size = (size_percent / 100.0) * canvas_size;
    if !(size > 0.0) {
        return None;
    }
    let origin = (canvas_size - size) / 2.0;
    Rect::from_xywh(origin + offset_x, origin + offset_y, size, size)
}

// ============================================================================
// Squircle path
// ============================================================================

/// Clamps a radius to `[0, min(width, height) / 2]`.
pub fn clamp_corner_radius(corner_radius: f32, width: f32, height: f32) -> f32 {
    if !corner_radius.is_finite() {
        return 0.0;
    }
    corner_radius.max(0.0).min(width / 2.0).min(height / 2.0)
}

/// Builds a closed rounded-rectangle boundary.
///
/// A radius of zero yields the exact rectangle; a radius of at least half the
/// side yields the inscribed circle (for a square). Corners are quarter
/// circles approximated by cubic Béziers. Returns `None` for an empty rect.
pub fn squircle_path(x: f32, y: f32, width: f32, height: f32, corner_radius: f32) -> Option<Path> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }

    let r = clamp_corner_radius(corner_radius, width, height);
    if r <= 0.0 {
        return Some(PathBuilder::from_rect(Rect::from_xywh(x, y, width, height)?));
    }

    let c = r * KAPPA;
    let right = x + width;
    let bottom = y + height;

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.cubic_to(right - r + c, y, right, y + r - c, right, y + r);
    pb.line_to(right, bottom - r);
    pb.cubic_to(right, bottom - r + c, right - r + c, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.cubic_to(x + r - c, bottom, x, bottom - r + c, x, bottom - r);
    pb.line_to(x, y + r);
    pb.cubic_to(x, y + r - c, x + r - c, y, x + r, y);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use resvg::tiny_skia::PathSegment;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn canvas_spec_bounds() {
        assert!(CanvasSpec::new(0).is_err());
        assert!(CanvasSpec::new(MAX_CANVAS_SIZE + 1).is_err());
        assert_eq!(CanvasSpec::new(512).unwrap().size(), 512);
        assert_eq!(CanvasSpec::default().size(), 1024);
    }

    #[test]
    fn reference_layout() {
        let layout = compute_layout(1024.0, 5.0, 90.0);
        assert!(approx(layout.border, 51.2));
        assert!(approx(layout.shape_size, 819.2));
        assert!(approx(layout.shape_x, 102.4));
        assert!(approx(layout.shape_y, 102.4));
    }

    #[test]
    fn layout_is_centered_across_slider_ranges() {
        let canvas = 1024.0;
        let mut border = 0.0;
        while border <= 15.0 {
            for size in (50..=100).step_by(5) {
                let layout = compute_layout(canvas, border, size as f32);
                assert!(layout.shape_size >= 0.0);
                assert_eq!(layout.shape_x, layout.shape_y);
                assert!(approx(layout.shape_x, (canvas - layout.shape_size) / 2.0));
            }
            border += 0.5;
        }
    }

    #[test]
    fn negative_shape_clamps_to_zero() {
        let layout = compute_layout(1024.0, 15.0, 10.0);
        assert_eq!(layout.shape_size, 0.0);
        assert!(layout.is_degenerate());
        assert!(layout.bounds().is_none());
        assert!(layout.squircle(20.0).is_none());
        assert!(approx(layout.shape_x, 512.0));
    }

    #[test]
    fn zero_radius_is_exact_square() {
        let path = squircle_path(10.0, 20.0, 100.0, 100.0, 0.0).unwrap();
        assert_eq!(path.bounds(), Rect::from_xywh(10.0, 20.0, 100.0, 100.0).unwrap());
        assert_eq!(path.points().len(), 4);
    }

    #[test]
    fn oversized_radius_matches_half_side() {
        let clamped = squircle_path(0.0, 0.0, 200.0, 200.0, 100.0).unwrap();
        let oversized = squircle_path(0.0, 0.0, 200.0, 200.0, 1000.0).unwrap();
        assert_eq!(clamped.points(), oversized.points());
        assert_eq!(clamped.bounds(), oversized.bounds());
    }

    #[test]
    fn half_side_radius_is_a_circle() {
        let path = squircle_path(0.0, 0.0, 200.0, 200.0, 100.0).unwrap();
        // Every on-curve point lies on the inscribed circle.
        for segment in path.segments() {
            let p = match segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
                PathSegment::CubicTo(_, _, p) => p,
                PathSegment::QuadTo(_, p) => p,
                PathSegment::Close => continue,
            };
            let d = ((p.x - 100.0).powi(2) + (p.y - 100.0).powi(2)).sqrt();
            assert!(approx(d, 100.0), "point {:?} is {} from center", p, d);
        }
        assert_eq!(path.bounds(), Rect::from_xywh(0.0, 0.0, 200.0, 200.0).unwrap());
    }

    #[test]
    fn negative_radius_clamps_to_zero() {
        assert_eq!(clamp_corner_radius(-5.0, 10.0, 10.0), 0.0);
        assert_eq!(clamp_corner_radius(f32::NAN, 10.0, 10.0), 0.0);
        assert_eq!(clamp_corner_radius(7.0, 10.0, 30.0), 5.0);
    }

    #[test]
    fn artwork_rect_centers_on_canvas() {
        let rect = artwork_rect(1024.0, 65.0, 0.0, 0.0).unwrap();
        assert!(approx(rect.width(), 665.6));
        assert!(approx(rect.x(), (1024.0 - 665.6) / 2.0));

        let shifted = artwork_rect(1024.0, 65.0, 40.0, -30.0).unwrap();
        assert!(approx(shifted.x(), rect.x() + 40.0));
        assert!(approx(shifted.y(), rect.y() - 30.0));

        assert!(artwork_rect(1024.0, 0.0, 0.0, 0.0).is_none());
    }
}
