//! Soft sheen along one edge of the background shape.

use resvg::tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Mask, Paint, Point, Rect, SpreadMode, Transform,
};

use super::{LayerEffect, RenderContext};
use crate::settings::{HighlightPosition, HighlightSettings};

/// Height of the band as a share of the shape.
const BAND_FRACTION: f32 = 0.4;

/// Alpha at full strength is `opacity * PEAK_ALPHA`.
const PEAK_ALPHA: f32 = 0.3;

impl LayerEffect for HighlightSettings {
    const NAME: &'static str = "highlight";

    fn is_active(&self, ctx: &RenderContext<'_>) -> bool {
        self.enabled
            && ctx.settings.background.enabled
            && self.opacity_percent > 0.0
            && ctx.boundary.is_some()
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let Some(path) = ctx.boundary.as_ref() else {
            return;
        };
        let layout = ctx.layout;
        let band = layout.shape_size * BAND_FRACTION;

        let (rect, edge, inner) = match self.position {
            HighlightPosition::Top => (
                Rect::from_xywh(layout.shape_x, layout.shape_y, layout.shape_size, band),
                layout.shape_y,
                layout.shape_y + band,
            ),
            HighlightPosition::Bottom => {
                let bottom = layout.shape_y + layout.shape_size;
                (
                    Rect::from_xywh(layout.shape_x, bottom - band, layout.shape_size, band),
                    bottom,
                    bottom - band,
                )
            }
        };
        let Some(rect) = rect else {
            return;
        };

        let alpha = self.opacity_percent / 100.0 * PEAK_ALPHA;
        let mut start = Color::WHITE;
        start.set_alpha(alpha);
        let Some(shader) = LinearGradient::new(
            Point::from_xy(0.0, edge),
            Point::from_xy(0.0, inner),
            vec![
                GradientStop::new(0.0, start),
                GradientStop::new(1.0, Color::TRANSPARENT),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            tracing::debug!(band, "highlight gradient degenerate");
            return;
        };

        let Some(mut clip) = Mask::new(ctx.surface.width(), ctx.surface.height()) else {
            return;
        };
        clip.fill_path(path, FillRule::Winding, true, Transform::identity());

        let mut paint = Paint::default();
        paint.shader = shader;
        paint.anti_alias = true;
        ctx.surface.fill_rect(rect, &paint, Transform::identity(), Some(&clip));
    }
}

#[cfg(test)]
mod tests {
    use crate::color::HexColor;
    use crate::geometry::CanvasSpec;
    use crate::layer::render;
    use crate::raster::Raster;
    use crate::settings::{
        BackgroundSettings, BorderSettings, HighlightPosition, HighlightSettings, IconSettings,
        ShadowSettings,
    };

    /// Black full-bleed shape on a 100px canvas, so the band occupies rows 0..40.
    fn settings(highlight: HighlightSettings) -> IconSettings {
        IconSettings::default()
            .with_background(BackgroundSettings {
                size_percent: 100.0,
                corner_radius: 0.0,
                gradient_enabled: false,
                color1: HexColor::BLACK,
                ..BackgroundSettings::default()
            })
            .with_border(BorderSettings { size_percent: 0.0 })
            .with_shadow(ShadowSettings {
                enabled: false,
                ..ShadowSettings::default()
            })
            .with_highlight(highlight)
    }

    fn draw(settings: &IconSettings) -> Raster {
        render(CanvasSpec::new(100).unwrap(), settings, None).unwrap()
    }

    fn red_at(raster: &Raster, y: u32) -> u8 {
        raster.pixel(50, y).unwrap()[0]
    }

    fn strong(position: HighlightPosition) -> HighlightSettings {
        HighlightSettings {
            enabled: true,
            opacity_percent: 50.0,
            position,
        }
    }

    #[test]
    fn top_band_fades_downward() {
        let raster = draw(&settings(strong(HighlightPosition::Top)));

        let edge = red_at(&raster, 0);
        let middle = red_at(&raster, 20);
        // Peak alpha is 0.5 * 0.3, i.e. about 38 over black.
        assert!((30..=42).contains(&edge), "edge {edge}");
        assert!(middle > 0 && middle < edge, "middle {middle}");
        assert_eq!(red_at(&raster, 45), 0);
        assert_eq!(red_at(&raster, 95), 0);
    }

    #[test]
    fn bottom_band_mirrors_top() {
        let raster = draw(&settings(strong(HighlightPosition::Bottom)));

        assert!(red_at(&raster, 99) > 25);
        assert_eq!(red_at(&raster, 55), 0);
        assert_eq!(red_at(&raster, 5), 0);
    }

    #[test]
    fn band_is_clipped_to_the_shape() {
        let mut s = settings(strong(HighlightPosition::Top));
        s.background.size_percent = 50.0;
        s.background.corner_radius = 25.0;
        let raster = draw(&s);

        // Rounded corner of a 50px circle at 25..75.
        assert_eq!(raster.pixel(26, 26).unwrap()[3], 0);
        assert_eq!(raster.pixel(50, 10).unwrap()[3], 0);
        assert!(raster.pixel(50, 27).unwrap()[0] > 0);
    }

    #[test]
    fn zero_opacity_leaves_the_fill_alone() {
        let raster = draw(&settings(HighlightSettings {
            opacity_percent: 0.0,
            ..strong(HighlightPosition::Top)
        }));
        assert_eq!(raster.pixel(50, 0), Some([0, 0, 0, 255]));
    }
}
