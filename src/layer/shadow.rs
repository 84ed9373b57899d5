//! Drop shadow beneath the background shape.

use resvg::tiny_skia::{FillRule, Paint, Pixmap, PixmapPaint, Transform};

use super::{LayerEffect, RenderContext};
use crate::geometry::squircle_path;
use crate::raster::blur_pixmap;
use crate::settings::ShadowSettings;

impl LayerEffect for ShadowSettings {
    const NAME: &'static str = "shadow";

    /// No shadow without a background to cast it.
    fn is_active(&self, ctx: &RenderContext<'_>) -> bool {
        self.enabled && ctx.settings.background.enabled && self.opacity_percent > 0.0
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let layout = ctx.layout;
        if layout.is_degenerate() {
            tracing::debug!("shadow skipped: degenerate shape");
            return;
        }

        // Spread grows the shape on every side before blurring.
        let size = layout.shape_size + 2.0 * self.spread;
        let radius = layout.clamp_corner_radius(ctx.settings.background.corner_radius) + self.spread;
        let Some(path) = squircle_path(
            layout.shape_x - self.spread,
            layout.shape_y - self.spread,
            size,
            size,
            radius,
        ) else {
            tracing::debug!(spread = self.spread, "shadow skipped: spread collapses the shape");
            return;
        };

        let Some(mut mask) = Pixmap::new(ctx.surface.width(), ctx.surface.height()) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color(self.color.to_skia(1.0));
        paint.anti_alias = true;
        mask.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::from_translate(self.offset_x, self.offset_y),
            None,
        );

        let Some(shadow) = blur_pixmap(&mask, self.blur) else {
            tracing::warn!("shadow blur failed");
            return;
        };

        ctx.surface.draw_pixmap(
            0,
            0,
            shadow.as_ref(),
            &PixmapPaint {
                opacity: self.opacity_percent / 100.0,
                ..PixmapPaint::default()
            },
            Transform::identity(),
            None,
        );
    }
}
