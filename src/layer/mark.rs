//! The artwork mark and its optional glow.

use resvg::tiny_skia::{FilterQuality, Pixmap, PixmapPaint, Rect, Transform};

use super::{LayerEffect, RenderContext};
use crate::artwork::Artwork;
use crate::geometry::artwork_rect;
use crate::raster::{blur_pixmap, tint_coverage};
use crate::settings::{ArtworkSettings, GlowSettings};

/// How many times the glow pass is stacked before the crisp draw.
const GLOW_PASSES: usize = 3;

impl LayerEffect for ArtworkSettings {
    const NAME: &'static str = "artwork";

    fn is_active(&self, ctx: &RenderContext<'_>) -> bool {
        ctx.artwork.is_some()
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let Some(artwork) = ctx.artwork else {
            return;
        };
        let Some(rect) = artwork_rect(ctx.canvas.size_f32(), self.size_percent, self.offset_x, self.offset_y)
        else {
            tracing::debug!(size_percent = self.size_percent, "artwork skipped: zero size");
            return;
        };
        let transform = placement(artwork, rect);

        let glow = ctx.settings.glow.clone();
        if glow.enabled && glow.opacity_percent > 0.0 {
            paint_glow(ctx, &glow, artwork, transform);
        }

        draw_artwork(&mut ctx.surface, artwork, transform, 1.0);
    }
}

/// Maps the artwork bitmap onto `rect`.
fn placement(artwork: &Artwork, rect: Rect) -> Transform {
    Transform::from_row(
        rect.width() / artwork.width() as f32,
        0.0,
        0.0,
        rect.height() / artwork.height() as f32,
        rect.x(),
        rect.y(),
    )
}

fn draw_artwork(surface: &mut Pixmap, artwork: &Artwork, transform: Transform, opacity: f32) {
    surface.draw_pixmap(
        0,
        0,
        artwork.pixmap().as_ref(),
        &PixmapPaint {
            opacity,
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        },
        transform,
        None,
    );
}

/// Stacks a blurred, tinted copy of the artwork together with the artwork
/// itself, each at the glow opacity.
fn paint_glow(ctx: &mut RenderContext<'_>, glow: &GlowSettings, artwork: &Artwork, transform: Transform) {
    let Some(mut coverage) = Pixmap::new(ctx.surface.width(), ctx.surface.height()) else {
        return;
    };
    draw_artwork(&mut coverage, artwork, transform, 1.0);
    tint_coverage(&mut coverage, glow.color.as_tuple());

    let Some(halo) = blur_pixmap(&coverage, glow.blur) else {
        tracing::warn!("glow blur failed");
        return;
    };

    let opacity = glow.opacity_percent / 100.0;
    let halo_paint = PixmapPaint {
        opacity,
        ..PixmapPaint::default()
    };
    for _ in 0..GLOW_PASSES {
        ctx.surface
            .draw_pixmap(0, 0, halo.as_ref(), &halo_paint, Transform::identity(), None);
        draw_artwork(&mut ctx.surface, artwork, transform, opacity);
    }
}
