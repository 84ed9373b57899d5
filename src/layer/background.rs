//! Background shape fill.

use resvg::tiny_skia::{FillRule, Paint, Transform};

use super::paint::ResolvedGradient;
use super::{LayerEffect, RenderContext};
use crate::settings::BackgroundSettings;

impl LayerEffect for BackgroundSettings {
    const NAME: &'static str = "background";

    fn is_active(&self, ctx: &RenderContext<'_>) -> bool {
        self.enabled && ctx.boundary.is_some()
    }

    fn paint(&self, ctx: &mut RenderContext<'_>) {
        let (Some(path), Some(bounds)) = (ctx.boundary.as_ref(), ctx.layout.bounds()) else {
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.blend_mode = self.blend_mode.to_skia();

        if self.gradient_enabled {
            let gradient = ResolvedGradient::new(self.gradient_direction, bounds, self.color1, self.color2);
            match gradient.shader() {
                Some(shader) => paint.shader = shader,
                None => {
                    tracing::warn!(direction = self.gradient_direction.name(), "gradient degenerate, using flat fill");
                    paint.set_color(self.color1.to_skia(1.0));
                }
            }
        } else {
            paint.set_color(self.color1.to_skia(1.0));
        }

        ctx.surface
            .fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

#[cfg(test)]
mod tests {
    use crate::color::HexColor;
    use crate::geometry::CanvasSpec;
    use crate::layer::paint::{BlendMode, GradientDirection};
    use crate::layer::render;
    use crate::settings::{
        BackgroundSettings, BorderSettings, HighlightSettings, IconSettings, ShadowSettings,
    };

    const RED: HexColor = HexColor::rgb(255, 0, 0);
    const BLUE: HexColor = HexColor::rgb(0, 0, 255);

    /// Full-bleed square background on a 100px canvas.
    fn settings(background: BackgroundSettings) -> IconSettings {
        IconSettings::default()
            .with_background(BackgroundSettings {
                size_percent: 100.0,
                corner_radius: 0.0,
                ..background
            })
            .with_border(BorderSettings { size_percent: 0.0 })
            .with_shadow(ShadowSettings {
                enabled: false,
                ..ShadowSettings::default()
            })
            .with_highlight(HighlightSettings {
                enabled: false,
                ..HighlightSettings::default()
            })
    }

    fn gradient(direction: GradientDirection) -> BackgroundSettings {
        BackgroundSettings {
            gradient_enabled: true,
            color1: RED,
            color2: BLUE,
            gradient_direction: direction,
            ..BackgroundSettings::default()
        }
    }

    fn draw(settings: &IconSettings) -> crate::raster::Raster {
        render(CanvasSpec::new(100).unwrap(), settings, None).unwrap()
    }

    #[test]
    fn flat_fill_uses_color1() {
        let raster = draw(&settings(BackgroundSettings {
            gradient_enabled: false,
            color1: RED,
            color2: BLUE,
            ..BackgroundSettings::default()
        }));
        assert_eq!(raster.pixel(0, 0), Some([255, 0, 0, 255]));
        assert_eq!(raster.pixel(99, 99), Some([255, 0, 0, 255]));
    }

    #[test]
    fn top_bottom_runs_from_color1_to_color2() {
        let raster = draw(&settings(gradient(GradientDirection::TopBottom)));

        let top = raster.pixel(50, 1).unwrap();
        let bottom = raster.pixel(50, 98).unwrap();
        assert!(top[0] > 240 && top[2] < 15, "top {top:?}");
        assert!(bottom[2] > 240 && bottom[0] < 15, "bottom {bottom:?}");
        // Rows are uniform across a vertical gradient.
        assert_eq!(raster.pixel(5, 40), raster.pixel(95, 40));
    }

    #[test]
    fn left_right_runs_across() {
        let raster = draw(&settings(gradient(GradientDirection::LeftRight)));
        assert!(raster.pixel(1, 50).unwrap()[0] > 240);
        assert!(raster.pixel(98, 50).unwrap()[2] > 240);
    }

    #[test]
    fn radial_outer_puts_color1_on_the_rim() {
        let radial = draw(&settings(gradient(GradientDirection::Radial)));
        let outer = draw(&settings(gradient(GradientDirection::RadialOuter)));

        let center = radial.pixel(50, 50).unwrap();
        assert!(center[0] > 240, "radial center {center:?}");
        let center = outer.pixel(50, 50).unwrap();
        assert!(center[2] > 240, "radial-outer center {center:?}");

        // Corners lie beyond the radius and pad with the rim color.
        assert!(radial.pixel(0, 0).unwrap()[2] > 240);
        assert!(outer.pixel(0, 0).unwrap()[0] > 240);
    }

    #[test]
    fn blend_mode_applies_to_the_fill() {
        // Blending over a transparent surface keeps the source for these modes.
        for mode in [BlendMode::Normal, BlendMode::Screen, BlendMode::Multiply] {
            let raster = draw(&settings(BackgroundSettings {
                gradient_enabled: false,
                color1: RED,
                blend_mode: mode,
                ..BackgroundSettings::default()
            }));
            assert_eq!(raster.pixel(50, 50), Some([255, 0, 0, 255]), "{mode:?}");
        }
    }
}
