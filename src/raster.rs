//! The rendered raster and pixel-format helpers.
//!
//! tiny-skia stores premultiplied RGBA; the `image` crate and PNG files use
//! straight alpha. Conversions between the two live here.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{ColorU8, IntSize, Pixmap};

/// A finished render: a square RGBA surface.
#[derive(Clone, PartialEq)]
pub struct Raster {
    pixmap: Pixmap,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl Raster {
    pub(crate) fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Borrows the underlying premultiplied surface.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Returns the straight-alpha RGBA value at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // tiny-skia only checks the flat index, so x past the row end would wrap.
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Returns true if every pixel is fully transparent.
    pub fn is_transparent(&self) -> bool {
        self.pixmap.pixels().iter().all(|p| p.alpha() == 0)
    }

    /// Converts to a straight-alpha `RgbaImage`.
    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Converts a tiny-skia pixmap to a straight-alpha `RgbaImage`.
pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

/// Converts a straight-alpha `RgbaImage` to a premultiplied pixmap.
///
/// Returns `None` for an empty image.
pub(crate) fn rgba_image_to_pixmap(img: &RgbaImage) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(img.width(), img.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Some(pixmap)
}

/// Repaints every pixel with `(r, g, b)`, keeping only its coverage.
pub(crate) fn tint_coverage(pixmap: &mut Pixmap, (r, g, b): (u8, u8, u8)) {
    for px in pixmap.pixels_mut() {
        let a = px.alpha();
        *px = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
}

/// Gaussian-style blur of a premultiplied pixmap.
///
/// `radius` follows the canvas shadow-blur convention (standard deviation is
/// half the radius). A radius of zero returns an unchanged copy.
pub(crate) fn blur_pixmap(pixmap: &Pixmap, radius: f32) -> Option<Pixmap> {
    let sigma = radius / 2.0;
    if !(sigma > 0.0) {
        return Some(pixmap.clone());
    }

    let (width, height) = (pixmap.width(), pixmap.height());
    // Premultiplied channels blur correctly as plain RGBA.
    let buffer = RgbaImage::from_raw(width, height, pixmap.data().to_vec())?;
    let blurred = image::imageops::fast_blur(&buffer, sigma);

    let mut data = blurred.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
    Pixmap::from_vec(data, IntSize::from_wh(width, height)?)
}

/// Resamples a straight-alpha image to `edge` x `edge`.
///
/// Filtering runs on premultiplied values so transparent pixels do not bleed
/// their (black) color into the edges. Returns `None` for an empty image.
pub(crate) fn resize_premultiplied(img: &RgbaImage, edge: u32, filter: FilterType) -> Option<RgbaImage> {
    let pixmap = rgba_image_to_pixmap(img)?;
    let buffer = RgbaImage::from_raw(img.width(), img.height(), pixmap.data().to_vec())?;
    let resized = imageops::resize(&buffer, edge, edge, filter);

    let mut data = resized.into_raw();
    for px in data.chunks_exact_mut(4) {
        // Filter overshoot can leave a color channel above its alpha.
        let a = px[3];
        px[0] = px[0].min(a);
        px[1] = px[1].min(a);
        px[2] = px[2].min(a);
    }
    let pixmap = Pixmap::from_vec(data, IntSize::from_wh(edge, edge)?)?;
    Some(pixmap_to_rgba_image(&pixmap))
}

/// Reads a premultiplied pixel; exposed for stage tests.
#[cfg(test)]
pub(crate) fn premultiplied_at(
    pixmap: &Pixmap,
    x: u32,
    y: u32,
) -> resvg::tiny_skia::PremultipliedColorU8 {
    pixmap.pixel(x, y).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_alpha_survives_conversion() {
        let mut img = RgbaImage::new(4, 4);
        img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 2, Rgba([0, 0, 255, 128]));

        let pixmap = rgba_image_to_pixmap(&img).unwrap();
        let back = pixmap_to_rgba_image(&pixmap);

        assert_eq!(back.get_pixel(1, 1).0, [255, 0, 0, 255]);
        assert_eq!(back.get_pixel(0, 0).0, [0, 0, 0, 0]);
        let half = back.get_pixel(2, 2).0;
        assert_eq!(half[3], 128);
        assert!(half[2] >= 253, "blue should survive premultiplication: {half:?}");
    }

    #[test]
    fn raster_reads_straight_pixels() {
        let mut pixmap = Pixmap::new(2, 2).unwrap();
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(10, 20, 30, 255));
        let raster = Raster::from_pixmap(pixmap);

        assert_eq!(raster.pixel(1, 1), Some([10, 20, 30, 255]));
        assert_eq!(raster.pixel(2, 0), None);
        assert!(!raster.is_transparent());
        assert_eq!(raster.to_rgba_image().get_pixel(0, 1).0, [10, 20, 30, 255]);
    }

    #[test]
    fn tint_keeps_coverage() {
        let mut pixmap = Pixmap::new(2, 1).unwrap();
        pixmap.pixels_mut()[0] = ColorU8::from_rgba(255, 255, 255, 255).premultiply();
        tint_coverage(&mut pixmap, (0, 255, 0));

        let c = premultiplied_at(&pixmap, 0, 0);
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (0, 255, 0, 255));
        assert_eq!(premultiplied_at(&pixmap, 1, 0).alpha(), 0);
    }

    #[test]
    fn blur_spreads_coverage() {
        let mut pixmap = Pixmap::new(32, 32).unwrap();
        for y in 12..20 {
            for x in 12..20 {
                pixmap.pixels_mut()[(y * 32 + x) as usize] =
                    ColorU8::from_rgba(0, 0, 0, 255).premultiply();
            }
        }

        let blurred = blur_pixmap(&pixmap, 8.0).unwrap();
        assert_eq!(premultiplied_at(&pixmap, 9, 16).alpha(), 0);
        assert!(premultiplied_at(&blurred, 9, 16).alpha() > 0);
        assert!(premultiplied_at(&blurred, 16, 16).alpha() < 255);
    }

    #[test]
    fn pixel_outside_the_row_is_none() {
        let mut pixmap = Pixmap::new(3, 2).unwrap();
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(10, 20, 30, 255));
        let raster = Raster::from_pixmap(pixmap);

        assert_eq!(raster.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(raster.pixel(3, 0), None);
        assert_eq!(raster.pixel(0, 2), None);
        assert_eq!(raster.pixel(u32::MAX, 0), None);
    }

    #[test]
    fn premultiplied_resize_keeps_edge_color() {
        let mut img = RgbaImage::new(64, 64);
        for y in 16..48 {
            for x in 16..48 {
                img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }

        let small = resize_premultiplied(&img, 8, FilterType::Lanczos3).unwrap();
        assert_eq!(small.dimensions(), (8, 8));
        for px in small.pixels().filter(|p| p.0[3] > 0) {
            assert_eq!(px.0[..3], [255, 255, 255], "{px:?}");
        }
        assert!(resize_premultiplied(&RgbaImage::new(0, 0), 8, FilterType::Lanczos3).is_none());
    }

    #[test]
    fn zero_blur_is_identity() {
        let mut pixmap = Pixmap::new(4, 4).unwrap();
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(1, 2, 3, 200));
        assert_eq!(blur_pixmap(&pixmap, 0.0).unwrap(), pixmap);
    }
}
