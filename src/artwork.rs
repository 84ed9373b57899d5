//! Imported artwork bitmaps.
//!
//! An [`Artwork`] is an opaque, fully decoded bitmap. There is no partial
//! state: either decoding finished and the handle exists, or there is no
//! artwork at all. Raster formats go through `image`; SVG documents are
//! rasterized with resvg.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::composer::Trigger;
use crate::error::{Error, Result};
use crate::raster::{pixmap_to_rgba_image, rgba_image_to_pixmap};

/// Long edge, in pixels, that SVG artwork is rasterized to.
pub const SVG_RASTER_EDGE: u32 = 1024;

static NEXT_ARTWORK_ID: AtomicU64 = AtomicU64::new(1);

/// A loaded artwork bitmap.
///
/// Cloning is cheap and keeps the same identity; two handles compare equal
/// only if they came from the same load.
#[derive(Clone)]
pub struct Artwork {
    id: u64,
    pixmap: Arc<Pixmap>,
}

impl std::fmt::Debug for Artwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artwork")
            .field("id", &self.id)
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl PartialEq for Artwork {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artwork {}

impl Artwork {
    /// Wraps a decoded straight-alpha bitmap.
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        let pixmap = rgba_image_to_pixmap(image).ok_or(Error::EmptyArtwork)?;
        Ok(Self::from_pixmap(pixmap))
    }

    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            id: NEXT_ARTWORK_ID.fetch_add(1, Ordering::Relaxed),
            pixmap: Arc::new(pixmap),
        }
    }

    /// Decodes PNG, JPEG, WebP or SVG data.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if looks_like_svg(data) {
            return Self::from_svg(data, SVG_RASTER_EDGE);
        }
        let image = image::load_from_memory(data)?.to_rgba8();
        Self::from_rgba(&image)
    }

    /// Rasterizes an SVG document so its long edge is `edge` pixels.
    pub fn from_svg(data: &[u8], edge: u32) -> Result<Self> {
        let tree = Tree::from_data(data, &Options::default()).map_err(|e| Error::Svg(e.to_string()))?;

        let svg_size = tree.size();
        let scale = edge as f32 / svg_size.width().max(svg_size.height());
        let width = (svg_size.width() * scale).ceil() as u32;
        let height = (svg_size.height() * scale).ceil() as u32;

        let mut pixmap = Pixmap::new(width, height).ok_or(Error::EmptyArtwork)?;
        resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());
        Ok(Self::from_pixmap(pixmap))
    }

    /// Reads and decodes an artwork file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let artwork = Self::from_bytes(&data)?;
        tracing::info!(
            path = %path.display(),
            width = artwork.width(),
            height = artwork.height(),
            "loaded artwork"
        );
        Ok(artwork)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// The premultiplied bitmap the compositor draws from.
    pub(crate) fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Copies the bitmap out as straight-alpha RGBA.
    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }
}

fn looks_like_svg(data: &[u8]) -> bool {
    let head = &data[..data.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

/// Decodes `path` on a helper thread and posts the result to `sender`.
///
/// The artwork is only posted once it is fully decoded, so the render it
/// triggers always sees a complete bitmap.
pub fn spawn_load(path: impl Into<PathBuf>, sender: Sender<Trigger>) -> thread::JoinHandle<()> {
    let path = path.into();
    thread::spawn(move || {
        let trigger = match Artwork::open(&path) {
            Ok(artwork) => Trigger::ArtworkLoaded(artwork),
            Err(err) => Trigger::ArtworkFailed(format!("{}: {}", path.display(), err)),
        };
        // The composer may already be gone; nothing left to notify then.
        let _ = sender.send(trigger);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="#00ff00"/></svg>"##;

    fn png_bytes() -> Vec<u8> {
        let img = RgbaImage::from_pixel(8, 6, Rgba([255, 0, 0, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png() {
        let artwork = Artwork::from_bytes(&png_bytes()).unwrap();
        assert_eq!((artwork.width(), artwork.height()), (8, 6));
        assert_eq!(artwork.to_rgba_image().get_pixel(3, 3).0, [255, 0, 0, 255]);
    }

    #[test]
    fn rasterizes_svg_to_long_edge() {
        let artwork = Artwork::from_bytes(SQUARE_SVG.as_bytes()).unwrap();
        assert_eq!(artwork.width(), SVG_RASTER_EDGE);
        assert_eq!(artwork.height(), SVG_RASTER_EDGE / 2);
        let center = artwork.to_rgba_image().get_pixel(512, 256).0;
        assert_eq!(center, [0, 255, 0, 255]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Artwork::from_bytes(b"definitely not an image").is_err());
        assert!(matches!(
            Artwork::from_bytes(b"<svg this is broken"),
            Err(Error::Svg(_))
        ));
    }

    #[test]
    fn empty_bitmap_is_rejected() {
        assert!(matches!(
            Artwork::from_rgba(&RgbaImage::new(0, 0)),
            Err(Error::EmptyArtwork)
        ));
    }

    #[test]
    fn identity_follows_the_load() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let a = Artwork::from_rgba(&img).unwrap();
        let b = Artwork::from_rgba(&img).unwrap();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn background_load_posts_once_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, png_bytes()).unwrap();

        let (tx, rx) = std::sync::mpsc::channel();
        spawn_load(&path, tx.clone()).join().unwrap();
        spawn_load(dir.path().join("missing.png"), tx).join().unwrap();

        match rx.recv().unwrap() {
            Trigger::ArtworkLoaded(artwork) => assert_eq!(artwork.width(), 8),
            other => panic!("unexpected trigger {other:?}"),
        }
        assert!(matches!(rx.recv().unwrap(), Trigger::ArtworkFailed(_)));
    }
}
