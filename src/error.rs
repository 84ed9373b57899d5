//! Error types for the composer.

use std::io;
use thiserror::Error;

/// Errors that can occur while loading inputs, rendering or exporting.
///
/// Problems inside a single layer never surface here; a layer that cannot
/// draw simply contributes nothing to the raster.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error when reading or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Image decoding or encoding error
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// SVG artwork could not be parsed or rasterized
    #[error("SVG error: {0}")]
    Svg(String),

    /// Settings document could not be parsed or written
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// Canvas edge length outside the supported range
    #[error("invalid canvas size {0}: must be between 1 and {max}", max = crate::geometry::MAX_CANVAS_SIZE)]
    InvalidCanvas(u32),

    /// The drawing surface could not be allocated
    #[error("failed to allocate a {0}x{0} surface")]
    Surface(u32),

    /// Artwork bitmap with zero width or height
    #[error("artwork has no pixels")]
    EmptyArtwork,

    /// An export was requested before anything was rendered
    #[error("nothing has been rendered yet")]
    NotRendered,

    /// The external icon packer failed
    #[error("icon packer failed: {0}")]
    Packer(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
