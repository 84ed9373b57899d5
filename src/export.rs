//! Export adapter: flat PNG encoding and icon bundle packing.
//!
//! Resizing and packing are capabilities passed in by the caller, so the
//! bundle path can be exercised with stubs where no OS packer exists.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::process::Command;

use image::ImageFormat;
use image::imageops::FilterType;

use crate::error::{Error, Result};
use crate::icon::{ICONSET_SIZES, IconBundle, IconVariant};
use crate::raster::{Raster, resize_premultiplied};

// ============================================================================
// Flat export
// ============================================================================

/// Encodes the raster as a PNG at its native size, alpha preserved.
pub fn export_flat(raster: &Raster) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    raster.to_rgba_image().write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Writes the raster to `path` as a PNG.
pub fn save_flat_image(raster: &Raster, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, export_flat(raster)?)?;
    tracing::info!(path = %path.display(), size = raster.width(), "saved flat image");
    Ok(())
}

// ============================================================================
// Capabilities
// ============================================================================

/// Scales a square bitmap to a new edge length.
pub trait BitmapResizer {
    fn resize(&self, source: &image::RgbaImage, edge: u32) -> Result<image::RgbaImage>;
}

/// Resizes with a Lanczos3 filter in premultiplied space.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanczosResizer;

impl BitmapResizer for LanczosResizer {
    fn resize(&self, source: &image::RgbaImage, edge: u32) -> Result<image::RgbaImage> {
        if source.width() == edge && source.height() == edge {
            return Ok(source.clone());
        }
        resize_premultiplied(source, edge, FilterType::Lanczos3).ok_or(Error::Surface(edge))
    }
}

/// Turns a bundle into a file at `output`.
pub trait IconPacker {
    fn pack(&self, bundle: &IconBundle, output: &Path) -> Result<()>;
}

/// Writes the bundle as a `.iconset` directory of PNGs.
#[derive(Debug, Clone, Copy, Default)]
pub struct IconsetDirectoryPacker;

impl IconPacker for IconsetDirectoryPacker {
    fn pack(&self, bundle: &IconBundle, output: &Path) -> Result<()> {
        write_iconset(bundle, output)
    }
}

/// Packs an `.icns` file with macOS `iconutil`.
#[derive(Debug, Clone)]
pub struct IconutilPacker {
    program: String,
}

impl IconutilPacker {
    pub fn new() -> Self {
        Self::with_program("iconutil")
    }

    /// Uses a different executable with the same command line.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for IconutilPacker {
    fn default() -> Self {
        Self::new()
    }
}

impl IconPacker for IconutilPacker {
    fn pack(&self, bundle: &IconBundle, output: &Path) -> Result<()> {
        let scratch = tempfile::Builder::new().prefix("icon-composer").tempdir()?;
        let iconset = scratch.path().join("icon.iconset");
        write_iconset(bundle, &iconset)?;

        let result = Command::new(&self.program)
            .arg("-c")
            .arg("icns")
            .arg(&iconset)
            .arg("-o")
            .arg(output)
            .output()
            .map_err(|e| Error::Packer(format!("could not run {}: {e}", self.program)))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::Packer(format!(
                "{} exited with {}: {}",
                self.program,
                result.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

fn write_iconset(bundle: &IconBundle, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    for variant in bundle {
        variant.image.save_with_format(dir.join(variant.name), ImageFormat::Png)?;
    }
    Ok(())
}

// ============================================================================
// Bundle export
// ============================================================================

/// Fans the raster out into every entry of [`ICONSET_SIZES`].
pub fn export_icon_bundle(raster: &Raster, resizer: &dyn BitmapResizer) -> Result<IconBundle> {
    let source = raster.to_rgba_image();
    let variants = ICONSET_SIZES
        .iter()
        .map(|&(name, edge)| -> Result<IconVariant> {
            Ok(IconVariant::new(name, edge, resizer.resize(&source, edge)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(IconBundle::from_variants(variants))
}

/// Result of an export as reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl ExportOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Builds the bundle and hands it to `packer`.
///
/// Never fails outright: errors are logged and returned in the outcome.
pub fn save_icon_bundle(
    raster: &Raster,
    resizer: &dyn BitmapResizer,
    packer: &dyn IconPacker,
    output: &Path,
) -> ExportOutcome {
    let result = export_icon_bundle(raster, resizer).and_then(|bundle| packer.pack(&bundle, output));
    match result {
        Ok(()) => {
            tracing::info!(path = %output.display(), "saved icon bundle");
            ExportOutcome::ok()
        }
        Err(err) => {
            tracing::warn!(path = %output.display(), error = %err, "icon bundle export failed");
            ExportOutcome::failure(err.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
