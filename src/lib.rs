//! icon-composer: layered squircle icon rendering
//!
//! This crate composes an app icon from a handful of layers (drop shadow,
//! rounded-square background, highlight sheen, imported artwork with an
//! optional glow) onto a square canvas, and exports the result as a flat PNG
//! or as a multi-resolution icon bundle.
//!
//! # Example
//!
//! ```
//! use icon_composer::{CanvasSpec, IconSettings, BackgroundSettings, HexColor, render};
//!
//! let settings = IconSettings::default().with_background(BackgroundSettings {
//!     gradient_enabled: false,
//!     color1: HexColor::rgb(0x1a, 0x1a, 0x1a),
//!     ..BackgroundSettings::default()
//! });
//!
//! let raster = render(CanvasSpec::new(256).unwrap(), &settings, None).unwrap();
//! assert_eq!(raster.pixel(128, 128), Some([0x1a, 0x1a, 0x1a, 255]));
//! assert_eq!(raster.pixel(0, 0).unwrap()[3], 0);
//! ```
//!
//! # Live editing
//!
//! [`IconComposer`] owns the current settings, the loaded artwork and the
//! last render. Changes are queued as [`Trigger`]s and coalesced, so a burst
//! of edits renders once:
//!
//! ```
//! use icon_composer::{CanvasSpec, IconComposer, Configurable, GlowSettings, export_flat};
//!
//! let mut composer = IconComposer::new(CanvasSpec::new(128).unwrap());
//! composer.update(|s| s.with_glow(GlowSettings { enabled: true, ..Default::default() }));
//!
//! let png = export_flat(composer.render().unwrap()).unwrap();
//! assert!(!png.is_empty());
//!
//! let json = composer.export_settings().to_json().unwrap();
//! assert!(json.contains("\"glow\""));
//! ```

mod artwork;
mod color;
mod composer;
mod error;
mod export;
mod geometry;
mod icon;
mod layer;
mod raster;
mod settings;

pub use artwork::{Artwork, SVG_RASTER_EDGE, spawn_load};
pub use color::HexColor;
pub use composer::{Configurable, IconComposer, Trigger};
pub use error::{Error, Result};
pub use export::{
    BitmapResizer, ExportOutcome, IconPacker, IconsetDirectoryPacker, IconutilPacker,
    LanczosResizer, export_flat, export_icon_bundle, save_flat_image, save_icon_bundle,
};
pub use geometry::{
    CanvasSpec, Layout, MAX_CANVAS_SIZE, artwork_rect, clamp_corner_radius, compute_layout,
    squircle_path,
};
pub use icon::{ICONSET_SIZES, IconBundle, IconVariant};
pub use layer::{
    BlendMode, GradientDirection, GradientGeometry, LayerEffect, RenderContext, ResolvedGradient,
    render, resolve_blend_mode, resolve_gradient,
};
pub use raster::Raster;
pub use settings::{
    ArtworkSettings, BackgroundSettings, BorderSettings, GlowSettings, HighlightPosition,
    HighlightSettings, IconSettings, ShadowSettings,
};
