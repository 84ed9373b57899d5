//! Layer compositor.
//!
//! A render runs four fixed stages against one fresh surface:
//!
//! ```text
//! Settings snapshot ──► Layout + squircle path
//!                              │
//!     ┌────────────┐           ▼
//!     │   Shadow   │ ◄── needs background enabled
//!     └─────┬──────┘
//!           ▼
//!     ┌────────────┐
//!     │ Background │ ◄── flat color or gradient, blend mode
//!     └─────┬──────┘
//!           ▼
//!     ┌────────────┐
//!     │ Highlight  │ ◄── needs background enabled, clipped to the shape
//!     └─────┬──────┘
//!           ▼
//!     ┌────────────┐
//!     │ Mark+Glow  │ ◄── needs loaded artwork
//!     └─────┬──────┘
//!           ▼
//!        Raster
//! ```
//!
//! Each stage implements [`LayerEffect`]. Stages only draw; a stage that meets
//! degenerate geometry draws nothing and the render carries on.

pub mod background;
pub mod highlight;
pub mod mark;
pub mod paint;
pub mod shadow;

pub use paint::{
    BlendMode, GradientDirection, GradientGeometry, ResolvedGradient, resolve_blend_mode,
    resolve_gradient,
};

use resvg::tiny_skia::{Path, Pixmap};

use crate::artwork::Artwork;
use crate::error::{Error, Result};
use crate::geometry::{CanvasSpec, Layout, compute_layout};
use crate::raster::Raster;
use crate::settings::IconSettings;

// ============================================================================
// Render Context
// ============================================================================

/// Everything a stage may read, plus the surface it draws on.
///
/// The context lives for exactly one render; nothing in it is carried over.
pub struct RenderContext<'a> {
    /// The surface being composited.
    pub surface: Pixmap,

    pub canvas: CanvasSpec,

    /// Sanitized settings snapshot.
    pub settings: &'a IconSettings,

    /// Loaded artwork, if any.
    pub artwork: Option<&'a Artwork>,

    /// Placement of the background shape.
    pub layout: Layout,

    /// The squircle outline, `None` when the shape is degenerate.
    pub boundary: Option<Path>,
}

impl<'a> RenderContext<'a> {
    /// Allocates a transparent surface and resolves the shape geometry.
    pub fn new(canvas: CanvasSpec, settings: &'a IconSettings, artwork: Option<&'a Artwork>) -> Result<Self> {
        let surface = Pixmap::new(canvas.size(), canvas.size()).ok_or(Error::Surface(canvas.size()))?;
        let layout = compute_layout(
            canvas.size_f32(),
            settings.border.size_percent,
            settings.background.size_percent,
        );
        let boundary = layout.squircle(settings.background.corner_radius);

        Ok(Self {
            surface,
            canvas,
            settings,
            artwork,
            layout,
            boundary,
        })
    }

    /// Finishes the render.
    pub fn into_raster(self) -> Raster {
        Raster::from_pixmap(self.surface)
    }
}

// ============================================================================
// Layer Trait
// ============================================================================

/// A compositor stage, implemented by the settings record it draws from.
pub trait LayerEffect {
    /// Short name used in trace output.
    const NAME: &'static str;

    /// Whether the stage runs for this snapshot.
    ///
    /// Gating on other layers (such as "no shadow without a background")
    /// belongs here.
    fn is_active(&self, ctx: &RenderContext<'_>) -> bool;

    /// Draws the stage onto `ctx.surface`.
    fn paint(&self, ctx: &mut RenderContext<'_>);
}

/// Runs one stage if it is active.
pub fn apply<L: LayerEffect>(layer: &L, ctx: &mut RenderContext<'_>) {
    if !layer.is_active(ctx) {
        tracing::trace!(layer = L::NAME, "skipped");
        return;
    }
    tracing::trace!(layer = L::NAME, "painting");
    layer.paint(ctx);
}

// ============================================================================
// Pipeline
// ============================================================================

/// Renders a settings snapshot onto a new raster.
///
/// The snapshot is sanitized first, so out-of-range values are clamped rather
/// than rejected. Identical inputs always produce identical pixels.
pub fn render(canvas: CanvasSpec, settings: &IconSettings, artwork: Option<&Artwork>) -> Result<Raster> {
    let settings = settings.sanitized();
    let mut ctx = RenderContext::new(canvas, &settings, artwork)?;

    if ctx.boundary.is_none() && settings.background.enabled {
        tracing::debug!(shape_size = ctx.layout.shape_size, "background shape is degenerate");
    }

    apply(&settings.shadow, &mut ctx);
    apply(&settings.background, &mut ctx);
    apply(&settings.highlight, &mut ctx);
    apply(&settings.artwork, &mut ctx);

    Ok(ctx.into_raster())
}

// ============================================================================
// Tests
// ============================================================================
