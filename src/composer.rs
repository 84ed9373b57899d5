//! Render orchestration: one composer owns the surface and the artwork.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::artwork::Artwork;
use crate::error::{Error, Result};
use crate::export::{BitmapResizer, ExportOutcome, IconPacker, export_flat, save_icon_bundle};
use crate::geometry::CanvasSpec;
use crate::layer;
use crate::raster::Raster;
use crate::settings::IconSettings;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Types that can be configured from an [`IconSettings`] snapshot.
pub trait Configurable {
    /// Applies a settings snapshot to this instance.
    fn apply_settings(&mut self, settings: &IconSettings);

    /// Exports the current settings as a snapshot.
    fn export_settings(&self) -> IconSettings;
}

// ============================================================================
// Trigger
// ============================================================================

/// A change that invalidates the current raster.
#[derive(Debug, Clone)]
pub enum Trigger {
    /// A new settings snapshot replaced the current one.
    Settings(IconSettings),

    /// Artwork finished decoding.
    ArtworkLoaded(Artwork),

    /// An artwork load failed. The current artwork stays as it is.
    ArtworkFailed(String),

    /// The artwork was removed.
    ArtworkCleared,
}

// ============================================================================
// IconComposer
// ============================================================================

/// Owns the render surface and the loaded artwork.
///
/// Changes are recorded by [`submit`](Self::submit) (or posted from other
/// threads through [`sender`](Self::sender)) and only bump a version counter.
/// [`flush`](Self::flush) drains everything pending and renders at most once
/// against the latest snapshot, so a burst of changes never produces stale
/// intermediate renders. All render paths take `&mut self`, which serializes
/// them on the single surface.
///
/// # Example
///
/// ```
/// use icon_composer::{CanvasSpec, IconComposer, IconSettings, Trigger, HighlightSettings};
///
/// let mut composer = IconComposer::new(CanvasSpec::new(128).unwrap());
/// composer.update(|s| s.with_highlight(HighlightSettings { enabled: false, ..Default::default() }));
/// composer.submit(Trigger::Settings(IconSettings::default()));
///
/// let raster = composer.render().unwrap();
/// assert_eq!(raster.width(), 128);
/// ```
pub struct IconComposer {
    canvas: CanvasSpec,
    settings: IconSettings,
    artwork: Option<Artwork>,

    /// Bumped on every accepted change.
    version: u64,

    /// Version the current raster was rendered from.
    rendered_version: Option<u64>,

    /// Last successful render.
    raster: Option<Raster>,

    sender: Sender<Trigger>,
    receiver: Receiver<Trigger>,
}

impl IconComposer {
    /// Creates a composer with default settings and no artwork.
    pub fn new(canvas: CanvasSpec) -> Self {
        Self::with_settings(canvas, IconSettings::default())
    }

    /// Creates a composer starting from `settings`.
    pub fn with_settings(canvas: CanvasSpec, settings: IconSettings) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            canvas,
            settings,
            artwork: None,
            version: 0,
            rendered_version: None,
            raster: None,
            sender,
            receiver,
        }
    }

    pub fn canvas(&self) -> CanvasSpec {
        self.canvas
    }

    /// The current settings snapshot.
    pub fn settings(&self) -> &IconSettings {
        &self.settings
    }

    /// The loaded artwork, if any.
    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    /// Replaces the settings snapshot.
    pub fn set_settings(&mut self, settings: IconSettings) {
        self.submit(Trigger::Settings(settings));
    }

    /// Derives a new snapshot from the current one.
    pub fn update(&mut self, f: impl FnOnce(IconSettings) -> IconSettings) {
        let next = f(self.settings.clone());
        self.set_settings(next);
    }

    /// Records a change. Nothing is rendered until the next flush.
    pub fn submit(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Settings(settings) => {
                // Compare what would be rendered; NaN fields never equal themselves.
                let unchanged = settings.sanitized() == self.settings.sanitized();
                self.settings = settings;
                if unchanged {
                    return;
                }
            }
            Trigger::ArtworkLoaded(artwork) => {
                tracing::debug!(width = artwork.width(), height = artwork.height(), "artwork ready");
                self.artwork = Some(artwork);
            }
            Trigger::ArtworkFailed(message) => {
                tracing::warn!(%message, "artwork load failed");
                return;
            }
            Trigger::ArtworkCleared => {
                if self.artwork.take().is_none() {
                    return;
                }
            }
        }
        self.version += 1;
    }

    /// A handle other threads can post triggers through.
    pub fn sender(&self) -> Sender<Trigger> {
        self.sender.clone()
    }

    /// Returns true when pending changes have not been rendered yet.
    ///
    /// Triggers still sitting in the channel are not counted until the next
    /// [`flush`](Self::flush).
    pub fn is_stale(&self) -> bool {
        self.rendered_version != Some(self.version)
    }

    /// Drains pending triggers and re-renders if anything changed.
    ///
    /// Returns the fresh raster, or `None` when the current one is up to date.
    /// On failure the previous raster is kept.
    pub fn flush(&mut self) -> Result<Option<&Raster>> {
        let pending: Vec<Trigger> = self.receiver.try_iter().collect();
        let coalesced = pending.len();
        for trigger in pending {
            self.submit(trigger);
        }

        if !self.is_stale() {
            return Ok(None);
        }

        tracing::debug!(version = self.version, coalesced, "rendering");
        let raster = layer::render(self.canvas, &self.settings, self.artwork.as_ref())?;
        self.raster = Some(raster);
        self.rendered_version = Some(self.version);
        Ok(self.raster.as_ref())
    }

    /// Brings the raster up to date and returns it.
    pub fn render(&mut self) -> Result<&Raster> {
        self.flush()?;
        self.raster.as_ref().ok_or(Error::NotRendered)
    }

    /// The last successful render, possibly stale.
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    /// Encodes the last successful render as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        export_flat(self.raster.as_ref().ok_or(Error::NotRendered)?)
    }

    /// Fans the last successful render out into an icon bundle and packs it.
    ///
    /// Failures come back in the outcome; the preview raster is untouched.
    pub fn export_icon_bundle(
        &self,
        resizer: &dyn BitmapResizer,
        packer: &dyn IconPacker,
        output: &std::path::Path,
    ) -> ExportOutcome {
        match self.raster.as_ref() {
            Some(raster) => save_icon_bundle(raster, resizer, packer, output),
            None => ExportOutcome::failure(Error::NotRendered.to_string()),
        }
    }
}

impl Configurable for IconComposer {
    fn apply_settings(&mut self, settings: &IconSettings) {
        self.set_settings(settings.clone());
    }

    fn export_settings(&self) -> IconSettings {
        self.settings.clone()
    }
}

// ============================================================================
// Tests
// ============================================================================
