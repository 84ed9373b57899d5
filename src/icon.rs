//! Icon bundle types.
//!
//! An icon bundle is the fixed set of named PNGs a macOS `.iconset` directory
//! holds: five logical sizes, each at @1x and @2x.

use image::RgbaImage;

/// The bundle's fixed `(file name, edge length)` table.
///
/// Several edges appear twice (a logical size at @2x equals the next size at
/// @1x); each entry is still emitted under its own name.
pub const ICONSET_SIZES: [(&str, u32); 10] = [
    ("icon_16x16.png", 16),
    ("icon_16x16@2x.png", 32),
    ("icon_32x32.png", 32),
    ("icon_32x32@2x.png", 64),
    ("icon_128x128.png", 128),
    ("icon_128x128@2x.png", 256),
    ("icon_256x256.png", 256),
    ("icon_256x256@2x.png", 512),
    ("icon_512x512.png", 512),
    ("icon_512x512@2x.png", 1024),
];

/// One named, resized image of a bundle.
#[derive(Debug, Clone, PartialEq)]
pub struct IconVariant {
    /// File name inside the iconset, e.g. `icon_32x32@2x.png`.
    pub name: &'static str,

    /// Edge length in pixels.
    pub edge: u32,

    /// The image data in straight-alpha RGBA.
    pub image: RgbaImage,
}

impl IconVariant {
    pub fn new(name: &'static str, edge: u32, image: RgbaImage) -> Self {
        Self { name, edge, image }
    }

    /// Display scale parsed from the name: 2 for `@2x` entries, else 1.
    pub fn scale(&self) -> u32 {
        if self.name.contains("@2x") { 2 } else { 1 }
    }

    /// Edge length in points (`edge / scale`).
    pub fn logical_edge(&self) -> u32 {
        self.edge / self.scale()
    }
}

/// A rendered icon fanned out into its named sizes, in table order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IconBundle {
    pub variants: Vec<IconVariant>,
}

impl IconBundle {
    pub fn new() -> Self {
        Self { variants: Vec::new() }
    }

    pub fn from_variants(variants: Vec<IconVariant>) -> Self {
        Self { variants }
    }

    pub fn push(&mut self, variant: IconVariant) {
        self.variants.push(variant);
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Looks up a variant by file name.
    pub fn get(&self, name: &str) -> Option<&IconVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &IconVariant> {
        self.variants.iter()
    }
}

impl IntoIterator for IconBundle {
    type Item = IconVariant;
    type IntoIter = std::vec::IntoIter<IconVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.into_iter()
    }
}

impl<'a> IntoIterator for &'a IconBundle {
    type Item = &'a IconVariant;
    type IntoIter = std::slice::Iter<'a, IconVariant>;

    fn into_iter(self) -> Self::IntoIter {
        self.variants.iter()
    }
}
