//! Per-image palettes built from the image's own dominant colors.

use std::collections::BTreeMap;

use super::error::PaletteError;
use super::matcher::nearest_index;
use super::median_cut::median_cut;
use super::palette::Palette;
use crate::catalog::{BeadColor, Catalog};
use crate::color::Rgb;

/// Smallest color budget accepted by [`Palette::dynamic`].
pub const MIN_COLOR_BUDGET: usize = 2;
/// Largest color budget accepted by [`Palette::dynamic`].
pub const MAX_COLOR_BUDGET: usize = 128;

/// What to do when two dominant colors snap to the same bead code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep only the first occurrence of each code.
    #[default]
    Dedup,
    /// Keep every snapped entry, repeating codes as they occur.
    Keep,
}

impl Palette {
    /// Build a palette from an image's dominant colors.
    ///
    /// The pixels are reduced to at most `k` representative colors with a
    /// weighted median cut, identical representatives are merged, and each
    /// one is snapped to its nearest entry in `catalog`. Entries are ordered
    /// by how much of the image they represent, most dominant first.
    ///
    /// An image with fewer than `k` distinct colors yields one candidate per
    /// distinct color; nothing is padded. Under [`DuplicatePolicy::Dedup`]
    /// the result can be smaller still.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::ColorBudget`] if `k` is outside
    ///   [`MIN_COLOR_BUDGET`]..=[`MAX_COLOR_BUDGET`]
    /// - [`PaletteError::EmptyImage`] if `pixels` is empty
    /// - [`PaletteError::EmptyCatalog`] if `catalog` has no entries
    ///
    /// ```
    /// use bead_quant::{Catalog, DuplicatePolicy, Palette, Rgb};
    ///
    /// let pixels = vec![Rgb::new(250, 5, 5); 64];
    /// let palette = Palette::dynamic(&pixels, Catalog::builtin(), 8, DuplicatePolicy::Dedup).unwrap();
    /// assert_eq!(palette.len(), 1);
    /// ```
    pub fn dynamic(
        pixels: &[Rgb],
        catalog: &Catalog,
        k: usize,
        policy: DuplicatePolicy,
    ) -> Result<Self, PaletteError> {
        if !(MIN_COLOR_BUDGET..=MAX_COLOR_BUDGET).contains(&k) {
            return Err(PaletteError::ColorBudget { k });
        }
        if pixels.is_empty() {
            return Err(PaletteError::EmptyImage);
        }
        if catalog.is_empty() {
            return Err(PaletteError::EmptyCatalog);
        }

        let mut histogram: BTreeMap<Rgb, u64> = BTreeMap::new();
        for &p in pixels {
            *histogram.entry(p).or_insert(0) += 1;
        }

        let mut representatives: Vec<Rgb> = Vec::with_capacity(k);
        for (color, _) in median_cut(histogram.into_iter().collect(), k) {
            if !representatives.contains(&color) {
                representatives.push(color);
            }
        }

        let catalog_colors = catalog.entries();
        let mut entries: Vec<BeadColor> = Vec::with_capacity(representatives.len());
        for color in representatives {
            let Some((idx, _)) = nearest_index(color, catalog_colors.iter().map(BeadColor::rgb))
            else {
                continue;
            };
            let bead = &catalog_colors[idx];
            if policy == DuplicatePolicy::Dedup && entries.iter().any(|e| e.code() == bead.code())
            {
                continue;
            }
            entries.push(bead.clone());
        }

        Palette::new(entries)
    }
}
