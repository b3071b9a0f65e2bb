//! The active matching palette for a run.

use super::error::PaletteError;
use super::matcher::nearest_index;
use crate::catalog::{BeadColor, Catalog};
use crate::color::Rgb;

/// Hard ceiling on palette size.
///
/// Palette indices are stored as `u8`, the same constraint an indexed-color
/// image format imposes.
pub const MAX_PALETTE_SIZE: usize = 256;

/// Anything that can answer "which palette index is closest to this color".
///
/// [`Palette`] answers with a linear scan. [`PaletteIndex`](super::PaletteIndex)
/// answers the same question through spatial buckets. Both must return the
/// identical index for every input, ties included.
pub trait NearestColor {
    /// Index of the closest palette entry.
    fn nearest(&self, color: Rgb) -> usize;
}

/// An ordered, non-empty list of at most 256 bead colors used for matching.
///
/// Colors are copied out of the entries at construction so the per-pixel
/// scan touches a flat `Vec<Rgb>` and never allocates.
///
/// # Example
///
/// ```
/// use bead_quant::{BeadColor, Palette, Rgb};
///
/// let palette = Palette::new(vec![
///     BeadColor::new("K01", Rgb::BLACK),
///     BeadColor::new("W01", Rgb::WHITE),
/// ])
/// .unwrap();
///
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest(Rgb::new(30, 30, 30)), 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<BeadColor>,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from an ordered list of bead colors.
    ///
    /// Duplicate entries are allowed; the first one wins ties.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `entries` is empty
    /// - [`PaletteError::TooLarge`] if there are more than 256 entries
    pub fn new(entries: Vec<BeadColor>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if entries.len() > MAX_PALETTE_SIZE {
            return Err(PaletteError::TooLarge {
                len: entries.len(),
                max: MAX_PALETTE_SIZE,
            });
        }

        let colors = entries.iter().map(BeadColor::rgb).collect();
        Ok(Self { entries, colors })
    }

    /// Static palette: the first `max_size` catalog entries in catalog order.
    ///
    /// `max_size` is capped at [`MAX_PALETTE_SIZE`]. A smaller catalog yields
    /// the whole catalog, so callers must not assume exactly `max_size`
    /// entries. Codes past the cut are unreachable in this mode.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyPalette`] if `max_size` is zero or the catalog
    /// is empty.
    ///
    /// ```
    /// use bead_quant::{Catalog, Palette, MAX_PALETTE_SIZE};
    ///
    /// let palette = Palette::from_catalog_prefix(Catalog::builtin(), MAX_PALETTE_SIZE).unwrap();
    /// assert_eq!(palette.len(), MAX_PALETTE_SIZE);
    /// assert_eq!(palette.get(0).code(), "A01");
    /// ```
    pub fn from_catalog_prefix(catalog: &Catalog, max_size: usize) -> Result<Self, PaletteError> {
        let take = max_size.min(MAX_PALETTE_SIZE).min(catalog.len());
        Self::new(catalog.entries()[..take].to_vec())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn get(&self, idx: usize) -> &BeadColor {
        &self.entries[idx]
    }

    /// Color at `idx`.
    #[inline]
    pub fn rgb(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All entries in palette order.
    #[inline]
    pub fn entries(&self) -> &[BeadColor] {
        &self.entries
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Index of the first entry with the given code.
    pub fn position_of(&self, code: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.code() == code)
    }

    /// Index of the first entry whose color equals `color` exactly.
    pub fn position_of_color(&self, color: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == color)
    }

    /// Find the closest entry to `color`.
    ///
    /// Linear scan over every entry, no early exit. Ties go to the lowest
    /// index.
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> usize {
        self.find_nearest_with_distance(color).0
    }

    /// Like [`find_nearest`](Self::find_nearest) but also returns the
    /// weighted distance.
    #[inline]
    pub fn find_nearest_with_distance(&self, color: Rgb) -> (usize, u32) {
        // Non-empty by construction.
        nearest_index(color, self.colors.iter().copied()).unwrap_or((0, 0))
    }

    /// Closest bead entry to `color`.
    #[inline]
    pub fn closest(&self, color: Rgb) -> &BeadColor {
        &self.entries[self.find_nearest(color)]
    }
}

impl NearestColor for Palette {
    #[inline]
    fn nearest(&self, color: Rgb) -> usize {
        self.find_nearest(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bead(code: &'static str, r: u8, g: u8, b: u8) -> BeadColor {
        BeadColor::from_static(code, Rgb::new(r, g, b))
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(Palette::new(Vec::new()), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_new_rejects_oversized() {
        let entries: Vec<BeadColor> = (0..257)
            .map(|i| BeadColor::new(format!("X{i:03}"), Rgb::new((i % 256) as u8, 0, 0)))
            .collect();
        assert_eq!(
            Palette::new(entries),
            Err(PaletteError::TooLarge { len: 257, max: 256 })
        );
    }

    #[test]
    fn test_new_accepts_exactly_256() {
        let entries: Vec<BeadColor> = (0..256)
            .map(|i| BeadColor::new(format!("X{i:03}"), Rgb::new(i as u8, 0, 0)))
            .collect();
        assert_eq!(Palette::new(entries).unwrap().len(), 256);
    }

    #[test]
    fn test_prefix_of_small_catalog_is_identity() {
        let catalog = Catalog::from_entries(vec![
            bead("A", 0, 0, 0),
            bead("B", 128, 128, 128),
            bead("C", 255, 255, 255),
        ])
        .unwrap();
        let palette = Palette::from_catalog_prefix(&catalog, MAX_PALETTE_SIZE).unwrap();
        assert_eq!(palette.entries(), catalog.entries());
    }

    #[test]
    fn test_prefix_truncates_large_catalog() {
        let catalog = Catalog::builtin();
        let palette = Palette::from_catalog_prefix(catalog, MAX_PALETTE_SIZE).unwrap();
        assert_eq!(palette.len(), MAX_PALETTE_SIZE);
        assert_eq!(palette.entries(), &catalog.entries()[..MAX_PALETTE_SIZE]);
        // The tail of the catalog is unreachable.
        let last = catalog.entries().last().unwrap();
        assert_eq!(palette.position_of(last.code()), None);
    }

    #[test]
    fn test_prefix_caps_requested_size() {
        let palette = Palette::from_catalog_prefix(Catalog::builtin(), 10_000).unwrap();
        assert_eq!(palette.len(), MAX_PALETTE_SIZE);
        let palette = Palette::from_catalog_prefix(Catalog::builtin(), 5).unwrap();
        assert_eq!(palette.len(), 5);
    }

    #[test]
    fn test_prefix_of_zero_is_error() {
        assert_eq!(
            Palette::from_catalog_prefix(Catalog::builtin(), 0),
            Err(PaletteError::EmptyPalette)
        );
    }

    #[test]
    fn test_find_nearest_with_distance() {
        let palette = Palette::new(vec![bead("K", 0, 0, 0), bead("W", 255, 255, 255)]).unwrap();
        assert_eq!(palette.find_nearest_with_distance(Rgb::new(0, 1, 0)), (0, 4));
        assert_eq!(palette.closest(Rgb::new(240, 240, 240)).code(), "W");
    }

    #[test]
    fn test_duplicate_entries_first_wins() {
        let palette = Palette::new(vec![
            bead("A", 10, 10, 10),
            bead("A", 10, 10, 10),
            bead("B", 200, 200, 200),
        ])
        .unwrap();
        assert_eq!(palette.find_nearest(Rgb::new(10, 10, 10)), 0);
    }

    #[test]
    fn test_position_lookups() {
        let palette = Palette::new(vec![bead("K", 0, 0, 0), bead("W", 255, 255, 255)]).unwrap();
        assert_eq!(palette.position_of("W"), Some(1));
        assert_eq!(palette.position_of("Z"), None);
        assert_eq!(palette.position_of_color(Rgb::BLACK), Some(0));
    }
}
