//! Indexed image produced by the quantizer.

use crate::catalog::BeadColor;
use crate::color::Rgb;
use crate::palette::Palette;

/// One `u8` palette index per pixel in row-major order, plus the palette.
///
/// # Example
///
/// ```
/// use bead_quant::{BeadColor, Palette, QuantizedImage, Rgb};
///
/// let palette = Palette::new(vec![
///     BeadColor::new("K01", Rgb::BLACK),
///     BeadColor::new("W01", Rgb::WHITE),
/// ])
/// .unwrap();
/// let image = QuantizedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.code_at(1, 0), "W01");
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl QuantizedImage {
    /// Wrap quantizer output.
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match {}x{}",
            indices.len(),
            width,
            height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Width in pixels (beads).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels (beads).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Palette the indices refer to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index at `(x, y)`.
    #[inline]
    pub fn index_at(&self, x: usize, y: usize) -> usize {
        self.indices[y * self.width + x] as usize
    }

    /// Bead entry at `(x, y)`.
    #[inline]
    pub fn entry_at(&self, x: usize, y: usize) -> &BeadColor {
        self.palette.get(self.index_at(x, y))
    }

    /// Bead code at `(x, y)`.
    #[inline]
    pub fn code_at(&self, x: usize, y: usize) -> &str {
        self.entry_at(x, y).code()
    }

    /// Colors, row-major.
    pub fn to_rgb(&self) -> Vec<Rgb> {
        self.indices
            .iter()
            .map(|&i| self.palette.rgb(i as usize))
            .collect()
    }

    /// Flat `[R, G, B, R, G, B, ...]` buffer of length `width * height * 3`.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &i in &self.indices {
            rgb.extend_from_slice(&self.palette.rgb(i as usize).to_bytes());
        }
        rgb
    }

    /// Entries, row-major.
    pub fn entries(&self) -> impl Iterator<Item = &BeadColor> + '_ {
        self.indices.iter().map(|&i| self.palette.get(i as usize))
    }

    /// How many pixels use each palette index.
    pub fn index_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.palette.len()];
        for &i in &self.indices {
            counts[i as usize] += 1;
        }
        counts
    }
}
