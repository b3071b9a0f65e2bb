//! Bucketed nearest-color lookup.
//!
//! RGB space is split into 8×8×8 cubes of 32 levels per side. For every cube
//! we keep the palette entries that could be nearest to *some* color inside
//! it: an entry qualifies when its smallest possible distance to the cube is
//! no larger than the best worst-case distance any entry achieves over the
//! cube. The true nearest entry always qualifies, and so does every entry
//! tied with it. Candidates stay in palette order, so a first-wins scan over
//! them picks the same index as a full linear scan.

use super::matcher::{nearest_index, CHANNEL_WEIGHTS};
use super::palette::{NearestColor, Palette};
use crate::color::Rgb;

const BUCKET_BITS: u32 = 3;
const BUCKETS_PER_AXIS: usize = 1 << BUCKET_BITS;
const SHIFT: u32 = 8 - BUCKET_BITS;
const BUCKET_SPAN: u32 = 1 << SHIFT;

/// Precomputed candidate lists over a [`Palette`].
///
/// Worth building when one palette serves many lookups, e.g. a 200×200 grid
/// against a 256-entry static palette.
///
/// ```
/// use bead_quant::{Catalog, NearestColor, Palette, PaletteIndex, Rgb};
///
/// let palette = Palette::from_catalog_prefix(Catalog::builtin(), 256).unwrap();
/// let index = PaletteIndex::new(&palette);
/// let c = Rgb::new(12, 140, 200);
/// assert_eq!(index.nearest(c), palette.find_nearest(c));
/// ```
#[derive(Debug, Clone)]
pub struct PaletteIndex {
    colors: Vec<Rgb>,
    /// `offsets[b]..offsets[b + 1]` indexes `candidates` for bucket `b`.
    offsets: Vec<u32>,
    candidates: Vec<u8>,
}

impl PaletteIndex {
    /// Build the index for `palette`.
    pub fn new(palette: &Palette) -> Self {
        let colors = palette.colors().to_vec();
        let bucket_count = BUCKETS_PER_AXIS.pow(3);
        let mut offsets = Vec::with_capacity(bucket_count + 1);
        let mut candidates = Vec::new();
        offsets.push(0);

        for bucket in 0..bucket_count {
            let lo = bucket_origin(bucket);
            let threshold = colors
                .iter()
                .map(|&c| max_distance_to_box(c, lo))
                .min()
                .unwrap_or(0);

            for (i, &c) in colors.iter().enumerate() {
                if min_distance_to_box(c, lo) <= threshold {
                    // Palettes hold at most 256 entries.
                    candidates.push(i as u8);
                }
            }
            offsets.push(candidates.len() as u32);
        }

        Self {
            colors,
            offsets,
            candidates,
        }
    }

    /// Number of candidates stored for the bucket containing `color`.
    pub fn candidate_count(&self, color: Rgb) -> usize {
        let b = bucket_of(color);
        (self.offsets[b + 1] - self.offsets[b]) as usize
    }

    /// Index of the nearest palette entry, identical to
    /// [`Palette::find_nearest`].
    #[inline]
    pub fn find_nearest(&self, color: Rgb) -> usize {
        let b = bucket_of(color);
        let range = self.offsets[b] as usize..self.offsets[b + 1] as usize;
        let slots = &self.candidates[range];
        nearest_index(color, slots.iter().map(|&i| self.colors[i as usize]))
            .map(|(pos, _)| slots[pos] as usize)
            .unwrap_or(0)
    }
}

impl NearestColor for PaletteIndex {
    #[inline]
    fn nearest(&self, color: Rgb) -> usize {
        self.find_nearest(color)
    }
}

#[inline]
fn bucket_of(c: Rgb) -> usize {
    let r = (c.r >> SHIFT) as usize;
    let g = (c.g >> SHIFT) as usize;
    let b = (c.b >> SHIFT) as usize;
    (r * BUCKETS_PER_AXIS + g) * BUCKETS_PER_AXIS + b
}

fn bucket_origin(bucket: usize) -> [u32; 3] {
    let b = bucket % BUCKETS_PER_AXIS;
    let g = bucket / BUCKETS_PER_AXIS % BUCKETS_PER_AXIS;
    let r = bucket / (BUCKETS_PER_AXIS * BUCKETS_PER_AXIS);
    [r as u32 * BUCKET_SPAN, g as u32 * BUCKET_SPAN, b as u32 * BUCKET_SPAN]
}

fn min_distance_to_box(c: Rgb, lo: [u32; 3]) -> u32 {
    c.to_bytes()
        .into_iter()
        .zip(lo)
        .zip(CHANNEL_WEIGHTS)
        .map(|((v, lo), w)| {
            let v = v as u32;
            let hi = lo + BUCKET_SPAN - 1;
            let d = if v < lo {
                lo - v
            } else if v > hi {
                v - hi
            } else {
                0
            };
            w * d * d
        })
        .sum()
}

fn max_distance_to_box(c: Rgb, lo: [u32; 3]) -> u32 {
    c.to_bytes()
        .into_iter()
        .zip(lo)
        .zip(CHANNEL_WEIGHTS)
        .map(|((v, lo), w)| {
            let v = v as u32;
            let hi = lo + BUCKET_SPAN - 1;
            let d = v.abs_diff(lo).max(v.abs_diff(hi));
            w * d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BeadColor, Catalog};

    #[test]
    fn test_bucket_roundtrip() {
        for bucket in [0usize, 1, 8, 64, 511] {
            let [r, g, b] = bucket_origin(bucket);
            assert_eq!(bucket_of(Rgb::new(r as u8, g as u8, b as u8)), bucket);
        }
    }

    #[test]
    fn test_matches_linear_scan_on_builtin_prefix() {
        let palette = Palette::from_catalog_prefix(Catalog::builtin(), 256).unwrap();
        let index = PaletteIndex::new(&palette);
        for r in (0..=255u32).step_by(7) {
            for g in (0..=255u32).step_by(11) {
                for b in (0..=255u32).step_by(13) {
                    let c = Rgb::new(r as u8, g as u8, b as u8);
                    assert_eq!(index.find_nearest(c), palette.find_nearest(c), "{c}");
                }
            }
        }
    }

    #[test]
    fn test_ties_match_linear_scan() {
        let palette = Palette::new(vec![
            BeadColor::new("A", Rgb::new(10, 0, 0)),
            BeadColor::new("B", Rgb::new(0, 0, 0)),
            BeadColor::new("C", Rgb::new(10, 0, 0)),
        ])
        .unwrap();
        let index = PaletteIndex::new(&palette);
        let c = Rgb::new(5, 0, 0);
        assert_eq!(index.find_nearest(c), 0);
        assert_eq!(index.find_nearest(c), palette.find_nearest(c));
    }

    #[test]
    fn test_prunes_candidates() {
        let palette = Palette::from_catalog_prefix(Catalog::builtin(), 256).unwrap();
        let index = PaletteIndex::new(&palette);
        assert!(index.candidate_count(Rgb::new(0, 0, 0)) < palette.len());
    }

    #[test]
    fn test_single_entry() {
        let palette = Palette::new(vec![BeadColor::new("X", Rgb::new(9, 9, 9))]).unwrap();
        let index = PaletteIndex::new(&palette);
        assert_eq!(index.find_nearest(Rgb::WHITE), 0);
        assert_eq!(index.candidate_count(Rgb::WHITE), 1);
    }
}
