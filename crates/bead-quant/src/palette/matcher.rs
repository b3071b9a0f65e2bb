//! Weighted nearest-color matching.
//!
//! Distance between a pixel `p` and a bead `b` is
//!
//! ```text
//! d = 2·(Rp−Rb)² + 4·(Gp−Gb)² + 3·(Bp−Bb)²
//! ```
//!
//! Green carries the most weight, roughly following luminance sensitivity.
//! The scan is linear and keeps the first entry on ties, so earlier catalog
//! entries win.

use super::error::PaletteError;
use crate::catalog::BeadColor;
use crate::color::Rgb;

/// Channel weights `[R, G, B]` of the distance metric.
pub const CHANNEL_WEIGHTS: [u32; 3] = [2, 4, 3];

/// Largest possible distance: every channel at opposite extremes.
pub const MAX_DISTANCE: u32 = 9 * 255 * 255;

/// Weighted squared distance between two colors.
#[inline]
pub fn weighted_distance(a: Rgb, b: Rgb) -> u32 {
    let dr = a.r.abs_diff(b.r) as u32;
    let dg = a.g.abs_diff(b.g) as u32;
    let db = a.b.abs_diff(b.b) as u32;
    CHANNEL_WEIGHTS[0] * dr * dr + CHANNEL_WEIGHTS[1] * dg * dg + CHANNEL_WEIGHTS[2] * db * db
}

/// Index and distance of the closest entry in `colors`.
///
/// Returns `None` only for an empty slice.
#[inline]
pub(crate) fn nearest_index<I>(pixel: Rgb, colors: I) -> Option<(usize, u32)>
where
    I: IntoIterator<Item = Rgb>,
{
    let mut best: Option<(usize, u32)> = None;
    for (i, color) in colors.into_iter().enumerate() {
        let dist = weighted_distance(pixel, color);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((i, dist)),
        }
    }
    best
}

/// Closest bead in `palette` to `pixel`.
///
/// # Errors
///
/// [`PaletteError::EmptyPalette`] when `palette` is empty.
///
/// ```
/// use bead_quant::{closest, BeadColor, Rgb};
///
/// let beads = [
///     BeadColor::new("K01", Rgb::new(0, 0, 0)),
///     BeadColor::new("W01", Rgb::new(255, 255, 255)),
/// ];
/// let hit = closest(Rgb::new(200, 210, 190), &beads).unwrap();
/// assert_eq!(hit.code(), "W01");
/// ```
pub fn closest(pixel: Rgb, palette: &[BeadColor]) -> Result<&BeadColor, PaletteError> {
    nearest_index(pixel, palette.iter().map(BeadColor::rgb))
        .map(|(i, _)| &palette[i])
        .ok_or(PaletteError::EmptyPalette)
}

/// Closest bead for an RGBA pixel. Alpha is discarded before matching.
pub fn closest_rgba(pixel: [u8; 4], palette: &[BeadColor]) -> Result<&BeadColor, PaletteError> {
    closest(Rgb::from_rgba(pixel), palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beads(colors: &[(&'static str, [u8; 3])]) -> Vec<BeadColor> {
        colors
            .iter()
            .map(|&(code, rgb)| BeadColor::from_static(code, Rgb::from_bytes(rgb)))
            .collect()
    }

    #[test]
    fn test_distance_weights() {
        let base = Rgb::new(100, 100, 100);
        assert_eq!(weighted_distance(base, Rgb::new(101, 100, 100)), 2);
        assert_eq!(weighted_distance(base, Rgb::new(100, 101, 100)), 4);
        assert_eq!(weighted_distance(base, Rgb::new(100, 100, 101)), 3);
        assert_eq!(weighted_distance(Rgb::BLACK, Rgb::WHITE), MAX_DISTANCE);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Rgb::new(12, 200, 40);
        let b = Rgb::new(250, 3, 99);
        assert_eq!(weighted_distance(a, b), weighted_distance(b, a));
    }

    #[test]
    fn test_green_dominates() {
        // Equal raw offsets: the candidate off in green loses.
        let palette = beads(&[("G", [0, 10, 0]), ("R", [10, 0, 0])]);
        assert_eq!(closest(Rgb::BLACK, &palette).unwrap().code(), "R");
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let palette = beads(&[("A", [10, 0, 0]), ("B", [10, 0, 0]), ("C", [0, 0, 0])]);
        let pixel = Rgb::new(5, 0, 0);
        // A and C are both at distance 50; A is declared first.
        assert_eq!(closest(pixel, &palette).unwrap().code(), "A");
    }

    #[test]
    fn test_empty_palette_is_error() {
        assert_eq!(closest(Rgb::WHITE, &[]), Err(PaletteError::EmptyPalette));
    }

    #[test]
    fn test_alpha_is_ignored() {
        let palette = beads(&[("K", [0, 0, 0]), ("W", [255, 255, 255])]);
        let opaque = closest_rgba([250, 250, 250, 255], &palette).unwrap();
        let transparent = closest_rgba([250, 250, 250, 0], &palette).unwrap();
        assert_eq!(opaque, transparent);
        assert_eq!(opaque.code(), "W");
    }

    #[test]
    fn test_exact_match_wins() {
        let palette = beads(&[("X", [1, 2, 3]), ("Y", [200, 100, 50])]);
        assert_eq!(
            closest(Rgb::new(200, 100, 50), &palette).unwrap().code(),
            "Y"
        );
    }
}
