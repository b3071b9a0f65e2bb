//! Domain-critical regression tests for bead-quant.
//!
//! Each test documents the class of bug it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::api::Quantizer;
    use crate::catalog::{BeadColor, Catalog};
    use crate::color::Rgb;
    use crate::dither::DitherMode;
    use crate::palette::{
        closest, weighted_distance, DuplicatePolicy, Palette, PaletteIndex, MAX_PALETTE_SIZE,
    };

    /// Small deterministic pseudo-random sequence for sweeping inputs.
    fn lcg_colors(seed: u32, n: usize) -> Vec<Rgb> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let [a, b, c, _] = state.to_le_bytes();
                Rgb::new(a, b, c)
            })
            .collect()
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// If this breaks, it means: `closest` returns something other than a
    /// minimum-distance entry, or resolves ties to a later entry.
    #[test]
    fn test_closest_is_argmin_with_lowest_index_ties() {
        let catalog = Catalog::builtin();
        for pixel in lcg_colors(7, 500) {
            let hit = closest(pixel, catalog.entries()).unwrap();
            let best = catalog
                .iter()
                .map(|b| weighted_distance(pixel, b.rgb()))
                .min()
                .unwrap();
            assert_eq!(weighted_distance(pixel, hit.rgb()), best);
            let first = catalog
                .iter()
                .position(|b| weighted_distance(pixel, b.rgb()) == best)
                .unwrap();
            assert_eq!(hit, &catalog.entries()[first], "pixel {pixel}");
        }
    }

    /// If this breaks, it means: matching picked up hidden state between
    /// calls.
    #[test]
    fn test_closest_is_deterministic() {
        let entries = Catalog::builtin().entries();
        let pixel = Rgb::new(123, 45, 67);
        let a = closest(pixel, entries).unwrap();
        for _ in 0..10 {
            assert_eq!(closest(pixel, entries).unwrap(), a);
        }
    }

    /// If this breaks, it means: the bucketed index disagrees with the linear
    /// scan, so rendering results depend on whether indexing is enabled.
    #[test]
    fn test_index_agrees_with_scan_on_random_colors() {
        let palette = Palette::from_catalog_prefix(Catalog::builtin(), MAX_PALETTE_SIZE).unwrap();
        let index = PaletteIndex::new(&palette);
        for pixel in lcg_colors(99, 5000) {
            assert_eq!(index.find_nearest(pixel), palette.find_nearest(pixel));
        }
    }

    // ========================================================================
    // Palette selection
    // ========================================================================

    /// If this breaks, it means: the static prefix of a small catalog is
    /// reordered or trimmed instead of returned whole.
    #[test]
    fn test_static_prefix_is_identity_for_small_catalog() {
        let small = Catalog::builtin().filter_families(&["H"]).unwrap();
        assert!(small.len() <= MAX_PALETTE_SIZE);
        let palette = Palette::from_catalog_prefix(&small, MAX_PALETTE_SIZE).unwrap();
        assert_eq!(palette.entries(), small.entries());
    }

    /// If this breaks, it means: a dynamic palette can exceed the indexed
    /// ceiling or its budget.
    #[test]
    fn test_dynamic_palette_respects_budget() {
        let pixels = lcg_colors(3, 10_000);
        for k in [2, 16, 128] {
            let palette =
                Palette::dynamic(&pixels, Catalog::builtin(), k, DuplicatePolicy::Keep).unwrap();
            assert!(palette.len() <= k);
            assert!(palette.len() <= MAX_PALETTE_SIZE);
        }
    }

    // ========================================================================
    // Requantization containment
    // ========================================================================

    /// If this breaks, it means: requantization emitted a color that is not
    /// a palette entry, e.g. by writing the error-adjusted pixel back
    /// instead of the chosen entry.
    #[test]
    fn test_every_output_color_is_a_palette_color() {
        let palette = Palette::from_catalog_prefix(Catalog::builtin(), 40).unwrap();
        let pixels = lcg_colors(11, 24 * 16);
        for mode in [DitherMode::None, DitherMode::FloydSteinberg] {
            let out = Quantizer::new(palette.clone())
                .dither(mode)
                .quantize(&pixels, 24, 16)
                .unwrap();
            for color in out.to_rgb() {
                assert!(
                    palette.position_of_color(color).is_some(),
                    "{mode:?} produced off-palette color {color}"
                );
            }
        }
    }

    /// If this breaks, it means: dithering leaks error across a flat area
    /// that exactly matches a palette entry.
    #[test]
    fn test_flat_palette_color_is_unchanged_by_dithering() {
        let palette = Palette::new(vec![
            BeadColor::new("R01", Rgb::new(255, 0, 0)),
            BeadColor::new("W01", Rgb::WHITE),
        ])
        .unwrap();
        let out = Quantizer::new(palette)
            .quantize(&[Rgb::new(255, 0, 0); 25], 5, 5)
            .unwrap();
        assert!(out.indices().iter().all(|&i| i == 0));
    }

    /// If this breaks, it means: dithering is no longer spreading error, so
    /// a mid tone collapses to a single palette entry.
    #[test]
    fn test_dithering_mixes_where_nearest_cannot() {
        let palette = Palette::new(vec![
            BeadColor::new("K", Rgb::BLACK),
            BeadColor::new("W", Rgb::WHITE),
        ])
        .unwrap();
        let gray = vec![Rgb::new(90, 90, 90); 32 * 32];
        let flat = Quantizer::new(palette.clone())
            .dither(DitherMode::None)
            .quantize(&gray, 32, 32)
            .unwrap();
        let mixed = Quantizer::new(palette).quantize(&gray, 32, 32).unwrap();

        assert_eq!(flat.index_counts(), vec![1024, 0]);
        let whites = mixed.index_counts()[1] as f64 / 1024.0;
        assert!(
            (whites - 90.0 / 255.0).abs() < 0.1,
            "white ratio {whites:.3} should track the gray level"
        );
    }
}
