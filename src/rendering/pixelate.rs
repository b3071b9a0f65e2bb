//! Downsampling to the bead grid and requantization through the palette.

use bead_quant::{DitherMode, Palette, QuantizedImage, Quantizer, Rgb};
use image::{imageops, imageops::FilterType, DynamicImage, RgbImage};

use crate::error::PatternError;
use crate::models::PatternOptions;

/// Longest side of the image sample used to build a dynamic palette.
pub const PALETTE_SAMPLE_SIDE: u32 = 256;

/// Result of [`pixelate`].
#[derive(Debug, Clone)]
pub struct Pixelated {
    pub image: QuantizedImage,
    pub width_beads: u32,
    pub height_beads: u32,
}

impl Pixelated {
    /// Requantized cell colors in row-major order.
    pub fn colors(&self) -> Vec<Rgb> {
        self.image.to_rgb()
    }
}

/// Composite onto `background`, dropping alpha.
pub fn flatten(image: &DynamicImage, background: Rgb) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    let bg = background.to_bytes();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let a = a as u32;
        let blend = |c: u8, bg: u8| ((c as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
        image::Rgb([blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2])])
    })
}

/// Bead rows for an image of `width_px` by `height_px` at `width_beads` columns.
///
/// Rounds half up and never returns less than one row.
pub fn grid_height(width_px: u32, height_px: u32, width_beads: u32) -> Result<u32, PatternError> {
    if width_px == 0 || height_px == 0 {
        return Err(PatternError::InvalidImage(format!(
            "image has zero dimension: {width_px}x{height_px}"
        )));
    }
    let num = height_px as u64 * width_beads as u64;
    let den = width_px as u64;
    let rows = (2 * num + den) / (2 * den);
    Ok(rows.clamp(1, u32::MAX as u64) as u32)
}

/// Resize an already flattened image to the bead grid and requantize
/// through `palette`.
pub fn pixelate(
    image: &RgbImage,
    palette: Palette,
    options: &PatternOptions,
) -> Result<Pixelated, PatternError> {
    let (width_px, height_px) = image.dimensions();
    let width_beads = options.width_beads;
    if width_beads == 0 {
        return Err(PatternError::InvalidInput(
            "width_beads must be greater than 0".to_string(),
        ));
    }
    let height_beads = grid_height(width_px, height_px, width_beads)?;

    let small = imageops::resize(image, width_beads, height_beads, FilterType::Lanczos3);

    let mode = if options.dither {
        DitherMode::FloydSteinberg
    } else {
        DitherMode::None
    };
    let quantizer = Quantizer::new(palette)
        .dither(mode)
        .serpentine(options.serpentine)
        .indexed(options.indexed);

    let quantized = quantizer.quantize_bytes(
        small.as_raw(),
        width_beads as usize,
        height_beads as usize,
    )?;

    tracing::debug!(
        width_px,
        height_px,
        width_beads,
        height_beads,
        dither = options.dither,
        "Pixelated image"
    );

    Ok(Pixelated {
        image: quantized,
        width_beads,
        height_beads,
    })
}

/// Downscaled pixels of `image` for palette construction.
pub fn palette_sample(image: &RgbImage) -> Vec<Rgb> {
    let (w, h) = image.dimensions();
    let sample = if w.max(h) > PALETTE_SAMPLE_SIDE {
        let scale = PALETTE_SAMPLE_SIDE as f64 / w.max(h) as f64;
        let tw = ((w as f64 * scale).round() as u32).max(1);
        let th = ((h as f64 * scale).round() as u32).max(1);
        imageops::thumbnail(image, tw, th)
    } else {
        image.clone()
    };
    sample.pixels().map(|p| Rgb::from_bytes(p.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_quant::BeadColor;
    use image::{Rgba, RgbaImage};

    fn red_white() -> Palette {
        Palette::new(vec![
            BeadColor::new("R01", Rgb::new(255, 0, 0)),
            BeadColor::new("W01", Rgb::WHITE),
        ])
        .unwrap()
    }

    #[test]
    fn test_grid_height_preserves_aspect() {
        assert_eq!(grid_height(300, 200, 30).unwrap(), 20);
        assert_eq!(grid_height(100, 100, 50).unwrap(), 50);
        // 7 * 10 / 4 = 17.5 rounds up
        assert_eq!(grid_height(4, 7, 10).unwrap(), 18);
    }

    #[test]
    fn test_grid_height_at_least_one_row() {
        assert_eq!(grid_height(1000, 1, 10).unwrap(), 1);
    }

    #[test]
    fn test_grid_height_zero_width_is_invalid_image() {
        assert!(matches!(
            grid_height(0, 10, 30),
            Err(PatternError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_flatten_transparent_to_background() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));
        let flat = flatten(&DynamicImage::ImageRgba8(img), Rgb::WHITE);
        assert_eq!(flat.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(flat.get_pixel(1, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_flatten_half_alpha_blends() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 128]));
        let flat = flatten(&DynamicImage::ImageRgba8(img), Rgb::WHITE);
        assert_eq!(flat.get_pixel(0, 0).0, [127, 127, 127]);
    }

    #[test]
    fn test_pixelate_dimensions_and_colors() {
        let img = RgbImage::from_pixel(300, 200, image::Rgb([250, 5, 5]));
        let options = PatternOptions {
            width_beads: 30,
            ..Default::default()
        };
        let out = pixelate(&img, red_white(), &options).unwrap();
        assert_eq!((out.width_beads, out.height_beads), (30, 20));
        assert_eq!(out.image.width(), 30);
        assert!(out.colors().iter().all(|&c| c == Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_pixelate_keeps_flattened_pixels() {
        let img = RgbImage::from_pixel(20, 20, image::Rgb([255, 255, 255]));
        let options = PatternOptions {
            width_beads: 10,
            background: Rgb::BLACK,
            ..Default::default()
        };
        let out = pixelate(&img, red_white(), &options).unwrap();
        assert!(out.colors().iter().all(|&c| c == Rgb::WHITE));
    }

    #[test]
    fn test_palette_sample_is_capped() {
        let img = RgbImage::from_pixel(1024, 512, image::Rgb([1, 2, 3]));
        let sample = palette_sample(&img);
        assert_eq!(sample.len(), 256 * 128);
        assert!(sample.iter().all(|&c| c == Rgb::new(1, 2, 3)));
    }
}
