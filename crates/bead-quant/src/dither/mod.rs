//! Requantization through a palette, with or without error diffusion.
//!
//! Both paths produce one palette index per pixel, so every output color is
//! exactly one palette entry.
//!
//! - [`Nearest`]: each pixel independently takes its closest entry
//! - [`FloydSteinberg`]: the quantization error of each pixel is pushed to
//!   its unprocessed neighbors with weights 7/16, 3/16, 5/16 and 1/16
//!
//! Error is carried in 8-bit sRGB units. The pixel plus its accumulated
//! error is clamped to `0..=255` before matching.

mod kernel;
mod options;

pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::DitherOptions;

use crate::color::Rgb;
use crate::palette::{NearestColor, Palette};

/// Requantization mode selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitherMode {
    /// Plain nearest-entry selection, no error propagation.
    None,
    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,
}

/// A requantization algorithm.
///
/// `matcher` answers nearest-entry queries and must agree with `palette`;
/// pass the palette itself or a [`PaletteIndex`](crate::PaletteIndex) built
/// from it.
pub trait Dither {
    /// Map `image` (row-major, `width * height` pixels) to palette indices.
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        matcher: &dyn NearestColor,
        options: &DitherOptions,
    ) -> Vec<u8>;
}

/// Nearest-entry requantization.
pub struct Nearest;

impl Dither for Nearest {
    fn dither(
        &self,
        image: &[Rgb],
        _width: usize,
        _height: usize,
        _palette: &Palette,
        matcher: &dyn NearestColor,
        _options: &DitherOptions,
    ) -> Vec<u8> {
        image.iter().map(|&p| matcher.nearest(p) as u8).collect()
    }
}

/// Floyd-Steinberg error diffusion.
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        matcher: &dyn NearestColor,
        options: &DitherOptions,
    ) -> Vec<u8> {
        dither_with_kernel(image, width, height, palette, matcher, &FLOYD_STEINBERG, options)
    }
}

/// Sliding window of error rows.
///
/// Only the rows the kernel can reach are stored: `rows[0]` is the current
/// row, `rows[1]` the next, and so on.
#[derive(Debug)]
pub struct ErrorBuffer {
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a buffer for `row_depth` rows of `width` pixels.
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Error accumulated so far for pixel `x` of the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a pixel `row_offset` rows below the current one.
    ///
    /// Out-of-bounds targets are ignored.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Move to the next row, recycling the finished one as a zeroed tail.
    pub fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Error diffusion loop parameterized by kernel.
pub(crate) fn dither_with_kernel(
    image: &[Rgb],
    width: usize,
    height: usize,
    palette: &Palette,
    matcher: &dyn NearestColor,
    kernel: &Kernel,
    options: &DitherOptions,
) -> Vec<u8> {
    let mut output = vec![0u8; width * height];
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);
    let divisor = kernel.divisor as f32;

    for y in 0..height {
        let reverse = options.serpentine && y % 2 == 1;

        for step in 0..width {
            let x = if reverse { width - 1 - step } else { step };
            let idx = y * width + x;

            let acc = error_buf.get_accumulated(x);
            let src = image[idx];
            let wanted = [
                (src.r as f32 + acc[0]).clamp(0.0, 255.0),
                (src.g as f32 + acc[1]).clamp(0.0, 255.0),
                (src.b as f32 + acc[2]).clamp(0.0, 255.0),
            ];

            let chosen = matcher.nearest(Rgb::from_f32_clamped(wanted[0], wanted[1], wanted[2]));
            output[idx] = chosen as u8;

            let actual = palette.rgb(chosen);
            let error = [
                wanted[0] - actual.r as f32,
                wanted[1] - actual.g as f32,
                wanted[2] - actual.b as f32,
            ];

            for &(dx, dy, weight) in kernel.entries {
                let dx = if reverse { -dx } else { dx };
                let tx = x as isize + dx as isize;
                if tx < 0 {
                    continue;
                }
                let w = weight as f32 / divisor;
                error_buf.add_error(
                    tx as usize,
                    dy as usize,
                    [error[0] * w, error[1] * w, error[2] * w],
                );
            }
        }

        error_buf.advance_row();
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BeadColor;

    fn black_white() -> Palette {
        Palette::new(vec![
            BeadColor::new("K", Rgb::BLACK),
            BeadColor::new("W", Rgb::WHITE),
        ])
        .unwrap()
    }

    #[test]
    fn test_error_buffer_rotates() {
        let mut buf = ErrorBuffer::new(3, 2);
        buf.add_error(1, 1, [1.0, 2.0, 3.0]);
        assert_eq!(buf.get_accumulated(1), [0.0; 3]);
        buf.advance_row();
        assert_eq!(buf.get_accumulated(1), [1.0, 2.0, 3.0]);
        buf.advance_row();
        assert_eq!(buf.get_accumulated(1), [0.0; 3]);
    }

    #[test]
    fn test_error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(2, 2);
        buf.add_error(5, 0, [1.0; 3]);
        buf.add_error(0, 9, [1.0; 3]);
        assert_eq!(buf.get_accumulated(0), [0.0; 3]);
    }

    #[test]
    fn test_nearest_has_no_spatial_effect() {
        let palette = black_white();
        let image = vec![Rgb::new(100, 100, 100); 16];
        let out = Nearest.dither(&image, 4, 4, &palette, &palette, &DitherOptions::new());
        assert!(out.iter().all(|&i| i == 0));
    }

    #[test]
    fn test_floyd_steinberg_mixes_mid_gray() {
        let palette = black_white();
        let image = vec![Rgb::new(128, 128, 128); 64];
        let out = FloydSteinberg.dither(&image, 8, 8, &palette, &palette, &DitherOptions::new());
        let whites = out.iter().filter(|&&i| i == 1).count();
        // Roughly half of the pixels turn white.
        assert!((20..=44).contains(&whites), "whites = {whites}");
    }

    #[test]
    fn test_floyd_steinberg_first_pixel_error() {
        // 100 -> black, error 100: right neighbor gets 43.75 and becomes 143.75 -> white.
        let palette = black_white();
        let image = vec![Rgb::new(100, 100, 100); 2];
        let out = FloydSteinberg.dither(&image, 2, 1, &palette, &palette, &DitherOptions::new());
        assert_eq!(out, vec![0, 1]);
    }

    #[test]
    fn test_exact_palette_colors_are_stable() {
        let palette = black_white();
        let image = vec![Rgb::BLACK, Rgb::WHITE, Rgb::WHITE, Rgb::BLACK];
        let out = FloydSteinberg.dither(&image, 2, 2, &palette, &palette, &DitherOptions::new());
        assert_eq!(out, vec![0, 1, 1, 0]);
    }

    #[test]
    fn test_serpentine_changes_scan_order() {
        let palette = black_white();
        let image: Vec<Rgb> = (0..36).map(|i| Rgb::new((i * 7) as u8, 90, 140)).collect();
        let raster = FloydSteinberg.dither(&image, 6, 6, &palette, &palette, &DitherOptions::new());
        let snake = FloydSteinberg.dither(
            &image,
            6,
            6,
            &palette,
            &palette,
            &DitherOptions::new().serpentine(true),
        );
        assert_eq!(raster.len(), snake.len());
        // The first row is scanned identically.
        assert_eq!(raster[..6], snake[..6]);
    }
}
