//! Image adjustments applied before pixelation.
//!
//! Pure image-to-image transforms on opaque RGB. The order is fixed:
//! geometry first, then tone, then filters.

use image::{imageops, Rgb as Pixel, RgbImage};

use crate::models::EnhanceOptions;

const LUMA: [f32; 3] = [0.299, 0.587, 0.114];

/// Laplacian kernel for edge detection.
const EDGES: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Apply `options` to `image`.
pub fn enhance(image: RgbImage, options: &EnhanceOptions) -> RgbImage {
    if options.is_identity() {
        return image;
    }

    let mut img = match options.rotate {
        90 => imageops::rotate90(&image),
        180 => imageops::rotate180(&image),
        270 => imageops::rotate270(&image),
        _ => image,
    };

    if options.mirror {
        imageops::flip_horizontal_in_place(&mut img);
    }
    if options.flip {
        imageops::flip_vertical_in_place(&mut img);
    }

    if options.brightness != 1.0 {
        let f = options.brightness;
        map_pixels(&mut img, |c| c.map(|v| v * f));
    }
    if options.contrast != 1.0 {
        let mean = mean_luma(&img);
        let f = options.contrast;
        map_pixels(&mut img, |c| c.map(|v| mean + (v - mean) * f));
    }
    if options.saturation != 1.0 {
        let f = options.saturation;
        map_pixels(&mut img, |c| {
            let l = luma(c);
            c.map(|v| l + (v - l) * f)
        });
    }

    if options.sharpen > 0.0 {
        img = imageops::unsharpen(&img, options.sharpen, 0);
    }
    if options.blur > 0.0 {
        img = imageops::blur(&img, options.blur);
    }

    if options.grayscale {
        map_pixels(&mut img, |c| [luma(c); 3]);
    }
    if options.invert {
        imageops::invert(&mut img);
    }
    if options.edge_detect {
        img = imageops::filter3x3(&img, &EDGES);
    }

    img
}

fn luma(c: [f32; 3]) -> f32 {
    c[0] * LUMA[0] + c[1] * LUMA[1] + c[2] * LUMA[2]
}

fn mean_luma(img: &RgbImage) -> f32 {
    let count = (img.width() as u64 * img.height() as u64).max(1);
    let sum: f64 = img
        .pixels()
        .map(|p| luma(p.0.map(f32::from)).round() as f64)
        .sum();
    (sum / count as f64).round() as f32
}

fn map_pixels(img: &mut RgbImage, f: impl Fn([f32; 3]) -> [f32; 3]) {
    for p in img.pixels_mut() {
        let out = f(p.0.map(f32::from));
        *p = Pixel(out.map(|v| v.clamp(0.0, 255.0).round() as u8));
    }
}
