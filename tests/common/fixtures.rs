//! Test fixtures: images encoded on the fly.

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

pub const RED: [u8; 3] = [255, 0, 0];
pub const BLUE: [u8; 3] = [0, 0, 255];

/// Single-color PNG
pub fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(&RgbImage::from_pixel(width, height, Rgb(color)), ImageFormat::Png)
}

/// Single-color JPEG
pub fn solid_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    encode(&RgbImage::from_pixel(width, height, Rgb(color)), ImageFormat::Jpeg)
}

/// Left half `left`, right half `right`
pub fn split_png(width: u32, height: u32, left: [u8; 3], right: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb(left)
        } else {
            Rgb(right)
        }
    });
    encode(&image, ImageFormat::Png)
}

/// Horizontal gray ramp
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
        Rgb([v, v, v])
    });
    encode(&image, ImageFormat::Png)
}

/// Fully transparent PNG
pub fn transparent_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    let mut out = Cursor::new(Vec::new());
    image
        .write_to(&mut out, ImageFormat::Png)
        .expect("Failed to encode fixture");
    out.into_inner()
}

/// Catalog YAML with a single red bead
pub const RED_ONLY_CATALOG: &str = r##"
- code: R01
  hex: "#FF0000"
"##;

/// Catalog YAML with three beads across two families
pub const SMALL_CATALOG: &str = r##"
- code: R01
  hex: "#FF0000"
- code: B01
  hex: "#0000FF"
- code: H01
  hex: "#FFFFFF"
"##;

fn encode(image: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).expect("Failed to encode fixture");
    out.into_inner()
}
