#![allow(clippy::module_inception)]

//! bead-quant: bead catalogs, palette selection and color requantization
//!
//! This library maps arbitrary RGB pixels onto a finite catalog of bead
//! colors. It is pure computation: no I/O and no image decoding.
//!
//! # Quick Start
//!
//! ```
//! use bead_quant::{Catalog, DitherMode, Palette, Quantizer, Rgb, MAX_PALETTE_SIZE};
//!
//! let palette = Palette::from_catalog_prefix(Catalog::builtin(), MAX_PALETTE_SIZE).unwrap();
//! let pixels = vec![Rgb::new(250, 10, 10); 6];
//!
//! let image = Quantizer::new(palette)
//!     .dither(DitherMode::FloydSteinberg)
//!     .quantize(&pixels, 3, 2)
//!     .unwrap();
//!
//! assert_eq!(image.width(), 3);
//! assert_eq!(image.height(), 2);
//! ```
//!
//! # Matching
//!
//! [`closest`] picks the entry minimizing
//!
//! ```text
//! d = 2·ΔR² + 4·ΔG² + 3·ΔB²
//! ```
//!
//! with a linear scan; the first entry wins ties. [`PaletteIndex`] is an
//! optional bucketed lookup that returns the same answers.
//!
//! # Palettes
//!
//! - [`Palette::from_catalog_prefix`]: first entries of the catalog, capped
//!   at [`MAX_PALETTE_SIZE`] because indices are stored as `u8`
//! - [`Palette::dynamic`]: median cut over the image's own colors, each
//!   representative snapped to the catalog
//!
//! # Requantization
//!
//! [`Quantizer`] maps every pixel to a palette index, either independently
//! ([`DitherMode::None`]) or with Floyd-Steinberg error diffusion
//! ([`DitherMode::FloydSteinberg`]). Output colors are always palette colors.

pub mod api;
pub mod catalog;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;

mod domain_tests;

pub use api::{QuantError, Quantizer};
pub use catalog::{is_background, BeadColor, Catalog, BACKGROUND_CODES};
pub use color::Rgb;
pub use dither::{Dither, DitherMode, DitherOptions, ErrorBuffer, FloydSteinberg, Nearest};
pub use output::QuantizedImage;
pub use palette::{
    closest, closest_rgba, weighted_distance, DuplicatePolicy, NearestColor, Palette,
    PaletteError, PaletteIndex, ParseColorError, MAX_COLOR_BUDGET, MAX_PALETTE_SIZE,
    MIN_COLOR_BUDGET,
};
