//! Color type used throughout the crate.
//!
//! Bead matching is done on plain 8-bit sRGB triples. There is no linear or
//! perceptual space here: the weighted distance in [`crate::palette`] operates
//! directly on the stored bytes.
//!
//! # Example
//!
//! ```
//! use bead_quant::Rgb;
//!
//! let orange: Rgb = "#FF8000".parse().unwrap();
//! assert_eq!(orange, Rgb::new(255, 128, 0));
//! assert_eq!(orange.to_string(), "#FF8000");
//! ```

mod rgb;

pub use rgb::Rgb;
