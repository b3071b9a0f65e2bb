//! Palette construction and nearest-color matching.
//!
//! A [`Palette`] is the ordered subset of the catalog a run matches against.
//! It is built one of two ways:
//!
//! - [`Palette::from_catalog_prefix`]: the first N catalog entries, capped at
//!   [`MAX_PALETTE_SIZE`]
//! - [`Palette::dynamic`]: the image's dominant colors snapped to the catalog
//!
//! Matching uses [`weighted_distance`] with a first-wins linear scan. A
//! [`PaletteIndex`] answers the same query faster and always agrees with the
//! scan.

mod dynamic;
mod error;
mod index;
mod matcher;
mod median_cut;
#[allow(clippy::module_inception)]
mod palette;

pub use dynamic::{DuplicatePolicy, MAX_COLOR_BUDGET, MIN_COLOR_BUDGET};
pub use error::{PaletteError, ParseColorError};
pub use index::PaletteIndex;
pub use matcher::{closest, closest_rgba, weighted_distance, CHANNEL_WEIGHTS, MAX_DISTANCE};
pub use palette::{NearestColor, Palette, MAX_PALETTE_SIZE};
