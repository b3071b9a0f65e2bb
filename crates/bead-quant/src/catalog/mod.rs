//! Bead catalog: the fixed reference list of physical bead colors.
//!
//! The built-in catalog is loaded once per process through
//! [`Catalog::builtin`]. Custom catalogs can be built with
//! [`Catalog::from_entries`]; codes must be unique.

mod bead;
mod catalog;
mod data;

pub use bead::BeadColor;
pub use catalog::{is_background, Catalog, BACKGROUND_CODES};
