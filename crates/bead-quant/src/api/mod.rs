//! High-level API: the [`Quantizer`] builder and the unified [`QuantError`].

mod builder;
mod error;

pub use builder::Quantizer;
pub use error::QuantError;
