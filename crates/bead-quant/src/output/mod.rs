//! Output of requantization.
//!
//! [`QuantizedImage`] stores palette indices with dimensions and the owned
//! [`Palette`](crate::Palette). RGB and bead-code views are derived on
//! demand.

mod quantized_image;

pub use quantized_image::QuantizedImage;
