//! Quantizer builder, the main entry point of the crate.

use crate::color::Rgb;
use crate::dither::{Dither, DitherMode, DitherOptions, FloydSteinberg, Nearest};
use crate::output::QuantizedImage;
use crate::palette::{NearestColor, Palette, PaletteIndex};

use super::QuantError;

/// Requantizes RGB pixels through a fixed palette.
///
/// - Constructor takes the [`Palette`], so there is no unconfigured state
/// - Configuration methods consume and return `self`
/// - [`quantize`](Self::quantize) takes `&self`, so one quantizer can serve
///   many images
///
/// # Example
///
/// ```
/// use bead_quant::{BeadColor, DitherMode, Palette, Quantizer, Rgb};
///
/// let palette = Palette::new(vec![
///     BeadColor::new("K01", Rgb::BLACK),
///     BeadColor::new("W01", Rgb::WHITE),
/// ])
/// .unwrap();
///
/// let quantizer = Quantizer::new(palette).dither(DitherMode::None);
/// let out = quantizer.quantize(&[Rgb::new(20, 20, 20); 4], 2, 2).unwrap();
/// assert_eq!(out.indices(), &[0, 0, 0, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct Quantizer {
    palette: Palette,
    mode: DitherMode,
    options: DitherOptions,
    index: Option<PaletteIndex>,
}

impl Quantizer {
    /// Create a quantizer with Floyd-Steinberg diffusion in raster order.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            mode: DitherMode::default(),
            options: DitherOptions::default(),
            index: None,
        }
    }

    /// Select the requantization mode.
    #[inline]
    pub fn dither(mut self, mode: DitherMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set serpentine scanning for error diffusion.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.options = self.options.serpentine(enabled);
        self
    }

    /// Look colors up through a [`PaletteIndex`] instead of a linear scan.
    ///
    /// Results are identical either way.
    pub fn indexed(mut self, enabled: bool) -> Self {
        self.index = enabled.then(|| PaletteIndex::new(&self.palette));
        self
    }

    /// Palette in use.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Requantization mode in use.
    #[inline]
    pub fn mode(&self) -> DitherMode {
        self.mode
    }

    /// Requantize `pixels` (row-major, `width * height`) to palette indices.
    ///
    /// # Errors
    ///
    /// [`QuantError::InvalidInput`] if a dimension is zero or the buffer
    /// length does not match.
    pub fn quantize(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, QuantError> {
        if width == 0 || height == 0 {
            return Err(QuantError::InvalidInput(format!(
                "image dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if pixels.len() != width * height {
            return Err(QuantError::InvalidInput(format!(
                "expected {} pixels for {}x{}, got {}",
                width * height,
                width,
                height,
                pixels.len()
            )));
        }

        let matcher: &dyn NearestColor = match &self.index {
            Some(index) => index,
            None => &self.palette,
        };

        let indices = match self.mode {
            DitherMode::None => {
                Nearest.dither(pixels, width, height, &self.palette, matcher, &self.options)
            }
            DitherMode::FloydSteinberg => {
                FloydSteinberg.dither(pixels, width, height, &self.palette, matcher, &self.options)
            }
        };

        Ok(QuantizedImage::new(indices, width, height, self.palette.clone()))
    }

    /// Requantize flat `[R, G, B, ...]` bytes.
    pub fn quantize_bytes(
        &self,
        rgb: &[u8],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, QuantError> {
        if rgb.len() % 3 != 0 {
            return Err(QuantError::InvalidInput(format!(
                "RGB buffer length {} is not a multiple of 3",
                rgb.len()
            )));
        }
        let pixels: Vec<Rgb> = rgb
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        self.quantize(&pixels, width, height)
    }
}
