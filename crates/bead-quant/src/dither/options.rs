//! Dithering options.

/// Configuration for error diffusion.
///
/// # Example
///
/// ```
/// use bead_quant::DitherOptions;
///
/// let options = DitherOptions::new().serpentine(true);
/// assert!(options.serpentine);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DitherOptions {
    /// Alternate the scan direction on odd rows, mirroring the kernel.
    ///
    /// Default: `false` (plain raster order, left to right on every row)
    pub serpentine: bool,
}

impl DitherOptions {
    /// Create options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set serpentine scanning mode.
    #[inline]
    pub fn serpentine(mut self, enabled: bool) -> Self {
        self.serpentine = enabled;
        self
    }
}
