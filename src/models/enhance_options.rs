use serde::{Deserialize, Serialize};

use crate::error::PatternError;

/// Image adjustments applied before pixelation.
///
/// Factors follow the usual enhancer convention: 1.0 leaves the image
/// unchanged, 0.0 gives the degenerate image (black, flat gray, grayscale).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnhanceOptions {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
    /// Unsharp mask strength, 0 disables
    pub sharpen: f32,
    /// Gaussian blur sigma, 0 disables
    pub blur: f32,
    /// Clockwise rotation in degrees
    pub rotate: u16,
    /// Mirror left to right
    pub mirror: bool,
    /// Flip top to bottom
    pub flip: bool,
    pub grayscale: bool,
    pub invert: bool,
    pub edge_detect: bool,
}

impl Default for EnhanceOptions {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            sharpen: 0.0,
            blur: 0.0,
            rotate: 0,
            mirror: false,
            flip: false,
            grayscale: false,
            invert: false,
            edge_detect: false,
        }
    }
}

impl EnhanceOptions {
    pub fn validate(&self) -> Result<(), PatternError> {
        for (name, value) in [
            ("brightness", self.brightness),
            ("contrast", self.contrast),
            ("saturation", self.saturation),
            ("sharpen", self.sharpen),
            ("blur", self.blur),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PatternError::InvalidInput(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !matches!(self.rotate, 0 | 90 | 180 | 270) {
            return Err(PatternError::InvalidInput(format!(
                "rotate must be 0, 90, 180 or 270, got {}",
                self.rotate
            )));
        }
        Ok(())
    }

    /// True when applying these options would return the input unchanged.
    pub fn is_identity(&self) -> bool {
        self == &Self::default()
    }
}
