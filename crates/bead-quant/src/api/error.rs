//! Unified error type for the bead-quant public API.

use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the bead-quant public API.
///
/// # Example
///
/// ```
/// use bead_quant::{Catalog, Palette, QuantError};
///
/// fn first_ten() -> Result<Palette, QuantError> {
///     Ok(Palette::from_catalog_prefix(Catalog::builtin(), 10)?)
/// }
/// # assert_eq!(first_ten().unwrap().len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum QuantError {
    /// Caller-supplied data is inconsistent (dimensions, buffer length)
    InvalidInput(String),
    /// Palette or catalog construction failed
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
}

impl fmt::Display for QuantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            QuantError::Palette(err) => write!(f, "palette error: {}", err),
            QuantError::ParseColor(err) => write!(f, "color parse error: {}", err),
        }
    }
}

impl std::error::Error for QuantError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuantError::InvalidInput(_) => None,
            QuantError::Palette(err) => Some(err),
            QuantError::ParseColor(err) => Some(err),
        }
    }
}

impl From<PaletteError> for QuantError {
    fn from(err: PaletteError) -> Self {
        QuantError::Palette(err)
    }
}

impl From<ParseColorError> for QuantError {
    fn from(err: ParseColorError) -> Self {
        QuantError::ParseColor(err)
    }
}
