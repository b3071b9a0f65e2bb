//! Error types for catalog and palette operations

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Error type for catalog and palette construction.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteError {
    /// No colors provided in palette
    EmptyPalette,
    /// Catalog has no entries (or a family filter removed all of them)
    EmptyCatalog,
    /// Palette exceeds the indexed-color ceiling
    TooLarge {
        /// Number of entries requested
        len: usize,
        /// Hard ceiling
        max: usize,
    },
    /// Two catalog entries share a code
    DuplicateCode {
        /// The repeated code
        code: String,
    },
    /// Dynamic palette color budget outside the supported range
    ColorBudget {
        /// Requested number of colors
        k: usize,
    },
    /// Image has no pixels to derive a palette from
    EmptyImage,
    /// Invalid hex color string
    ParseColor(ParseColorError),
}

impl From<ParseColorError> for PaletteError {
    fn from(err: ParseColorError) -> Self {
        PaletteError::ParseColor(err)
    }
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::EmptyPalette => write!(f, "palette cannot be empty"),
            PaletteError::EmptyCatalog => write!(f, "catalog has no entries"),
            PaletteError::TooLarge { len, max } => {
                write!(f, "palette has {} entries (max {})", len, max)
            }
            PaletteError::DuplicateCode { code } => {
                write!(f, "duplicate bead code: {}", code)
            }
            PaletteError::ColorBudget { k } => write!(
                f,
                "color budget {} out of range ({}..={})",
                k,
                super::MIN_COLOR_BUDGET,
                super::MAX_COLOR_BUDGET
            ),
            PaletteError::EmptyImage => write!(f, "image has no pixels"),
            PaletteError::ParseColor(err) => write!(f, "invalid color: {}", err),
        }
    }
}

impl std::error::Error for PaletteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PaletteError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}
