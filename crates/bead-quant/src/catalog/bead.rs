//! A single physical bead color.

use std::borrow::Cow;
use std::fmt;

use crate::color::Rgb;

/// One entry of a bead catalog: a catalog-unique code and its color.
///
/// Built-in entries borrow their code from static data; entries loaded at
/// runtime own theirs. Either way the value is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BeadColor {
    code: Cow<'static, str>,
    rgb: Rgb,
}

impl BeadColor {
    /// Create a bead color.
    ///
    /// ```
    /// use bead_quant::{BeadColor, Rgb};
    ///
    /// let red = BeadColor::new("R01", Rgb::new(255, 0, 0));
    /// assert_eq!(red.code(), "R01");
    /// assert_eq!(red.family(), "R");
    /// ```
    pub fn new(code: impl Into<Cow<'static, str>>, rgb: Rgb) -> Self {
        Self {
            code: code.into(),
            rgb,
        }
    }

    /// Create a bead color from static data without allocating.
    pub const fn from_static(code: &'static str, rgb: Rgb) -> Self {
        Self {
            code: Cow::Borrowed(code),
            rgb,
        }
    }

    /// The catalog code, e.g. `"A01"`.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The bead's color.
    #[inline]
    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// The color family: the leading alphabetic part of the code.
    pub fn family(&self) -> &str {
        let end = self
            .code
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(self.code.len());
        &self.code[..end]
    }
}

impl fmt::Display for BeadColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.rgb)
    }
}
