//! Ordered bead catalog.

use std::collections::HashSet;
use std::sync::OnceLock;

use super::bead::BeadColor;
use super::data::BUILTIN;
use crate::color::Rgb;
use crate::palette::PaletteError;

/// Codes treated as background by the background-exclusion policy.
///
/// These are the near-white members of the `H` family. The set is fixed;
/// it is not derived from the catalog in use.
pub const BACKGROUND_CODES: &[&str] = &["H01", "H02"];

/// Returns true if `code` belongs to [`BACKGROUND_CODES`].
#[inline]
pub fn is_background(code: &str) -> bool {
    BACKGROUND_CODES.contains(&code)
}

/// An ordered, immutable list of bead colors with unique codes.
///
/// Order is significant: [`Palette::from_catalog_prefix`](crate::Palette::from_catalog_prefix)
/// takes the first entries, and ties in matching go to the earlier entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    entries: Vec<BeadColor>,
}

impl Catalog {
    /// Load the built-in catalog.
    ///
    /// Deterministic and infallible; the data is compiled in.
    pub fn load() -> Self {
        Self {
            entries: BUILTIN
                .iter()
                .map(|&(code, rgb)| BeadColor::from_static(code, Rgb::from_bytes(rgb)))
                .collect(),
        }
    }

    /// Process-wide shared copy of the built-in catalog.
    ///
    /// ```
    /// use bead_quant::Catalog;
    ///
    /// let catalog = Catalog::builtin();
    /// assert_eq!(catalog.entries()[0].code(), "A01");
    /// ```
    pub fn builtin() -> &'static Catalog {
        static BUILTIN_CATALOG: OnceLock<Catalog> = OnceLock::new();
        BUILTIN_CATALOG.get_or_init(Catalog::load)
    }

    /// Build a catalog from caller-supplied entries.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyCatalog`] if `entries` is empty
    /// - [`PaletteError::DuplicateCode`] if two entries share a code
    pub fn from_entries(entries: Vec<BeadColor>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::EmptyCatalog);
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.code()) {
                return Err(PaletteError::DuplicateCode {
                    code: entry.code().to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for catalogs built through the public constructors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in catalog order.
    #[inline]
    pub fn entries(&self) -> &[BeadColor] {
        &self.entries
    }

    /// Iterate entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &BeadColor> {
        self.entries.iter()
    }

    /// Look up an entry by code (exact, case-sensitive).
    pub fn get(&self, code: &str) -> Option<&BeadColor> {
        self.entries.iter().find(|e| e.code() == code)
    }

    /// Distinct family prefixes in the order they first appear.
    pub fn families(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(BeadColor::family)
            .filter(|f| seen.insert(*f))
            .collect()
    }

    /// Keep only entries whose family matches one of `families`.
    ///
    /// Matching is case-insensitive and preserves catalog order. An empty
    /// `families` slice means "no filter" and returns a copy.
    ///
    /// # Errors
    ///
    /// [`PaletteError::EmptyCatalog`] if nothing survives the filter.
    ///
    /// ```
    /// use bead_quant::Catalog;
    ///
    /// let greys = Catalog::builtin().filter_families(&["h"]).unwrap();
    /// assert!(greys.iter().all(|b| b.family() == "H"));
    /// ```
    pub fn filter_families<S: AsRef<str>>(&self, families: &[S]) -> Result<Self, PaletteError> {
        if families.is_empty() {
            return Ok(self.clone());
        }

        let entries: Vec<BeadColor> = self
            .entries
            .iter()
            .filter(|e| {
                families
                    .iter()
                    .any(|f| e.family().eq_ignore_ascii_case(f.as_ref().trim()))
            })
            .cloned()
            .collect();

        if entries.is_empty() {
            return Err(PaletteError::EmptyCatalog);
        }
        Ok(Self { entries })
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a BeadColor;
    type IntoIter = std::slice::Iter<'a, BeadColor>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
