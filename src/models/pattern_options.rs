use bead_quant::{DuplicatePolicy, Rgb, MAX_COLOR_BUDGET, MIN_COLOR_BUDGET};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PatternError;

pub const MIN_WIDTH_BEADS: u32 = 1;
pub const MAX_WIDTH_BEADS: u32 = 200;
pub const MIN_CELL_SIZE: u32 = 10;
pub const MAX_CELL_SIZE: u32 = 100;

/// Shape drawn for each bead cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CellStyle {
    #[default]
    Square,
    Circle,
    Rounded,
}

/// How the quantization palette is derived from the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PaletteMode {
    /// First 256 catalog entries
    #[default]
    Static,
    /// Median cut over the image, snapped to the catalog
    Dynamic,
}

/// Palette used to label cells when the grid is built.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RenderPalette {
    /// Same palette that produced the quantized image
    #[default]
    Active,
    /// Full catalog re-match; codes may diverge from the quantized colors
    Catalog,
}

/// Per-run pattern options.
///
/// Defaults come from the `pattern` section of the config file; request
/// parameters override individual fields.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatternOptions {
    /// Grid width in beads; height follows the image aspect ratio
    pub width_beads: u32,
    /// Pixel size of one cell in the rendered pattern
    pub cell_size: u32,
    pub dither: bool,
    pub serpentine: bool,
    pub style: CellStyle,
    pub labels: bool,
    pub axes: bool,
    pub board_lines: bool,
    /// Only this code keeps its true color, everything else is muted
    pub focus: Option<String>,
    pub palette_mode: PaletteMode,
    /// Dominant colors for the dynamic palette
    pub color_budget: usize,
    /// Keep duplicate codes when dynamic representatives snap to the same bead
    pub keep_duplicates: bool,
    pub render_palette: RenderPalette,
    /// Drop background codes from labels and bead counts
    pub exclude_background: bool,
    /// Color that transparent pixels are composited onto
    #[serde(with = "hex_color")]
    pub background: Rgb,
    /// Catalog family prefixes to keep; empty keeps everything
    pub families: Vec<String>,
    /// Use a bucketed palette index for matching
    pub indexed: bool,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            width_beads: 30,
            cell_size: 30,
            dither: true,
            serpentine: false,
            style: CellStyle::Square,
            labels: true,
            axes: false,
            board_lines: false,
            focus: None,
            palette_mode: PaletteMode::Static,
            color_budget: 16,
            keep_duplicates: false,
            render_palette: RenderPalette::Active,
            exclude_background: false,
            background: Rgb::WHITE,
            families: Vec::new(),
            indexed: true,
        }
    }
}

impl PatternOptions {
    /// Check ranges before any work is done.
    pub fn validate(&self) -> Result<(), PatternError> {
        if !(MIN_WIDTH_BEADS..=MAX_WIDTH_BEADS).contains(&self.width_beads) {
            return Err(PatternError::InvalidInput(format!(
                "width_beads must be {MIN_WIDTH_BEADS}-{MAX_WIDTH_BEADS}, got {}",
                self.width_beads
            )));
        }
        if !(MIN_CELL_SIZE..=MAX_CELL_SIZE).contains(&self.cell_size) {
            return Err(PatternError::InvalidInput(format!(
                "cell_size must be {MIN_CELL_SIZE}-{MAX_CELL_SIZE}, got {}",
                self.cell_size
            )));
        }
        if !(MIN_COLOR_BUDGET..=MAX_COLOR_BUDGET).contains(&self.color_budget) {
            return Err(PatternError::InvalidInput(format!(
                "color_budget must be {MIN_COLOR_BUDGET}-{MAX_COLOR_BUDGET}, got {}",
                self.color_budget
            )));
        }
        if matches!(&self.focus, Some(code) if code.trim().is_empty()) {
            return Err(PatternError::InvalidInput(
                "focus code must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        if self.keep_duplicates {
            DuplicatePolicy::Keep
        } else {
            DuplicatePolicy::Dedup
        }
    }
}

/// Serde adapter storing an [`Rgb`] as `#RRGGBB`.
pub mod hex_color {
    use bead_quant::Rgb;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
