//! The bead grid: one matched catalog entry per cell.

use bead_quant::{closest, BeadColor, Catalog};

use super::pixelate::Pixelated;
use crate::error::PatternError;
use crate::models::RenderPalette;

/// Cells per side of one physical pegboard.
pub const BOARD_SIZE: u32 = 29;

/// Immutable W×H grid of matched beads, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct BeadGrid {
    width: u32,
    height: u32,
    cells: Vec<BeadColor>,
    diverged: usize,
}

impl BeadGrid {
    /// Build from explicit cells.
    pub fn new(width: u32, height: u32, cells: Vec<BeadColor>) -> Result<Self, PatternError> {
        if width == 0 || height == 0 || cells.len() != width as usize * height as usize {
            return Err(PatternError::InvalidInput(format!(
                "grid {}x{} does not match {} cells",
                width,
                height,
                cells.len()
            )));
        }
        Ok(Self {
            width,
            height,
            cells,
            diverged: 0,
        })
    }

    /// Match every pixelated cell against the rendering palette.
    ///
    /// With [`RenderPalette::Active`] each cell resolves within the palette
    /// that quantized it, so codes always agree with the quantized colors.
    /// [`RenderPalette::Catalog`] re-matches against the whole catalog and
    /// counts the cells whose code changed.
    pub fn from_pixelated(
        pixelated: &Pixelated,
        render_palette: RenderPalette,
        catalog: &Catalog,
    ) -> Result<Self, PatternError> {
        let quantized = &pixelated.image;
        let candidates = match render_palette {
            RenderPalette::Active => quantized.palette().entries(),
            RenderPalette::Catalog => catalog.entries(),
        };

        let mut cells = Vec::with_capacity(quantized.indices().len());
        let mut diverged = 0;
        for source in quantized.entries() {
            let bead = closest(source.rgb(), candidates)?;
            if bead.code() != source.code() {
                diverged += 1;
            }
            cells.push(bead.clone());
        }

        if diverged > 0 {
            tracing::warn!(
                diverged,
                total = cells.len(),
                "Catalog re-match labels cells with codes outside the quantization palette"
            );
        }

        let mut grid = Self::new(pixelated.width_beads, pixelated.height_beads, cells)?;
        grid.diverged = diverged;
        Ok(grid)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cells(&self) -> &[BeadColor] {
        &self.cells
    }

    pub fn cell(&self, x: u32, y: u32) -> &BeadColor {
        &self.cells[(y * self.width + x) as usize]
    }

    /// Cell codes left to right, top to bottom.
    pub fn codes(&self) -> Vec<&str> {
        self.cells.iter().map(BeadColor::code).collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[BeadColor]> {
        self.cells.chunks(self.width as usize)
    }

    /// Cells whose code differs from the quantized color's code.
    pub fn diverged(&self) -> usize {
        self.diverged
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Row label: A..Z, then A1..Z1, A2.. and so on.
pub fn row_label(row: u32) -> String {
    let letter = (b'A' + (row % 26) as u8) as char;
    match row / 26 {
        0 => letter.to_string(),
        cycle => format!("{letter}{cycle}"),
    }
}

/// 1-based column label.
pub fn column_label(col: u32) -> String {
    (col + 1).to_string()
}

/// Internal board seams for a run of `cells`: multiples of [`BOARD_SIZE`]
/// strictly between the edges.
pub fn board_boundaries(cells: u32) -> Vec<u32> {
    (1..)
        .map(|k| k * BOARD_SIZE)
        .take_while(|&b| b < cells)
        .collect()
}

/// Boards needed along one axis.
pub fn boards_along(cells: u32) -> u32 {
    cells.div_ceil(BOARD_SIZE)
}
