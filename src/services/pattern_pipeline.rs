//! Image to bead pattern: decode, enhance, palette, pixelate, grid, BOM.
//!
//! One [`PatternPipeline::build`] call is one independent run. The options
//! carry every setting, including which palette labels the grid, so the
//! pixelation and rendering stages cannot disagree silently.

use bead_quant::{Catalog, Palette, MAX_PALETTE_SIZE};
use image::DynamicImage;
use std::sync::Arc;

use super::bom::{Bom, PatternStats};
use super::session::{ImageSource, SessionSlot};
use crate::error::{PatternError, RenderError};
use crate::models::{CostingConfig, EnhanceOptions, PaletteMode, PatternOptions};
use crate::rendering::{
    canvas_dimensions, canvas_size, enhance, flatten, grid_height, grid_svg, palette_sample,
    pixelate, BeadGrid, SvgRenderer, MAX_CANVAS_PIXELS,
};

/// Most bead rows a pattern may have.
pub const MAX_HEIGHT_BEADS: u32 = 1000;

/// Everything a run needs besides the image.
#[derive(Debug, Clone, Default)]
pub struct PatternRequest {
    pub options: PatternOptions,
    pub enhance: EnhanceOptions,
    pub costing: CostingConfig,
}

impl PatternRequest {
    pub fn validate(&self) -> Result<(), PatternError> {
        self.options.validate()?;
        self.enhance.validate()?;
        self.costing.validate()
    }
}

/// A finished pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub grid: BeadGrid,
    pub bom: Bom,
    pub stats: PatternStats,
    /// Entries in the quantization palette
    pub palette_size: usize,
    pub options: PatternOptions,
}

impl Pattern {
    /// Cell codes left to right, top to bottom.
    pub fn codes(&self) -> Vec<&str> {
        self.grid.codes()
    }
}

/// Result of an async run.
#[derive(Debug)]
pub struct PatternOutput {
    pub pattern: Pattern,
    pub png: Option<Vec<u8>>,
}

#[derive(Clone)]
pub struct PatternPipeline {
    catalog: Arc<Catalog>,
    renderer: SvgRenderer,
}

impl PatternPipeline {
    pub fn new(catalog: Catalog, renderer: SvgRenderer) -> Self {
        Self {
            catalog: Arc::new(catalog),
            renderer,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Decode `bytes` and build the pattern.
    pub fn build(&self, bytes: &[u8], request: &PatternRequest) -> Result<Pattern, PatternError> {
        request.validate()?;
        let image = decode_image(bytes)?;
        self.build_image(&image, request)
    }

    /// Build the pattern from a decoded image.
    pub fn build_image(
        &self,
        image: &DynamicImage,
        request: &PatternRequest,
    ) -> Result<Pattern, PatternError> {
        request.validate()?;
        let options = &request.options;

        let catalog = self.catalog.filter_families(&options.families)?;
        if let Some(focus) = &options.focus {
            if catalog.get(focus).is_none() {
                return Err(PatternError::InvalidInput(format!(
                    "focus code {focus} is not in the catalog"
                )));
            }
        }

        let rgb = enhance(flatten(image, options.background), &request.enhance);
        let height_beads = grid_height(rgb.width(), rgb.height(), options.width_beads)?;
        if height_beads > MAX_HEIGHT_BEADS {
            return Err(PatternError::InvalidImage(format!(
                "aspect ratio gives {height_beads} rows (max {MAX_HEIGHT_BEADS})"
            )));
        }
        let (canvas_width, canvas_height) =
            canvas_dimensions(options.width_beads, height_beads, options);
        if canvas_width as u64 * canvas_height as u64 > MAX_CANVAS_PIXELS {
            return Err(PatternError::InvalidInput(format!(
                "pattern canvas {canvas_width}x{canvas_height} exceeds {MAX_CANVAS_PIXELS} pixels, \
                 lower width_beads or cell_size"
            )));
        }

        let palette = match options.palette_mode {
            PaletteMode::Static => Palette::from_catalog_prefix(&catalog, MAX_PALETTE_SIZE)?,
            PaletteMode::Dynamic => Palette::dynamic(
                &palette_sample(&rgb),
                &catalog,
                options.color_budget,
                options.duplicate_policy(),
            )?,
        };
        let palette_size = palette.len();
        tracing::info!(
            mode = ?options.palette_mode,
            palette_size,
            catalog_size = catalog.len(),
            "Palette built"
        );

        let pixelated = pixelate(&rgb, palette, options)?;
        let grid = BeadGrid::from_pixelated(&pixelated, options.render_palette, &catalog)?;

        let bom = Bom::from_grid(&grid, &request.costing, options.exclude_background);
        let stats = PatternStats::compute(&grid, &bom, &request.costing);
        tracing::info!(
            width_beads = grid.width(),
            height_beads = grid.height(),
            colors = bom.rows.len(),
            beads = bom.total_count,
            "Pattern built"
        );

        Ok(Pattern {
            grid,
            bom,
            stats,
            palette_size,
            options: options.clone(),
        })
    }

    /// Draw the pattern and encode it as PNG.
    pub fn render_png(&self, pattern: &Pattern) -> Result<Vec<u8>, PatternError> {
        let (width, height) = canvas_size(&pattern.grid, &pattern.options);
        let svg = grid_svg(&pattern.grid, &pattern.options);
        let png = self.renderer.render_png(&svg, width, height)?;
        tracing::info!(width, height, bytes = png.len(), "Pattern rendered");
        Ok(png)
    }

    /// Resolve the input from `session` and run on the blocking pool.
    pub async fn run(
        &self,
        source: ImageSource,
        session: &SessionSlot,
        request: PatternRequest,
        render: bool,
    ) -> Result<PatternOutput, PatternError> {
        request.validate()?;
        let bytes = source.resolve(session).await?;
        let pipeline = self.clone();

        tokio::task::spawn_blocking(move || -> Result<PatternOutput, PatternError> {
            let pattern = pipeline.build(&bytes, &request)?;
            let png = if render {
                Some(pipeline.render_png(&pattern)?)
            } else {
                None
            };
            Ok(PatternOutput { pattern, png })
        })
        .await
        .map_err(|e| PatternError::Render(RenderError::Task(e.to_string())))?
    }
}

/// Decode PNG or JPEG bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, PatternError> {
    if bytes.is_empty() {
        return Err(PatternError::InvalidImage("empty image".to_string()));
    }
    let image =
        image::load_from_memory(bytes).map_err(|e| PatternError::InvalidImage(e.to_string()))?;
    if image.width() == 0 || image.height() == 0 {
        return Err(PatternError::InvalidImage(format!(
            "image has zero dimension: {}x{}",
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}
