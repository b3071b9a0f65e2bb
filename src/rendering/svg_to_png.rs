use crate::error::RenderError;
use resvg::usvg;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Largest canvas the renderer will allocate, in pixels.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 27;

/// Rasterizes pattern SVGs to RGB PNG.
#[derive(Clone)]
pub struct SvgRenderer {
    /// Font database for label text
    fontdb: Arc<fontdb::Database>,
}

impl SvgRenderer {
    /// Create a renderer with extra fonts, falling back to system fonts
    pub fn with_fonts(fonts: Vec<(String, Vec<u8>)>) -> Self {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            fontdb.load_font_data(data);
            tracing::debug!(font = %name, "Loaded font");
        }

        fontdb.load_system_fonts();

        tracing::info!(
            font_count = fontdb.len(),
            "Loaded fonts for pattern labels"
        );

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a renderer with fonts from `dir` plus system fonts
    pub fn with_font_dir(dir: &Path) -> Self {
        let mut fontdb = fontdb::Database::new();
        fontdb.load_fonts_dir(dir);
        let custom = fontdb.len();
        fontdb.load_system_fonts();

        tracing::info!(
            dir = %dir.display(),
            custom,
            font_count = fontdb.len(),
            "Loaded fonts for pattern labels"
        );

        Self {
            fontdb: Arc::new(fontdb),
        }
    }

    /// Create a renderer with system fonts only
    pub fn new() -> Self {
        Self::with_fonts(Vec::new())
    }

    pub fn font_count(&self) -> usize {
        self.fontdb.len()
    }

    /// Render `svg` at 1:1 scale into an RGB PNG of `width` x `height`.
    pub fn render_png(&self, svg: &str, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.rasterize_svg(svg.as_bytes(), width, height)?;

        // Background is filled opaque, so premultiplied RGBA equals straight RGB.
        let rgb: Vec<u8> = pixmap
            .data()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let png_bytes = encode_png(width, height, &rgb)?;

        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or(png_bytes);
        Ok(optimized)
    }

    /// Parse and rasterize SVG to an RGBA pixmap
    fn rasterize_svg(&self, svg_data: &[u8], width: u32, height: u32) -> Result<Pixmap, RenderError> {
        check_canvas(width, height)?;

        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg_data, &options)
            .map_err(|e| RenderError::SvgParse(e.to_string()))?;

        let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn check_canvas(width: u32, height: u32) -> Result<(), RenderError> {
    if width == 0 || height == 0 || width as u64 * height as u64 > MAX_CANVAS_PIXELS {
        return Err(RenderError::UnsupportedDimensions { width, height });
    }
    Ok(())
}

/// Encode 8-bit RGB pixels (fast settings; oxipng recompresses)
pub fn encode_png(width: u32, height: u32, rgb: &[u8]) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgb)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
