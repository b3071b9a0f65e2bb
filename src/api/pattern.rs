use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, PatternError};
use crate::models::{AppConfig, CellStyle, PaletteMode, RenderPalette};
use crate::services::{
    Bom, ImageSource, PatternOutput, PatternPipeline, PatternRequest, PatternStats, SessionSlot,
};

/// Per-request overrides of the configured defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PatternQuery {
    /// `upload` (default, image in body) or `generated` (last generated image)
    pub source: Option<String>,
    /// Grid width in beads (1-200)
    pub width_beads: Option<u32>,
    /// Cell size in pixels (10-100)
    pub cell_size: Option<u32>,
    pub dither: Option<bool>,
    pub serpentine: Option<bool>,
    pub style: Option<CellStyle>,
    pub labels: Option<bool>,
    pub axes: Option<bool>,
    pub board_lines: Option<bool>,
    /// Bead code to highlight
    pub focus: Option<String>,
    pub palette_mode: Option<PaletteMode>,
    /// Dominant colors for the dynamic palette (2-128)
    pub color_budget: Option<usize>,
    pub keep_duplicates: Option<bool>,
    pub render_palette: Option<RenderPalette>,
    pub exclude_background: Option<bool>,
    /// Background for transparent pixels, `#RRGGBB`
    pub background: Option<String>,
    /// Comma-separated family prefixes, e.g. `A,H`
    pub families: Option<String>,
    pub brightness: Option<f32>,
    pub contrast: Option<f32>,
    pub saturation: Option<f32>,
    pub sharpen: Option<f32>,
    pub blur: Option<f32>,
    /// 0, 90, 180 or 270
    pub rotate: Option<u16>,
    pub mirror: Option<bool>,
    pub flip: Option<bool>,
    pub grayscale: Option<bool>,
    pub invert: Option<bool>,
    pub edge_detect: Option<bool>,
    pub price_per_bag: Option<f64>,
    pub beads_per_bag: Option<u32>,
}

impl PatternQuery {
    /// Overlay the query on the configured defaults.
    pub fn to_request(&self, config: &AppConfig) -> Result<PatternRequest, PatternError> {
        let mut options = config.pattern.clone();
        let mut enhance = config.enhance.clone();
        let mut costing = config.costing.clone();

        macro_rules! overlay {
            ($target:ident: $($field:ident),+) => {
                $(if let Some(v) = self.$field.clone() { $target.$field = v; })+
            };
        }

        overlay!(options: width_beads, cell_size, dither, serpentine, style, labels, axes,
            board_lines, palette_mode, color_budget, keep_duplicates, render_palette,
            exclude_background);
        overlay!(enhance: brightness, contrast, saturation, sharpen, blur, rotate, mirror, flip,
            grayscale, invert, edge_detect);
        overlay!(costing: price_per_bag, beads_per_bag);

        if let Some(focus) = &self.focus {
            let focus = focus.trim();
            options.focus = (!focus.is_empty()).then(|| focus.to_string());
        }
        if let Some(bg) = &self.background {
            options.background = bg
                .parse()
                .map_err(|e| PatternError::InvalidInput(format!("background: {e}")))?;
        }
        if let Some(families) = &self.families {
            options.families = families
                .split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string)
                .collect();
        }

        let request = PatternRequest {
            options,
            enhance,
            costing,
        };
        request.validate()?;
        Ok(request)
    }

    /// Image source named by `source`, taking `body` for uploads.
    pub fn image_source(&self, body: Bytes) -> Result<ImageSource, PatternError> {
        match self.source.as_deref().unwrap_or("upload") {
            "upload" => {
                if body.is_empty() {
                    return Err(PatternError::InvalidImage(
                        "request body must contain a PNG or JPEG image".to_string(),
                    ));
                }
                Ok(ImageSource::Upload(body.to_vec()))
            }
            "generated" => Ok(ImageSource::Generated),
            other => Err(PatternError::InvalidInput(format!(
                "unknown source '{other}', expected upload or generated"
            ))),
        }
    }
}

/// Full pattern description
#[derive(Debug, Serialize, ToSchema)]
pub struct PatternReport {
    pub width_beads: u32,
    pub height_beads: u32,
    /// Entries in the quantization palette
    pub palette_size: usize,
    /// Cells whose label differs from the quantized color (catalog re-match only)
    pub diverged: usize,
    /// Cell codes, row-major
    pub codes: Vec<String>,
    pub bom: Bom,
    pub stats: PatternStats,
}

async fn run(
    pipeline: &PatternPipeline,
    session: &SessionSlot,
    config: &AppConfig,
    query: &PatternQuery,
    body: Bytes,
    render: bool,
) -> Result<PatternOutput, ApiError> {
    let request = query.to_request(config)?;
    let source = query.image_source(body)?;
    Ok(pipeline.run(source, session, request, render).await?)
}

/// Render a bead pattern as PNG
///
/// The image is sent as the raw request body. Grid size and BOM totals are
/// returned in `X-` headers.
#[utoipa::path(
    post,
    path = "/api/pattern",
    params(PatternQuery),
    request_body(content = Vec<u8>, description = "PNG or JPEG image", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Pattern image", content_type = "image/png"),
        (status = 400, description = "Invalid image or options"),
        (status = 500, description = "Rendering failed"),
    ),
    tag = "Pattern"
)]
pub async fn handle_pattern(
    State(pipeline): State<Arc<PatternPipeline>>,
    State(session): State<SessionSlot>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<PatternQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let output = run(&pipeline, &session, &config, &query, body, true).await?;
    let png = output
        .png
        .ok_or_else(|| ApiError::Internal("pattern was not rendered".to_string()))?;
    let pattern = output.pattern;
    let bom = &pattern.bom;

    let mut response = (
        [(header::CONTENT_TYPE, HeaderValue::from_static("image/png"))],
        png,
    )
        .into_response();
    let headers = response.headers_mut();
    for (name, value) in [
        ("x-grid-width", pattern.grid.width().to_string()),
        ("x-grid-height", pattern.grid.height().to_string()),
        ("x-bead-count", bom.total_count.to_string()),
        ("x-color-count", bom.rows.len().to_string()),
        ("x-total-bags", bom.total_bags.to_string()),
        ("x-total-cost", format!("{:.2}", bom.total_cost)),
    ] {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(name, value);
        }
    }
    Ok(response)
}

/// Pattern grid, bill of materials and statistics as JSON
#[utoipa::path(
    post,
    path = "/api/pattern/report",
    params(PatternQuery),
    request_body(content = Vec<u8>, description = "PNG or JPEG image", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "Pattern report", body = PatternReport),
        (status = 400, description = "Invalid image or options"),
    ),
    tag = "Pattern"
)]
pub async fn handle_report(
    State(pipeline): State<Arc<PatternPipeline>>,
    State(session): State<SessionSlot>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<PatternQuery>,
    body: Bytes,
) -> Result<Json<PatternReport>, ApiError> {
    let pattern = run(&pipeline, &session, &config, &query, body, false)
        .await?
        .pattern;

    Ok(Json(PatternReport {
        width_beads: pattern.grid.width(),
        height_beads: pattern.grid.height(),
        palette_size: pattern.palette_size,
        diverged: pattern.grid.diverged(),
        codes: pattern.codes().into_iter().map(str::to_string).collect(),
        bom: pattern.bom,
        stats: pattern.stats,
    }))
}

/// Bill of materials as CSV
#[utoipa::path(
    post,
    path = "/api/pattern/bom.csv",
    params(PatternQuery),
    request_body(content = Vec<u8>, description = "PNG or JPEG image", content_type = "application/octet-stream"),
    responses(
        (status = 200, description = "UTF-8 CSV with byte order mark", content_type = "text/csv"),
        (status = 400, description = "Invalid image or options"),
    ),
    tag = "Pattern"
)]
pub async fn handle_bom_csv(
    State(pipeline): State<Arc<PatternPipeline>>,
    State(session): State<SessionSlot>,
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<PatternQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let pattern = run(&pipeline, &session, &config, &query, body, false)
        .await?
        .pattern;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"bom.csv\""),
        ],
        pattern.bom.to_csv(),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bead_quant::Rgb;

    #[test]
    fn test_empty_query_uses_config() {
        let config = AppConfig::default();
        let request = PatternQuery::default().to_request(&config).unwrap();
        assert_eq!(request.options, config.pattern);
        assert_eq!(request.costing, config.costing);
    }

    #[test]
    fn test_query_overrides() {
        let query = PatternQuery {
            width_beads: Some(58),
            style: Some(CellStyle::Circle),
            focus: Some(" R01 ".to_string()),
            background: Some("#000".to_string()),
            families: Some("A, H,".to_string()),
            rotate: Some(90),
            beads_per_bag: Some(500),
            ..Default::default()
        };
        let request = query.to_request(&AppConfig::default()).unwrap();
        assert_eq!(request.options.width_beads, 58);
        assert_eq!(request.options.style, CellStyle::Circle);
        assert_eq!(request.options.focus.as_deref(), Some("R01"));
        assert_eq!(request.options.background, Rgb::BLACK);
        assert_eq!(request.options.families, vec!["A", "H"]);
        assert_eq!(request.enhance.rotate, 90);
        assert_eq!(request.costing.beads_per_bag, 500);
    }

    #[test]
    fn test_query_validation() {
        let query = PatternQuery {
            width_beads: Some(500),
            ..Default::default()
        };
        assert!(matches!(
            query.to_request(&AppConfig::default()),
            Err(PatternError::InvalidInput(_))
        ));

        let query = PatternQuery {
            background: Some("white".to_string()),
            ..Default::default()
        };
        assert!(query.to_request(&AppConfig::default()).is_err());
    }

    #[test]
    fn test_image_source() {
        let upload = PatternQuery::default();
        assert!(matches!(
            upload.image_source(Bytes::from_static(b"x")),
            Ok(ImageSource::Upload(_))
        ));
        assert!(matches!(
            upload.image_source(Bytes::new()),
            Err(PatternError::InvalidImage(_))
        ));

        let generated = PatternQuery {
            source: Some("generated".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            generated.image_source(Bytes::new()),
            Ok(ImageSource::Generated)
        ));

        let bogus = PatternQuery {
            source: Some("camera".to_string()),
            ..Default::default()
        };
        assert!(bogus.image_source(Bytes::new()).is_err());
    }
}
