//! SVG drawing of a bead grid.
//!
//! The document is rasterized by [`SvgRenderer`](super::SvgRenderer); keeping
//! the drawing as SVG lets text and shapes go through one renderer.

use bead_quant::{is_background, Rgb};

use super::grid::{board_boundaries, column_label, row_label, BeadGrid};
use crate::models::{CellStyle, PatternOptions};

pub const OUTLINE: Rgb = Rgb::new(220, 220, 220);
pub const MUTED: Rgb = Rgb::new(221, 221, 221);
pub const BOARD_LINE: Rgb = Rgb::new(230, 40, 40);
pub const AXIS_TEXT: Rgb = Rgb::new(60, 60, 60);

/// Channel sum below which labels are drawn in white.
pub const LABEL_CONTRAST_THRESHOLD: u16 = 380;

/// Canvas size in pixels: the cells plus a one-cell axis margin when enabled.
pub fn canvas_size(grid: &BeadGrid, options: &PatternOptions) -> (u32, u32) {
    canvas_dimensions(grid.width(), grid.height(), options)
}

/// [`canvas_size`] for a grid that has not been built yet.
pub fn canvas_dimensions(
    width_beads: u32,
    height_beads: u32,
    options: &PatternOptions,
) -> (u32, u32) {
    let margin = axis_margin(options);
    (
        margin.saturating_add(width_beads.saturating_mul(options.cell_size)),
        margin.saturating_add(height_beads.saturating_mul(options.cell_size)),
    )
}

fn axis_margin(options: &PatternOptions) -> u32 {
    if options.axes {
        options.cell_size
    } else {
        0
    }
}

/// Color a cell is drawn with, honoring the focus filter.
pub fn display_color(code: &str, rgb: Rgb, focus: Option<&str>) -> Rgb {
    match focus {
        Some(focus) if focus != code => MUTED,
        _ => rgb,
    }
}

/// Label color for a fill.
pub fn label_color(fill: Rgb) -> Rgb {
    if fill.channel_sum() < LABEL_CONTRAST_THRESHOLD {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

/// Build the SVG document for `grid`.
pub fn grid_svg(grid: &BeadGrid, options: &PatternOptions) -> String {
    let cell = options.cell_size;
    let margin = axis_margin(options);
    let (width, height) = canvas_size(grid, options);
    let focus = options.focus.as_deref();
    let font_size = (cell as f32 * 0.3).max(4.0);

    let mut svg = String::with_capacity(grid.len() * 160 + 512);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    ));
    svg.push_str(&format!(
        r##"<rect width="{width}" height="{height}" fill="#FFFFFF"/>"##
    ));

    for (y, row) in grid.rows().enumerate() {
        for (x, bead) in row.iter().enumerate() {
            let px = margin + x as u32 * cell;
            let py = margin + y as u32 * cell;
            let fill = display_color(bead.code(), bead.rgb(), focus);
            push_cell(&mut svg, options.style, px, py, cell, fill);

            if options.labels && !(options.exclude_background && is_background(bead.code())) {
                let cx = px as f32 + cell as f32 / 2.0;
                let cy = py as f32 + cell as f32 / 2.0;
                svg.push_str(&format!(
                    r#"<text x="{cx}" y="{cy}" font-family="sans-serif" font-size="{font_size}" text-anchor="middle" dominant-baseline="central" fill="{}">{}</text>"#,
                    label_color(fill),
                    escape_xml(bead.code())
                ));
            }
        }
    }

    if options.board_lines {
        let stroke = (cell as f32 / 10.0).max(2.0);
        for b in board_boundaries(grid.width()) {
            let x = margin + b * cell;
            svg.push_str(&format!(
                r#"<line x1="{x}" y1="{margin}" x2="{x}" y2="{height}" stroke="{BOARD_LINE}" stroke-width="{stroke}"/>"#
            ));
        }
        for b in board_boundaries(grid.height()) {
            let y = margin + b * cell;
            svg.push_str(&format!(
                r#"<line x1="{margin}" y1="{y}" x2="{width}" y2="{y}" stroke="{BOARD_LINE}" stroke-width="{stroke}"/>"#
            ));
        }
    }

    if options.axes {
        let half = cell as f32 / 2.0;
        for col in 0..grid.width() {
            let cx = (margin + col * cell) as f32 + half;
            svg.push_str(&axis_text(cx, half, font_size, &column_label(col)));
        }
        for row in 0..grid.height() {
            let cy = (margin + row * cell) as f32 + half;
            svg.push_str(&axis_text(half, cy, font_size, &row_label(row)));
        }
    }

    svg.push_str("</svg>");
    svg
}

fn push_cell(svg: &mut String, style: CellStyle, x: u32, y: u32, cell: u32, fill: Rgb) {
    match style {
        CellStyle::Square => svg.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{cell}" height="{cell}" fill="{fill}" stroke="{OUTLINE}" stroke-width="1"/>"#
        )),
        CellStyle::Circle => {
            let r = cell as f32 * 0.45;
            let cx = x as f32 + cell as f32 / 2.0;
            let cy = y as f32 + cell as f32 / 2.0;
            svg.push_str(&format!(
                r#"<rect x="{x}" y="{y}" width="{cell}" height="{cell}" fill="none" stroke="{OUTLINE}" stroke-width="1"/><circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}"/>"#
            ));
        }
        CellStyle::Rounded => {
            let inset = 1;
            let side = cell.saturating_sub(2 * inset);
            let radius = cell as f32 * 0.25;
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{side}" height="{side}" rx="{radius}" ry="{radius}" fill="{fill}" stroke="{OUTLINE}" stroke-width="1"/>"#,
                x + inset,
                y + inset
            ));
        }
    }
}

fn axis_text(x: f32, y: f32, font_size: f32, label: &str) -> String {
    format!(
        r#"<text x="{x}" y="{y}" font-family="sans-serif" font-size="{font_size}" text-anchor="middle" dominant-baseline="central" fill="{AXIS_TEXT}">{label}</text>"#
    )
}

/// Escape text content for XML.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
