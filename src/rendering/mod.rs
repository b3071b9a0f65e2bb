pub mod enhance;
pub mod grid;
pub mod pixelate;
pub mod svg_grid;
pub mod svg_to_png;

pub use enhance::enhance;
pub use grid::{board_boundaries, boards_along, row_label, BeadGrid, BOARD_SIZE};
pub use pixelate::{flatten, grid_height, palette_sample, pixelate, Pixelated};
pub use svg_grid::{canvas_dimensions, canvas_size, grid_svg};
pub use svg_to_png::{SvgRenderer, MAX_CANVAS_PIXELS};
