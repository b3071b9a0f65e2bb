pub mod config;
pub mod enhance_options;
pub mod pattern_options;

pub use config::{AppConfig, CatalogConfig, CostingConfig, GeneratorConfig};
pub use enhance_options::EnhanceOptions;
pub use pattern_options::{CellStyle, PaletteMode, PatternOptions, RenderPalette};
