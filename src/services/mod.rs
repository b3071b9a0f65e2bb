pub mod bom;
pub mod image_generator;
pub mod pattern_pipeline;
pub mod session;

pub use bom::{Bom, BomRow, PatternStats};
pub use image_generator::{GeneratorError, HttpImageGenerator, ImageGenerator};
pub use pattern_pipeline::{
    decode_image, Pattern, PatternOutput, PatternPipeline, PatternRequest, MAX_HEIGHT_BEADS,
};
pub use session::{ImageSource, Session, SessionSlot};
