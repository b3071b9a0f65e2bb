pub mod catalog;
pub mod generate;
pub mod pattern;

pub use catalog::{handle_catalog, CatalogBead, CatalogQuery, CatalogResponse, __path_handle_catalog};
pub use generate::{
    handle_generate, handle_latest, GenerateRequest, GenerateResponse, __path_handle_generate,
    __path_handle_latest,
};
pub use pattern::{
    handle_bom_csv, handle_pattern, handle_report, PatternQuery, PatternReport,
    __path_handle_bom_csv, __path_handle_pattern, __path_handle_report,
};
