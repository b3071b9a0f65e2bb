use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, PatternError};
use crate::services::PatternPipeline;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Comma-separated family prefixes, e.g. `A,H`
    pub families: Option<String>,
}

/// One bead color
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogBead {
    pub code: String,
    pub hex: String,
    pub family: String,
}

/// Bead catalog in catalog order
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub count: usize,
    /// Family prefixes in order of first appearance
    pub families: Vec<String>,
    pub beads: Vec<CatalogBead>,
}

/// List the bead catalog
#[utoipa::path(
    get,
    path = "/api/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Catalog entries", body = CatalogResponse),
        (status = 400, description = "No entries match the family filter"),
    ),
    tag = "Catalog"
)]
pub async fn handle_catalog(
    State(pipeline): State<Arc<PatternPipeline>>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let families: Vec<&str> = query
        .families
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    let catalog = pipeline
        .catalog()
        .filter_families(&families)
        .map_err(PatternError::from)?;

    Ok(Json(CatalogResponse {
        count: catalog.len(),
        families: catalog.families().into_iter().map(str::to_string).collect(),
        beads: catalog
            .iter()
            .map(|b| CatalogBead {
                code: b.code().to_string(),
                hex: b.rgb().to_hex(),
                family: b.family().to_string(),
            })
            .collect(),
    }))
}
