//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::rendering::SvgRenderer;
use crate::services::{HttpImageGenerator, ImageGenerator, PatternPipeline, SessionSlot};

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<PatternPipeline>,
    pub session: SessionSlot,
    pub generator: Option<Arc<dyn ImageGenerator>>,
}

/// Create application state from configuration.
pub fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let catalog = config.catalog.load_catalog()?;
    let renderer = match &config.fonts_dir {
        Some(dir) => SvgRenderer::with_font_dir(dir),
        None => SvgRenderer::new(),
    };
    let generator = HttpImageGenerator::from_config(&config.generator)
        .map(|g| Arc::new(g) as Arc<dyn ImageGenerator>);

    Ok(AppState {
        config: Arc::new(config),
        pipeline: Arc::new(PatternPipeline::new(catalog, renderer)),
        session: SessionSlot::new(),
        generator,
    })
}

/// Build the API router with all endpoints and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/pattern", post(handle_pattern))
        .route("/api/pattern/report", post(handle_report))
        .route("/api/pattern/bom.csv", post(handle_bom_csv))
        .route("/api/catalog", get(handle_catalog))
        .route("/api/generate", post(handle_generate))
        .route("/api/generate/latest", get(handle_latest))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_pattern(
    State(state): State<AppState>,
    query: Query<api::PatternQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    api::handle_pattern(
        State(state.pipeline),
        State(state.session),
        State(state.config),
        query,
        body,
    )
    .await
}

async fn handle_report(
    State(state): State<AppState>,
    query: Query<api::PatternQuery>,
    body: Bytes,
) -> Result<Json<api::PatternReport>, ApiError> {
    api::handle_report(
        State(state.pipeline),
        State(state.session),
        State(state.config),
        query,
        body,
    )
    .await
}

async fn handle_bom_csv(
    State(state): State<AppState>,
    query: Query<api::PatternQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    api::handle_bom_csv(
        State(state.pipeline),
        State(state.session),
        State(state.config),
        query,
        body,
    )
    .await
}

async fn handle_catalog(
    State(state): State<AppState>,
    query: Query<api::CatalogQuery>,
) -> Result<Json<api::CatalogResponse>, ApiError> {
    api::handle_catalog(State(state.pipeline), query).await
}

async fn handle_generate(
    State(state): State<AppState>,
    request: Json<api::GenerateRequest>,
) -> Result<Json<api::GenerateResponse>, ApiError> {
    api::handle_generate(State(state.generator), State(state.session), request).await
}

async fn handle_latest(State(state): State<AppState>) -> Result<Response, ApiError> {
    api::handle_latest(State(state.session)).await
}
