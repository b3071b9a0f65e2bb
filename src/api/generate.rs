use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::{ApiError, RenderError};
use crate::services::{GeneratorError, ImageGenerator, Session, SessionSlot};

/// Text prompt for the image generator
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Generated image stored in the session
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    pub prompt: String,
    /// Encoded image size
    pub bytes: usize,
    pub created_at: DateTime<Utc>,
}

/// Generate an image from a prompt
///
/// The image replaces the session's previous one and can be used with
/// `source=generated` on the pattern endpoints. Failures are not retried;
/// the previous image stays usable.
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Image generated", body = GenerateResponse),
        (status = 502, description = "Generator failed or is not configured"),
    ),
    tag = "Generate"
)]
pub async fn handle_generate(
    State(generator): State<Option<Arc<dyn ImageGenerator>>>,
    State(session): State<SessionSlot>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let generator = generator.ok_or(GeneratorError::NotConfigured)?;
    let prompt = request.prompt.trim().to_string();
    if prompt.is_empty() {
        return Err(ApiError::InvalidInput("prompt must not be empty".to_string()));
    }

    let task_prompt = prompt.clone();
    let image = tokio::task::spawn_blocking(move || generator.generate(&task_prompt))
        .await
        .map_err(|e| ApiError::Render(RenderError::Task(e.to_string())))??;

    let stored = session.replace(Session::new(image, prompt)).await;

    Ok(Json(GenerateResponse {
        prompt: stored.prompt.clone(),
        bytes: stored.image.len(),
        created_at: stored.created_at,
    }))
}

/// Fetch the session's last generated image
#[utoipa::path(
    get,
    path = "/api/generate/latest",
    responses(
        (status = 200, description = "Generated image bytes", content_type = "application/octet-stream"),
        (status = 404, description = "Nothing generated yet"),
    ),
    tag = "Generate"
)]
pub async fn handle_latest(State(session): State<SessionSlot>) -> Result<Response, ApiError> {
    let current = session.current().await.ok_or(ApiError::NotFound)?;
    let content_type = match image::guess_format(&current.image) {
        Ok(image::ImageFormat::Png) => "image/png",
        Ok(image::ImageFormat::Jpeg) => "image/jpeg",
        _ => "application/octet-stream",
    };
    Ok((
        [(header::CONTENT_TYPE, content_type)],
        current.image.as_ref().clone(),
    )
        .into_response())
}
