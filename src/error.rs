use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bead_quant::{PaletteError, QuantError};
use serde_json::json;
use thiserror::Error;

use crate::services::image_generator::GeneratorError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Not found")]
    NotFound,

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failure of one pattern run.
///
/// Every variant is fatal to the run and nothing is rendered; the process
/// keeps serving.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("SVG parse error: {0}")]
    SvgParse(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Render task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<QuantError> for PatternError {
    fn from(e: QuantError) -> Self {
        PatternError::InvalidInput(e.to_string())
    }
}

impl From<PaletteError> for PatternError {
    fn from(e: PaletteError) -> Self {
        PatternError::InvalidInput(e.to_string())
    }
}

impl From<GeneratorError> for PatternError {
    fn from(e: GeneratorError) -> Self {
        PatternError::ExternalService(e.to_string())
    }
}

impl From<PatternError> for ApiError {
    fn from(e: PatternError) -> Self {
        match e {
            PatternError::InvalidImage(msg) => ApiError::InvalidImage(msg),
            PatternError::InvalidInput(msg) => ApiError::InvalidInput(msg),
            PatternError::ExternalService(msg) => ApiError::ExternalService(msg),
            PatternError::Render(e) => ApiError::Render(e),
        }
    }
}

impl From<GeneratorError> for ApiError {
    fn from(e: GeneratorError) -> Self {
        ApiError::ExternalService(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidImage(_) | ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Render(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_invalid_image() {
        let error = ApiError::InvalidImage("zero width".to_string());
        assert_eq!(error.to_string(), "Invalid image: zero width");
    }

    #[test]
    fn test_api_error_not_found() {
        assert_eq!(ApiError::NotFound.to_string(), "Not found");
    }

    #[test]
    fn test_render_error_unsupported_dimensions() {
        let error = RenderError::UnsupportedDimensions {
            width: 99999,
            height: 9,
        };
        assert_eq!(error.to_string(), "Unsupported dimensions: 99999x9");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_pattern_error_from_palette_error() {
        let error: PatternError = PaletteError::EmptyPalette.into();
        match error {
            PatternError::InvalidInput(msg) => assert_eq!(msg, "palette cannot be empty"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_pattern_error_from_generator_error() {
        let error: PatternError = GeneratorError::NotConfigured.into();
        assert!(matches!(error, PatternError::ExternalService(_)));
    }

    #[test]
    fn test_api_error_from_pattern_error_keeps_kind() {
        let api: ApiError = PatternError::InvalidImage("bad".into()).into();
        assert!(matches!(api, ApiError::InvalidImage(_)));

        let api: ApiError = PatternError::Render(RenderError::PixmapAllocation).into();
        assert!(matches!(api, ApiError::Render(_)));
    }

    #[test]
    fn test_api_error_into_response_status_codes() {
        let response = ApiError::InvalidImage("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::InvalidInput("x".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = ApiError::ExternalService("timeout".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = ApiError::Render(RenderError::PixmapAllocation).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::Internal("error".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
