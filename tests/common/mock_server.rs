//! Mock image generation service.

use base64::Engine;
use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const GENERATE_PATH: &str = "/v1/images/generations";

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockGenerator {
    pub server: MockServer,
}

impl MockGenerator {
    /// Start a new mock server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Generation endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), GENERATE_PATH)
    }

    /// Get URL for a specific path
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server.uri(), path)
    }

    /// Respond with the image inline as base64
    pub async fn mock_b64_image(&self, image: &[u8]) {
        let b64 = base64::engine::general_purpose::STANDARD.encode(image);
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({"n": 1, "response_format": "b64_json"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "created": 1700000000,
                "data": [{"b64_json": b64}]
            })))
            .mount(&self.server)
            .await;
    }

    /// Respond with a URL the image is then fetched from
    pub async fn mock_url_image(&self, image: &[u8]) {
        let image_path = "/files/generated.png";
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"url": self.url_for(image_path)}]
            })))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path(image_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(image.to_vec())
                    .insert_header("content-type", "image/png"),
            )
            .mount(&self.server)
            .await;
    }

    /// Require a bearer token
    pub async fn mock_with_bearer(&self, token: &str, image: &[u8]) {
        let b64 = base64::engine::general_purpose::STANDARD.encode(image);
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("authorization", format!("Bearer {token}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"b64_json": b64}]
            })))
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Respond with an error status
    pub async fn mock_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    /// Respond with a body that is not an image
    pub async fn mock_not_an_image(&self) {
        let b64 = base64::engine::general_purpose::STANDARD.encode(b"definitely not a png");
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"b64_json": b64}]
            })))
            .mount(&self.server)
            .await;
    }
}
