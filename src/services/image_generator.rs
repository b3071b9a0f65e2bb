//! Client for an external text-to-image service.
//!
//! Calls are blocking and made once; failures go back to the caller as
//! [`GeneratorError`] and are never retried here.

use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::models::GeneratorConfig;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Image generation is not configured")]
    NotConfigured,

    #[error("Prompt must not be empty")]
    EmptyPrompt,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Turns a text prompt into encoded image bytes.
pub trait ImageGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<Vec<u8>, GeneratorError>;
}

#[derive(Debug, Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    b64_json: Option<String>,
    url: Option<String>,
}

/// Where the generated image is to be found in a response.
#[derive(Debug, PartialEq)]
enum ImagePayload {
    Inline(Vec<u8>),
    Url(String),
}

/// OpenAI-style images endpoint.
#[derive(Debug, Clone)]
pub struct HttpImageGenerator {
    endpoint: String,
    api_key: Option<String>,
    model: Option<String>,
    size: String,
    timeout: Duration,
}

impl HttpImageGenerator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            model: None,
            size: "1024x1024".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Build from config; `None` when no endpoint is set.
    pub fn from_config(config: &GeneratorConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_ref()?;
        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "No API key set for image generator, sending unauthenticated requests"
            );
        }
        Some(Self {
            endpoint: endpoint.clone(),
            api_key,
            model: config.model.clone(),
            size: config.size.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client(&self) -> Result<reqwest::blocking::Client, GeneratorError> {
        reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GeneratorError::Request(e.to_string()))
    }

    fn request_body(&self, prompt: &str) -> serde_json::Value {
        let mut body = json!({
            "prompt": prompt,
            "n": 1,
            "size": self.size,
            "response_format": "b64_json",
        });
        if let Some(model) = &self.model {
            body["model"] = json!(model);
        }
        body
    }
}

impl ImageGenerator for HttpImageGenerator {
    fn generate(&self, prompt: &str) -> Result<Vec<u8>, GeneratorError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GeneratorError::EmptyPrompt);
        }

        let client = self.client()?;
        let mut request = client.post(&self.endpoint).json(&self.request_body(prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        tracing::info!(endpoint = %self.endpoint, prompt_len = prompt.len(), "Requesting generated image");
        let response = request
            .send()
            .map_err(|e| GeneratorError::Request(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let parsed: GenerationResponse = response
            .json()
            .map_err(|e| GeneratorError::Malformed(e.to_string()))?;

        let bytes = match extract_payload(parsed)? {
            ImagePayload::Inline(bytes) => bytes,
            ImagePayload::Url(url) => fetch_image(&client, &url)?,
        };
        check_image(&bytes)?;

        tracing::info!(bytes = bytes.len(), "Received generated image");
        Ok(bytes)
    }
}

fn extract_payload(response: GenerationResponse) -> Result<ImagePayload, GeneratorError> {
    let first = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| GeneratorError::Malformed("no images in response".to_string()))?;

    if let Some(b64) = first.b64_json {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64.trim())
            .map_err(|e| GeneratorError::Malformed(format!("bad base64: {e}")))?;
        return Ok(ImagePayload::Inline(bytes));
    }
    if let Some(url) = first.url {
        return Ok(ImagePayload::Url(url));
    }
    Err(GeneratorError::Malformed(
        "image has neither b64_json nor url".to_string(),
    ))
}

fn fetch_image(client: &reqwest::blocking::Client, url: &str) -> Result<Vec<u8>, GeneratorError> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| GeneratorError::Request(e.to_string()))?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeneratorError::Status {
            status: status.as_u16(),
            body: format!("fetching {url}"),
        });
    }
    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| GeneratorError::Request(e.to_string()))
}

fn check_image(bytes: &[u8]) -> Result<(), GeneratorError> {
    image::guess_format(bytes)
        .map(|_| ())
        .map_err(|_| GeneratorError::Malformed("payload is not a recognized image".to_string()))
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
