use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_GENERATION_URL: &str = "https://api.runwayml.com/v1/query";
pub const DEFAULT_MODEL: &str = "stable-diffusion-xl-1024-v1-0";

/// Canvas size requested from the generation service. The overlay anchor in
/// the compositor is tuned for this geometry.
pub const OUTPUT_WIDTH: u32 = 1280;
pub const OUTPUT_HEIGHT: u32 = 720;
const NUM_OUTPUTS: u32 = 1;

const USER_AGENT: &str = "Thumbgen/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GenerationError {
    /// Network failure, timeout, or a non-2xx status from the service.
    #[error("generation transport failure: {0}")]
    Transport(String),
    /// The service answered 2xx with a body we cannot use: not JSON, an
    /// explicit error field, or no image reference in the configured shape.
    #[error("malformed generation response: {0}")]
    MalformedResponse(String),
}

/// Reference to a generated image, extracted from a submit response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageHandle {
    /// The service returned a URL to download the image from.
    Url(String),
    /// The service inlined the image bytes in the response.
    Inline(Vec<u8>),
}

/// How to interpret the generation service's response body. Different
/// providers wrap the image reference differently; which shape a deployment
/// gets is fixed configuration, so the pipeline never sniffs for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseSchema {
    /// `{"output": {"images": ["<url>", ...]}}` with the first URL used.
    #[default]
    OutputImages,
    /// `{"image": "<base64>"}` carrying the image payload inline.
    InlineImage,
}

impl ResponseSchema {
    /// Extract the image reference from a 2xx response body.
    pub fn parse_body(self, body: &str) -> Result<ImageHandle, GenerationError> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
            GenerationError::MalformedResponse(format!("response is not JSON: {e}"))
        })?;

        // An explicit error field wins regardless of the configured shape.
        if let Some(error) = value.get("error") {
            return Err(GenerationError::MalformedResponse(format!(
                "service reported an error: {error}"
            )));
        }

        match self {
            Self::OutputImages => {
                let url = value
                    .get("output")
                    .and_then(|output| output.get("images"))
                    .and_then(|images| images.get(0))
                    .and_then(|url| url.as_str())
                    .filter(|url| !url.is_empty())
                    .ok_or_else(|| {
                        GenerationError::MalformedResponse(
                            "no output.images URL in response".to_string(),
                        )
                    })?;
                Ok(ImageHandle::Url(url.to_string()))
            }
            Self::InlineImage => {
                let encoded = value.get("image").and_then(|i| i.as_str()).ok_or_else(|| {
                    GenerationError::MalformedResponse(
                        "no image payload in response".to_string(),
                    )
                })?;
                // Tolerate a data-URL wrapper around the payload.
                let encoded = encoded
                    .split_once(";base64,")
                    .map_or(encoded, |(_, data)| data);
                let bytes = BASE64.decode(encoded.trim()).map_err(|e| {
                    GenerationError::MalformedResponse(format!(
                        "image payload is not valid base64: {e}"
                    ))
                })?;
                if bytes.is_empty() {
                    return Err(GenerationError::MalformedResponse(
                        "image payload is empty".to_string(),
                    ));
                }
                Ok(ImageHandle::Inline(bytes))
            }
        }
    }
}

impl FromStr for ResponseSchema {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "output-images" => Ok(Self::OutputImages),
            "inline-image" => Ok(Self::InlineImage),
            other => Err(format!(
                "unknown response schema '{other}' (expected 'output-images' or 'inline-image')"
            )),
        }
    }
}

/// Seam between the pipeline and the remote service, so tests can substitute
/// an in-process generator.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Produce raw image bytes for a prompt: submit the generation request,
    /// then resolve whatever handle the service returns.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError>;
}

/// Connection details for the remote generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub url: String,
    pub api_key: String,
    pub model: String,
    pub schema: ResponseSchema,
}

pub struct HttpImageGenerator {
    http: reqwest::Client,
    config: GenerationConfig,
}

impl HttpImageGenerator {
    pub fn new(http: reqwest::Client, config: GenerationConfig) -> Self {
        Self { http, config }
    }

    /// Submit one generation request. A single attempt, no retries; the
    /// caller surfaces failure to the user rather than papering over it.
    pub async fn submit(&self, prompt: &str) -> Result<ImageHandle, GenerationError> {
        let request_body = GenerationRequest {
            prompt,
            model: &self.config.model,
            params: GenerationParams {
                width: OUTPUT_WIDTH,
                height: OUTPUT_HEIGHT,
                num_outputs: NUM_OUTPUTS,
            },
        };

        let response = self
            .http
            .post(&self.config.url)
            .header("User-Agent", USER_AGENT)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(format!("generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "(unreadable body)".to_string());
            return Err(GenerationError::Transport(format!(
                "generation service returned status {status}: {body}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            GenerationError::Transport(format!("failed to read generation response body: {e}"))
        })?;

        self.config.schema.parse_body(&body)
    }

    /// Resolve a handle to raw image bytes, downloading when the handle is
    /// a URL.
    pub async fn fetch(&self, handle: ImageHandle) -> Result<Vec<u8>, GenerationError> {
        let url = match handle {
            ImageHandle::Inline(bytes) => return Ok(bytes),
            ImageHandle::Url(url) => url,
        };

        let response = self
            .http
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                GenerationError::Transport(format!("failed to download generated image: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(GenerationError::Transport(format!(
                "image download returned status {}",
                response.status()
            )));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !content_type.starts_with("image/") {
            return Err(GenerationError::MalformedResponse(format!(
                "image URL returned content type '{content_type}'"
            )));
        }

        let bytes = response.bytes().await.map_err(|e| {
            GenerationError::Transport(format!("failed to read generated image bytes: {e}"))
        })?;

        if bytes.is_empty() {
            return Err(GenerationError::MalformedResponse(
                "image download returned an empty body".to_string(),
            ));
        }

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ImageGenerator for HttpImageGenerator {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, GenerationError> {
        let handle = self.submit(prompt).await?;
        self.fetch(handle).await
    }
}

// --- Generation API types ---

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    prompt: &'a str,
    model: &'a str,
    params: GenerationParams,
}

#[derive(Debug, Serialize)]
struct GenerationParams {
    width: u32,
    height: u32,
    num_outputs: u32,
}
