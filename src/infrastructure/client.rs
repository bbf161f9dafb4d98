use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Url};
use serde::Serialize;

use crate::application::errors::{ErrorResponse, FailureResponse};
use crate::application::routes::generate::GenerateResponse;
use crate::domain::stats::TrendStats;

/// HTTP client for a running thumbgen server, used by the CLI subcommands.
pub struct ThumbgenClient {
    base_url: Url,
    http: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequestBody<'a> {
    title: &'a str,
}

impl ThumbgenClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let mut normalized = base_url;
        if !normalized.path().ends_with('/') {
            normalized.set_path(&format!("{}/", normalized.path().trim_end_matches('/')));
        }

        let http = Client::builder()
            .user_agent("thumbgen-cli/1.0")
            .build()
            .context("failed to configure HTTP client")?;

        Ok(Self {
            base_url: normalized,
            http,
        })
    }

    pub fn from_base_url(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid API url: {base_url}"))?;
        Self::new(url)
    }

    /// Ask the server to generate a thumbnail for a title.
    pub async fn generate(&self, title: &str) -> Result<GenerateResponse> {
        let url = self.endpoint("generate")?;
        let response = self
            .http
            .post(url)
            .json(&GenerateRequestBody { title })
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// The trending statistics the server currently applies, if any.
    pub async fn stats(&self) -> Result<TrendStats> {
        let url = self.endpoint("stats")?;
        let response = self.http.get(url).send().await?;
        self.handle_response(response).await
    }

    /// Download a previously generated thumbnail as raw JPEG bytes.
    pub async fn fetch_thumbnail(&self, filename: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&format!("thumbnails/{filename}"))?;
        let response = self.http.get(url).send().await?;

        if response.status().is_success() {
            let bytes = response
                .bytes()
                .await
                .context("failed to read thumbnail body")?;
            Ok(bytes.to_vec())
        } else {
            Err(self.response_error(response).await)
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("invalid API path: {path}"))
    }

    async fn handle_response<T>(&self, response: reqwest::Response) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        if response.status().is_success() {
            response
                .json::<T>()
                .await
                .context("failed to deserialize response body")
        } else {
            Err(self.response_error(response).await)
        }
    }

    async fn response_error(&self, response: reqwest::Response) -> anyhow::Error {
        let status = response.status();
        let bytes = response.bytes().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_slice::<ErrorResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.error);
        }
        if let Ok(err) = serde_json::from_slice::<FailureResponse>(&bytes) {
            return anyhow!("request failed ({status}): {}", err.message);
        }

        let message = String::from_utf8_lossy(&bytes);
        anyhow!("request failed ({status}): {message}")
    }
}
