use super::request::{build_headers, build_url};
use super::types::ChatCompletionRequest;
use crate::ai::{ChatTransport, RawResponse};
use crate::models::Config;
use crate::Result;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;

/// Single-attempt HTTP transport for an OpenAI-compatible endpoint.
///
/// Status codes are passed through untouched; only connection failures,
/// timeouts and body read errors surface as `Err`.
pub struct OpenAiHttpClient {
    pub(crate) client: Client,
    pub(crate) url: String,
    pub(crate) headers: HeaderMap,
    pub(crate) timeout: Duration,
}

impl OpenAiHttpClient {
    pub fn new(config: &Config) -> Self {
        Self::new_with_client(config, Client::new())
    }

    pub fn new_with_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            url: build_url(&config.api_base, &config.endpoint_path),
            headers: build_headers(&config.api_key, &config.extra_headers_json),
            timeout: config.timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatTransport for OpenAiHttpClient {
    async fn send(&self, request: &ChatCompletionRequest) -> Result<RawResponse> {
        let body = serde_json::to_vec(request)?;
        tracing::debug!("POST {} ({} bytes)", self.url, body.len());

        let response = self
            .client
            .post(&self.url)
            .headers(self.headers.clone())
            .timeout(self.timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to {}: {}", self.url, e);
                e
            })?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("Received status {} ({} bytes)", status, body.len());

        Ok(RawResponse { status, body })
    }
}
