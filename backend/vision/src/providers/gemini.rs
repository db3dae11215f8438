use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use mathlens_core::{VisionModel, VisionRequest};
use mathlens_logging::redact_sensitive_data;

/// Gemini vision provider (`generateContent` with inline image data).
/// Used as the fallback when the primary provider refuses the image.
pub struct GeminiVision {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiVision {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl VisionModel for GeminiVision {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn transcribe(&self, request: &VisionRequest) -> Result<String> {
        debug!(model = %request.model, "Sending image to Gemini vision endpoint");

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": request.prompt },
                { "inlineData": { "mimeType": request.mime_type, "data": request.image_b64 } }
            ]}]
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("Gemini vision HTTP request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let error_body = resp.text().await.unwrap_or_default();
            bail!(
                "Gemini vision returned {}: {}",
                status,
                redact_sensitive_data(&error_body)
            );
        }

        let json: serde_json::Value =
            resp.json().await.context("Failed to parse Gemini vision response")?;

        Ok(json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}
