use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use mathlens_core::{VisionModel, VisionRequest};
use mathlens_logging::redact_sensitive_data;

/// OpenAI-compatible vision provider (chat completions with an `image_url`
/// content part). Also covers OpenRouter and other compatible gateways via
/// `with_base_url`.
pub struct OpenAiVision {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiVision {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl VisionModel for OpenAiVision {
    fn name(&self) -> &str {
        "openai"
    }

    async fn transcribe(&self, request: &VisionRequest) -> Result<String> {
        debug!(model = %request.model, "Sending image to OpenAI-compatible vision endpoint");

        let body = serde_json::json!({
            "model": request.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": request.prompt },
                    { "type": "image_url",
                      "image_url": { "url": format!("data:{};base64,{}", request.mime_type, request.image_b64) } }
                ]
            }],
            "max_tokens": 512
        });

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("OpenAI vision HTTP request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let error_body = resp.text().await.unwrap_or_default();
            bail!(
                "OpenAI vision returned {}: {}",
                status,
                redact_sensitive_data(&error_body)
            );
        }

        let json: serde_json::Value =
            resp.json().await.context("Failed to parse OpenAI vision response")?;

        Ok(json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}
