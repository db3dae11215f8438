use anyhow::Result;
use async_trait::async_trait;

/// Request to a vision-capable model: one image plus a transcription prompt.
#[derive(Debug, Clone)]
pub struct VisionRequest {
    pub model: String,
    /// MIME type of the image (`image/png`, `image/jpeg`, …).
    pub mime_type: String,
    /// Raw image bytes, base64-encoded (no data-URL prefix).
    pub image_b64: String,
    pub prompt: String,
}

/// Request to a text-only completion model.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Trait for vision-capable model providers used by the OCR stage.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Provider name (e.g. "openai", "gemini").
    fn name(&self) -> &str;

    /// Send the image and return the model's transcript text.
    async fn transcribe(&self, request: &VisionRequest) -> Result<String>;
}

/// Trait for text completion providers used by the explanation stage.
#[async_trait]
pub trait TextModel: Send + Sync {
    fn name(&self) -> &str;

    /// Send a completion request and return the response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
