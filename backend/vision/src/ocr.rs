//! Two-attempt OCR stage: primary provider first, fallback second.
//!
//! A provider "fails" either by transport/HTTP error or by answering with a
//! refusal transcript (see [`crate::rejection`]). Exactly two attempts are
//! ever made; there is no retry loop.

use std::sync::Arc;

use tracing::{info, warn};

use mathlens_config::VisionConfig;
use mathlens_core::{SolveError, VisionModel, VisionRequest};

use crate::data_url::DecodedImage;
use crate::providers::{GeminiVision, OpenAiVision};
use crate::rejection::is_rejection;

/// Instruction sent with every OCR call.
pub const OCR_PROMPT: &str = "Read the math expression in this image and transcribe it \
exactly as written. Reply with only the expression as plain text, using ASCII operators \
(+ - * / ^ =). No commentary.";

struct Attempt {
    provider: Arc<dyn VisionModel>,
    model: String,
}

/// OCR stage with an ordered provider chain (primary, then fallback).
pub struct OcrStage {
    attempts: Vec<Attempt>,
}

impl std::fmt::Debug for OcrStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrStage")
            .field(
                "attempts",
                &self
                    .attempts
                    .iter()
                    .map(|a| (a.provider.name(), a.model.as_str()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl OcrStage {
    /// Build the provider chain from config.
    ///
    /// Returns `MissingCredentials` when neither provider has an API key, so
    /// an unconfigured deploy fails each request with a 500 rather than
    /// emitting a confusing upstream error.
    pub fn from_config(cfg: &VisionConfig) -> Result<Self, SolveError> {
        let mut attempts = Vec::new();
        if let Some(key) = &cfg.openai_api_key {
            attempts.push(Attempt {
                provider: Arc::new(
                    OpenAiVision::new(key).with_base_url(cfg.openai_base_url.clone()),
                ) as Arc<dyn VisionModel>,
                model: cfg.openai_model.clone(),
            });
        }
        if let Some(key) = &cfg.gemini_api_key {
            attempts.push(Attempt {
                provider: Arc::new(GeminiVision::new(key)) as Arc<dyn VisionModel>,
                model: cfg.gemini_model.clone(),
            });
        }
        if attempts.is_empty() {
            return Err(SolveError::MissingCredentials("vision"));
        }
        Ok(Self { attempts })
    }

    /// Build a chain from explicit providers (tests, embedding).
    pub fn with_attempts(chain: Vec<(Arc<dyn VisionModel>, String)>) -> Self {
        Self {
            attempts: chain
                .into_iter()
                .map(|(provider, model)| Attempt { provider, model })
                .collect(),
        }
    }

    /// Transcribe the image, falling back once on error or refusal.
    pub async fn extract(&self, image: &DecodedImage) -> Result<String, SolveError> {
        let mut last_failure = SolveError::AllProvidersRejected;

        for attempt in &self.attempts {
            let request = VisionRequest {
                model: attempt.model.clone(),
                mime_type: image.mime_type.clone(),
                image_b64: image.base64.clone(),
                prompt: OCR_PROMPT.to_string(),
            };

            match attempt.provider.transcribe(&request).await {
                Ok(transcript) if !is_rejection(&transcript) => {
                    info!(
                        provider = attempt.provider.name(),
                        chars = transcript.len(),
                        "OCR transcript accepted"
                    );
                    return Ok(transcript.trim().to_string());
                }
                Ok(transcript) => {
                    warn!(
                        provider = attempt.provider.name(),
                        transcript = %transcript.chars().take(80).collect::<String>(),
                        "OCR transcript rejected, trying fallback"
                    );
                    last_failure = SolveError::AllProvidersRejected;
                }
                Err(e) => {
                    warn!(
                        provider = attempt.provider.name(),
                        error = %e,
                        "OCR provider failed, trying fallback"
                    );
                    last_failure = SolveError::Upstream {
                        provider: attempt.provider.name().to_string(),
                        status: None,
                        message: e.to_string(),
                    };
                }
            }
        }

        Err(last_failure)
    }
}
