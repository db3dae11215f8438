//! The explanation stage proper: gate, model call, optional markup.

use std::sync::Arc;

use tracing::info;

use mathlens_config::{ExplainConfig, MathLensConfig};
use mathlens_core::{CompletionRequest, SolveError, TextModel};

use crate::markup::wrap_paragraphs;
use crate::prompt::{NO_MATH_EXPLANATION, TUTOR_SYSTEM_PROMPT, build_user_prompt, contains_math};
use crate::providers::OpenAiText;

pub struct ExplainStage {
    model: Arc<dyn TextModel>,
    cfg: ExplainConfig,
    wrap: bool,
}

impl std::fmt::Debug for ExplainStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExplainStage")
            .field("model", &self.model.name())
            .field("cfg", &self.cfg)
            .field("wrap", &self.wrap)
            .finish()
    }
}

impl ExplainStage {
    /// Build from config. The explanation call has its own credential and
    /// endpoint (falling back to the OpenAI ones at env-load time), so a
    /// Gemini-only OCR deployment can still explain.
    pub fn from_config(cfg: &MathLensConfig) -> Result<Self, SolveError> {
        let key = cfg
            .explain
            .api_key
            .as_ref()
            .ok_or(SolveError::MissingCredentials("explain"))?;
        Ok(Self {
            model: Arc::new(
                OpenAiText::new(key).with_base_url(cfg.explain.base_url.clone()),
            ),
            cfg: cfg.explain.clone(),
            wrap: cfg.wrap_paragraphs,
        })
    }

    pub fn with_model(model: Arc<dyn TextModel>, cfg: ExplainConfig, wrap: bool) -> Self {
        Self { model, cfg, wrap }
    }

    /// Produce the explanation for an accepted OCR transcript.
    ///
    /// Transcripts without a single digit or operator never reach the model;
    /// they get the fixed no-math reply (wrapped like any other output).
    pub async fn explain(
        &self,
        transcript: &str,
        step_by_step: bool,
    ) -> Result<String, SolveError> {
        if !contains_math(transcript) {
            info!("Transcript has no math content, skipping explanation call");
            return Ok(self.finish(NO_MATH_EXPLANATION));
        }

        let request = CompletionRequest {
            model: self.cfg.model.clone(),
            system_prompt: TUTOR_SYSTEM_PROMPT.to_string(),
            user_prompt: build_user_prompt(transcript, step_by_step),
            max_tokens: self.cfg.max_tokens,
            temperature: self.cfg.temperature,
        };

        let text = self
            .model
            .complete(&request)
            .await
            .map_err(|e| SolveError::Upstream {
                provider: self.model.name().to_string(),
                status: None,
                message: e.to_string(),
            })?;

        Ok(self.finish(text.trim()))
    }

    fn finish(&self, text: &str) -> String {
        if self.wrap {
            wrap_paragraphs(text)
        } else {
            text.to_string()
        }
    }
}
