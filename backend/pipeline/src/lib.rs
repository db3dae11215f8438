//! The MathLens solve pipeline: decode → OCR (with fallback) → local
//! arithmetic → explanation. One instance is shared by every hosting adapter
//! (axum daemon, Lambda); a request runs the stages strictly in sequence and
//! touches no state outside its own scope.

use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use mathlens_config::MathLensConfig;
use mathlens_core::{SolveError, SolveRequest, SolveResponse};
use mathlens_explain::ExplainStage;
use mathlens_vision::{DecodedImage, OcrStage};

pub struct Solver {
    ocr: Option<OcrStage>,
    explain: Option<ExplainStage>,
    max_image_bytes: usize,
}

impl Solver {
    /// Build the pipeline from config.
    ///
    /// Missing credentials do not prevent construction; the affected stage is
    /// absent and every request fails with `missing_api_key` until the
    /// environment is fixed. The process still boots and reports health.
    pub fn from_config(cfg: &MathLensConfig) -> Self {
        let ocr = match OcrStage::from_config(&cfg.vision) {
            Ok(stage) => Some(stage),
            Err(e) => {
                warn!(error = %e, "OCR stage unavailable");
                None
            }
        };
        let explain = match ExplainStage::from_config(cfg) {
            Ok(stage) => Some(stage),
            Err(e) => {
                warn!(error = %e, "Explanation stage unavailable");
                None
            }
        };
        Self {
            ocr,
            explain,
            max_image_bytes: cfg.max_image_bytes,
        }
    }

    /// Build from explicit stages (tests, embedding).
    pub fn new(ocr: OcrStage, explain: ExplainStage, max_image_bytes: usize) -> Self {
        Self {
            ocr: Some(ocr),
            explain: Some(explain),
            max_image_bytes,
        }
    }

    /// Run the full pipeline for one request.
    pub async fn solve(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let span = info_span!("solve", request_id = %Uuid::new_v4());
        self.solve_inner(request).instrument(span).await
    }

    async fn solve_inner(&self, request: &SolveRequest) -> Result<SolveResponse, SolveError> {
        let image = DecodedImage::parse(&request.image, self.max_image_bytes)?;
        info!(mime = %image.mime_type, bytes = image.byte_len, "Image accepted");

        let ocr = self
            .ocr
            .as_ref()
            .ok_or(SolveError::MissingCredentials("vision"))?;
        let explain = self
            .explain
            .as_ref()
            .ok_or(SolveError::MissingCredentials("explain"))?;

        let text = ocr.extract(&image).await?;

        let numeric = mathlens_eval::evaluate(&text);
        if let Some(value) = numeric {
            info!(value, "Transcript evaluated locally");
        }

        let explanation = explain.explain(&text, request.step_by_step).await?;

        Ok(SolveResponse {
            text,
            numeric,
            explanation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use base64::{Engine, engine::general_purpose::STANDARD};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mathlens_config::ExplainConfig;
    use mathlens_core::{CompletionRequest, TextModel, VisionModel, VisionRequest};

    struct FixedVision(String);

    #[async_trait]
    impl VisionModel for FixedVision {
        fn name(&self) -> &str {
            "fixed"
        }
        async fn transcribe(&self, _req: &VisionRequest) -> Result<String> {
            Ok(self.0.clone())
        }
    }

    struct CountingText {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextModel for CountingText {
        fn name(&self) -> &str {
            "counting"
        }
        async fn complete(&self, req: &CompletionRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("Steps for: {}", req.user_prompt))
        }
    }

    fn solver_with(transcript: &str, text_model: Arc<CountingText>) -> Solver {
        let ocr = OcrStage::with_attempts(vec![(
            Arc::new(FixedVision(transcript.to_string())) as Arc<dyn VisionModel>,
            "fixed-model".to_string(),
        )]);
        let explain = ExplainStage::with_model(
            text_model,
            ExplainConfig {
                api_key: None,
                base_url: "https://api.openai.com/v1".into(),
                model: "test".into(),
                max_tokens: 128,
                temperature: 0.0,
            },
            false,
        );
        Solver::new(ocr, explain, 1024 * 1024)
    }

    fn png_request() -> SolveRequest {
        SolveRequest {
            image: format!("data:image/png;base64,{}", STANDARD.encode(b"fake png")),
            step_by_step: false,
        }
    }

    #[tokio::test]
    async fn full_pipeline_with_arithmetic() {
        let text_model = Arc::new(CountingText {
            calls: AtomicUsize::new(0),
        });
        let solver = solver_with("3*0.5+3*(-1)", text_model.clone());

        let resp = solver.solve(&png_request()).await.unwrap();
        assert_eq!(resp.text, "3*0.5+3*(-1)");
        assert_eq!(resp.numeric, Some(-1.5));
        assert!(resp.explanation.contains("3*0.5+3*(-1)"));
        assert_eq!(text_model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_arithmetic_transcript_has_null_numeric() {
        let text_model = Arc::new(CountingText {
            calls: AtomicUsize::new(0),
        });
        let solver = solver_with("x^2 + 2x + 1 = 0", text_model.clone());

        let resp = solver.solve(&png_request()).await.unwrap();
        assert_eq!(resp.numeric, None);
        assert_eq!(text_model.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mathless_transcript_skips_explanation_call() {
        let text_model = Arc::new(CountingText {
            calls: AtomicUsize::new(0),
        });
        let solver = solver_with("a sketch of a dog", text_model.clone());

        let resp = solver.solve(&png_request()).await.unwrap();
        assert_eq!(resp.numeric, None);
        assert_eq!(resp.explanation, mathlens_explain::NO_MATH_EXPLANATION);
        assert_eq!(text_model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_any_call() {
        let text_model = Arc::new(CountingText {
            calls: AtomicUsize::new(0),
        });
        let solver = solver_with("2+2", text_model.clone());

        let req = SolveRequest {
            image: "not a data url".into(),
            step_by_step: false,
        };
        let err = solver.solve(&req).await.unwrap_err();
        assert_eq!(err.tag(), "invalid_image");
        assert_eq!(err.status(), 400);
        assert_eq!(text_model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gemini_only_deploy_lacks_explain_credential() {
        let mut cfg = MathLensConfig::default();
        cfg.vision.gemini_api_key = Some("AIza-test".into());

        // The config itself must not claim a solve can complete.
        assert!(cfg.has_vision_credential());
        assert!(!cfg.has_solve_credentials());

        let solver = Solver::from_config(&cfg);
        let err = solver.solve(&png_request()).await.unwrap_err();
        assert_eq!(err.tag(), "missing_api_key");

        // A dedicated explain key makes both stages constructible.
        cfg.explain.api_key = Some("sk-explain".into());
        assert!(cfg.has_solve_credentials());
    }

    #[tokio::test]
    async fn unconfigured_solver_reports_missing_key() {
        let cfg = MathLensConfig::default();
        let solver = Solver::from_config(&cfg);
        let err = solver.solve(&png_request()).await.unwrap_err();
        assert_eq!(err.tag(), "missing_api_key");
        assert_eq!(err.status(), 500);
    }
}
