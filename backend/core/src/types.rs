use serde::{Deserialize, Serialize};

/// Inbound solve request: an image as a base64 data URL, plus an optional
/// flag asking for explicitly numbered steps in the explanation.
#[derive(Debug, Clone, Deserialize)]
pub struct SolveRequest {
    /// `data:image/<subtype>;base64,<payload>`
    pub image: String,
    #[serde(default, rename = "stepByStep")]
    pub step_by_step: bool,
}

/// Outbound solve result.
///
/// `numeric` is always present in the JSON (as `null` when the local
/// evaluator declined), matching the shape clients already parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    /// OCR transcript of the expression.
    pub text: String,
    /// Locally evaluated value, when the transcript is plain arithmetic.
    pub numeric: Option<f64>,
    /// LaTeX-annotated prose explanation.
    pub explanation: String,
}

/// JSON body rendered for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { error: tag.into() }
    }
}
