use thiserror::Error;

/// Top-level error type for the MathLens pipeline.
///
/// Every variant maps to exactly one HTTP status code and one short
/// machine-readable tag; the gateway and Lambda adapters both render
/// `{ "error": <tag> }` from it.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("invalid image payload: {0}")]
    InvalidImage(String),

    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("image payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("no API key configured for {0}")]
    MissingCredentials(&'static str),

    #[error("upstream model error ({provider}): {message}")]
    Upstream {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    #[error("all OCR providers failed or rejected the image")]
    AllProvidersRejected,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SolveError {
    /// HTTP status code this error surfaces as.
    ///
    /// Kept as a bare `u16` so the core crate stays framework-free; the
    /// gateway converts it to an `axum::http::StatusCode`.
    pub fn status(&self) -> u16 {
        match self {
            SolveError::InvalidImage(_) | SolveError::BadRequest(_) => 400,
            SolveError::MethodNotAllowed => 405,
            SolveError::PayloadTooLarge { .. } => 413,
            SolveError::MissingCredentials(_) | SolveError::Internal(_) => 500,
            SolveError::Upstream { .. } | SolveError::AllProvidersRejected => 502,
        }
    }

    /// Short machine-readable tag for the JSON error body.
    pub fn tag(&self) -> &'static str {
        match self {
            SolveError::InvalidImage(_) => "invalid_image",
            SolveError::BadRequest(_) => "bad_request",
            SolveError::MethodNotAllowed => "method_not_allowed",
            SolveError::PayloadTooLarge { .. } => "payload_too_large",
            SolveError::MissingCredentials(_) => "missing_api_key",
            SolveError::Upstream { .. } => "upstream_failure",
            SolveError::AllProvidersRejected => "ocr_failed",
            SolveError::Internal(_) => "internal_error",
        }
    }
}
