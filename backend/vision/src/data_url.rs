//! Inbound image decoding.
//!
//! The only accepted payload shape is `data:image/<subtype>;base64,<data>`.
//! Anything else — a plain URL, a non-image MIME type, broken base64 — is an
//! invalid request, not an upstream problem.

use base64::{Engine, engine::general_purpose::STANDARD};

use mathlens_core::SolveError;

/// A validated, decoded image payload.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Full MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// The base64 payload exactly as received (providers forward it as-is).
    pub base64: String,
    /// Decoded size in bytes, already checked against the configured cap.
    pub byte_len: usize,
}

impl DecodedImage {
    /// Parse and validate a data URL, enforcing `max_bytes` on the decoded size.
    pub fn parse(data_url: &str, max_bytes: usize) -> Result<Self, SolveError> {
        let rest = data_url
            .strip_prefix("data:image/")
            .ok_or_else(|| SolveError::InvalidImage("expected a data:image/ URL".into()))?;

        let (subtype, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| SolveError::InvalidImage("expected base64 encoding".into()))?;

        if subtype.is_empty() || !subtype.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'.' || b == b'-') {
            return Err(SolveError::InvalidImage(format!(
                "unrecognized image subtype: {subtype}"
            )));
        }

        // Cheap length check before decoding: 4 base64 chars per 3 bytes.
        if payload.len() / 4 * 3 > max_bytes {
            return Err(SolveError::PayloadTooLarge { limit: max_bytes });
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| SolveError::InvalidImage(format!("base64 decode failed: {e}")))?;

        if bytes.is_empty() {
            return Err(SolveError::InvalidImage("empty image payload".into()));
        }
        if bytes.len() > max_bytes {
            return Err(SolveError::PayloadTooLarge { limit: max_bytes });
        }

        Ok(Self {
            mime_type: format!("image/{subtype}"),
            base64: payload.to_string(),
            byte_len: bytes.len(),
        })
    }
}
