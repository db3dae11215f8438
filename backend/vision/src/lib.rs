//! OCR stage: decode the inbound data URL and transcribe the math expression
//! with a vision-capable LLM, falling back to a second provider when the
//! first refuses or fails.

pub mod data_url;
pub mod ocr;
pub mod providers;
pub mod rejection;

pub use data_url::DecodedImage;
pub use ocr::{OCR_PROMPT, OcrStage};
pub use providers::{GeminiVision, OpenAiVision};
pub use rejection::is_rejection;
