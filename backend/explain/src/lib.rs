//! Explanation stage: turn an OCR transcript into step-by-step,
//! LaTeX-formatted tutoring prose via a text-only model call.
//!
//! Transcripts with no math content short-circuit to a fixed reply without
//! spending a model call.

pub mod markup;
pub mod prompt;
pub mod providers;
pub mod stage;

pub use markup::wrap_paragraphs;
pub use prompt::{NO_MATH_EXPLANATION, TUTOR_SYSTEM_PROMPT, contains_math};
pub use providers::OpenAiText;
pub use stage::ExplainStage;
