pub mod gemini;
pub mod openai;

pub use gemini::GeminiVision;
pub use openai::OpenAiVision;
