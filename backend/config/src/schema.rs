use std::fmt;

/// Default cap on the decoded image payload (6 MiB).
const DEFAULT_MAX_IMAGE_BYTES: usize = 6 * 1024 * 1024;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// MathLens runtime configuration.
#[derive(Debug, Clone)]
pub struct MathLensConfig {
    /// HTTP server bind address
    pub bind_address: String,
    /// HTTP server port
    pub port: u16,
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Directory for the rolling NDJSON log file
    pub log_dir: String,
    /// Maximum decoded image size in bytes
    pub max_image_bytes: usize,
    /// Wrap each explanation paragraph in `<p>` markup
    pub wrap_paragraphs: bool,

    pub vision: VisionConfig,
    pub explain: ExplainConfig,
}

/// OCR stage provider settings: OpenAI-compatible primary, Gemini fallback.
#[derive(Debug, Clone)]
pub struct VisionConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub openai_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

/// Explanation stage provider settings.
///
/// Carries its own credential and endpoint so a deployment that uses Gemini
/// for OCR can still point the tutoring call at any OpenAI-compatible host.
/// The key falls back to `OPENAI_API_KEY` when no dedicated one is set.
#[derive(Debug, Clone)]
pub struct ExplainConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for MathLensConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_dir: "logs".to_string(),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            wrap_paragraphs: false,
            vision: VisionConfig {
                openai_api_key: None,
                openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
                openai_model: "gpt-4o".to_string(),
                gemini_api_key: None,
                gemini_model: "gemini-2.0-flash".to_string(),
            },
            explain: ExplainConfig {
                api_key: None,
                base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
                model: "gpt-4o-mini".to_string(),
                max_tokens: 1024,
                temperature: 0.2,
            },
        }
    }
}

impl MathLensConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let openai_api_key = std::env::var("OPENAI_API_KEY").ok();
        let openai_base_url =
            std::env::var("OPENAI_BASE_URL").unwrap_or(defaults.vision.openai_base_url);
        Self {
            bind_address: std::env::var("MATHLENS_BIND")
                .unwrap_or(defaults.bind_address),
            port: std::env::var("MATHLENS_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            log_dir: std::env::var("MATHLENS_LOG_DIR").unwrap_or(defaults.log_dir),
            max_image_bytes: std::env::var("MATHLENS_MAX_IMAGE_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_image_bytes),
            wrap_paragraphs: std::env::var("MATHLENS_WRAP_PARAGRAPHS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.wrap_paragraphs),
            vision: VisionConfig {
                openai_api_key: openai_api_key.clone(),
                openai_base_url: openai_base_url.clone(),
                openai_model: std::env::var("MATHLENS_VISION_MODEL")
                    .unwrap_or(defaults.vision.openai_model),
                gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
                gemini_model: std::env::var("MATHLENS_GEMINI_MODEL")
                    .unwrap_or(defaults.vision.gemini_model),
            },
            explain: ExplainConfig {
                api_key: std::env::var("MATHLENS_EXPLAIN_API_KEY")
                    .ok()
                    .or(openai_api_key),
                base_url: std::env::var("MATHLENS_EXPLAIN_BASE_URL")
                    .unwrap_or(openai_base_url),
                model: std::env::var("MATHLENS_EXPLAIN_MODEL")
                    .unwrap_or(defaults.explain.model),
                max_tokens: std::env::var("MATHLENS_EXPLAIN_MAX_TOKENS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.explain.max_tokens),
                temperature: std::env::var("MATHLENS_EXPLAIN_TEMPERATURE")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.explain.temperature),
            },
        }
    }

    /// True when at least one vision provider has a credential.
    pub fn has_vision_credential(&self) -> bool {
        self.vision.openai_api_key.is_some() || self.vision.gemini_api_key.is_some()
    }

    /// True when a request can actually complete: an OCR credential plus one
    /// for the explanation call.
    pub fn has_solve_credentials(&self) -> bool {
        self.has_vision_credential() && self.explain.api_key.is_some()
    }
}

/// Startup summary with credentials masked, safe to log.
impl fmt::Display for MathLensConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bind={}:{} vision={}(key:{}) fallback={}(key:{}) explain={}(key:{}) max_image_bytes={}",
            self.bind_address,
            self.port,
            self.vision.openai_model,
            mask(&self.vision.openai_api_key),
            self.vision.gemini_model,
            mask(&self.vision.gemini_api_key),
            self.explain.model,
            mask(&self.explain.api_key),
            self.max_image_bytes,
        )
    }
}

fn mask(key: &Option<String>) -> &'static str {
    if key.is_some() {
        "set"
    } else {
        "unset"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_reasonable() {
        let cfg = MathLensConfig::default();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.max_image_bytes, 6 * 1024 * 1024);
        assert!(!cfg.has_vision_credential());
        assert!(!cfg.has_solve_credentials());
    }

    #[test]
    fn gemini_alone_cannot_complete_a_solve() {
        let mut cfg = MathLensConfig::default();
        cfg.vision.gemini_api_key = Some("AIza-test".into());
        assert!(cfg.has_vision_credential());
        assert!(!cfg.has_solve_credentials());

        cfg.explain.api_key = Some("sk-explain".into());
        assert!(cfg.has_solve_credentials());
    }

    #[test]
    fn display_never_leaks_keys() {
        let mut cfg = MathLensConfig::default();
        cfg.vision.openai_api_key = Some("sk-supersecret".into());
        cfg.explain.api_key = Some("sk-othersecret".into());
        let rendered = cfg.to_string();
        assert!(!rendered.contains("supersecret"));
        assert!(!rendered.contains("othersecret"));
        assert!(rendered.contains("key:set"));
    }
}
