//! Log Redaction Layer
//!
//! Scrubs API keys and bearer tokens from strings prior to logging. Upstream
//! error bodies sometimes echo the request URL, which for Gemini carries the
//! key as a query parameter.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9\-_]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[A-Za-z0-9\-_]+").unwrap());

/// Redacts credential patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = API_KEY_RE.replace_all(input, "[REDACTED_TOKEN]");
    KEY_PARAM_RE
        .replace_all(&redacted, "${1}[REDACTED_TOKEN]")
        .to_string()
}
