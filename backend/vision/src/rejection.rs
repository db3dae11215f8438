//! Pattern-matched rejection detection for OCR transcripts.
//!
//! Vision models decline in prose rather than with an error status; a
//! transcript like "I cannot see any image" must trigger the fallback
//! provider, not flow downstream as math.

use once_cell::sync::Lazy;
use regex::Regex;

static REFUSAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(no image|cannot see|can't see|unable to (see|read|view)|i'?m sorry|i cannot|i can't|not able to|no visible)\b",
    )
    .unwrap()
});

/// Whether a transcript is an empty or refused response that should trigger
/// the fallback provider.
pub fn is_rejection(transcript: &str) -> bool {
    let trimmed = transcript.trim();
    trimmed.is_empty() || REFUSAL_PATTERN.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_are_rejections() {
        assert!(is_rejection(""));
        assert!(is_rejection("   \n "));
    }

    #[test]
    fn refusal_phrases_are_rejections() {
        assert!(is_rejection("I'm sorry, but I cannot see any image."));
        assert!(is_rejection("There is no image attached."));
        assert!(is_rejection("I am unable to read the content."));
        assert!(is_rejection("Can't see anything in the picture"));
    }

    #[test]
    fn real_transcripts_pass() {
        assert!(!is_rejection("3*0.5+3*(-1)"));
        assert!(!is_rejection("x^2 + 2x + 1 = 0"));
        assert!(!is_rejection("\\frac{1}{2} + \\frac{1}{3}"));
    }
}
