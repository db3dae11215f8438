//! Best-effort local arithmetic evaluation.
//!
//! OCR transcripts of simple homework problems are often plain arithmetic
//! (`3*0.5+3*(-1)`); evaluating those locally lets the response carry an
//! exact `numeric` value alongside the model's prose. Anything that is not
//! plain arithmetic — variables, LaTeX, equations — falls out of the
//! sanitize step and yields `None`, which the pipeline reports as `null`.

mod parser;

pub use parser::evaluate_sanitized;

/// Characters the evaluator understands. Everything else is stripped before
/// parsing, so stray OCR artifacts (`$`, `=`, prose) don't poison the result.
fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| {
            c.is_ascii_digit()
                || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.')
                || c.is_whitespace()
        })
        .collect()
}

/// Evaluate `input` as arithmetic, returning `Some` only for a finite result.
///
/// Returns `None` when the input contains no digits at all, when the
/// sanitized expression does not parse, or when the result is non-finite
/// (division by zero).
pub fn evaluate(input: &str) -> Option<f64> {
    if !input.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    let sanitized = sanitize(input);
    evaluate_sanitized(&sanitized).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_mixed_precedence() {
        assert_eq!(evaluate("3*0.5+3*(-1)"), Some(-1.5));
        assert_eq!(evaluate("2+3*4"), Some(14.0));
        assert_eq!(evaluate("(2+3)*4"), Some(20.0));
    }

    #[test]
    fn none_without_digits() {
        assert_eq!(evaluate(""), None);
        assert_eq!(evaluate("hello world"), None);
        assert_eq!(evaluate("x + y"), None);
        assert_eq!(evaluate("+-*/()"), None);
    }

    #[test]
    fn strips_ocr_noise() {
        assert_eq!(evaluate("= 7 + 1"), Some(8.0));
        assert_eq!(evaluate("$3 * 2$"), Some(6.0));
    }

    #[test]
    fn none_for_non_finite() {
        assert_eq!(evaluate("1/0"), None);
        assert_eq!(evaluate("-1/0"), None);
    }

    #[test]
    fn none_for_malformed() {
        assert_eq!(evaluate("3*"), None);
        assert_eq!(evaluate("(1+2"), None);
        assert_eq!(evaluate("1..2"), None);
    }

    #[test]
    fn handles_whitespace_and_unary() {
        assert_eq!(evaluate("  12 / 4 "), Some(3.0));
        assert_eq!(evaluate("-5"), Some(-5.0));
        assert_eq!(evaluate("-(2+3)"), Some(-5.0));
    }
}
