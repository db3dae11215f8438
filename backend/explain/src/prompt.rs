//! Static prompts and the math-content gate.

/// System prompt for the tutoring model.
pub const TUTOR_SYSTEM_PROMPT: &str = "You are a patient math tutor. Explain how to \
solve the given expression. Write short, clear steps and format every formula with \
LaTeX inline delimiters \\( and \\). Do not repeat the problem statement verbatim; \
start with the first step.";

/// Fixed reply when the transcript contains nothing math-like. Returned
/// without invoking the model.
pub const NO_MATH_EXPLANATION: &str =
    "No math expression was found in the image. Try a clearer photo of the problem.";

/// Whether a transcript contains anything worth explaining: at least one
/// digit or arithmetic operator.
pub fn contains_math(transcript: &str) -> bool {
    transcript
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '=' | '^'))
}

/// User-facing prompt for the tutoring call.
pub fn build_user_prompt(transcript: &str, step_by_step: bool) -> String {
    if step_by_step {
        format!("Explain, as numbered steps, how to solve: {transcript}")
    } else {
        format!("Explain how to solve: {transcript}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_and_operators_count_as_math() {
        assert!(contains_math("42"));
        assert!(contains_math("x + y"));
        assert!(contains_math("a=b"));
        assert!(contains_math("n^2"));
    }

    #[test]
    fn prose_is_not_math() {
        assert!(!contains_math("a cat sitting on a desk"));
        assert!(!contains_math(""));
        assert!(!contains_math("hello there"));
    }

    #[test]
    fn step_by_step_changes_phrasing() {
        assert!(build_user_prompt("2+2", true).contains("numbered steps"));
        assert!(!build_user_prompt("2+2", false).contains("numbered steps"));
    }
}
