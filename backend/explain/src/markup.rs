//! Paragraph markup for clients that render the explanation as HTML.

/// Wrap each non-empty paragraph (blank-line separated) in `<p>…</p>`.
pub fn wrap_paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{p}</p>"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_paragraph() {
        let out = wrap_paragraphs("First step.\n\nSecond step.");
        assert_eq!(out, "<p>First step.</p>\n<p>Second step.</p>");
    }

    #[test]
    fn single_paragraph() {
        assert_eq!(wrap_paragraphs("Only one."), "<p>Only one.</p>");
    }

    #[test]
    fn drops_empty_segments() {
        let out = wrap_paragraphs("A.\n\n\n\n  \n\nB.");
        assert_eq!(out, "<p>A.</p>\n<p>B.</p>");
    }
}
