//! Recursive-descent parser for sanitized arithmetic expressions.
//!
//! Grammar:
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | '(' expr ')'
//! ```

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

/// Parse and evaluate an already-sanitized expression.
///
/// The whole input must be consumed; trailing garbage (e.g. an implicit
/// multiplication like `3(2)`) fails the parse rather than guessing.
pub fn evaluate_sanitized(input: &str) -> Option<f64> {
    let mut p = Parser {
        bytes: input.as_bytes(),
        pos: 0,
    };
    let value = p.expr()?;
    p.skip_whitespace();
    if p.pos == p.bytes.len() {
        Some(value)
    } else {
        None
    }
}

impl<'a> Parser<'a> {
    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.pos).copied()
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        while let Some(op @ (b'+' | b'-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            if op == b'+' {
                value += rhs;
            } else {
                value -= rhs;
            }
        }
        Some(value)
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        while let Some(op @ (b'*' | b'/')) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            if op == b'*' {
                value *= rhs;
            } else {
                value /= rhs;
            }
        }
        Some(value)
    }

    fn factor(&mut self) -> Option<f64> {
        match self.peek()? {
            b'+' => {
                self.pos += 1;
                self.factor()
            }
            b'-' => {
                self.pos += 1;
                Some(-self.factor()?)
            }
            b'(' => {
                self.pos += 1;
                let value = self.expr()?;
                if self.peek() == Some(b')') {
                    self.pos += 1;
                    Some(value)
                } else {
                    None
                }
            }
            _ => self.number(),
        }
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_whitespace();
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_digit() || *b == b'.')
        {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        std::str::from_utf8(&self.bytes[start..self.pos])
            .ok()?
            .parse()
            .ok()
    }
}
