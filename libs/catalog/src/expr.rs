//! Multiplier expression evaluator
//!
//! Multiplier specs in the catalog may be arithmetic expressions over
//! numeric literals, e.g. `(0.3048/12.0)` or `1609.344*2.2046226/1000.0`.
//! This is a small recursive-descent evaluator: `+ - * /`, unary minus,
//! parentheses, decimal and exponent literals. No variables, no functions.

/// Evaluate a multiplier expression.
///
/// Plain numeric literals are valid expressions, so this also covers the
/// simple-literal case.
pub fn eval(input: &str) -> Result<f64, String> {
    let mut p = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    p.skip_whitespace();
    let value = p.expr()?;
    p.skip_whitespace();
    if p.pos < p.chars.len() {
        return Err(format!(
            "unexpected character '{}' at offset {}",
            p.chars[p.pos], p.pos
        ));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn expr(&mut self) -> Result<f64, String> {
        let mut value = self.term()?;
        loop {
            self.skip_whitespace();
            match self.current() {
                Some('+') => {
                    self.advance();
                    value += self.term()?;
                }
                Some('-') => {
                    self.advance();
                    value -= self.term()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn term(&mut self) -> Result<f64, String> {
        let mut value = self.factor()?;
        loop {
            self.skip_whitespace();
            match self.current() {
                Some('*') => {
                    self.advance();
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.advance();
                    value /= self.factor()?;
                }
                _ => return Ok(value),
            }
        }
    }

    fn factor(&mut self) -> Result<f64, String> {
        self.skip_whitespace();
        match self.current() {
            Some('-') => {
                self.advance();
                Ok(-self.factor()?)
            }
            Some('(') => {
                self.advance();
                let value = self.expr()?;
                self.skip_whitespace();
                if self.current() != Some(')') {
                    return Err("missing closing parenthesis".to_string());
                }
                self.advance();
                Ok(value)
            }
            Some(c) if c.is_ascii_digit() || c == '.' => self.number(),
            Some(c) => Err(format!("unexpected character '{c}' at offset {}", self.pos)),
            None => Err("unexpected end of expression".to_string()),
        }
    }

    fn number(&mut self) -> Result<f64, String> {
        let start = self.pos;
        while matches!(self.current(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        // Exponent part: e/E with optional sign.
        if matches!(self.current(), Some('e') | Some('E')) {
            self.advance();
            if matches!(self.current(), Some('+') | Some('-')) {
                self.advance();
            }
            while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse::<f64>()
            .map_err(|_| format!("invalid numeric literal '{text}'"))
    }
}
