//! Character scanner for path data.

pub(crate) struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Read a number: optional sign, digits with an optional fraction, optional exponent.
    pub fn number(&mut self) -> Option<f64> {
        self.skip_whitespace_and_comma();

        let start = self.pos;

        if self.peek() == Some('-') || self.peek() == Some('+') {
            self.next();
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
        }

        if self.peek() == Some('.') {
            self.next();
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.next();
            }
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            self.next();
            if self.peek() == Some('-') || self.peek() == Some('+') {
                self.next();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.next();
            }
        }

        let s = &self.input[start..self.pos];
        match s.parse() {
            Ok(n) => Some(n),
            Err(_) => {
                self.pos = start;
                None
            }
        }
    }

    /// The text from the current position up to the next whitespace, for error messages.
    pub fn rest_token(&self) -> &'a str {
        let rest = &self.input[self.pos..];
        rest.split(|c: char| c.is_ascii_whitespace()).next().unwrap_or(rest)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_whitespace()) {
            self.next();
        }
    }

    pub fn skip_whitespace_and_comma(&mut self) {
        self.skip_whitespace();
        if self.peek() == Some(',') {
            self.next();
        }
        self.skip_whitespace();
    }

    pub fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    pub fn next(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }
}
