//! Source positions
//!
//! Every layer reports locations as a [`Position`]. The character stream is
//! the only place that advances one; the layers above copy or derive theirs.

use std::fmt;

/// A `(line, column)` address in the source text.
///
/// Lines are 1-based, columns are 0-based and count Unicode scalar values,
/// not bytes. Positions order lexicographically, line first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// The 1-based line number
    pub line: usize,
    /// The 0-based column, in characters
    pub column: usize,
}

impl Position {
    /// Position of the first character of any source
    pub const START: Position = Position { line: 1, column: 0 };

    /// Create a position from its parts
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Move past `c`, yielding the position of the character that follows it.
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Move past every character of `text`
    pub fn advance_str(&mut self, text: &str) {
        for c in text.chars() {
            self.advance(c);
        }
    }

    /// The position reached after `text`, starting here
    pub fn after(mut self, text: &str) -> Self {
        self.advance_str(text);
        self
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl From<(usize, usize)> for Position {
    fn from((line, column): (usize, usize)) -> Self {
        Self::new(line, column)
    }
}
