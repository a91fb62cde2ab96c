//! Character-level cursor over an in-memory source text.
//!
//! The [`CharacterStream`] is the bottom layer of the lexer. It hands out one
//! Unicode scalar value at a time and keeps the [`Position`] of the next
//! character up to date, so the layers above never count columns themselves.
//!
//! ```no_run
//! use ra_lexer::CharacterStream;
//!
//! let mut chars = CharacterStream::new("a\nb");
//! while let Ok(c) = chars.next_char() {
//!     println!("{:?} ends line: {}", c, chars.is_eol());
//! }
//! ```

use std::io::{self, Read};
use std::sync::Arc;

use log::trace;

use crate::error::{Error, Result};
use crate::position::Position;

/// A forward-only cursor over the characters of a source text
#[derive(Debug, Clone)]
pub struct CharacterStream {
    /// The whole source, shared with every line cut from it
    source: Arc<str>,
    /// Byte offset of the next character
    offset: usize,
    /// Position of the next character
    position: Position,
    /// The character most recently returned by `next_char`
    last: Option<char>,
}

impl CharacterStream {
    /// Create a stream positioned before the first character of `source`
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        Self {
            source: source.into(),
            offset: 0,
            position: Position::START,
            last: None,
        }
    }

    /// Read `reader` to the end and stream its contents.
    ///
    /// Fails if the reader fails or the data is not valid UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<Self> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        trace!("Read {} bytes of source", source.len());
        Ok(Self::new(source))
    }

    /// The next character, without consuming it
    pub fn peek(&self) -> Result<char> {
        self.source[self.offset..]
            .chars()
            .next()
            .ok_or(Error::EndOfInput {
                position: self.position,
            })
    }

    /// Consume and return the next character
    pub fn next_char(&mut self) -> Result<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        self.position.advance(c);
        self.last = Some(c);
        Ok(c)
    }

    /// Returns true once every character has been consumed
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Returns true if the character last consumed was a line feed
    pub fn is_eol(&self) -> bool {
        self.last == Some('\n')
    }

    /// Position of the next character
    pub fn position(&self) -> Position {
        self.position
    }

    /// Byte offset of the next character
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The complete source text
    pub fn source(&self) -> &Arc<str> {
        &self.source
    }
}

impl Iterator for CharacterStream {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_char().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.len() - self.offset;
        ((remaining + 3) / 4, Some(remaining))
    }
}
