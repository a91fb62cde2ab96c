//! Error types shared by the character, line and token streams

use thiserror::Error;

use crate::position::Position;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the streams
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A stream was read past its end. Check `is_eof()` first.
    #[error("unexpected end of input at {position}")]
    EndOfInput {
        /// Position at which the stream ran out
        position: Position,
    },
    /// The text of a line contains something no token shape matches
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl Error {
    /// Position the error refers to
    pub fn position(&self) -> Position {
        match self {
            Error::EndOfInput { position } => *position,
            Error::Lex(err) => err.position,
        }
    }

    /// Returns true for [`Error::EndOfInput`]
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, Error::EndOfInput { .. })
    }
}

/// A malformed character sequence found while tokenizing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}: {snippet:?}")]
pub struct LexError {
    /// What went wrong
    pub kind: LexErrorKind,
    /// Where the offending text starts
    pub position: Position,
    /// The offending text
    pub snippet: String,
}

impl LexError {
    /// Create an error at `position` for the given snippet
    pub fn new(kind: LexErrorKind, position: Position, snippet: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            snippet: snippet.into(),
        }
    }
}

/// The different shapes of malformed input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    /// A character that starts no token
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// A quote without its closing quote on the same line
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A `/*` without `*/`
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A backtick block that is never closed
    #[error("unterminated content block")]
    UnterminatedContentBlock,
    /// A line inside a content block indented less than the block's opener
    #[error("unexpected indentation level")]
    UnexpectedIndentLevel,
    /// Misplaced separators, or letters glued to a number
    #[error("invalid number")]
    InvalidNumber,
}
