//! Token-level view over a [`LineStream`].
//!
//! The [`TokenStream`] pulls lines one at a time, tokenizes them and hands
//! out the tokens in source order. Lines that open a content block or a
//! block comment are merged with the lines that follow until the block
//! closes, so the tokenizer always sees a whole block.

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::LexerConfig;
use crate::character_stream::CharacterStream;
use crate::error::{Error, Result};
use crate::line::Line;
use crate::line_stream::LineStream;
use crate::token::Token;

/// A stream of tokens with lookahead
#[derive(Debug)]
pub struct TokenStream {
    lines: LineStream,
    /// Tokens of the lines read so far, not yet returned
    pending: VecDeque<Token>,
    /// The first error hit, returned once `pending` is drained
    failure: Option<Error>,
    /// The iterator has already reported `failure`
    fused: bool,
}

impl TokenStream {
    /// Wrap a line stream
    pub fn new(lines: LineStream) -> Self {
        let capacity = lines.config().lookahead_capacity;
        Self {
            lines,
            pending: VecDeque::with_capacity(capacity),
            failure: None,
            fused: false,
        }
    }

    /// Tokenize `source` with the default configuration
    pub fn from_source(source: impl Into<Arc<str>>) -> Self {
        Self::new(LineStream::from_source(source))
    }

    /// Tokenize `source` with a custom configuration
    pub fn with_config(source: impl Into<Arc<str>>, config: LexerConfig) -> Self {
        Self::new(LineStream::with_config(CharacterStream::new(source), config))
    }

    /// The next unit to tokenize: a single line, or a whole block when the
    /// line opens one
    fn next_unit(&mut self) -> Result<Line> {
        let line = self.lines.peek_line(0)?;
        if !line.opens_block() {
            return self.lines.next_line();
        }

        debug!("Grouping block opened at {}", line.start());
        match self.lines.concat_until(|line| !line.ends_in_block()) {
            Err(err) if err.is_end_of_input() => {
                debug!("Block never closes, grouping the rest of the input");
                self.lines.concat_rest()
            }
            result => result,
        }
    }

    /// Read lines until `count` tokens are pending, the input ends or an
    /// error occurs
    fn fill(&mut self, count: usize) {
        while self.pending.len() < count && self.failure.is_none() && !self.lines.is_eof() {
            let unit = match self.next_unit() {
                Ok(unit) => unit,
                Err(err) => {
                    self.failure = Some(err);
                    break;
                }
            };

            match unit.tokens() {
                Ok(tokens) => {
                    trace!("{} tokens from line {}", tokens.len(), unit.start());
                    self.pending.extend(tokens.iter().cloned());
                }
                Err(err) => self.failure = Some(err.into()),
            }
        }
    }

    fn exhausted(&self) -> Error {
        match &self.failure {
            Some(err) => err.clone(),
            None => Error::EndOfInput {
                position: self.lines.position(),
            },
        }
    }

    /// Return the next token and advance past it.
    ///
    /// Once a line fails to tokenize, every call after its preceding tokens
    /// returns that same error.
    pub fn next_token(&mut self) -> Result<Token> {
        self.fill(1);
        match self.pending.pop_front() {
            Some(token) => Ok(token),
            None => Err(self.exhausted()),
        }
    }

    /// The token that the `shift + 1`-th call to `next_token` would return
    pub fn peek_token(&mut self, shift: usize) -> Result<&Token> {
        self.fill(shift + 1);
        if self.pending.len() <= shift {
            return Err(self.exhausted());
        }
        Ok(&self.pending[shift])
    }

    /// Returns true when no token is left. An error still to be reported
    /// counts as remaining input.
    pub fn is_eof(&mut self) -> bool {
        self.fill(1);
        self.pending.is_empty() && self.failure.is_none()
    }
}

impl Iterator for TokenStream {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fused {
            return None;
        }
        match self.next_token() {
            Ok(token) => Some(Ok(token)),
            Err(err) if err.is_end_of_input() => None,
            Err(err) => {
                self.fused = true;
                Some(Err(err))
            }
        }
    }
}
