//! Line-level view over a [`CharacterStream`].
//!
//! The [`LineStream`] cuts the characters into [`Line`]s, one physical line
//! each, with an unbounded lookahead buffer so callers can peek ahead and
//! merge lines that belong together. It also follows content blocks and block
//! comments, recording on each line whether one is open around it. With
//! block tracking enabled, the lines whose text alone cannot be tokenized are
//! flagged with `skip_parsing`.
//!
//! ```no_run
//! use ra_lexer::LineStream;
//!
//! let mut lines = LineStream::from_source("`\n\tbody\n`\nx = 1\n");
//! let block = lines.concat_until(|line| line.end().line == 3)?;
//! assert_eq!(block.span(), 3);
//! # Ok::<(), ra_lexer::Error>(())
//! ```

use std::collections::VecDeque;
use std::sync::Arc;

use log::{debug, trace};

use crate::character_stream::CharacterStream;
use crate::config::LexerConfig;
use crate::error::{Error, Result};
use crate::line::Line;
use crate::position::Position;
use crate::tokenizer::indentation_level;

/// A multi-line construct that is open at the end of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenBlock {
    /// A backtick block opened on a line with this indentation
    Content { level: usize },
    /// A `/*` comment
    Comment,
}

/// Follows blocks across physical lines
#[derive(Debug, Default, Clone, Copy)]
struct BlockTracker {
    open: Option<OpenBlock>,
}

impl BlockTracker {
    fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Update the state with the text of the next physical line
    fn scan(&mut self, text: &str) {
        let level = indentation_level(text);
        if let Some(OpenBlock::Content { level: opener }) = self.open {
            // A shallower line ends the block; the tokenizer reports it
            if level < opener && !text.trim().is_empty() {
                self.open = None;
                return;
            }
        }
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match self.open {
                Some(OpenBlock::Content { level: opener }) => {
                    if c == '`' && level <= opener {
                        self.open = None;
                    }
                }
                Some(OpenBlock::Comment) => {
                    if c == '*' && chars.next_if_eq(&'/').is_some() {
                        self.open = None;
                    }
                }
                None => match c {
                    '`' => self.open = Some(OpenBlock::Content { level }),
                    '"' | '\'' => {
                        // Quoted text never opens a block
                        while let Some(q) = chars.next() {
                            match q {
                                '\\' => {
                                    chars.next();
                                }
                                '\n' => break,
                                q if q == c => break,
                                _ => {}
                            }
                        }
                    }
                    '/' if chars.next_if_eq(&'/').is_some() => break,
                    '/' if chars.next_if_eq(&'*').is_some() => {
                        self.open = Some(OpenBlock::Comment);
                    }
                    _ => {}
                },
            }
        }
    }
}

/// A stream of [`Line`]s with lookahead and merging
#[derive(Debug)]
pub struct LineStream {
    chars: CharacterStream,
    /// Lines read from `chars` but not yet returned by `next_line`
    lookahead: VecDeque<Line>,
    config: LexerConfig,
    blocks: BlockTracker,
}

impl LineStream {
    /// Create a line stream with the default configuration
    pub fn new(chars: CharacterStream) -> Self {
        Self::with_config(chars, LexerConfig::default())
    }

    /// Create a line stream with a custom configuration
    pub fn with_config(chars: CharacterStream, config: LexerConfig) -> Self {
        Self {
            chars,
            lookahead: VecDeque::with_capacity(config.lookahead_capacity),
            config,
            blocks: BlockTracker::default(),
        }
    }

    /// Create a line stream straight from source text
    pub fn from_source(source: impl Into<Arc<str>>) -> Self {
        Self::new(CharacterStream::new(source))
    }

    /// The configuration handed to every line
    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    /// Returns true when no line is left, buffered or unread
    pub fn is_eof(&self) -> bool {
        self.lookahead.is_empty() && self.chars.is_eof()
    }

    /// Number of lines sitting in the lookahead buffer
    pub fn buffered_lines(&self) -> usize {
        self.lookahead.len()
    }

    /// Start position of the line `next_line` would return
    pub fn position(&self) -> Position {
        self.lookahead
            .front()
            .map_or_else(|| self.chars.position(), Line::start)
    }

    fn end_of_input(&self) -> Error {
        Error::EndOfInput {
            position: self.chars.position(),
        }
    }

    /// Read one physical line from the characters. The stream must not be at
    /// its end.
    fn read_line(&mut self) -> Result<Line> {
        let begin = self.chars.offset();
        let start = self.chars.position();
        let mut end;

        loop {
            end = self.chars.position();
            self.chars.next_char()?;
            if self.chars.is_eol() || self.chars.is_eof() {
                break;
            }
        }

        let range = begin..self.chars.offset();
        let line = Line::new(Arc::clone(self.chars.source()), range, start, end, self.config);

        let at_start = self.blocks.is_open();
        self.blocks.scan(line.value());
        let line = line.with_block_state(at_start, self.blocks.is_open());

        trace!(
            "Read line {}..{} (skip_parsing: {})",
            line.start(),
            line.end(),
            line.skip_parsing()
        );
        Ok(line)
    }

    /// Return the next line and advance past it
    pub fn next_line(&mut self) -> Result<Line> {
        if let Some(line) = self.lookahead.pop_front() {
            return Ok(line);
        }
        if self.chars.is_eof() {
            return Err(self.end_of_input());
        }
        self.read_line()
    }

    /// The line that the `shift + 1`-th call to `next_line` would return,
    /// without consuming anything
    pub fn peek_line(&mut self, shift: usize) -> Result<&Line> {
        if self.lookahead.len() <= shift {
            debug!(
                "Filling lookahead from {} to {} lines",
                self.lookahead.len(),
                shift + 1
            );
        }
        while self.lookahead.len() <= shift {
            if self.chars.is_eof() {
                return Err(self.end_of_input());
            }
            let line = self.read_line()?;
            self.lookahead.push_back(line);
        }
        Ok(&self.lookahead[shift])
    }

    /// Merge lines up to and including the first one matching `predicate`.
    ///
    /// Fails with [`Error::EndOfInput`] if no remaining line matches, in
    /// which case nothing is consumed.
    pub fn concat_until<F>(&mut self, mut predicate: F) -> Result<Line>
    where
        F: FnMut(&Line) -> bool,
    {
        let mut count = 0;
        loop {
            let line = self.peek_line(count)?;
            count += 1;
            if predicate(line) {
                break;
            }
        }

        debug!("Merging {} lines from {}", count, LineStream::position(self));
        let merged = self.lookahead.drain(..count).reduce(Line::concat);
        merged.ok_or_else(|| self.end_of_input())
    }

    /// Merge every remaining line into one unit. The unit is always
    /// tokenized, even if a block is left open.
    pub fn concat_rest(&mut self) -> Result<Line> {
        while !self.chars.is_eof() {
            let line = self.read_line()?;
            self.lookahead.push_back(line);
        }

        debug!("Merging the remaining {} lines", self.lookahead.len());
        let merged = self.lookahead.drain(..).reduce(Line::concat);
        merged
            .map(|line| line.with_skip_parsing(false))
            .ok_or_else(|| self.end_of_input())
    }
}

impl Iterator for LineStream {
    type Item = Line;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().ok()
    }
}
