//! A unit of source text produced by the [`LineStream`](crate::LineStream).
//!
//! A [`Line`] covers one physical line, or several after merging, and
//! tokenizes itself on first request.

use std::cell::OnceCell;
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use log::trace;

use crate::config::LexerConfig;
use crate::error::LexError;
use crate::position::Position;
use crate::token::Token;
use crate::tokenizer::{indentation_level, tokenize_line};

/// One physical line of source, or several merged into a single unit.
///
/// A line shares the source text with the stream that produced it and keeps
/// only a byte range into it. Its tokens are computed on first request and
/// cached for the lifetime of the line.
#[derive(Clone)]
pub struct Line {
    /// Position of the first character
    start: Position,
    /// Position of the last character
    end: Position,
    /// Number of physical lines covered
    span: usize,
    source: Arc<str>,
    range: Range<usize>,
    skip_parsing: bool,
    /// A content block or block comment was open before the first character
    block_at_start: bool,
    /// A content block or block comment is still open after the last character
    block_at_end: bool,
    config: LexerConfig,
    tokens: OnceCell<Result<Vec<Token>, LexError>>,
}

impl Line {
    pub(crate) fn new(
        source: Arc<str>,
        range: Range<usize>,
        start: Position,
        end: Position,
        config: LexerConfig,
    ) -> Self {
        Self {
            start,
            end,
            span: 1,
            source,
            range,
            skip_parsing: false,
            block_at_start: false,
            block_at_end: false,
            config,
            tokens: OnceCell::new(),
        }
    }

    /// Record the block state around this line. With block tracking on,
    /// `skip_parsing` is derived from it.
    pub(crate) fn with_block_state(mut self, at_start: bool, at_end: bool) -> Self {
        self.block_at_start = at_start;
        self.block_at_end = at_end;
        let skip = self.config.track_blocks && (at_start || at_end);
        self.with_skip_parsing(skip)
    }

    /// Replace the skip flag. Any cached tokens are dropped.
    pub fn with_skip_parsing(mut self, skip: bool) -> Self {
        self.skip_parsing = skip;
        self.tokens = OnceCell::new();
        self
    }

    /// Merge `next`, which must directly follow this line in the source
    pub(crate) fn concat(self, next: Line) -> Line {
        debug_assert_eq!(self.range.end, next.range.start);
        let block_at_start = self.block_at_start;
        let block_at_end = next.block_at_end;

        Line {
            start: self.start,
            end: next.end,
            span: self.span + next.span,
            range: self.range.start..next.range.end,
            block_at_start,
            block_at_end,
            skip_parsing: self.config.track_blocks && (block_at_start || block_at_end),
            source: self.source,
            config: self.config,
            tokens: OnceCell::new(),
        }
    }

    /// Position of the first character
    pub fn start(&self) -> Position {
        self.start
    }

    /// Position of the last character, the trailing newline included
    pub fn end(&self) -> Position {
        self.end
    }

    /// Number of physical lines this unit covers
    pub fn span(&self) -> usize {
        self.span
    }

    /// The exact source text of this unit
    pub fn value(&self) -> &str {
        &self.source[self.range.clone()]
    }

    /// Byte range of this unit in the source
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// When true the line is never tokenized and yields no tokens
    pub fn skip_parsing(&self) -> bool {
        self.skip_parsing
    }

    /// A content block or block comment was already open when this unit began
    pub fn starts_in_block(&self) -> bool {
        self.block_at_start
    }

    /// A content block or block comment is still open after this unit
    pub fn ends_in_block(&self) -> bool {
        self.block_at_end
    }

    /// This unit opens a block it does not close
    pub fn opens_block(&self) -> bool {
        !self.block_at_start && self.block_at_end
    }

    /// Number of leading tabs
    pub fn indentation(&self) -> usize {
        indentation_level(self.value())
    }

    /// Returns true once the tokens have been computed
    pub fn is_tokenized(&self) -> bool {
        self.tokens.get().is_some()
    }

    /// The tokens of this line, computed on first call.
    ///
    /// A tokenization error is cached as well and returned again on every
    /// later call.
    pub fn tokens(&self) -> Result<&[Token], LexError> {
        self.tokens
            .get_or_init(|| {
                if self.skip_parsing {
                    trace!("Skipping line at {}", self.start);
                    return Ok(Vec::new());
                }
                trace!("Tokenizing line at {} (span {})", self.start, self.span);
                tokenize_line(self.value(), self.start, &self.config)
            })
            .as_deref()
            .map_err(Clone::clone)
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.span == other.span
            && self.skip_parsing == other.skip_parsing
            && self.value() == other.value()
    }
}

impl Eq for Line {}

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Line")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("span", &self.span)
            .field("value", &self.value())
            .field("skip_parsing", &self.skip_parsing)
            .finish()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
