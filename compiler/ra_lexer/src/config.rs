//! Settings shared by the line and token streams

/// Configuration shared by the line and token streams.
///
/// A [`LineStream`](crate::LineStream) copies it into every
/// [`Line`](crate::Line) it produces, so lazy tokenization uses the settings
/// that were active when the line was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerConfig {
    /// Whether to keep whitespace and newline tokens
    pub include_whitespace: bool,
    /// Whether to keep comment tokens
    pub include_comments: bool,
    /// Whether lines inside content blocks and block comments are marked with
    /// `skip_parsing`. Block state is followed either way, so a
    /// [`TokenStream`](crate::TokenStream) still regroups blocks.
    pub track_blocks: bool,
    /// Initial capacity of the lookahead buffers
    pub lookahead_capacity: usize,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            include_whitespace: false,
            include_comments: true,
            track_blocks: true,
            lookahead_capacity: 16,
        }
    }
}

impl LexerConfig {
    /// Keep whitespace and newline tokens
    pub fn with_whitespace(mut self) -> Self {
        self.include_whitespace = true;
        self
    }

    /// Drop comment tokens
    pub fn without_comments(mut self) -> Self {
        self.include_comments = false;
        self
    }

    /// Never mark lines with `skip_parsing`
    pub fn without_block_tracking(mut self) -> Self {
        self.track_blocks = false;
        self
    }
}
