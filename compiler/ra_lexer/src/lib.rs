//! Ra lexical analyzer
//!
//! This crate turns Ra source text into tokens through three layers, each
//! pulling from the one below:
//!
//! - [`CharacterStream`] hands out characters and tracks their [`Position`].
//! - [`LineStream`] cuts them into [`Line`]s, with lookahead and merging of
//!   lines that belong together.
//! - [`TokenStream`] tokenizes lines lazily and hands out [`Token`]s.
//!
//! ```no_run
//! use ra_lexer::{tokenize, TokenType};
//!
//! let tokens = tokenize("total = 12.5 * 3\n")?;
//! assert_eq!(tokens[3].token_type(), TokenType::Operator);
//! # Ok::<(), ra_lexer::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod character_stream;
pub mod config;
pub mod error;
pub mod line;
pub mod line_stream;
pub mod position;
pub mod string_interner;
pub mod token;
pub mod token_stream;
pub mod tokenizer;

use std::sync::Arc;

// Re-export the main types for convenience
pub use character_stream::CharacterStream;
pub use config::LexerConfig;
pub use error::{Error, LexError, LexErrorKind, Result};
pub use line::Line;
pub use line_stream::LineStream;
pub use position::Position;
pub use string_interner::InternedString;
pub use token::{NumberFormat, Symbol, Token, TokenKind, TokenType};
pub use token_stream::TokenStream;
pub use tokenizer::tokenize_line;

/// Tokenize a whole source with the default configuration
pub fn tokenize(source: impl Into<Arc<str>>) -> Result<Vec<Token>> {
    TokenStream::from_source(source).collect()
}
