//! Turns the text of one [`Line`](crate::Line) into [`Token`]s.
//!
//! The scanning itself is generated by logos from [`RawToken`]. The shapes
//! that cannot be written as a regular expression (quoted strings, block
//! comments, content blocks and the validation of numbers) are finished by
//! callbacks working on the lexer's remainder.

use log::{trace, warn};
use logos::{Lexer, Logos};

use crate::config::LexerConfig;
use crate::error::{LexError, LexErrorKind};
use crate::position::Position;
use crate::string_interner::InternedString;
use crate::token::{NumberFormat, Symbol, Token, TokenKind};

/// Number of leading tabs of `line`, its indentation level
pub(crate) fn indentation_level(line: &str) -> usize {
    line.chars().take_while(|&c| c == '\t').count()
}

/// Error produced by the generated lexer before positions are attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum RawError {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedComment,
    UnterminatedContentBlock,
    UnexpectedIndentLevel,
    InvalidNumber,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(error = RawError)]
enum RawToken {
    #[regex(r"[ \t\r]+")]
    Whitespace,
    #[token("\n")]
    Newline,

    #[regex(r"//[^\n]*")]
    LineComment,
    #[token("/*", block_comment)]
    BlockComment,

    #[token(">=")]
    GreaterOrEquals,
    #[token("<=")]
    LessOrEquals,

    #[regex(r"\p{L}[\p{L}\p{N}_]*")]
    Identifier,

    #[regex(r"[0-9]+([.,][0-9]+)*", number)]
    Number(NumberFormat),

    #[token("\"", |lex| quoted(lex, '"'))]
    #[token("'", |lex| quoted(lex, '\''))]
    StringLiteral,

    #[token("`", content_block)]
    ContentBlock,

    // Every character no other shape starts with lands here, so unknown
    // characters fail as a whole character.
    #[regex(r#"[^\p{L}0-9 \t\r\n"'`]"#, |lex| lex.slice().chars().next().and_then(Symbol::from_char))]
    Symbol(Symbol),
}

/// Consume a block comment up to and including `*/`
fn block_comment(lex: &mut Lexer<'_, RawToken>) -> Result<(), RawError> {
    let rem = lex.remainder();
    match rem.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(rem.len());
            Err(RawError::UnterminatedComment)
        }
    }
}

/// Consume a string literal closed by `quote` on the same physical line.
/// Escaped characters are skipped but kept verbatim.
fn quoted(lex: &mut Lexer<'_, RawToken>, quote: char) -> Result<(), RawError> {
    let rem = lex.remainder();
    let mut chars = rem.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\n' => {
                lex.bump(i);
                return Err(RawError::UnterminatedString);
            }
            '\\' => {
                if let Some((j, '\n')) = chars.next() {
                    lex.bump(j);
                    return Err(RawError::UnterminatedString);
                }
            }
            c if c == quote => {
                lex.bump(i + c.len_utf8());
                return Ok(());
            }
            _ => {}
        }
    }

    lex.bump(rem.len());
    Err(RawError::UnterminatedString)
}

/// Validate the literal just matched and work out its separators. Letters or
/// underscores glued to the digits are swallowed into the error.
fn number(lex: &mut Lexer<'_, RawToken>) -> Result<NumberFormat, RawError> {
    let rem = lex.remainder();
    let glued = rem
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rem.len());

    if glued > 0 {
        lex.bump(glued);
        return Err(RawError::InvalidNumber);
    }

    NumberFormat::of_literal(lex.slice()).ok_or(RawError::InvalidNumber)
}

/// Text of the line starting at the beginning of `text`, without its newline
fn first_line(text: &str) -> &str {
    &text[..text.find('\n').unwrap_or(text.len())]
}

/// Consume a content block. The block closes at the first backtick on a line
/// indented as deep as the line of the opening backtick. A non-blank line
/// indented less than that ends the scan with an error, leaving the lexer at
/// the start of the offending line.
fn content_block(lex: &mut Lexer<'_, RawToken>) -> Result<(), RawError> {
    let source = lex.source();
    let open = lex.span().start;
    let line_start = source[..open].rfind('\n').map_or(0, |i| i + 1);
    let level = indentation_level(&source[line_start..]);

    let rem = lex.remainder();
    let mut current_level = level;
    let mut at_line_start = false;

    for (i, c) in rem.char_indices() {
        if at_line_start {
            current_level = indentation_level(&rem[i..]);
            if current_level < level && !first_line(&rem[i..]).trim().is_empty() {
                lex.bump(i);
                return Err(RawError::UnexpectedIndentLevel);
            }
            at_line_start = false;
        }
        match c {
            '\n' => at_line_start = true,
            '`' if current_level <= level => {
                lex.bump(i + 1);
                return Ok(());
            }
            _ => {}
        }
    }

    lex.bump(rem.len());
    Err(RawError::UnterminatedContentBlock)
}

impl RawError {
    fn into_kind(self, snippet: &str) -> LexErrorKind {
        match self {
            RawError::UnexpectedCharacter => {
                LexErrorKind::UnexpectedCharacter(snippet.chars().next().unwrap_or('\0'))
            }
            RawError::UnterminatedString => LexErrorKind::UnterminatedString,
            RawError::UnterminatedComment => LexErrorKind::UnterminatedComment,
            RawError::UnterminatedContentBlock => LexErrorKind::UnterminatedContentBlock,
            RawError::UnexpectedIndentLevel => LexErrorKind::UnexpectedIndentLevel,
            RawError::InvalidNumber => LexErrorKind::InvalidNumber,
        }
    }
}

/// Text strictly inside the `open`/`close` delimiters of `slice`
fn inner(slice: &str, open: usize, close: usize) -> &str {
    &slice[open..slice.len() - close]
}

/// Build a content block token from its raw `slice`, backticks included.
///
/// The text following the opening backtick on its line is tokenized into the
/// block's children; the lines after it become the value.
fn content_block_token(
    slice: &str,
    start: Position,
    end: Position,
    level: usize,
    config: &LexerConfig,
) -> Result<Token, LexError> {
    let body = inner(slice, 1, 1);
    let token = match body.split_once('\n') {
        None => Token::new(TokenKind::ContentBlock, InternedString::unshared(body), start, end),
        Some((opening, content)) => {
            let children = tokenize_at_level(opening, start.after("`"), level, config)?;
            Token::new(TokenKind::ContentBlock, InternedString::unshared(content), start, end)
                .with_children(children)
        }
    };
    Ok(token.with_level(level))
}

/// Tokenize `text`, whose first character sits at `base`.
///
/// Stops at the first malformed unit; the error carries its position and raw
/// text. Every token records the indentation level of the line it starts on.
pub fn tokenize_line(
    text: &str,
    base: Position,
    config: &LexerConfig,
) -> Result<Vec<Token>, LexError> {
    tokenize_at_level(text, base, indentation_level(text), config)
}

fn tokenize_at_level(
    text: &str,
    base: Position,
    mut level: usize,
    config: &LexerConfig,
) -> Result<Vec<Token>, LexError> {
    let mut lexer = RawToken::lexer(text);
    let mut tokens = Vec::new();
    let mut position = base;

    while let Some(raw) = lexer.next() {
        let slice = lexer.slice();
        let start = position;
        position.advance_str(slice);
        let end = position;

        let raw = match raw {
            Ok(raw) => raw,
            Err(RawError::UnexpectedIndentLevel) => {
                let line = first_line(lexer.remainder());
                let error = LexError::new(LexErrorKind::UnexpectedIndentLevel, end, line);
                warn!("{}", error);
                return Err(error);
            }
            Err(err) => {
                let error = LexError::new(err.into_kind(slice), start, slice);
                warn!("{}", error);
                return Err(error);
            }
        };

        let line_level = level;
        if let Some(nl) = slice.rfind('\n') {
            level = indentation_level(&text[lexer.span().start + nl + 1..]);
        }

        let token = match raw {
            RawToken::Whitespace | RawToken::Newline if !config.include_whitespace => continue,
            RawToken::LineComment | RawToken::BlockComment if !config.include_comments => continue,
            RawToken::Whitespace => Token::new(TokenKind::Whitespace, slice, start, end),
            RawToken::Newline => Token::new(TokenKind::Newline, slice, start, end),
            RawToken::LineComment => {
                Token::new(TokenKind::Comment, InternedString::unshared(inner(slice, 2, 0)), start, end)
            }
            RawToken::BlockComment => {
                Token::new(TokenKind::Comment, InternedString::unshared(inner(slice, 2, 2)), start, end)
            }
            RawToken::GreaterOrEquals => Token::new(TokenKind::GreaterOrEquals, slice, start, end),
            RawToken::LessOrEquals => Token::new(TokenKind::LessOrEquals, slice, start, end),
            RawToken::Identifier => Token::new(TokenKind::Identifier, slice, start, end),
            RawToken::Number(format) => Token::new(TokenKind::Number(format), slice, start, end),
            RawToken::StringLiteral => Token::new(
                TokenKind::StringLiteral,
                InternedString::unshared(inner(slice, 1, 1)),
                start,
                end,
            ),
            RawToken::ContentBlock => content_block_token(slice, start, end, line_level, config)?,
            RawToken::Symbol(symbol) => Token::symbol(symbol, start, end),
        };
        let token = token.with_level(line_level);

        trace!("Token: {}", token);
        tokens.push(token);
    }

    Ok(tokens)
}
