//! Token types produced by the tokenizer
//!
//! A [`Token`] pairs a [`TokenKind`] with its text, its positions and the
//! indentation level of the line it starts on. The single-character
//! [`Symbol`]s are generated from one table, which also decides whether each
//! one is an operator or punctuation.

use std::fmt;

use crate::position::Position;
use crate::string_interner::InternedString;

/// Broad classification of a token, the level most grammar code matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Arithmetic, comparison and logical symbols
    Operator,
    /// Delimiters and separators
    Punctuation,
    /// Names
    Identifier,
    /// Quoted string literals
    String,
    /// Numeric literals
    Number,
    /// Backtick-delimited raw blocks
    ContentBlock,
    /// Line and block comments
    Comment,
    /// Spaces, tabs and newlines
    Whitespace,
}

/// Builds [`Symbol`] and its lookup functions from a single table, so a new
/// symbol only needs one new row.
macro_rules! symbols {
    ($($(#[$doc:meta])* $variant:ident => $ch:literal, $ty:ident;)*) => {
        /// The closed set of single-character symbols.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Symbol {
            $($(#[$doc])* $variant,)*
        }

        impl Symbol {
            /// Every symbol, in table order
            pub const ALL: &'static [Symbol] = &[$(Symbol::$variant,)*];

            /// Look up the symbol written as `c`
            pub fn from_char(c: char) -> Option<Self> {
                match c {
                    $($ch => Some(Symbol::$variant),)*
                    _ => None,
                }
            }

            /// The character this symbol is written as
            pub fn as_char(self) -> char {
                match self {
                    $(Symbol::$variant => $ch,)*
                }
            }

            /// Whether the symbol is an operator or punctuation
            pub fn token_type(self) -> TokenType {
                match self {
                    $(Symbol::$variant => TokenType::$ty,)*
                }
            }
        }
    };
}

symbols! {
    /// `+`
    Plus => '+', Operator;
    /// `-`
    Minus => '-', Operator;
    /// `*`
    Asterisk => '*', Operator;
    /// `=`
    Equals => '=', Operator;
    /// `>`
    Greater => '>', Operator;
    /// `<`
    Less => '<', Operator;
    /// `!`
    Exclamation => '!', Operator;
    /// `%`
    Percent => '%', Operator;
    /// `^`
    Power => '^', Operator;
    /// `&`
    Ampersand => '&', Operator;
    /// `|`
    Pipe => '|', Operator;
    /// `~`
    Tilde => '~', Operator;
    /// `/`
    ForwardSlash => '/', Punctuation;
    /// `\`
    Backslash => '\\', Punctuation;
    /// `;`
    SemiColon => ';', Punctuation;
    /// `,`
    Comma => ',', Punctuation;
    /// `.`
    Dot => '.', Punctuation;
    /// `:`
    Colon => ':', Punctuation;
    /// `{`
    OpenCurlyBrace => '{', Punctuation;
    /// `}`
    CloseCurlyBrace => '}', Punctuation;
    /// `[`
    OpenSquareBrace => '[', Punctuation;
    /// `]`
    CloseSquareBrace => ']', Punctuation;
    /// `(`
    OpenParenthesis => '(', Punctuation;
    /// `)`
    CloseParenthesis => ')', Punctuation;
    /// `@`
    At => '@', Punctuation;
    /// `#`
    HashPound => '#', Punctuation;
    /// `_`
    Underscore => '_', Punctuation;
    /// `$`
    Dollar => '$', Punctuation;
    /// `?`
    Question => '?', Punctuation;
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// How the separators of a numeric literal are to be read.
///
/// The first separator kind in a literal groups digits. If the other kind
/// shows up, it is the decimal separator. A literal with one kind (or none)
/// takes the other character as its decimal separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumberFormat {
    /// Separator between the integer and fractional parts
    pub decimal: char,
    /// Separator between digit groups
    pub thousands: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            decimal: ',',
            thousands: '.',
        }
    }
}

impl NumberFormat {
    /// Work out the format of `literal`, a run of digits and separators.
    ///
    /// Returns `None` when the decimal separator appears more than once or is
    /// followed by another separator.
    pub fn of_literal(literal: &str) -> Option<Self> {
        let mut grouping = None;
        let mut decimal = None;

        for sep in literal.chars().filter(|c| matches!(c, '.' | ',')) {
            match (grouping, decimal) {
                (None, _) => grouping = Some(sep),
                (Some(g), None) if g != sep => decimal = Some(sep),
                (Some(_), None) => {}
                (Some(_), Some(_)) => return None,
            }
        }

        Some(match (grouping, decimal) {
            (Some(thousands), Some(decimal)) => Self { decimal, thousands },
            (Some('.'), None) => Self {
                decimal: ',',
                thousands: '.',
            },
            (Some(_), None) => Self {
                decimal: '.',
                thousands: ',',
            },
            (None, _) => Self::default(),
        })
    }
}

/// The precise kind of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A single-character symbol
    Symbol(Symbol),
    /// `>=`
    GreaterOrEquals,
    /// `<=`
    LessOrEquals,
    /// A name
    Identifier,
    /// A quoted string; the value excludes the quotes
    StringLiteral,
    /// A numeric literal and how to read its separators
    Number(NumberFormat),
    /// A backtick block. On a single line the value is the text between the
    /// backticks. A multi-line block keeps the text after the opening line as
    /// its value, and the tokens of the opening line as its children.
    ContentBlock,
    /// A comment; the value excludes the delimiters
    Comment,
    /// Spaces, tabs or carriage returns
    Whitespace,
    /// A line feed
    Newline,
}

impl TokenKind {
    /// Broad classification of this kind
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Symbol(symbol) => symbol.token_type(),
            TokenKind::GreaterOrEquals | TokenKind::LessOrEquals => TokenType::Operator,
            TokenKind::Identifier => TokenType::Identifier,
            TokenKind::StringLiteral => TokenType::String,
            TokenKind::Number(_) => TokenType::Number,
            TokenKind::ContentBlock => TokenType::ContentBlock,
            TokenKind::Comment => TokenType::Comment,
            TokenKind::Whitespace | TokenKind::Newline => TokenType::Whitespace,
        }
    }
}

/// A classified, positioned lexical unit.
///
/// `start` is the position of the first character, `end` the position right
/// after the last one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The kind of the token
    pub kind: TokenKind,
    /// The literal or canonical text of the token
    pub value: InternedString,
    /// Position of the first character
    pub start: Position,
    /// Position just past the last character
    pub end: Position,
    /// Indentation level (leading tabs) of the line the token starts on
    pub level: usize,
    /// Initialization tokens of a multi-line content block; empty otherwise
    pub children: Vec<Token>,
}

impl Token {
    /// Create a token at indentation level 0 without children
    pub fn new<S: Into<InternedString>>(kind: TokenKind, value: S, start: Position, end: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
            level: 0,
            children: Vec::new(),
        }
    }

    /// Set the indentation level
    pub fn with_level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }

    /// Attach initialization tokens
    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    /// Create a single-character symbol token. Kind and value are fixed by
    /// the symbol; only the positions vary.
    pub fn symbol(symbol: Symbol, start: Position, end: Position) -> Self {
        Self::new(TokenKind::Symbol(symbol), symbol.as_char(), start, end)
    }

    /// Broad classification of the token
    pub fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }

    /// The symbol, if this is a single-character symbol token
    pub fn as_symbol(&self) -> Option<Symbol> {
        match self.kind {
            TokenKind::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// Returns true if this token is the given symbol
    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        self.as_symbol() == Some(symbol)
    }

    /// Returns true for whitespace and newline tokens
    pub fn is_trivia(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Newline)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{}..{}", self.kind, self.value.as_str(), self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_round_trips() {
        for &symbol in Symbol::ALL {
            assert_eq!(Symbol::from_char(symbol.as_char()), Some(symbol));
        }
        assert_eq!(Symbol::from_char('a'), None);
        assert_eq!(Symbol::from_char('`'), None);
    }

    #[test]
    fn test_symbol_classification() {
        assert_eq!(Symbol::Asterisk.token_type(), TokenType::Operator);
        assert_eq!(Symbol::ForwardSlash.token_type(), TokenType::Punctuation);
        assert_eq!(Symbol::Comma.token_type(), TokenType::Punctuation);
        assert_eq!(Symbol::Equals.token_type(), TokenType::Operator);
    }

    #[test]
    fn test_symbol_token_has_fixed_value() {
        let token = Token::symbol(Symbol::Asterisk, Position::new(2, 4), Position::new(2, 5));
        assert_eq!(token.value, "*");
        assert_eq!(token.token_type(), TokenType::Operator);
        assert!(token.is_symbol(Symbol::Asterisk));
        assert_eq!(token.to_string(), "Symbol(Asterisk)(\"*\")@2:4..2:5");
        assert_eq!(token.level, 0);
        assert!(token.children.is_empty());
    }

    #[test]
    fn test_level_and_children() {
        let child = Token::new(TokenKind::Identifier, "ln", Position::new(1, 1), Position::new(1, 3));
        let block = Token::new(TokenKind::ContentBlock, "\tabc\n", Position::new(1, 0), Position::new(3, 1))
            .with_level(2)
            .with_children(vec![child.clone()]);

        assert_eq!(block.level, 2);
        assert_eq!(block.children, vec![child]);
        assert_eq!(block.token_type(), TokenType::ContentBlock);
    }

    #[test]
    fn test_number_format_of_literal() {
        let default = NumberFormat {
            decimal: ',',
            thousands: '.',
        };
        let comma_grouped = NumberFormat {
            decimal: '.',
            thousands: ',',
        };

        assert_eq!(NumberFormat::of_literal("123"), Some(default));
        assert_eq!(NumberFormat::of_literal("123.321"), Some(default));
        assert_eq!(NumberFormat::of_literal("123,321"), Some(comma_grouped));
        assert_eq!(NumberFormat::of_literal("123.321,456"), Some(default));
        assert_eq!(NumberFormat::of_literal("123.321.123,456"), Some(default));
        assert_eq!(NumberFormat::of_literal("123,321,123.456"), Some(comma_grouped));
        assert_eq!(NumberFormat::of_literal("123.321.123,456,654"), None);
        assert_eq!(NumberFormat::of_literal("1,5.3.2"), None);
    }
}
