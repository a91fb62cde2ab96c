use pretty_assertions::assert_eq;
use ra_lexer::{
    tokenize, Error, LexErrorKind, LexerConfig, Position, Symbol, TokenKind, TokenStream,
    TokenType,
};

const FIXTURE: &str = include_str!("fixtures/example.ra");

#[allow(dead_code)]
fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[test]
fn test_fixture_tokens() {
    init_test_logger();
    let tokens = tokenize(FIXTURE).unwrap();

    let summary: Vec<_> = tokens
        .iter()
        .map(|t| (t.token_type(), t.value.to_string()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (
                TokenType::ContentBlock,
                "\tthis is one string\n\tthat spans lines\n\t`even now`\n".to_string()
            ),
            (TokenType::Identifier, "name".to_string()),
            (TokenType::Operator, "=".to_string()),
            (TokenType::String, "value".to_string()),
            (TokenType::Identifier, "total".to_string()),
            (TokenType::Operator, "=".to_string()),
            (TokenType::Number, "12.5".to_string()),
            (TokenType::Operator, "*".to_string()),
            (TokenType::Number, "3".to_string()),
            (TokenType::Punctuation, "/".to_string()),
            (TokenType::Number, "2".to_string()),
            (TokenType::Comment, " trailing comment".to_string()),
        ]
    );
}

#[test]
fn test_fixture_positions() {
    let tokens = tokenize(FIXTURE).unwrap();

    assert_eq!(tokens[0].start, Position::new(1, 0));
    assert_eq!(tokens[0].end, Position::new(5, 1));
    assert_eq!(tokens[1].start, Position::new(6, 0));
    assert_eq!(tokens[3].start, Position::new(6, 7));
    assert_eq!(tokens[3].end, Position::new(6, 14));
    assert_eq!(tokens[7].start, Position::new(7, 13));
    assert!(tokens[7].is_symbol(Symbol::Asterisk));
    assert_eq!(tokens[11].start, Position::new(8, 0));
}

#[test]
fn test_token_positions_never_go_back() {
    let tokens = tokenize(FIXTURE).unwrap();
    for pair in tokens.windows(2) {
        assert!(pair[0].start < pair[0].end);
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn test_whitespace_tokens_cover_the_source() {
    let config = LexerConfig::default().with_whitespace();
    let tokens: Vec<_> = TokenStream::with_config("a = 1\n\tb\n", config)
        .collect::<Result<_, _>>()
        .unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::Whitespace,
            TokenKind::Symbol(Symbol::Equals),
            TokenKind::Whitespace,
            TokenKind::Number(Default::default()),
            TokenKind::Newline,
            TokenKind::Whitespace,
            TokenKind::Identifier,
            TokenKind::Newline,
        ]
    );
    assert_eq!(tokens.last().unwrap().end, Position::new(3, 0));
}

#[test]
fn test_peek_does_not_consume() {
    let mut tokens = TokenStream::from_source(FIXTURE);
    let third = tokens.peek_token(2).unwrap().clone();
    assert_eq!(third.value, "=");

    tokens.next_token().unwrap();
    tokens.next_token().unwrap();
    assert_eq!(tokens.next_token().unwrap(), third);
}

#[test]
fn test_drain_to_end() {
    let mut tokens = TokenStream::from_source("x\n");
    assert!(!tokens.is_eof());
    tokens.next_token().unwrap();
    assert!(tokens.is_eof());
    assert!(matches!(tokens.next_token(), Err(Error::EndOfInput { .. })));
}

#[test]
fn test_invalid_number_in_source() {
    let err = tokenize("a = 1\nb = 123abc\n").unwrap_err();
    match err {
        Error::Lex(lex) => {
            assert_eq!(lex.kind, LexErrorKind::InvalidNumber);
            assert_eq!(lex.position, Position::new(2, 4));
            assert_eq!(lex.snippet, "123abc");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unterminated_string_in_source() {
    let err = tokenize("name = \"value\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Lex(ref lex) if lex.kind == LexErrorKind::UnterminatedString
    ));
    assert_eq!(err.position(), Position::new(1, 7));
}

#[test]
fn test_empty_source() {
    assert_eq!(tokenize("").unwrap(), vec![]);
    assert_eq!(tokenize("\n\n").unwrap(), vec![]);
}

#[test]
fn test_blocks_grouped_without_block_tracking() {
    let config = LexerConfig::default().without_block_tracking();
    let untracked: Vec<_> = TokenStream::with_config(FIXTURE, config)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(untracked, tokenize(FIXTURE).unwrap());

    let tokens: Vec<_> = TokenStream::with_config("`\n\tbody\n`\nx = 1\n", config)
        .collect::<Result<_, _>>()
        .unwrap();
    let summary: Vec<_> = tokens.iter().map(|t| (t.kind, t.value.to_string())).collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::ContentBlock, "\tbody\n".to_string()),
            (TokenKind::Identifier, "x".to_string()),
            (TokenKind::Symbol(Symbol::Equals), "=".to_string()),
            (TokenKind::Number(Default::default()), "1".to_string()),
        ]
    );
}

#[test]
fn test_content_block_children_in_source() {
    let tokens = tokenize("x = `ln=en\n\tabc\n`\ny\n").unwrap();
    assert_eq!(tokens.len(), 4);

    let block = &tokens[2];
    assert_eq!(block.value, "\tabc\n");
    let children: Vec<_> = block.children.iter().map(|t| t.value.to_string()).collect();
    assert_eq!(children, vec!["ln", "=", "en"]);
    assert_eq!(block.children[0].start, Position::new(1, 5));
    assert_eq!(tokens[3].start, Position::new(4, 0));
}

#[test]
fn test_shallower_line_in_content_block_in_source() {
    let err = tokenize("\t`\n\t\tdeep\nshallow\n").unwrap_err();
    match err {
        Error::Lex(lex) => {
            assert_eq!(lex.kind, LexErrorKind::UnexpectedIndentLevel);
            assert_eq!(lex.position, Position::new(3, 0));
            assert_eq!(lex.snippet, "shallow");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_tokens_carry_indentation_level() {
    let tokens = tokenize("a\n\tb\n\t\tc\n").unwrap();
    let levels: Vec<_> = tokens.iter().map(|t| t.level).collect();
    assert_eq!(levels, vec![0, 1, 2]);
}
