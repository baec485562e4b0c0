use matlex::lexer::options::{LexerOptions, UnknownCharPolicy};
use matlex::lexer::{Lexer, lex};
use matlex::{Engine, TokenKind};

fn tokens(source: &str, variables: &[&str], functions: &[&str]) -> Vec<(TokenKind, String)> {
    lex(source, variables, functions)
        .expect("lexing should succeed")
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

#[test]
fn lex_indexed_variable() {
    assert_eq!(
        tokens("X(1)", &["X"], &[]),
        vec![
            tok(TokenKind::Variable, "X"),
            tok(TokenKind::LeftIdxMeta, "("),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::RightIdxMeta, ")"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn lex_function_call_around_index() {
    assert_eq!(
        tokens("sin(X(1))", &["X"], &["sin"]),
        vec![
            tok(TokenKind::Function, "sin"),
            tok(TokenKind::LeftFuncMeta, "("),
            tok(TokenKind::Variable, "X"),
            tok(TokenKind::LeftIdxMeta, "("),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::RightIdxMeta, ")"),
            tok(TokenKind::RightFuncMeta, ")"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn lex_grouping_operators_and_separators() {
    assert_eq!(
        tokens("(U(1)*2)^3/4-1:5,6;", &["U"], &[]),
        vec![
            tok(TokenKind::LeftGroup, "("),
            tok(TokenKind::Variable, "U"),
            tok(TokenKind::LeftIdxMeta, "("),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::RightIdxMeta, ")"),
            tok(TokenKind::Operator, "*"),
            tok(TokenKind::Number, "2"),
            tok(TokenKind::RightGroup, ")"),
            tok(TokenKind::Operator, "^"),
            tok(TokenKind::Number, "3"),
            tok(TokenKind::Operator, "/"),
            tok(TokenKind::Number, "4"),
            tok(TokenKind::Operator, "-"),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Colon, ":"),
            tok(TokenKind::Number, "5"),
            tok(TokenKind::Comma, ","),
            tok(TokenKind::Number, "6"),
            tok(TokenKind::Semicolon, ";"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn lex_matrix_literal() {
    assert_eq!(
        tokens("[X(7);cos(U(2))]", &["X", "U"], &["cos"]),
        vec![
            tok(TokenKind::LeftMatMeta, "["),
            tok(TokenKind::Variable, "X"),
            tok(TokenKind::LeftIdxMeta, "("),
            tok(TokenKind::Number, "7"),
            tok(TokenKind::RightIdxMeta, ")"),
            tok(TokenKind::Semicolon, ";"),
            tok(TokenKind::Function, "cos"),
            tok(TokenKind::LeftFuncMeta, "("),
            tok(TokenKind::Variable, "U"),
            tok(TokenKind::LeftIdxMeta, "("),
            tok(TokenKind::Number, "2"),
            tok(TokenKind::RightIdxMeta, ")"),
            tok(TokenKind::RightFuncMeta, ")"),
            tok(TokenKind::RightMatMeta, "]"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn variable_followed_by_space_does_not_open_an_index() {
    assert_eq!(
        tokens("X (1)", &["X"], &[]),
        vec![
            tok(TokenKind::Variable, "X"),
            tok(TokenKind::LeftGroup, "("),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::RightGroup, ")"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn unknown_characters_accumulate_into_text() {
    assert_eq!(
        tokens("@(X)=X+1", &["X"], &[]),
        vec![
            tok(TokenKind::Text, "@"),
            tok(TokenKind::LeftGroup, "("),
            tok(TokenKind::Variable, "X"),
            tok(TokenKind::RightGroup, ")"),
            tok(TokenKind::Text, "="),
            tok(TokenKind::Variable, "X"),
            tok(TokenKind::Operator, "+"),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn trailing_text_is_flushed_before_eof() {
    assert_eq!(
        tokens("1 %% ", &[], &[]),
        vec![
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Text, "%%"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn whitespace_kept_as_text_when_not_skipped() {
    let lexer = Lexer::new("ws", "1 +\t2")
        .with_options(LexerOptions::new().with_skip_whitespace(false));
    let kinds: Vec<_> = lexer.scanner().map(|t| (t.kind, t.text)).collect();
    assert_eq!(
        kinds,
        vec![
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Text, " "),
            tok(TokenKind::Operator, "+"),
            tok(TokenKind::Text, "\t"),
            tok(TokenKind::Number, "2"),
            tok(TokenKind::Eof, ""),
        ]
    );
}

#[test]
fn spans_point_into_the_source() {
    let source = "cos(X(12)) + 3.5e2";
    let tokens = lex(source, &["X"], &["cos"]).unwrap();
    for token in &tokens {
        assert_eq!(&source[token.span.start..token.span.end], token.text);
    }
    assert_eq!(tokens.last().map(|t| t.span.start), Some(source.len()));
}

#[test]
fn empty_input_is_just_eof() {
    assert_eq!(tokens("", &[], &[]), vec![tok(TokenKind::Eof, "")]);
}

#[test]
fn engine_seeds_every_lexer() {
    let engine = Engine::new()
        .with_variable("X")
        .and_then(|e| e.with_function("sin"))
        .unwrap()
        .with_options(LexerOptions::new().with_unknown_chars(UnknownCharPolicy::Reject));

    let mut lexer = engine.lexer("first", "sin(X(1))*Y");
    lexer.register_variable("Y").unwrap();
    let kinds: Vec<_> = lexer.scanner().map(|t| t.kind).collect();
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));

    // Names registered on one lexer do not leak into the engine.
    let other: Vec<_> = engine.lexer("second", "Y").scanner().map(|t| t.kind).collect();
    assert_eq!(other, vec![TokenKind::Error]);
}

#[test]
fn engine_rejects_conflicting_roles() {
    let err = Engine::new()
        .with_variable("f")
        .and_then(|e| e.with_function("f"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "'f' is already registered as a variable, cannot register it as a function"
    );
}
