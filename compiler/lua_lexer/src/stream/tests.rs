use super::*;
use crate::keywords::Keyword;
use crate::token::{Operator, Punctuation};
use lua_lexer_core::Dialect;
use pretty_assertions::assert_eq;

fn stream(source: &str) -> TokenStream<'_> {
    TokenStream::new(source, LexerConfig::default())
}

/// `(line, column, lexeme)` for every token.
fn positions(source: &str) -> Vec<(u32, u32, &str)> {
    stream(source)
        .map(|t| (t.line, t.column, t.lexeme))
        .collect()
}

// === Stream shape ===

#[test]
fn empty_source_yields_only_end_of_input() {
    let tokens: Vec<_> = stream("").collect();
    assert_eq!(
        tokens,
        vec![Token {
            kind: TokenKind::EndOfInput,
            lexeme: "",
            span: Span::new(0, 0),
            line: 1,
            column: 0,
        }]
    );
}

#[test]
fn stream_is_fused_after_end_of_input() {
    let mut tokens = stream("x");
    assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::Name));
    assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::EndOfInput));
    assert_eq!(tokens.next(), None);
    assert_eq!(tokens.next(), None);
}

#[test]
fn whitespace_is_not_emitted() {
    let kinds: Vec<_> = stream("  a \t = \x0C 1  ").map(|t| t.kind).collect();
    assert_eq!(kinds.len(), 4);
    assert_eq!(kinds[1], TokenKind::Operator(Operator::Eq));
}

#[test]
fn end_of_input_sits_at_source_length() {
    let source = "return 1 -- done";
    let last = stream(source).last();
    assert_eq!(
        last.map(|t| (t.kind, t.span)),
        Some((TokenKind::EndOfInput, Span::point(16)))
    );
}

#[test]
fn consumer_may_stop_early() {
    let mut tokens = stream("a b c [[never closed");
    let first: Vec<_> = tokens.by_ref().take(2).map(|t| t.lexeme).collect();
    assert_eq!(first, vec!["a", "b"]);
    assert_eq!(tokens.next().map(|t| t.lexeme), Some("c"));
}

#[test]
fn dialect_reaches_the_cooker() {
    let lua51 = LexerConfig::new(Dialect::Lua51);
    let kinds: Vec<_> = TokenStream::new("goto", lua51).map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::Name, TokenKind::EndOfInput]);

    let kinds: Vec<_> = stream("goto").map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Keyword(Keyword::Goto), TokenKind::EndOfInput]
    );
}

// === Line and column ===

#[test]
fn columns_count_from_zero() {
    assert_eq!(
        positions("local x = 1"),
        vec![
            (1, 0, "local"),
            (1, 6, "x"),
            (1, 8, "="),
            (1, 10, "1"),
            (1, 11, ""),
        ]
    );
}

#[test]
fn newline_token_ends_its_line() {
    assert_eq!(
        positions("a\nb"),
        vec![(1, 0, "a"), (1, 1, "\n"), (2, 0, "b"), (2, 1, "")]
    );
}

#[test]
fn crlf_counts_as_one_line() {
    assert_eq!(
        positions("a\r\nb\rc\n\rd"),
        vec![
            (1, 0, "a"),
            (1, 1, "\r\n"),
            (2, 0, "b"),
            (2, 1, "\r"),
            (3, 0, "c"),
            (3, 1, "\n\r"),
            (4, 0, "d"),
            (4, 1, ""),
        ]
    );
}

#[test]
fn multi_line_tokens_advance_lines() {
    let source = "--[[ one\ntwo ]] x [[\n\n]] y";
    assert_eq!(
        positions(source),
        vec![
            (1, 0, "--[[ one\ntwo ]]"),
            (2, 7, "x"),
            (2, 9, "[[\n\n]]"),
            (4, 3, "y"),
            (4, 4, ""),
        ]
    );
}

#[test]
fn escaped_newline_in_string_advances_line() {
    let source = "s = \"a\\\nb\" t";
    let last_two: Vec<_> = positions(source).into_iter().skip(2).collect();
    assert_eq!(last_two, vec![(1, 4, "\"a\\\nb\""), (2, 3, "t"), (2, 4, "")]);
}

#[test]
fn columns_count_codepoints_not_bytes() {
    assert_eq!(
        positions("'\u{e9}\u{e9}' x"),
        vec![(1, 0, "'\u{e9}\u{e9}'"), (1, 5, "x"), (1, 6, "")]
    );
}

#[test]
fn error_tokens_have_positions_too() {
    let tokens: Vec<_> = stream("x\n  $").collect();
    assert_eq!(tokens[2].line, 2);
    assert_eq!(tokens[2].column, 2);
    assert!(tokens[2].is_error());
}

#[test]
fn punctuation_positions() {
    let tokens: Vec<_> = stream("f(a, b)").collect();
    assert_eq!(tokens[1].kind, TokenKind::Punctuation(Punctuation::LParen));
    assert_eq!(tokens[3].kind, TokenKind::Punctuation(Punctuation::Comma));
    assert_eq!(tokens[3].column, 3);
}

#[test]
fn leading_byte_order_mark_takes_no_column() {
    assert_eq!(
        positions("\u{FEFF}x y"),
        vec![(1, 0, "x"), (1, 2, "y"), (1, 3, "")]
    );
    assert_eq!(positions("\u{FEFF}  x"), vec![(1, 2, "x"), (1, 3, "")]);
}
