//! Stream-level guarantees of the Lua lexer on hand-picked inputs.
//!
//! `proptest_scan.rs` checks the same invariants on generated input.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use lua_lexer::{
    scan, scan_to_list, scan_with_config, CommentKind, Dialect, Keyword, LexError, LexErrorKind,
    LexerConfig, NumberError, NumberKind, Operator, Punctuation, Span, StringKind, Token,
    TokenKind,
};
use pretty_assertions::assert_eq;

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).map(|t| t.kind).collect()
}

fn kinds_with(source: &str, config: LexerConfig) -> Vec<TokenKind> {
    scan_with_config(source, config).map(|t| t.kind).collect()
}

/// Rebuild the source from lexemes plus the skipped gaps between them.
fn reassemble(source: &str, tokens: &[Token<'_>]) -> String {
    let mut out = String::new();
    let mut pos = 0usize;
    for token in tokens {
        let start = token.span.start as usize;
        out.push_str(&source[pos..start]);
        out.push_str(token.lexeme);
        pos = token.span.end as usize;
    }
    out.push_str(&source[pos..]);
    out
}

const SAMPLES: &[&str] = &[
    "",
    "local t = { 1, 2.5, 0x1F, \"s\", 'c', [[long]] }",
    "#!/usr/bin/env lua\nprint(\"hi\")\r\n",
    "--[==[ block\ncomment ]==] -- line\n::label:: goto label",
    "a = b // c << 2 >> 1 & 3 | 4 ~ 5 ~= 6",
    "\"unterminated\nnext",
    "[=[never closed",
    "x = 3abc + 0x + 1e + $ + \u{e9}",
    "s = \"bad \\q escape\" .. 'ok'",
    "\u{FEFF}return ...",
];

// === Totality ===

#[test]
fn every_scan_ends_with_one_end_of_input() {
    for source in SAMPLES {
        let tokens = scan_to_list(source);
        let last = tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::EndOfInput, "{source:?}");
        assert_eq!(last.span, Span::point(u32::try_from(source.len()).unwrap()), "{source:?}");
        let count = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::EndOfInput)
            .count();
        assert_eq!(count, 1, "{source:?}");
    }
}

#[test]
fn only_end_of_input_is_empty() {
    for source in SAMPLES {
        for token in scan(source) {
            assert_eq!(
                token.span.is_empty(),
                token.kind == TokenKind::EndOfInput,
                "{token:?} in {source:?}"
            );
        }
    }
}

// === Contiguity and round trip ===

#[test]
fn gaps_between_tokens_are_whitespace_only() {
    for source in SAMPLES {
        let tokens = scan_to_list(source);
        let mut pos = 0u32;
        for token in &tokens {
            assert!(token.span.start >= pos, "{token:?} overlaps in {source:?}");
            let gap = &source[pos as usize..token.span.start as usize];
            assert!(
                gap.chars()
                    .all(|c| matches!(c, ' ' | '\t' | '\x0B' | '\x0C' | '\u{FEFF}')),
                "non-whitespace gap {gap:?} in {source:?}"
            );
            pos = token.span.end;
        }
    }
}

#[test]
fn lexemes_reassemble_the_source() {
    for source in SAMPLES {
        let tokens = scan_to_list(source);
        assert_eq!(reassemble(source, &tokens), *source);
        for token in &tokens {
            assert_eq!(
                token.lexeme,
                &source[token.span.start as usize..token.span.end as usize]
            );
        }
    }
}

// === Longest match ===

#[test]
fn three_dots_are_one_operator() {
    let tokens = scan_to_list("...");
    assert_eq!(tokens[0].kind, TokenKind::Operator(Operator::DotDotDot));
    assert_eq!(tokens[0].span, Span::new(0, 3));
    assert_eq!(tokens.len(), 2);
}

#[test]
fn shared_prefix_operators() {
    assert_eq!(
        kinds("a..b.c"),
        vec![
            TokenKind::Name,
            TokenKind::Operator(Operator::DotDot),
            TokenKind::Name,
            TokenKind::Punctuation(Punctuation::Dot),
            TokenKind::Name,
            TokenKind::EndOfInput,
        ]
    );
    assert_eq!(
        kinds("<<=<"),
        vec![
            TokenKind::Operator(Operator::Shl),
            TokenKind::Operator(Operator::Eq),
            TokenKind::Operator(Operator::Lt),
            TokenKind::EndOfInput,
        ]
    );
}

// === Keyword / name boundary ===

#[test]
fn forever_is_a_name() {
    let tokens = scan_to_list("forever=1");
    let summary: Vec<_> = tokens.iter().map(|t| (t.kind, t.lexeme)).collect();
    assert_eq!(
        summary,
        vec![
            (TokenKind::Name, "forever"),
            (TokenKind::Operator(Operator::Eq), "="),
            (TokenKind::Number(NumberKind::Decimal), "1"),
            (TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn all_keywords_in_context() {
    let source = "if a and not b or c then elseif d then else end \
                  while e do break end repeat until f \
                  for i in g do end function h() return nil, true, false end local j goto k";
    let mut seen: Vec<_> = scan(source)
        .filter_map(|t| match t.kind {
            TokenKind::Keyword(k) => Some(k),
            _ => None,
        })
        .collect();
    seen.sort_by_key(|k| k.as_str());
    seen.dedup();
    assert_eq!(seen, Keyword::ALL.to_vec());
}

// === Long brackets ===

#[test]
fn long_bracket_level_discipline() {
    let tokens = scan_to_list("[==[abc]=]==]");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::String(StringKind::Long { level: 2 }));
    assert_eq!(tokens[0].span, Span::new(0, 13));
    assert_eq!(tokens[0].string_content(), Some("abc]=]"));
}

#[test]
fn unterminated_long_bracket_runs_to_end() {
    let tokens = scan_to_list("[=[unclosed");
    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::Error(LexError::unterminated_long_bracket(
                Span::new(0, 11),
                1,
                false
            )),
            TokenKind::EndOfInput,
        ]
    );
}

#[test]
fn long_comment_versus_short_comment() {
    assert_eq!(
        kinds("--[[ a ]] --[ b\n"),
        vec![
            TokenKind::Comment(CommentKind::Long { level: 0 }),
            TokenKind::Comment(CommentKind::Short),
            TokenKind::Newline,
            TokenKind::EndOfInput,
        ]
    );
}

// === Numbers ===

#[test]
fn numeric_family_disambiguation() {
    let number = |source: &str| scan_to_list(source)[0].kind;
    assert_eq!(number("0x1A"), TokenKind::Number(NumberKind::Hex));
    assert_eq!(number("0b101"), TokenKind::Number(NumberKind::Binary));
    assert_eq!(number("0o17"), TokenKind::Number(NumberKind::Octal));
    assert_eq!(number("3.14e-2"), TokenKind::Number(NumberKind::FloatExponent));
    assert_eq!(number("3.14"), TokenKind::Number(NumberKind::Float));
    assert_eq!(number("0x1p4"), TokenKind::Number(NumberKind::HexFloat));
    assert_eq!(number("007"), TokenKind::Number(NumberKind::Decimal));
    assert_eq!(
        number("1e"),
        TokenKind::Error(LexError::malformed_number(
            Span::new(0, 2),
            NumberError::EmptyExponent
        ))
    );
}

#[test]
fn digit_separators_are_opt_in() {
    let on = LexerConfig::default().with_digit_separators(true);
    assert_eq!(
        kinds_with("1_000", on),
        vec![TokenKind::Number(NumberKind::Decimal), TokenKind::EndOfInput]
    );
    assert!(kinds("1_000")[0].is_error());
}

// === Error recovery ===

#[test]
fn scanning_continues_after_errors() {
    let tokens = scan_to_list("a = \"oops\nb = 1 @ c");
    let errors: Vec<_> = tokens.iter().filter_map(|t| t.kind.error()).collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].kind, LexErrorKind::UnterminatedString);
    assert_eq!(errors[0].span, Span::new(4, 9));
    assert_eq!(
        errors[1].kind,
        LexErrorKind::UnrecognizedCharacter { ch: '@' }
    );
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));
    assert!(tokens.iter().any(|t| t.lexeme == "c"));
}

#[test]
fn invalid_escape_is_one_error_token() {
    let tokens = scan_to_list(r#"s = "a\qb" t"#);
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[2].lexeme, r#""a\qb""#);
    let err = tokens[2].kind.error().unwrap();
    assert_eq!(err.span, Span::new(6, 8));
}

// === Dialects ===

#[test]
fn lua51_falls_back_to_shorter_rules() {
    let lua51 = LexerConfig::new(Dialect::Lua51);
    assert_eq!(
        kinds_with("a // b :: c", lua51),
        vec![
            TokenKind::Name,
            TokenKind::Operator(Operator::Slash),
            TokenKind::Operator(Operator::Slash),
            TokenKind::Name,
            TokenKind::Operator(Operator::Colon),
            TokenKind::Operator(Operator::Colon),
            TokenKind::Name,
            TokenKind::EndOfInput,
        ]
    );
    assert!(kinds_with("a & b", lua51)[1].is_error());
}
