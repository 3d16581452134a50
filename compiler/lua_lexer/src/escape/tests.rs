use super::*;
use crate::lex_error::LexErrorKind;
use pretty_assertions::assert_eq;

fn decode(content: &str) -> Result<Vec<u8>, LexError> {
    unescape(content, 0, Dialect::Lua54)
}

fn reason(result: Result<Vec<u8>, LexError>) -> Option<(char, EscapeError)> {
    match result.err()?.kind {
        LexErrorKind::InvalidEscapeSequence { escape, reason } => Some((escape, reason)),
        _ => None,
    }
}

// === Valid escapes ===

#[test]
fn no_escapes_fast_path() {
    assert_eq!(validate("hello world", 0, Dialect::Lua51), Ok(()));
    assert_eq!(decode("hello world"), Ok(b"hello world".to_vec()));
}

#[test]
fn simple_escapes() {
    assert_eq!(
        decode(r#"\a\b\f\n\r\t\v\\\"\'"#),
        Ok(b"\x07\x08\x0C\n\r\t\x0B\\\"'".to_vec())
    );
}

#[test]
fn plain_runs_between_escapes_are_kept() {
    assert_eq!(decode(r"a\tb\nc"), Ok(b"a\tb\nc".to_vec()));
}

#[test]
fn escaped_line_terminators_become_newline() {
    assert_eq!(decode("a\\\nb"), Ok(b"a\nb".to_vec()));
    assert_eq!(decode("a\\\r\nb"), Ok(b"a\nb".to_vec()));
    assert_eq!(decode("a\\\n\rb"), Ok(b"a\nb".to_vec()));
    assert_eq!(decode("a\\\n\nb"), Ok(b"a\n\nb".to_vec()));
}

#[test]
fn decimal_escapes_take_up_to_three_digits() {
    assert_eq!(decode(r"\65"), Ok(b"A".to_vec()));
    assert_eq!(decode(r"\0"), Ok(vec![0]));
    assert_eq!(decode(r"\255"), Ok(vec![255]));
    assert_eq!(decode(r"\0651"), Ok(b"A1".to_vec()));
}

#[test]
fn hex_escapes_produce_raw_bytes() {
    assert_eq!(decode(r"\x41\xff"), Ok(vec![0x41, 0xFF]));
}

#[test]
fn z_skips_whitespace_and_newlines() {
    assert_eq!(decode("a\\z  \n\t  b"), Ok(b"ab".to_vec()));
    assert_eq!(decode("a\\zb"), Ok(b"ab".to_vec()));
}

#[test]
fn unicode_escapes_encode_utf8() {
    assert_eq!(decode(r"\u{48}"), Ok(b"H".to_vec()));
    assert_eq!(decode(r"\u{E9}"), Ok("\u{e9}".as_bytes().to_vec()));
    assert_eq!(decode(r"\u{1F600}"), Ok("\u{1F600}".as_bytes().to_vec()));
    assert_eq!(decode(r"\u{0000041}"), Ok(b"A".to_vec()));
}

#[test]
fn unicode_escapes_extend_past_char_range() {
    assert_eq!(
        decode(r"\u{7FFFFFFF}"),
        Ok(vec![0xFD, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF])
    );
    assert_eq!(decode(r"\u{110000}"), Ok(vec![0xF4, 0x90, 0x80, 0x80]));
}

// === Invalid escapes ===

#[test]
fn unknown_escape() {
    let err = unescape(r"ab\qc", 10, Dialect::Lua54).err();
    assert_eq!(
        err,
        Some(LexError::invalid_escape(
            Span::new(12, 14),
            'q',
            EscapeError::Unknown
        ))
    );
}

#[test]
fn unknown_multibyte_escape_spans_whole_codepoint() {
    let err = unescape("\\\u{e9}", 0, Dialect::Lua54).err();
    assert_eq!(err.map(|e| e.span), Some(Span::new(0, 3)));
}

#[test]
fn decimal_escape_above_255() {
    let err = unescape(r"\256", 0, Dialect::Lua54).err();
    assert_eq!(
        err,
        Some(LexError::invalid_escape(
            Span::new(0, 4),
            '2',
            EscapeError::DecimalOutOfRange
        ))
    );
}

#[test]
fn hex_escape_needs_two_digits() {
    assert_eq!(
        reason(decode(r"\x4")),
        Some(('x', EscapeError::HexDigitExpected))
    );
    assert_eq!(
        reason(decode(r"\xg0")),
        Some(('x', EscapeError::HexDigitExpected))
    );
}

#[test]
fn malformed_unicode_escapes() {
    for content in [r"\u48", r"\u{}", r"\u{48", r"\u{4G}"] {
        assert_eq!(
            reason(decode(content)),
            Some(('u', EscapeError::MalformedUnicode)),
            "{content:?}"
        );
    }
}

#[test]
fn unicode_escape_above_limit() {
    assert_eq!(
        reason(decode(r"\u{80000000}")),
        Some(('u', EscapeError::UnicodeOutOfRange))
    );
    assert_eq!(
        reason(decode(r"\u{FFFFFFFFFF}")),
        Some(('u', EscapeError::UnicodeOutOfRange))
    );
}

#[test]
fn first_error_wins() {
    let err = unescape(r"\q\w", 0, Dialect::Lua54).err();
    assert_eq!(err.map(|e| e.span), Some(Span::new(0, 2)));
}

// === Dialects ===

#[test]
fn newer_escapes_are_rejected_by_older_dialects() {
    let check = |content: &str, dialect| match validate(content, 0, dialect) {
        Err(LexError {
            kind: LexErrorKind::InvalidEscapeSequence { reason, .. },
            ..
        }) => Some(reason),
        _ => None,
    };
    assert_eq!(
        check(r"\x41", Dialect::Lua51),
        Some(EscapeError::UnsupportedInDialect)
    );
    assert_eq!(
        check(r"\z", Dialect::Lua51),
        Some(EscapeError::UnsupportedInDialect)
    );
    assert_eq!(
        check(r"\u{41}", Dialect::Lua52),
        Some(EscapeError::UnsupportedInDialect)
    );
    assert_eq!(check(r"\x41", Dialect::Lua52), None);
    assert_eq!(check(r"\u{41}", Dialect::Lua53), None);
}
