//! Short-string escape processing.
//!
//! The raw scanner only skips over escapes; this module checks and decodes
//! them. Both operations share one walker, so the cooker's validation and
//! [`Token::string_value`](crate::Token::string_value) can never disagree.
//!
//! # Escape set
//!
//! | Escape | Meaning | Dialect |
//! |---|---|---|
//! | `\a \b \f \n \r \t \v` | control characters | all |
//! | `\\ \" \'` | the character itself | all |
//! | `\` + line terminator | a `\n` byte | all |
//! | `\ddd` | byte of 1-3 decimal digits, at most 255 | all |
//! | `\xXX` | byte of exactly two hex digits | 5.2+ |
//! | `\z` | skips following whitespace, line breaks included | 5.2+ |
//! | `\u{XXX}` | UTF-8 encoding of a value up to `0x7FFF_FFFF` | 5.3+ |

use lua_lexer_core::Dialect;

use crate::lex_error::{EscapeError, LexError};
use crate::token::Span;

/// Check every escape in a short string's content.
///
/// `base_offset` is the source offset of `content`, used to locate the error.
pub(crate) fn validate(content: &str, base_offset: u32, dialect: Dialect) -> Result<(), LexError> {
    if !content.contains('\\') {
        return Ok(());
    }
    walk(content, base_offset, dialect, &mut |_| {})
}

/// Decode a short string's content into the bytes it denotes.
pub(crate) fn unescape(
    content: &str,
    base_offset: u32,
    dialect: Dialect,
) -> Result<Vec<u8>, LexError> {
    let mut out = Vec::with_capacity(content.len());
    walk(content, base_offset, dialect, &mut |bytes| {
        out.extend_from_slice(bytes);
    })?;
    Ok(out)
}

/// Feed plain runs and decoded escapes to `emit`, in order.
fn walk(
    content: &str,
    base_offset: u32,
    dialect: Dialect,
    emit: &mut impl FnMut(&[u8]),
) -> Result<(), LexError> {
    let bytes = content.as_bytes();
    let mut i = 0;
    while let Some(found) = bytes[i..].iter().position(|&b| b == b'\\') {
        let esc = i + found;
        emit(&bytes[i..esc]);
        i = decode_one(content, esc, dialect, emit)
            .map_err(|(end, escape, reason)| {
                LexError::invalid_escape(span(base_offset, esc, end), escape, reason)
            })?;
    }
    emit(&bytes[i..]);
    Ok(())
}

/// `(end, escape char, reason)` for a rejected escape starting at `esc`.
type EscapeFailure = (usize, char, EscapeError);

/// Decode the escape whose backslash sits at `esc`; return the offset past it.
fn decode_one(
    content: &str,
    esc: usize,
    dialect: Dialect,
    emit: &mut impl FnMut(&[u8]),
) -> Result<usize, EscapeFailure> {
    let bytes = content.as_bytes();
    let at = |i: usize| bytes.get(i).copied().unwrap_or(0);
    let Some(letter) = content.get(esc + 1..).and_then(|rest| rest.chars().next()) else {
        return Err((esc + 1, '\\', EscapeError::Unknown));
    };

    let simple = match letter {
        'a' => Some(0x07),
        'b' => Some(0x08),
        'f' => Some(0x0C),
        'n' => Some(b'\n'),
        'r' => Some(b'\r'),
        't' => Some(b'\t'),
        'v' => Some(0x0B),
        '\\' => Some(b'\\'),
        '"' => Some(b'"'),
        '\'' => Some(b'\''),
        _ => None,
    };
    if let Some(byte) = simple {
        emit(&[byte]);
        return Ok(esc + 2);
    }

    match letter {
        '\n' | '\r' => {
            emit(b"\n");
            let pair = if letter == '\n' { b'\r' } else { b'\n' };
            Ok(if at(esc + 2) == pair { esc + 3 } else { esc + 2 })
        }
        '0'..='9' => {
            let mut end = esc + 1;
            let mut value = 0u32;
            while end < esc + 4 && at(end).is_ascii_digit() {
                value = value * 10 + u32::from(at(end) - b'0');
                end += 1;
            }
            let byte = u8::try_from(value).map_err(|_| (end, letter, EscapeError::DecimalOutOfRange))?;
            emit(&[byte]);
            Ok(end)
        }
        'x' => {
            if !dialect.has_hex_escapes() {
                return Err((esc + 2, letter, EscapeError::UnsupportedInDialect));
            }
            let mut value = 0u8;
            for end in esc + 2..esc + 4 {
                let digit = hex_value(at(end)).ok_or((end, letter, EscapeError::HexDigitExpected))?;
                value = value * 16 + digit;
            }
            emit(&[value]);
            Ok(esc + 4)
        }
        'z' => {
            if !dialect.has_hex_escapes() {
                return Err((esc + 2, letter, EscapeError::UnsupportedInDialect));
            }
            let mut end = esc + 2;
            while matches!(at(end), b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C) {
                end += 1;
            }
            Ok(end)
        }
        'u' => {
            if !dialect.has_unicode_escapes() {
                return Err((esc + 2, letter, EscapeError::UnsupportedInDialect));
            }
            let (value, end) = unicode_escape(bytes, esc)?;
            let mut buf = [0u8; 6];
            emit(encode_utf8_extended(value, &mut buf));
            Ok(end)
        }
        other => Err((esc + 1 + other.len_utf8(), other, EscapeError::Unknown)),
    }
}

/// Parse `\u{XXX}` at `esc`; returns the value and the offset past `}`.
fn unicode_escape(bytes: &[u8], esc: usize) -> Result<(u32, usize), EscapeFailure> {
    let at = |i: usize| bytes.get(i).copied().unwrap_or(0);
    let malformed = |end: usize| (end, 'u', EscapeError::MalformedUnicode);

    let mut end = esc + 2;
    if at(end) != b'{' {
        return Err(malformed(end));
    }
    end += 1;
    let mut value = u32::from(hex_value(at(end)).ok_or_else(|| malformed(end))?);
    end += 1;
    while let Some(digit) = hex_value(at(end)) {
        end += 1;
        value = value
            .checked_mul(16)
            .map(|v| v + u32::from(digit))
            .filter(|&v| v <= 0x7FFF_FFFF)
            .ok_or((end, 'u', EscapeError::UnicodeOutOfRange))?;
    }
    if at(end) != b'}' {
        return Err(malformed(end));
    }
    Ok((value, end + 1))
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// UTF-8 encoding extended to 31-bit values (up to six bytes), as Lua does.
#[allow(
    clippy::cast_possible_truncation,
    reason = "each value is masked or shifted to fit one byte"
)]
fn encode_utf8_extended(value: u32, buf: &mut [u8; 6]) -> &[u8] {
    if value < 0x80 {
        buf[5] = value as u8;
        return &buf[5..];
    }
    let mut x = value;
    let mut first_byte_max: u32 = 0x3F;
    let mut n = 0;
    loop {
        buf[5 - n] = 0x80 | (x & 0x3F) as u8;
        n += 1;
        x >>= 6;
        first_byte_max >>= 1;
        if x <= first_byte_max {
            break;
        }
    }
    buf[5 - n] = ((!first_byte_max << 1) | x) as u8;
    &buf[5 - n..]
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "source offsets bounded by u32, the scanner's limit"
)]
fn span(base_offset: u32, start: usize, end: usize) -> Span {
    Span::new(base_offset + start as u32, base_offset + end as u32)
}

#[cfg(test)]
mod tests;
