//! Lexer diagnostics.
//!
//! Errors are values carried inside `TokenKind::Error`, never thrown: a scan
//! always runs to end of input and yields every diagnostic in one pass.
//!
//! Each error has the shape:
//! - WHERE: `span` locating the problem in source
//! - WHAT: `kind`, whose `Display` is the message template
//! - HOW: [`LexError::suggestion`], an optional actionable hint

use crate::token::Span;

/// A lexical error located in source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{kind}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte range of the problem. For escape errors this is the escape
    /// itself, narrower than the string token that carries it.
    pub span: Span,
}

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum LexErrorKind {
    /// A short string hit a bare line terminator or end of input.
    #[error("unterminated string literal")]
    UnterminatedString,
    /// No `]=*]` closer of the opener's level before end of input.
    #[error("unterminated long {} (level {level})", bracket_noun(*.comment))]
    UnterminatedLongBracket { level: u32, comment: bool },
    /// A backslash in a short string starts no valid escape.
    #[error("invalid escape sequence `\\{escape}`: {reason}")]
    InvalidEscapeSequence { escape: char, reason: EscapeError },
    /// A numeric literal whose prefix matched but whose body is invalid.
    #[error("malformed number: {reason}")]
    MalformedNumber { reason: NumberError },
    /// A codepoint no rule recognizes.
    #[error("unrecognized character {ch:?}")]
    UnrecognizedCharacter { ch: char },
}

fn bracket_noun(comment: bool) -> &'static str {
    if comment {
        "comment"
    } else {
        "string"
    }
}

/// Why an escape sequence was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EscapeError {
    #[error("unknown escape")]
    Unknown,
    /// `\ddd` above 255.
    #[error("decimal escape too large")]
    DecimalOutOfRange,
    /// `\x` not followed by exactly two hexadecimal digits.
    #[error("hexadecimal digit expected")]
    HexDigitExpected,
    /// `\u` without a well-formed `{XXX}` body.
    #[error("malformed unicode escape")]
    MalformedUnicode,
    /// `\u{XXX}` above `0x7FFF_FFFF`.
    #[error("UTF-8 value too large")]
    UnicodeOutOfRange,
    /// `\x`, `\z` or `\u` under a dialect that predates them.
    #[error("not supported by the selected Lua dialect")]
    UnsupportedInDialect,
}

/// Why a numeric literal was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum NumberError {
    /// `1e`, `1e+`, `0x1p`.
    #[error("exponent has no digits")]
    EmptyExponent,
    /// `0x`, `0b`, `0o`.
    #[error("radix prefix has no digits")]
    MissingDigits,
    /// `3abc`, `0b102`.
    #[error("invalid suffix")]
    InvalidSuffix,
    /// `1__0`, `1_`.
    #[error("digit separator must sit between two digits")]
    MisplacedSeparator,
}

impl LexError {
    #[cold]
    pub fn unterminated_string(span: Span) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedString,
            span,
        }
    }

    #[cold]
    pub fn unterminated_long_bracket(span: Span, level: u32, comment: bool) -> Self {
        Self {
            kind: LexErrorKind::UnterminatedLongBracket { level, comment },
            span,
        }
    }

    #[cold]
    pub fn invalid_escape(span: Span, escape: char, reason: EscapeError) -> Self {
        Self {
            kind: LexErrorKind::InvalidEscapeSequence { escape, reason },
            span,
        }
    }

    #[cold]
    pub fn malformed_number(span: Span, reason: NumberError) -> Self {
        Self {
            kind: LexErrorKind::MalformedNumber { reason },
            span,
        }
    }

    #[cold]
    pub fn unrecognized_character(span: Span, ch: char) -> Self {
        Self {
            kind: LexErrorKind::UnrecognizedCharacter { ch },
            span,
        }
    }

    /// An actionable hint for fixing the error, if one applies.
    pub fn suggestion(&self) -> Option<&'static str> {
        let hint = match self.kind {
            LexErrorKind::UnterminatedString => {
                "close the string on the same line, or use a long string `[[...]]` for multi-line text"
            }
            LexErrorKind::UnterminatedLongBracket { level: 0, .. } => "add the closing `]]`",
            LexErrorKind::UnterminatedLongBracket { .. } => {
                "add a closing `]`, the same number of `=` as the opener, and `]`"
            }
            LexErrorKind::InvalidEscapeSequence { reason, .. } => match reason {
                EscapeError::Unknown => {
                    r#"valid escapes are \a \b \f \n \r \t \v \\ \" \' \ddd \xXX \z \u{XXX}; write `\\` for a literal backslash"#
                }
                EscapeError::DecimalOutOfRange => "decimal escapes must be at most `\\255`",
                EscapeError::HexDigitExpected => "write exactly two hex digits, e.g. `\\x41`",
                EscapeError::MalformedUnicode => "write the code point in braces, e.g. `\\u{48}`",
                EscapeError::UnicodeOutOfRange => "code points must be at most `\\u{7FFFFFFF}`",
                EscapeError::UnsupportedInDialect => {
                    "select a newer dialect (`\\x` and `\\z` need lua5.2, `\\u` needs lua5.3)"
                }
            },
            LexErrorKind::MalformedNumber { reason } => match reason {
                NumberError::EmptyExponent => "add digits after the exponent marker, e.g. `1e10`",
                NumberError::MissingDigits => "add digits after the prefix, e.g. `0x1F`",
                NumberError::InvalidSuffix => {
                    "separate the number from the following name with a space or operator"
                }
                NumberError::MisplacedSeparator => "remove the stray `_`",
            },
            LexErrorKind::UnrecognizedCharacter { ch } if !ch.is_ascii() => {
                "non-ASCII text is only allowed inside strings and comments"
            }
            LexErrorKind::UnrecognizedCharacter { .. } => return None,
        };
        Some(hint)
    }
}
