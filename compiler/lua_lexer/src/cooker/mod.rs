//! Token cooking layer.
//!
//! Transforms `(RawTag, len)` pairs from the raw scanner into [`TokenKind`]
//! values: keyword resolution, escape validation, long-bracket levels and
//! diagnostics.
//!
//! ```text
//! source → RawScanner → (RawTag, len) → TokenCooker → TokenKind
//! ```
//!
//! Each `RawTag` category has a dedicated cooking path:
//! - **Operators/punctuation**: direct 1:1 mapping
//! - **Names**: keyword lookup under the configured dialect
//! - **Numbers**: family from the tag; malformed tags become errors
//! - **Strings**: short strings validate escapes, long strings record their level
//! - **Errors**: `TokenKind::Error` carrying a `LexError`

use lua_lexer_core::{Dialect, RawTag};

use crate::escape;
use crate::keywords;
use crate::lex_error::{LexError, NumberError};
use crate::token::{CommentKind, NumberKind, Operator, Punctuation, Span, StringKind, TokenKind};

/// Cooks raw tokens into [`TokenKind`] values.
///
/// Stateless with respect to individual tokens: each `cook()` call is
/// independent, so errors travel inside the returned kind.
pub(crate) struct TokenCooker<'src> {
    source: &'src str,
    dialect: Dialect,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(source: &'src str, dialect: Dialect) -> Self {
        Self { source, dialect }
    }

    /// Cook a single raw token.
    ///
    /// Returns `None` for trivia, which never reaches the token stream.
    #[inline]
    pub(crate) fn cook(&self, tag: RawTag, offset: u32, len: u32) -> Option<TokenKind> {
        let kind = match tag {
            RawTag::Whitespace => return None,

            RawTag::Name => self.cook_name(offset, len),

            // Numeric literals
            RawTag::Int => TokenKind::Number(NumberKind::Decimal),
            RawTag::HexInt => TokenKind::Number(NumberKind::Hex),
            RawTag::BinInt => TokenKind::Number(NumberKind::Binary),
            RawTag::OctInt => TokenKind::Number(NumberKind::Octal),
            RawTag::Float => TokenKind::Number(NumberKind::Float),
            RawTag::FloatExp => TokenKind::Number(NumberKind::FloatExponent),
            RawTag::HexFloat => TokenKind::Number(NumberKind::HexFloat),

            // Strings and comments
            RawTag::ShortString => self.cook_short_string(offset, len),
            RawTag::LongString => TokenKind::String(StringKind::Long {
                level: self.bracket_level(offset),
            }),
            RawTag::LineComment => TokenKind::Comment(CommentKind::Short),
            RawTag::LongComment => TokenKind::Comment(CommentKind::Long {
                level: self.bracket_level(offset + 2),
            }),
            RawTag::Shebang => TokenKind::Comment(CommentKind::Shebang),
            RawTag::Newline => TokenKind::Newline,

            // Operators
            RawTag::DotDotDot => TokenKind::Operator(Operator::DotDotDot),
            RawTag::DotDot => TokenKind::Operator(Operator::DotDot),
            RawTag::EqualEqual => TokenKind::Operator(Operator::EqEq),
            RawTag::TildeEqual => TokenKind::Operator(Operator::NotEq),
            RawTag::LessEqual => TokenKind::Operator(Operator::LtEq),
            RawTag::GreaterEqual => TokenKind::Operator(Operator::GtEq),
            RawTag::ColonColon => TokenKind::Operator(Operator::DoubleColon),
            RawTag::SlashSlash => TokenKind::Operator(Operator::SlashSlash),
            RawTag::Shl => TokenKind::Operator(Operator::Shl),
            RawTag::Shr => TokenKind::Operator(Operator::Shr),
            RawTag::Plus => TokenKind::Operator(Operator::Plus),
            RawTag::Minus => TokenKind::Operator(Operator::Minus),
            RawTag::Star => TokenKind::Operator(Operator::Star),
            RawTag::Slash => TokenKind::Operator(Operator::Slash),
            RawTag::Percent => TokenKind::Operator(Operator::Percent),
            RawTag::Caret => TokenKind::Operator(Operator::Caret),
            RawTag::Hash => TokenKind::Operator(Operator::Hash),
            RawTag::Ampersand => TokenKind::Operator(Operator::Amp),
            RawTag::Tilde => TokenKind::Operator(Operator::Tilde),
            RawTag::Pipe => TokenKind::Operator(Operator::Pipe),
            RawTag::Less => TokenKind::Operator(Operator::Lt),
            RawTag::Greater => TokenKind::Operator(Operator::Gt),
            RawTag::Equal => TokenKind::Operator(Operator::Eq),
            RawTag::Colon => TokenKind::Operator(Operator::Colon),

            // Punctuation
            RawTag::LeftParen => TokenKind::Punctuation(Punctuation::LParen),
            RawTag::RightParen => TokenKind::Punctuation(Punctuation::RParen),
            RawTag::LeftBrace => TokenKind::Punctuation(Punctuation::LBrace),
            RawTag::RightBrace => TokenKind::Punctuation(Punctuation::RBrace),
            RawTag::LeftBracket => TokenKind::Punctuation(Punctuation::LBracket),
            RawTag::RightBracket => TokenKind::Punctuation(Punctuation::RBracket),
            RawTag::Semicolon => TokenKind::Punctuation(Punctuation::Semicolon),
            RawTag::Comma => TokenKind::Punctuation(Punctuation::Comma),
            RawTag::Dot => TokenKind::Punctuation(Punctuation::Dot),

            // Error tags
            RawTag::UnterminatedString => {
                TokenKind::Error(LexError::unterminated_string(span(offset, len)))
            }
            RawTag::UnterminatedLongString => TokenKind::Error(LexError::unterminated_long_bracket(
                span(offset, len),
                self.bracket_level(offset),
                false,
            )),
            RawTag::UnterminatedLongComment => {
                TokenKind::Error(LexError::unterminated_long_bracket(
                    span(offset, len),
                    self.bracket_level(offset + 2),
                    true,
                ))
            }
            RawTag::EmptyExponent => malformed(offset, len, NumberError::EmptyExponent),
            RawTag::MissingDigits => malformed(offset, len, NumberError::MissingDigits),
            RawTag::InvalidNumberSuffix => malformed(offset, len, NumberError::InvalidSuffix),
            RawTag::MisplacedSeparator => malformed(offset, len, NumberError::MisplacedSeparator),
            RawTag::InvalidChar => self.cook_invalid_char(offset, len),

            RawTag::Eof => TokenKind::EndOfInput,
        };
        Some(kind)
    }

    fn cook_name(&self, offset: u32, len: u32) -> TokenKind {
        keywords::lookup(self.text(offset, len), self.dialect)
            .map_or(TokenKind::Name, TokenKind::Keyword)
    }

    /// Validate escapes; an invalid one turns the whole literal into an error.
    fn cook_short_string(&self, offset: u32, len: u32) -> TokenKind {
        let text = self.text(offset, len);
        let quote = text.chars().next().unwrap_or('"');
        let content = text.get(1..text.len().saturating_sub(1)).unwrap_or_default();
        match escape::validate(content, offset + 1, self.dialect) {
            Ok(()) => TokenKind::String(StringKind::Short { quote }),
            Err(err) => TokenKind::Error(err),
        }
    }

    #[cold]
    fn cook_invalid_char(&self, offset: u32, len: u32) -> TokenKind {
        let ch = self
            .text(offset, len)
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        TokenKind::Error(LexError::unrecognized_character(span(offset, len), ch))
    }

    /// Number of `=` in the long-bracket opener starting at `open`.
    fn bracket_level(&self, open: u32) -> u32 {
        let opener = self.source.get(open as usize + 1..).unwrap_or_default();
        let equals = opener.bytes().take_while(|&b| b == b'=').count();
        u32::try_from(equals).unwrap_or(u32::MAX)
    }

    fn text(&self, offset: u32, len: u32) -> &'src str {
        let start = offset as usize;
        self.source
            .get(start..start + len as usize)
            .unwrap_or_default()
    }
}

#[inline]
fn span(offset: u32, len: u32) -> Span {
    Span::new(offset, offset + len)
}

#[cold]
fn malformed(offset: u32, len: u32, reason: NumberError) -> TokenKind {
    TokenKind::Error(LexError::malformed_number(span(offset, len), reason))
}
