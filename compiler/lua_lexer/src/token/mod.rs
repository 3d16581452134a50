//! Cooked tokens.
//!
//! A [`Token`] borrows its lexeme from the source buffer, so a token stream
//! never copies text. All classification data lives in the `Copy`
//! [`TokenKind`].

use std::borrow::Cow;
use std::fmt;

use lua_lexer_core::Dialect;

use crate::escape;
use crate::keywords::Keyword;
use crate::lex_error::LexError;

/// Half-open byte range `[start, end)` into the source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`.
    pub const fn point(pos: u32) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Numeric literal family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    /// `42`
    Decimal,
    /// `0x1A`
    Hex,
    /// `0b101`
    Binary,
    /// `0o17`
    Octal,
    /// `3.14`, `1.`, `.5`
    Float,
    /// `1e10`, `3.14e-2`
    FloatExponent,
    /// `0x1.8p3`
    HexFloat,
}

/// String literal form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringKind {
    /// `"..."` or `'...'`; `quote` is the delimiter.
    Short { quote: char },
    /// `[==[ ... ]==]`; `level` counts the `=`.
    Long { level: u32 },
}

/// Comment form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `-- ...` to end of line.
    Short,
    /// `--[==[ ... ]==]`.
    Long { level: u32 },
    /// `#...` on the first line of a chunk.
    Shebang,
}

/// Operator tokens, each with fixed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    DotDotDot,
    DotDot,
    EqEq,
    NotEq,
    LtEq,
    GtEq,
    DoubleColon,
    SlashSlash,
    Shl,
    Shr,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Hash,
    Amp,
    Tilde,
    Pipe,
    Lt,
    Gt,
    Eq,
    Colon,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::DotDotDot => "...",
            Operator::DotDot => "..",
            Operator::EqEq => "==",
            Operator::NotEq => "~=",
            Operator::LtEq => "<=",
            Operator::GtEq => ">=",
            Operator::DoubleColon => "::",
            Operator::SlashSlash => "//",
            Operator::Shl => "<<",
            Operator::Shr => ">>",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Star => "*",
            Operator::Slash => "/",
            Operator::Percent => "%",
            Operator::Caret => "^",
            Operator::Hash => "#",
            Operator::Amp => "&",
            Operator::Tilde => "~",
            Operator::Pipe => "|",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Eq => "=",
            Operator::Colon => ":",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brackets and separators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Punctuation {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Dot,
}

impl Punctuation {
    pub fn as_str(self) -> &'static str {
        match self {
            Punctuation::LParen => "(",
            Punctuation::RParen => ")",
            Punctuation::LBrace => "{",
            Punctuation::RBrace => "}",
            Punctuation::LBracket => "[",
            Punctuation::RBracket => "]",
            Punctuation::Semicolon => ";",
            Punctuation::Comma => ",",
            Punctuation::Dot => ".",
        }
    }
}

impl fmt::Display for Punctuation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Name,
    Number(NumberKind),
    String(StringKind),
    Comment(CommentKind),
    Operator(Operator),
    Punctuation(Punctuation),
    Newline,
    /// Zero-width, always the last token of a stream.
    EndOfInput,
    Error(LexError),
}

impl TokenKind {
    pub fn is_error(self) -> bool {
        matches!(self, TokenKind::Error(_))
    }

    /// The diagnostic carried by an error token.
    pub fn error(self) -> Option<LexError> {
        match self {
            TokenKind::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Short lowercase name of the kind, for listings.
    pub fn category(self) -> &'static str {
        match self {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Name => "name",
            TokenKind::Number(_) => "number",
            TokenKind::String(_) => "string",
            TokenKind::Comment(_) => "comment",
            TokenKind::Operator(_) => "operator",
            TokenKind::Punctuation(_) => "punctuation",
            TokenKind::Newline => "newline",
            TokenKind::EndOfInput => "end of input",
            TokenKind::Error(_) => "error",
        }
    }
}

/// One classified token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Exact source text, quotes and escapes included.
    pub lexeme: &'src str,
    pub span: Span,
    /// 1-based line of `span.start`.
    pub line: u32,
    /// 0-based column of `span.start`, in codepoints.
    pub column: u32,
}

impl<'src> Token<'src> {
    pub fn is_error(&self) -> bool {
        self.kind.is_error()
    }

    /// Raw text between a string's delimiters.
    ///
    /// Escapes are left as written. For long strings a line terminator right
    /// after the opener is dropped, as Lua does.
    pub fn string_content(&self) -> Option<&'src str> {
        match self.kind {
            TokenKind::String(StringKind::Short { .. }) => {
                self.lexeme.get(1..self.lexeme.len().checked_sub(1)?)
            }
            TokenKind::String(StringKind::Long { level }) => {
                long_bracket_body(self.lexeme, level).map(skip_first_newline)
            }
            _ => None,
        }
    }

    /// The bytes a string literal denotes.
    ///
    /// Short strings have their escapes decoded; Lua strings are byte strings,
    /// so `\xFF` yields a lone `0xFF` byte. Long strings are returned verbatim.
    /// Borrows from the source when nothing needs decoding.
    pub fn string_value(&self) -> Option<Cow<'src, [u8]>> {
        let content = self.string_content()?;
        match self.kind {
            TokenKind::String(StringKind::Short { .. }) if content.contains('\\') => {
                // Escapes were validated when the token was cooked, under a
                // dialect no newer than the latest.
                escape::unescape(content, self.span.start + 1, Dialect::Lua54)
                    .ok()
                    .map(Cow::Owned)
            }
            _ => Some(Cow::Borrowed(content.as_bytes())),
        }
    }

    /// Line and column of a byte offset inside this token.
    ///
    /// Useful for diagnostics narrower than their token, such as an invalid
    /// escape in a string that spans several lines.
    pub fn position_at(&self, offset: u32) -> Option<(u32, u32)> {
        let prefix_len = offset.checked_sub(self.span.start)?;
        let prefix = self.lexeme.get(..prefix_len as usize)?;
        let mut pos = Position {
            line: self.line,
            column: self.column,
        };
        pos.advance(prefix);
        Some((pos.line, pos.column))
    }

    /// Comment body without its `--`, brackets or `#`.
    ///
    /// Long comments drop a line terminator right after the opener, as long
    /// strings do.
    pub fn comment_text(&self) -> Option<&'src str> {
        match self.kind {
            TokenKind::Comment(CommentKind::Short) => self.lexeme.get(2..),
            TokenKind::Comment(CommentKind::Long { level }) => {
                long_bracket_body(self.lexeme.get(2..)?, level).map(skip_first_newline)
            }
            TokenKind::Comment(CommentKind::Shebang) => self.lexeme.get(1..),
            _ => None,
        }
    }
}

/// 1-based line and 0-based codepoint column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Position {
    pub(crate) line: u32,
    pub(crate) column: u32,
}

impl Position {
    pub(crate) const START: Position = Position { line: 1, column: 0 };

    /// Move past `text`.
    ///
    /// `\r\n` and `\n\r` count as one line break, matching the scanner's
    /// `Newline` tokens. Continuation bytes do not advance the column.
    pub(crate) fn advance(&mut self, text: &str) {
        let bytes = text.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b @ (b'\n' | b'\r') => {
                    self.line += 1;
                    self.column = 0;
                    let pair = if b == b'\n' { b'\r' } else { b'\n' };
                    if bytes.get(i + 1) == Some(&pair) {
                        i += 1;
                    }
                }
                b if b & 0xC0 != 0x80 => self.column += 1,
                _ => {}
            }
            i += 1;
        }
    }
}

/// Text between `[=*[` and `]=*]` of the given level.
fn long_bracket_body(text: &str, level: u32) -> Option<&str> {
    let delim = usize::try_from(level).ok()? + 2;
    text.get(delim..text.len().checked_sub(delim)?)
}

fn skip_first_newline(text: &str) -> &str {
    ["\r\n", "\n\r", "\n", "\r"]
        .iter()
        .find_map(|nl| text.strip_prefix(nl))
        .unwrap_or(text)
}
