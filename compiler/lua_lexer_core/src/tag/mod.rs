//! Raw token tags produced by the scanner.

/// Classification of a raw token.
///
/// Discriminants are grouped into semantic ranges:
/// - 0-15: names and literals
/// - 32-63: operators
/// - 80-95: punctuation
/// - 112-127: trivia, line terminators and comments
/// - 240-254: errors
/// - 255: end of input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Names & Literals ===
    /// Identifier or reserved word (keyword resolution happens when cooking).
    Name = 0,
    /// Decimal integer `42`.
    Int = 1,
    /// Hexadecimal integer `0x1A`.
    HexInt = 2,
    /// Binary integer `0b101`.
    BinInt = 3,
    /// Octal integer `0o17`.
    OctInt = 4,
    /// Decimal float with a point and no exponent `3.14`, `1.`, `.5`.
    Float = 5,
    /// Decimal number with an exponent `1e10`, `3.14e-2`.
    FloatExp = 6,
    /// Hexadecimal float `0x1.8p3`, `0xAp-1`.
    HexFloat = 7,
    /// Quoted string `"..."` or `'...'`.
    ShortString = 8,
    /// Long-bracket string `[==[ ... ]==]`.
    LongString = 9,

    // === Operators ===
    /// `...`
    DotDotDot = 32,
    /// `..`
    DotDot = 33,
    /// `==`
    EqualEqual = 34,
    /// `~=`
    TildeEqual = 35,
    /// `<=`
    LessEqual = 36,
    /// `>=`
    GreaterEqual = 37,
    /// `::`
    ColonColon = 38,
    /// `//`
    SlashSlash = 39,
    /// `<<`
    Shl = 40,
    /// `>>`
    Shr = 41,
    /// `+`
    Plus = 42,
    /// `-`
    Minus = 43,
    /// `*`
    Star = 44,
    /// `/`
    Slash = 45,
    /// `%`
    Percent = 46,
    /// `^`
    Caret = 47,
    /// `#`
    Hash = 48,
    /// `&`
    Ampersand = 49,
    /// `~`
    Tilde = 50,
    /// `|`
    Pipe = 51,
    /// `<`
    Less = 52,
    /// `>`
    Greater = 53,
    /// `=`
    Equal = 54,
    /// `:`
    Colon = 55,

    // === Punctuation ===
    /// `(`
    LeftParen = 80,
    /// `)`
    RightParen = 81,
    /// `{`
    LeftBrace = 82,
    /// `}`
    RightBrace = 83,
    /// `[`
    LeftBracket = 84,
    /// `]`
    RightBracket = 85,
    /// `;`
    Semicolon = 86,
    /// `,`
    Comma = 87,
    /// `.`
    Dot = 88,

    // === Trivia & Comments ===
    /// Horizontal whitespace run (also a leading byte order mark).
    Whitespace = 112,
    /// One line terminator: `\n`, `\r`, `\r\n` or `\n\r`.
    Newline = 113,
    /// `-- ...` to end of line.
    LineComment = 114,
    /// `--[==[ ... ]==]`.
    LongComment = 115,
    /// `#...` first line of a chunk.
    Shebang = 116,

    // === Errors ===
    /// Short string hit a bare line terminator or end of input.
    UnterminatedString = 240,
    /// Long string without a closer of the same level.
    UnterminatedLongString = 241,
    /// Long comment without a closer of the same level.
    UnterminatedLongComment = 242,
    /// Exponent marker with no digits (`1e`, `0x1p+`).
    EmptyExponent = 243,
    /// Radix prefix with no digits (`0x`, `0b`, `0o`).
    MissingDigits = 244,
    /// Identifier characters glued to a number (`3abc`, `0b102`).
    InvalidNumberSuffix = 245,
    /// Digit separator not between two digits (`1__0`, `1_`).
    MisplacedSeparator = 246,
    /// A codepoint no rule recognizes.
    InvalidChar = 247,

    // === Control ===
    /// End of input. Always zero length.
    Eof = 255,
}

impl RawTag {
    /// Fixed source text for tags that always have the same lexeme.
    ///
    /// Returns `None` for tags whose text varies (names, literals, comments,
    /// trivia, errors) and for [`Newline`](Self::Newline), which has several
    /// spellings.
    pub fn lexeme(self) -> Option<&'static str> {
        let text = match self {
            Self::DotDotDot => "...",
            Self::DotDot => "..",
            Self::EqualEqual => "==",
            Self::TildeEqual => "~=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::ColonColon => "::",
            Self::SlashSlash => "//",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Hash => "#",
            Self::Ampersand => "&",
            Self::Tilde => "~",
            Self::Pipe => "|",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "=",
            Self::Colon => ":",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            _ => return None,
        };
        Some(text)
    }

    /// Human-readable description, for diagnostics and debug output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Int => "integer literal",
            Self::HexInt => "hex integer literal",
            Self::BinInt => "binary integer literal",
            Self::OctInt => "octal integer literal",
            Self::Float => "float literal",
            Self::FloatExp => "float literal with exponent",
            Self::HexFloat => "hex float literal",
            Self::ShortString => "string literal",
            Self::LongString => "long string literal",
            Self::DotDotDot => "`...`",
            Self::DotDot => "`..`",
            Self::EqualEqual => "`==`",
            Self::TildeEqual => "`~=`",
            Self::LessEqual => "`<=`",
            Self::GreaterEqual => "`>=`",
            Self::ColonColon => "`::`",
            Self::SlashSlash => "`//`",
            Self::Shl => "`<<`",
            Self::Shr => "`>>`",
            Self::Plus => "`+`",
            Self::Minus => "`-`",
            Self::Star => "`*`",
            Self::Slash => "`/`",
            Self::Percent => "`%`",
            Self::Caret => "`^`",
            Self::Hash => "`#`",
            Self::Ampersand => "`&`",
            Self::Tilde => "`~`",
            Self::Pipe => "`|`",
            Self::Less => "`<`",
            Self::Greater => "`>`",
            Self::Equal => "`=`",
            Self::Colon => "`:`",
            Self::LeftParen => "`(`",
            Self::RightParen => "`)`",
            Self::LeftBrace => "`{`",
            Self::RightBrace => "`}`",
            Self::LeftBracket => "`[`",
            Self::RightBracket => "`]`",
            Self::Semicolon => "`;`",
            Self::Comma => "`,`",
            Self::Dot => "`.`",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::LineComment => "comment",
            Self::LongComment => "long comment",
            Self::Shebang => "shebang line",
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedLongString => "unterminated long string",
            Self::UnterminatedLongComment => "unterminated long comment",
            Self::EmptyExponent => "empty exponent",
            Self::MissingDigits => "missing digits",
            Self::InvalidNumberSuffix => "malformed number",
            Self::MisplacedSeparator => "misplaced digit separator",
            Self::InvalidChar => "unrecognized character",
            Self::Eof => "end of input",
        }
    }

    /// Trivia is scanned but never emitted into the token stream.
    ///
    /// Newlines and comments are NOT trivia: both are tokens in their own right.
    pub fn is_trivia(self) -> bool {
        self == Self::Whitespace
    }

    /// Returns `true` for tags that denote a diagnostic.
    pub fn is_error(self) -> bool {
        (self as u8) >= 240 && self != Self::Eof
    }
}

/// A `(tag, length)` pair; the offset is implied by the sum of prior lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub tag: RawTag,
    /// Length in bytes. Zero only for [`RawTag::Eof`].
    pub len: u32,
}
