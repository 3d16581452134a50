//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner does not resolve keywords, validate escapes, or compute line
//! numbers; those are deferred to the cooking layer.
//!
//! # Design
//!
//! Every classifier rule is a probe: it copies the cursor, measures its
//! maximal match on the copy, and returns a [`RawToken`]. Only
//! [`RawScanner::next_token`] commits an advance. A rule that declines (e.g.
//! `[` not followed by a long-bracket opener) leaves no trace, so the next
//! rule in priority order retries from the same position.
//!
//! Dispatch is on the lead byte. Within an arm, rules are tried in Lua's
//! priority order: long brackets before short comments, numbers before names,
//! three-character operators before two before one.

use crate::config::LexerConfig;
use crate::cursor::Cursor;
use crate::tag::{RawTag, RawToken};

/// Digits consumed by one run of [`RawScanner::eat_digits`].
#[derive(Clone, Copy, Debug, Default)]
struct DigitRun {
    digits: u32,
    misplaced_separator: bool,
}

/// Allocation-free scanner over one source buffer.
///
/// Produces one token at a time as a `(tag, length)` pair. Error conditions
/// are encoded as `RawTag` variants, not as `Result::Err`.
///
/// A `#` at the start of the chunk (after an optional byte order mark) is
/// always a [`RawTag::Shebang`] line, as `luaL_loadfile` skips it, even when
/// the source did not come from a file.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    config: LexerConfig,
    /// Offset of the chunk's first line, past a byte order mark if present.
    chunk_start: u32,
}

impl<'a> RawScanner<'a> {
    /// Create a new scanner from a cursor positioned at the start of a chunk.
    pub fn new(cursor: Cursor<'a>, config: LexerConfig) -> Self {
        let has_bom = cursor.pos() == 0
            && cursor.current() == 0xEF
            && cursor.peek() == 0xBB
            && cursor.peek2() == 0xBF;
        Self {
            cursor,
            config,
            chunk_start: if has_bom { 3 } else { 0 },
        }
    }

    /// Byte offset of the next token.
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next raw token and advance past it.
    ///
    /// Returns `RawTag::Eof` with `len == 0` when the source is exhausted.
    /// Subsequent calls after EOF continue to return `Eof`.
    #[inline]
    pub fn next_token(&mut self) -> RawToken {
        let token = self.classify();
        self.cursor.advance_n(token.len);
        token
    }

    /// Try the classifier rules at the current position without moving.
    fn classify(&self) -> RawToken {
        let c = self.cursor;
        if c.is_eof() {
            return token(RawTag::Eof, 0);
        }
        match c.current() {
            b'-' if c.peek() == b'-' => self.long_comment().unwrap_or_else(|| self.line_comment()),
            b'[' => self
                .long_string()
                .unwrap_or_else(|| token(RawTag::LeftBracket, 1)),
            b'"' | b'\'' => self.short_string(),
            b'0'..=b'9' => self.number(),
            b'.' if c.peek().is_ascii_digit() => self.number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.name(),
            b'#' if c.pos() == self.chunk_start => self.shebang(),

            // Operators, longest first
            b'.' => self.dot(),
            b'=' => self.pair(b'=', RawTag::EqualEqual, RawTag::Equal),
            b'~' => self.tilde(),
            b'<' => self.angle(RawTag::LessEqual, RawTag::Shl, RawTag::Less),
            b'>' => self.angle(RawTag::GreaterEqual, RawTag::Shr, RawTag::Greater),
            b':' => self.colon(),
            b'/' => self.slash(),
            b'&' => self.bitwise(RawTag::Ampersand),
            b'|' => self.bitwise(RawTag::Pipe),
            b'+' => token(RawTag::Plus, 1),
            b'-' => token(RawTag::Minus, 1),
            b'*' => token(RawTag::Star, 1),
            b'%' => token(RawTag::Percent, 1),
            b'^' => token(RawTag::Caret, 1),
            b'#' => token(RawTag::Hash, 1),

            // Punctuation (`[` and `.` handled above)
            b'(' => token(RawTag::LeftParen, 1),
            b')' => token(RawTag::RightParen, 1),
            b'{' => token(RawTag::LeftBrace, 1),
            b'}' => token(RawTag::RightBrace, 1),
            b']' => token(RawTag::RightBracket, 1),
            b';' => token(RawTag::Semicolon, 1),
            b',' => token(RawTag::Comma, 1),

            b'\n' | b'\r' => self.newline(),
            b' ' | b'\t' | 0x0B | 0x0C => self.whitespace(),
            0xEF if c.pos() == 0 && self.chunk_start == 3 => token(RawTag::Whitespace, 3),
            _ => self.invalid_char(),
        }
    }

    // ─── Whitespace & Newlines ─────────────────────────────────────────

    fn whitespace(&self) -> RawToken {
        let mut c = self.cursor;
        c.eat_whitespace();
        self.measured(RawTag::Whitespace, c)
    }

    fn newline(&self) -> RawToken {
        let mut c = self.cursor;
        c.eat_line_terminator();
        self.measured(RawTag::Newline, c)
    }

    // ─── Comments ──────────────────────────────────────────────────────

    /// `--[==[ ... ]==]`. Declines if `--` is not followed by a full opener.
    fn long_comment(&self) -> Option<RawToken> {
        let mut c = self.cursor;
        c.advance_n(2); // consume '--'
        if c.current() != b'[' {
            return None;
        }
        let level = long_bracket_level(c)?;
        c.advance_n(level + 2);
        let tag = if eat_long_bracket_body(&mut c, level) {
            RawTag::LongComment
        } else {
            RawTag::UnterminatedLongComment
        };
        Some(self.measured(tag, c))
    }

    /// `-- ...` up to, not including, the line terminator.
    fn line_comment(&self) -> RawToken {
        let mut c = self.cursor;
        c.advance_n(2); // consume '--'
        c.eat_until_newline_or_eof();
        self.measured(RawTag::LineComment, c)
    }

    /// `#...` on the chunk's first line, skipped by the Lua loader.
    fn shebang(&self) -> RawToken {
        let mut c = self.cursor;
        c.eat_until_newline_or_eof();
        self.measured(RawTag::Shebang, c)
    }

    // ─── Strings ───────────────────────────────────────────────────────

    /// `[==[ ... ]==]`. Declines if `[` does not start a full opener.
    fn long_string(&self) -> Option<RawToken> {
        let mut c = self.cursor;
        let level = long_bracket_level(c)?;
        c.advance_n(level + 2);
        let tag = if eat_long_bracket_body(&mut c, level) {
            RawTag::LongString
        } else {
            RawTag::UnterminatedLongString
        };
        Some(self.measured(tag, c))
    }

    /// `"..."` or `'...'`. Escapes are skipped here and validated when cooking.
    fn short_string(&self) -> RawToken {
        let mut c = self.cursor;
        let quote = c.current();
        c.advance(); // consume opening quote
        let tag = loop {
            match c.skip_to_string_delim(quote) {
                b'\\' => {
                    c.advance(); // consume '\'
                    match c.current() {
                        b'\n' | b'\r' => {
                            c.eat_line_terminator();
                        }
                        b'z' if self.config.dialect.has_hex_escapes() => {
                            c.advance();
                            c.eat_while(is_lua_space);
                        }
                        // May be multi-byte; keep token boundaries on codepoints.
                        _ => c.advance_char(),
                    }
                }
                b'\n' | b'\r' | 0 => break RawTag::UnterminatedString,
                _ => {
                    c.advance(); // consume closing quote
                    break RawTag::ShortString;
                }
            }
        };
        self.measured(tag, c)
    }

    // ─── Names ─────────────────────────────────────────────────────────

    #[inline]
    fn name(&self) -> RawToken {
        let mut c = self.cursor;
        c.advance(); // first char already validated
        c.eat_while(is_ident_continue);
        self.measured(RawTag::Name, c)
    }

    // ─── Operators ─────────────────────────────────────────────────────

    /// Two-byte operator if the next byte is `second`, else the one-byte form.
    fn pair(&self, second: u8, long: RawTag, short: RawTag) -> RawToken {
        if self.cursor.peek() == second {
            token(long, 2)
        } else {
            token(short, 1)
        }
    }

    fn dot(&self) -> RawToken {
        match (self.cursor.peek(), self.cursor.peek2()) {
            (b'.', b'.') => token(RawTag::DotDotDot, 3),
            (b'.', _) => token(RawTag::DotDot, 2),
            _ => token(RawTag::Dot, 1),
        }
    }

    fn tilde(&self) -> RawToken {
        if self.cursor.peek() == b'=' {
            token(RawTag::TildeEqual, 2)
        } else {
            self.bitwise(RawTag::Tilde)
        }
    }

    /// `<` / `>` family: comparison-with-equals, shift, or bare comparison.
    fn angle(&self, with_equal: RawTag, shift: RawTag, bare: RawTag) -> RawToken {
        let next = self.cursor.peek();
        if next == b'=' {
            token(with_equal, 2)
        } else if next == self.cursor.current() && self.config.dialect.has_bitwise_operators() {
            token(shift, 2)
        } else {
            token(bare, 1)
        }
    }

    fn colon(&self) -> RawToken {
        if self.cursor.peek() == b':' && self.config.dialect.has_goto() {
            token(RawTag::ColonColon, 2)
        } else {
            token(RawTag::Colon, 1)
        }
    }

    fn slash(&self) -> RawToken {
        if self.cursor.peek() == b'/' && self.config.dialect.has_bitwise_operators() {
            token(RawTag::SlashSlash, 2)
        } else {
            token(RawTag::Slash, 1)
        }
    }

    /// Single-byte operator that only exists from Lua 5.3 on.
    fn bitwise(&self, tag: RawTag) -> RawToken {
        if self.config.dialect.has_bitwise_operators() {
            token(tag, 1)
        } else {
            self.invalid_char()
        }
    }

    // ─── Numeric Literals ──────────────────────────────────────────────

    #[inline]
    fn number(&self) -> RawToken {
        let mut c = self.cursor;
        let tag = match (c.current(), c.peek()) {
            (b'0', b'x' | b'X') => {
                c.advance_n(2);
                self.hex_number(&mut c)
            }
            (b'0', b'b' | b'B') => {
                c.advance_n(2);
                self.radix_number(&mut c, is_bin_digit, RawTag::BinInt)
            }
            (b'0', b'o' | b'O') => {
                c.advance_n(2);
                self.radix_number(&mut c, is_oct_digit, RawTag::OctInt)
            }
            _ => self.decimal_number(&mut c),
        };

        // Identifier characters glued to a literal belong to it (`3abc`).
        let tag = if is_ident_continue(c.current()) {
            c.eat_while(is_ident_continue);
            if tag.is_error() {
                tag
            } else {
                RawTag::InvalidNumberSuffix
            }
        } else {
            tag
        };
        self.measured(tag, c)
    }

    fn decimal_number(&self, c: &mut Cursor<'_>) -> RawTag {
        let mut tag = RawTag::Int;
        let mut misplaced = false;

        if c.current() != b'.' {
            misplaced |= self.eat_digits(c, is_dec_digit).misplaced_separator;
        }
        // `1.` is a float, but `1..x` is `1` followed by concatenation.
        if c.current() == b'.' && c.peek() != b'.' {
            c.advance();
            misplaced |= self.eat_digits(c, is_dec_digit).misplaced_separator;
            tag = RawTag::Float;
        }
        if matches!(c.current(), b'e' | b'E') {
            match self.eat_exponent(c) {
                Some(run) => misplaced |= run.misplaced_separator,
                None => return RawTag::EmptyExponent,
            }
            tag = RawTag::FloatExp;
        }

        if misplaced {
            RawTag::MisplacedSeparator
        } else {
            tag
        }
    }

    fn hex_number(&self, c: &mut Cursor<'_>) -> RawTag {
        let mut tag = RawTag::HexInt;
        let mut run = self.eat_digits(c, is_hex_digit);

        if self.config.dialect.has_hex_floats() {
            if c.current() == b'.' && c.peek() != b'.' {
                c.advance();
                let fraction = self.eat_digits(c, is_hex_digit);
                run.digits += fraction.digits;
                run.misplaced_separator |= fraction.misplaced_separator;
                tag = RawTag::HexFloat;
            }
            if run.digits > 0 && matches!(c.current(), b'p' | b'P') {
                match self.eat_exponent(c) {
                    Some(exp) => run.misplaced_separator |= exp.misplaced_separator,
                    None => return RawTag::EmptyExponent,
                }
                tag = RawTag::HexFloat;
            }
        }

        if run.digits == 0 {
            RawTag::MissingDigits
        } else if run.misplaced_separator {
            RawTag::MisplacedSeparator
        } else {
            tag
        }
    }

    fn radix_number(&self, c: &mut Cursor<'_>, is_digit: fn(u8) -> bool, tag: RawTag) -> RawTag {
        let run = self.eat_digits(c, is_digit);
        if run.digits == 0 {
            RawTag::MissingDigits
        } else if run.misplaced_separator {
            RawTag::MisplacedSeparator
        } else {
            tag
        }
    }

    /// Consume an exponent marker, optional sign and decimal digits.
    /// Returns `None` if no digit follows the marker.
    fn eat_exponent(&self, c: &mut Cursor<'_>) -> Option<DigitRun> {
        c.advance(); // consume 'e' / 'p'
        if matches!(c.current(), b'+' | b'-') {
            c.advance();
        }
        let run = self.eat_digits(c, is_dec_digit);
        (run.digits > 0).then_some(run)
    }

    /// Consume digits, plus `_` separators when the dialect allows them.
    /// A separator must be followed by a digit.
    fn eat_digits(&self, c: &mut Cursor<'_>, is_digit: fn(u8) -> bool) -> DigitRun {
        let mut run = DigitRun::default();
        loop {
            let b = c.current();
            if is_digit(b) {
                run.digits += 1;
            } else if b == b'_' && self.config.allow_digit_separators {
                if !is_digit(c.peek()) {
                    run.misplaced_separator = true;
                }
            } else {
                return run;
            }
            c.advance();
        }
    }

    // ─── Error tokens ──────────────────────────────────────────────────

    /// One full codepoint that no rule claims.
    fn invalid_char(&self) -> RawToken {
        let mut c = self.cursor;
        c.advance_char();
        self.measured(RawTag::InvalidChar, c)
    }

    /// Token from the committed position up to the probe's position.
    #[inline]
    fn measured(&self, tag: RawTag, probe: Cursor<'_>) -> RawToken {
        token(tag, probe.pos() - self.cursor.pos())
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        if tok.tag == RawTag::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

#[inline]
const fn token(tag: RawTag, len: u32) -> RawToken {
    RawToken { tag, len }
}

/// If `c` sits on a long-bracket opener `[` `=`* `[`, returns its level.
fn long_bracket_level(c: Cursor<'_>) -> Option<u32> {
    let mut c = c;
    c.advance(); // consume '['
    let mut level = 0;
    while c.current() == b'=' {
        level += 1;
        c.advance();
    }
    (c.current() == b'[').then_some(level)
}

/// Consume a long-bracket body through the closer `]` `=`×`level` `]`.
///
/// A closer with a different number of `=` is content. Returns `false`, with
/// the cursor at end of input, if no matching closer exists.
fn eat_long_bracket_body(c: &mut Cursor<'_>, level: u32) -> bool {
    while c.eat_until(b']') {
        c.advance(); // consume ']'
        let mut probe = *c;
        let mut equals = 0;
        while probe.current() == b'=' {
            equals += 1;
            probe.advance();
        }
        if equals == level && probe.current() == b']' {
            probe.advance();
            *c = probe;
            return true;
        }
    }
    false
}

/// 256-byte lookup table for identifier continuation bytes.
/// `true` for a-z, A-Z, 0-9, and underscore; `false` for the `0x00` sentinel.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(
            i as u8,
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_'
        );
        i += 1;
    }
    table
};

/// Returns `true` if `b` is a valid identifier continuation byte.
#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

/// Whitespace skipped by the `\z` escape, line terminators included.
fn is_lua_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

fn is_dec_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

fn is_bin_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

fn is_oct_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

/// Convenience function: tokenize a source string and collect all raw tokens.
///
/// Returns a `Vec<RawToken>` containing all tokens except the final `Eof`.
/// For streaming access, construct a [`RawScanner`] directly.
pub fn tokenize(source: &str, config: LexerConfig) -> Vec<RawToken> {
    RawScanner::new(Cursor::new(source), config).collect()
}
