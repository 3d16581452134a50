//! Forward-only byte cursor with bounded look-ahead.
//!
//! The cursor walks the source byte-by-byte. Reads past the end of the source
//! return a virtual `0x00` sentinel instead of indexing out of bounds, so the
//! classifier rules can peek up to three bytes ahead without length checks.
//!
//! # Interior Null Bytes
//!
//! Lua source may legally contain NUL bytes inside strings and comments. The
//! cursor distinguishes them from end of input by comparing `pos` against
//! `source_len`: a `0x00` at `pos < source_len` is real content.

/// Returns the earliest (minimum) of two optional positions.
///
/// Used to combine separate memchr searches when more needles are needed
/// than `memchr3` supports.
fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

/// Forward-only cursor over a source string.
///
/// The cursor is [`Copy`], so a classifier rule can probe on a snapshot and
/// report a length without disturbing the scanner's committed position.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    source: &'a str,
    /// Current read position (byte index into `source`).
    pos: u32,
    /// Length of the scanned content, saturated at `u32::MAX`.
    source_len: u32,
}

/// Size assertion: a cursor is a fat pointer plus two `u32`s.
const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    /// Create a cursor at byte 0.
    ///
    /// Sources longer than `u32::MAX` bytes are scanned up to that limit only.
    pub fn new(source: &'a str) -> Self {
        let source_len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        Self {
            source,
            pos: 0,
            source_len,
        }
    }

    #[inline]
    fn byte_at(&self, pos: u32) -> u8 {
        if pos < self.source_len {
            self.source.as_bytes()[pos as usize]
        } else {
            0
        }
    }

    /// Returns the byte at the current position, or `0x00` at end of input.
    ///
    /// Interior null bytes also return `0x00`; use [`is_eof()`](Self::is_eof)
    /// to distinguish.
    #[inline]
    pub fn current(&self) -> u8 {
        self.byte_at(self.pos)
    }

    /// Returns the byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(1))
    }

    /// Returns the byte two positions ahead of current.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(2))
    }

    /// Returns the byte three positions ahead of current.
    ///
    /// This is the widest look-ahead any rule needs (`--[[`).
    #[inline]
    pub fn peek3(&self) -> u8 {
        self.byte_at(self.pos.saturating_add(3))
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.advance_n(1);
    }

    /// Advance the cursor by `n` bytes, stopping at end of input.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos = self.pos.saturating_add(n).min(self.source_len);
    }

    /// Returns `true` once every source byte has been consumed.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the source content in bytes.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false`, otherwise the loop stops only at end of
    /// input (where the sentinel is still `0`, so it would spin). All the
    /// byte classifiers used by the scanner satisfy this.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.is_eof() && pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 codepoint.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance to the next line terminator (`\n` or `\r`) or end of input.
    ///
    /// Used by the short comment rule; the terminator itself is left for the
    /// newline rule.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = self.remaining();
        if let Some(offset) = memchr::memchr2(b'\n', b'\r', remaining) {
            self.pos += offset as u32;
        } else {
            self.pos = self.source_len;
        }
    }

    /// Advance past ordinary short-string content to the next interesting
    /// byte and return it, or `0` at end of input.
    ///
    /// Interesting bytes: the closing `quote`, `\`, `\n` and `\r`.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = self.remaining();
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);

        if let Some(off) = earliest_of(primary, cr) {
            self.pos += off as u32;
            self.current()
        } else {
            self.pos = self.source_len;
            0
        }
    }

    /// Advance until `byte` is found or end of input is reached.
    ///
    /// Returns `true` if the byte was found; the cursor then sits on it.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until(&mut self, byte: u8) -> bool {
        if let Some(offset) = memchr::memchr(byte, self.remaining()) {
            self.pos += offset as u32;
            true
        } else {
            self.pos = self.source_len;
            false
        }
    }

    /// Advance past horizontal whitespace: space, tab, vertical tab, form feed.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(|b| matches!(b, b' ' | b'\t' | 0x0B | 0x0C));
    }

    /// Consume one line terminator, treating `\r\n` and `\n\r` as a single
    /// terminator. Returns `false` (without moving) if not on a terminator.
    pub fn eat_line_terminator(&mut self) -> bool {
        let first = self.current();
        if first != b'\n' && first != b'\r' {
            return false;
        }
        self.advance();
        let second = self.current();
        if (second == b'\n' || second == b'\r') && second != first {
            self.advance();
        }
        true
    }

    fn remaining(&self) -> &'a [u8] {
        let bytes = self.source.as_bytes();
        &bytes[(self.pos as usize).min(bytes.len())..self.source_len as usize]
    }
}
