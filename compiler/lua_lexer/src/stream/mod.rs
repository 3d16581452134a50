//! The scanner loop: a lazy, position-tracking token stream.
//!
//! [`TokenStream`] pulls one raw token at a time from the `RawScanner`,
//! cooks it, stamps it with the line and column of its first byte, and drops
//! trivia. After the zero-width `EndOfInput` token it yields `None` forever.

use std::iter::FusedIterator;

use lua_lexer_core::{Cursor, LexerConfig, RawScanner, RawTag};

use crate::cooker::TokenCooker;
use crate::token::{Position, Span, Token, TokenKind};

/// Lazy iterator over the tokens of one source buffer.
///
/// Owns no shared state; independent streams may run on separate threads.
/// A consumer can stop pulling at any point: the scanner never looks past the
/// end of the token it is currently producing.
pub struct TokenStream<'src> {
    source: &'src str,
    scanner: RawScanner<'src>,
    cooker: TokenCooker<'src>,
    /// Line and column of the next token.
    position: Position,
    finished: bool,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str, config: LexerConfig) -> Self {
        Self {
            source,
            scanner: RawScanner::new(Cursor::new(source), config),
            cooker: TokenCooker::new(source, config.dialect),
            position: Position::START,
            finished: false,
        }
    }
}

impl<'src> Iterator for TokenStream<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }
        loop {
            let offset = self.scanner.pos();
            let raw = self.scanner.next_token();
            let start = offset as usize;
            let lexeme = self
                .source
                .get(start..start + raw.len as usize)
                .unwrap_or_default();
            let Position { line, column } = self.position;
            // A leading byte order mark occupies no column.
            let visible = if offset == 0 {
                lexeme.strip_prefix('\u{FEFF}').unwrap_or(lexeme)
            } else {
                lexeme
            };
            self.position.advance(visible);

            if raw.tag.is_trivia() {
                continue;
            }
            let Some(kind) = self.cooker.cook(raw.tag, offset, raw.len) else {
                continue;
            };
            if raw.tag == RawTag::Eof {
                self.finished = true;
            }
            if let TokenKind::Error(err) = kind {
                tracing::trace!(
                    tag = raw.tag.name(),
                    kind = ?err.kind,
                    span = %err.span,
                    line,
                    column,
                    "lex error"
                );
            }
            return Some(Token {
                kind,
                lexeme,
                span: Span::new(offset, offset + raw.len),
                line,
                column,
            });
        }
    }
}

impl FusedIterator for TokenStream<'_> {}

#[cfg(test)]
mod tests;
