//! Lexer for Lua source text.
//!
//! Builds on the raw scanner in `lua_lexer_core`: every raw `(tag, len)` pair
//! is cooked into a [`Token`] carrying its kind, exact lexeme, byte span and
//! line/column. Scanning is total: malformed input produces `Error` tokens
//! rather than failures, and every stream ends with exactly one
//! `EndOfInput` token.
//!
//! ```text
//! &str → RawScanner → TokenCooker → TokenStream → Token
//! ```
//!
//! # Usage
//!
//! ```
//! use lua_lexer::{scan, Keyword, TokenKind};
//!
//! let kinds: Vec<_> = scan("local x").map(|t| t.kind).collect();
//! assert_eq!(kinds[0], TokenKind::Keyword(Keyword::Local));
//! assert_eq!(kinds.last(), Some(&TokenKind::EndOfInput));
//! ```

mod cooker;
mod escape;
mod keywords;
mod lex_error;
mod stream;
mod token;

pub use keywords::{lookup as lookup_keyword, Keyword};
pub use lex_error::{EscapeError, LexError, LexErrorKind, NumberError};
pub use lua_lexer_core::{Dialect, LexerConfig, UnknownDialect};
pub use stream::TokenStream;
pub use token::{
    CommentKind, NumberKind, Operator, Punctuation, Span, StringKind, Token, TokenKind,
};

/// Scan Lua source lazily with the default configuration (Lua 5.4).
pub fn scan(source: &str) -> TokenStream<'_> {
    TokenStream::new(source, LexerConfig::default())
}

/// Scan Lua source lazily under the given dialect settings.
pub fn scan_with_config(source: &str, config: LexerConfig) -> TokenStream<'_> {
    TokenStream::new(source, config)
}

/// Scan the whole source eagerly with the default configuration.
pub fn scan_to_list(source: &str) -> Vec<Token<'_>> {
    scan_to_list_with_config(source, LexerConfig::default())
}

/// Scan the whole source eagerly.
///
/// The list always ends with the `EndOfInput` token.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len(), dialect = %config.dialect))]
pub fn scan_to_list_with_config(source: &str, config: LexerConfig) -> Vec<Token<'_>> {
    let tokens: Vec<Token<'_>> = TokenStream::new(source, config).collect();
    let errors = tokens.iter().filter(|t| t.is_error()).count();
    tracing::debug!(tokens = tokens.len(), errors, "scanned source");
    tokens
}
