//! Raw scanner for Lua source text.
//!
//! This crate splits a source buffer into `(RawTag, len)` pairs. It does not
//! resolve keywords, validate escapes, or compute line/column positions;
//! those belong to the cooking layer in `lua_lexer`.
//!
//! ```text
//! &str → Cursor → RawScanner (classifier rules) → RawToken { tag, len }
//! ```

mod config;
mod cursor;
mod raw_scanner;
mod tag;

pub use config::{Dialect, LexerConfig, UnknownDialect};
pub use cursor::Cursor;
pub use raw_scanner::{tokenize, RawScanner};
pub use tag::{RawTag, RawToken};
