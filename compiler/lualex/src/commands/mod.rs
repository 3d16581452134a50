//! Command handlers for the `lualex` CLI.
//!
//! Each submodule implements one command. Shared utilities like `read_file`
//! live here in the module root.

use std::io;

mod lex;

pub use lex::{lex_files, parse_lex_options, render_source, FileReport, LexOptions, OptionsError};

/// A source file that could not be read.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("cannot find file '{0}'")]
    NotFound(String),
    #[error("permission denied reading '{0}'")]
    PermissionDenied(String),
    #[error("'{0}' contains invalid UTF-8 data")]
    InvalidUtf8(String),
    #[error("error reading '{path}': {source}")]
    Io { path: String, source: io::Error },
}

/// Read a source file, classifying the common failures.
pub fn read_file(path: &str) -> Result<String, ReadError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound(path.to_owned()),
        io::ErrorKind::PermissionDenied => ReadError::PermissionDenied(path.to_owned()),
        io::ErrorKind::InvalidData => ReadError::InvalidUtf8(path.to_owned()),
        _ => ReadError::Io {
            path: path.to_owned(),
            source: e,
        },
    })
}
