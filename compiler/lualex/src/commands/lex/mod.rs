//! The `lex` command: scan Lua files and print tokens and diagnostics.
//!
//! Files are scanned in parallel and rendered into [`FileReport`]s; printing
//! happens afterwards so output follows the order files were given in.

use std::fmt::Write as _;

use lua_lexer::{scan_with_config, Dialect, LexError, LexerConfig, Token, UnknownDialect};
use rayon::prelude::*;

use super::read_file;

/// Options for `lualex lex`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexOptions {
    pub files: Vec<String>,
    pub config: LexerConfig,
    /// Print diagnostics only, no token listing.
    pub errors_only: bool,
    /// Scan files one at a time on the calling thread.
    pub no_parallel: bool,
}

/// Rejected command-line arguments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error(transparent)]
    Dialect(#[from] UnknownDialect),
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("no input files")]
    NoFiles,
}

/// Parse the arguments following `lex`.
pub fn parse_lex_options(args: &[String]) -> Result<LexOptions, OptionsError> {
    let mut options = LexOptions::default();

    for arg in args {
        if let Some(name) = arg.strip_prefix("--dialect=") {
            options.config.dialect = name.parse::<Dialect>()?;
        } else if arg == "--digit-separators" {
            options.config.allow_digit_separators = true;
        } else if arg == "--errors-only" {
            options.errors_only = true;
        } else if arg == "--no-parallel" {
            options.no_parallel = true;
        } else if arg.starts_with("--") {
            return Err(OptionsError::UnknownOption(arg.clone()));
        } else {
            options.files.push(arg.clone());
        }
    }

    if options.files.is_empty() {
        return Err(OptionsError::NoFiles);
    }
    Ok(options)
}

/// Rendered output for one input file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    /// Token listing for stdout; empty with `--errors-only`.
    pub listing: String,
    /// Rendered diagnostics for stderr, one entry per error.
    pub diagnostics: Vec<String>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Scan `source` and render its tokens and diagnostics.
pub fn render_source(path: &str, source: &str, options: &LexOptions) -> FileReport {
    let mut report = FileReport::default();
    let mut count = 0usize;

    for token in scan_with_config(source, options.config) {
        count += 1;
        if let Some(err) = token.kind.error() {
            report.diagnostics.push(render_diagnostic(path, &token, err));
        }
        if !options.errors_only {
            let _ = writeln!(
                report.listing,
                "  {:>4}:{:<4} {:<12} {:?}",
                token.line,
                token.column + 1,
                token.kind.category(),
                token.lexeme
            );
        }
    }

    if !options.errors_only {
        report.listing.insert_str(0, &format!("Tokens for '{path}' ({count} tokens):\n"));
    }
    report
}

/// Read and scan one file. Read failures become a diagnostic.
fn render_file(path: &str, options: &LexOptions) -> FileReport {
    match read_file(path) {
        Ok(source) => render_source(path, &source, options),
        Err(e) => FileReport {
            listing: String::new(),
            diagnostics: vec![format!("error: {e}")],
        },
    }
}

/// `path:line:column: error: message`, plus a help line when the error has
/// a suggestion. Columns are printed 1-based.
fn render_diagnostic(path: &str, token: &Token<'_>, err: LexError) -> String {
    let (line, column) = token
        .position_at(err.span.start)
        .unwrap_or((token.line, token.column));
    let mut out = format!("{path}:{line}:{}: error: {err}", column + 1);
    if let Some(help) = err.suggestion() {
        let _ = write!(out, "\n  help: {help}");
    }
    out
}

/// Scan every file in `options` and print the results in input order.
///
/// Returns `true` when no file had a diagnostic or a read failure.
#[tracing::instrument(level = "debug", skip_all, fields(files = options.files.len()))]
pub fn lex_files(options: &LexOptions) -> bool {
    let reports = if options.no_parallel {
        render_sequential(options)
    } else {
        render_parallel(options)
    };

    let mut clean = true;
    for report in &reports {
        print!("{}", report.listing);
        for diagnostic in &report.diagnostics {
            eprintln!("{diagnostic}");
        }
        clean &= !report.has_errors();
    }

    let failed = reports.iter().filter(|r| r.has_errors()).count();
    tracing::debug!(failed, "lexed files");
    clean
}

fn render_sequential(options: &LexOptions) -> Vec<FileReport> {
    options
        .files
        .iter()
        .map(|path| render_file(path, options))
        .collect()
}

/// Scan files on a scoped rayon pool. `collect` on an indexed parallel
/// iterator keeps input order.
fn render_parallel(options: &LexOptions) -> Vec<FileReport> {
    rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| {
                options
                    .files
                    .par_iter()
                    .map(|path| render_file(path, options))
                    .collect::<Vec<_>>()
            })
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), scanning sequentially");
            render_sequential(options)
        })
}
