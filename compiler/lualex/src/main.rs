//! Lua lexer CLI
//!
//! Scans Lua source files and prints their tokens and lexical diagnostics.

use std::sync::Once;

use lualex::commands::{lex_files, parse_lex_options};

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=lua_lexer=trace lualex lex file.lua`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_level(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" => {
            let options = match parse_lex_options(&args[2..]) {
                Ok(options) => options,
                Err(e) => {
                    eprintln!("error: {e}");
                    eprintln!();
                    eprintln!("Usage: lualex lex <files...> [options]");
                    eprintln!();
                    eprintln!("Options:");
                    eprintln!("  --dialect=<name>     lua5.1, lua5.2, lua5.3 or lua5.4 (default)");
                    eprintln!("  --digit-separators   Accept `_` between digits (1_000)");
                    eprintln!("  --errors-only        Print diagnostics only");
                    eprintln!("  --no-parallel        Scan files one at a time");
                    std::process::exit(1);
                }
            };
            if !lex_files(&options) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("lualex {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Lua lexer");
    println!();
    println!("Usage: lualex <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <files...>       Tokenize files and display tokens and diagnostics");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Lex options:");
    println!("  --dialect=<name>     lua5.1, lua5.2, lua5.3 or lua5.4 (default)");
    println!("  --digit-separators   Accept `_` between digits (1_000)");
    println!("  --errors-only        Print diagnostics only");
    println!("  --no-parallel        Scan files one at a time");
    println!();
    println!("Exit status is 1 when any file has a diagnostic or cannot be read.");
    println!();
    println!("Examples:");
    println!("  lualex lex main.lua");
    println!("  lualex lex --dialect=lua5.1 --errors-only src/*.lua");
    println!("  RUST_LOG=lua_lexer=trace lualex lex main.lua");
}
