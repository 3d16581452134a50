//! Command-line driver for the Lua lexer.
//!
//! `main.rs` only dispatches on the command word; the handlers live in
//! [`commands`] so they can be tested without spawning a process.

pub mod commands;
